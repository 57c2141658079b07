use eframe::egui;

use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyBaselineApp {
    pub state: AppState,
}

impl RustyBaselineApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for RustyBaselineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        let event = egui::CentralPanel::default()
            .show(ctx, |ui| plot::baseline_plot(ui, &self.state))
            .inner;

        if let Some(event) = event {
            self.state.dispatch(event);
        }
    }
}
