use eframe::egui::{self, Color32, RichText, Ui};

use crate::controller::Event;
use crate::data::export;
use crate::error::Severity;
use crate::state::{AppState, PlotView};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the toolbar: Load / Subtract / Save, view toggle and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Load Data (.csv/.txt)…").clicked() {
            open_file_dialog(state);
        }

        if ui
            .add_enabled(state.can_subtract(), egui::Button::new("Subtract Fit Line"))
            .clicked()
        {
            state.dispatch(Event::Subtract);
        }

        if ui
            .add_enabled(state.can_save(), egui::Button::new("Save Subtracted Data…"))
            .clicked()
        {
            save_file_dialog(state);
        }

        ui.separator();

        if state.can_save() {
            for (view, label) in [
                (PlotView::Original, "Original"),
                (PlotView::Subtracted, "Subtracted"),
            ] {
                if ui.selectable_label(state.view == view, label).clicked() {
                    state.view = view;
                }
            }
            if state.controller.session().is_stale() {
                ui.label(
                    RichText::new("fit changed since last subtraction")
                        .color(Color32::YELLOW),
                );
            }
            ui.separator();
        }

        if let Some(session_info) = selection_summary(state) {
            ui.label(session_info);
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let color = match msg.severity {
                Severity::Info => Color32::LIGHT_GRAY,
                Severity::Warning => Color32::YELLOW,
                Severity::Error => Color32::RED,
            };
            ui.label(RichText::new(&msg.text).color(color));
        }
    });
}

fn selection_summary(state: &AppState) -> Option<String> {
    let session = state.controller.session();
    let dataset = session.dataset()?;
    let n_points = session.selection().map_or(0, |s| s.len());
    let fit = match session.fit() {
        Some(line) => format!("y = {:.4} x + {:.4}", line.slope, line.intercept),
        None => "no fit".to_string(),
    };
    Some(format!(
        "{} samples, {n_points} points, {fit}",
        dataset.len()
    ))
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load data")
        .add_filter("CSV or TXT", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let Some(rows) = state.export_rows() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save subtracted data")
        .set_file_name("subtracted.txt")
        .add_filter("Text Files", &["txt"])
        .add_filter("All Files", &["*"])
        .save_file();

    if let Some(path) = file {
        let path = export::with_default_extension(path);
        state.write_export(&path, &rows);
    }
}
