use std::path::Path;

use crate::controller::{Controller, Event, Outcome};
use crate::data::{export, loader};
use crate::error::{BaselineError, Severity};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which curve the plot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotView {
    /// Loaded data with reference points and fit line.
    Original,
    /// Result of the last subtraction.
    Subtracted,
}

/// Message shown in the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub controller: Controller,
    pub settings: Settings,

    /// Curve currently on screen.
    pub view: PlotView,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            controller: Controller::new(settings.removal_radius_fraction),
            settings,
            view: PlotView::Original,
            status_message: None,
        }
    }

    /// Feed one event to the controller and update view and status.
    pub fn dispatch(&mut self, event: Event) -> Option<Outcome> {
        match self.controller.step(event) {
            Ok(outcome) => {
                match &outcome {
                    Outcome::Loaded { samples } => {
                        self.view = PlotView::Original;
                        self.status_message =
                            Some(StatusMessage::info(format!("{samples} samples loaded")));
                    }
                    Outcome::PointAdded(p) => {
                        log::debug!("Selected ({:.4}, {:.4})", p.x, p.y);
                        self.view = PlotView::Original;
                    }
                    Outcome::PointRemoved(removed) => {
                        if let Some(p) = removed {
                            log::debug!("Removed ({:.4}, {:.4})", p.x, p.y);
                        }
                        self.view = PlotView::Original;
                    }
                    Outcome::Subtracted(line) => {
                        log::info!(
                            "Subtracted line y = {:.6} x + {:.6}",
                            line.slope,
                            line.intercept
                        );
                        self.view = PlotView::Subtracted;
                        self.status_message = Some(StatusMessage::info(format!(
                            "Subtracted y = {:.4} x + {:.4}",
                            line.slope, line.intercept
                        )));
                    }
                    Outcome::ClickIgnored | Outcome::Exported(_) => {}
                }
                Some(outcome)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    /// Load a file and install it; on failure the current session is kept.
    pub fn load_from(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} samples from {}", dataset.len(), path.display());
                self.dispatch(Event::Load(dataset));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(StatusMessage::error(format!(
                    "Failed to load data: {e:#}"
                )));
            }
        }
    }

    /// Rows of the last subtraction; reports `NotReady` when there is none.
    pub fn export_rows(&mut self) -> Option<Vec<(f64, f64)>> {
        match self.dispatch(Event::Export)? {
            Outcome::Exported(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn write_export(&mut self, path: &Path, rows: &[(f64, f64)]) {
        match export::save_file(path, rows, self.settings.export_decimals) {
            Ok(()) => {
                log::info!("Saved {} rows to {}", rows.len(), path.display());
                self.status_message = Some(StatusMessage::info(format!(
                    "Subtracted data saved to: {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Failed to save data: {e:#}");
                self.status_message = Some(StatusMessage::error(format!(
                    "Failed to save data: {e:#}"
                )));
            }
        }
    }

    pub fn can_subtract(&self) -> bool {
        self.controller.session().dataset().is_some()
    }

    pub fn can_save(&self) -> bool {
        self.controller.session().subtraction().is_some()
    }

    fn report(&mut self, e: &BaselineError) {
        match e.severity() {
            Severity::Error => log::error!("{e}"),
            Severity::Warning => log::warn!("{e}"),
            Severity::Info => log::info!("{e}"),
        }
        self.status_message = Some(StatusMessage {
            text: e.to_string(),
            severity: e.severity(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PointerButton;

    fn click(x: f64, y: f64) -> Event {
        Event::Click {
            button: PointerButton::Primary,
            x,
            y,
            view_span: 10.0,
        }
    }

    /// Same sequence the save dialog runs once a path is picked.
    fn save(state: &mut AppState, path: &Path) {
        if let Some(rows) = state.export_rows() {
            state.write_export(path, &rows);
        }
    }

    fn loaded_state(dir: &tempfile::TempDir) -> AppState {
        let input = dir.path().join("ramp.txt");
        std::fs::write(&input, "0 0\n1 1\n2 2\n3 3\n").unwrap();
        let mut state = AppState::default();
        state.load_from(&input);
        state
    }

    #[test]
    fn full_session_writes_zero_residuals() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        assert!(state.can_subtract());
        assert!(!state.can_save());

        state.dispatch(click(1.0, 1.0));
        state.dispatch(click(3.0, 3.0));
        state.dispatch(Event::Subtract);
        assert_eq!(state.view, PlotView::Subtracted);
        assert!(state.can_save());

        let out = dir.path().join("out.txt");
        save(&mut state, &out);
        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "0.00000000\t0.00000000");
        assert_eq!(lines[3], "3.00000000\t0.00000000");
    }

    #[test]
    fn save_before_subtract_reports_not_ready_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        let out = dir.path().join("out.txt");

        save(&mut state, &out);
        assert!(!out.exists());
        let status = state.status_message.unwrap();
        assert_eq!(status.text, BaselineError::NotReady.to_string());
        assert_eq!(status.severity, Severity::Info);
    }

    #[test]
    fn subtract_with_one_point_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.dispatch(click(1.0, 1.0));

        assert_eq!(state.dispatch(Event::Subtract), None);
        assert_eq!(state.view, PlotView::Original);
        assert_eq!(
            state.status_message.unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn failed_load_keeps_the_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.dispatch(click(1.0, 1.0));

        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "a,b,c\n1,2,3\n").unwrap();
        state.load_from(&bad);

        assert_eq!(state.status_message.as_ref().unwrap().severity, Severity::Error);
        let session = state.controller.session();
        assert_eq!(session.dataset().unwrap().len(), 4);
        assert_eq!(session.selection().unwrap().len(), 1);
    }

    #[test]
    fn click_after_subtract_returns_to_original_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.dispatch(click(1.0, 1.0));
        state.dispatch(click(3.0, 3.0));
        state.dispatch(Event::Subtract);

        // Out-of-range click changes nothing.
        state.dispatch(click(1.0, 50.0));
        assert_eq!(state.view, PlotView::Subtracted);

        state.dispatch(click(2.0, 2.0));
        assert_eq!(state.view, PlotView::Original);
        assert!(state.can_save());
    }

    #[test]
    fn save_failure_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(&dir);
        state.dispatch(click(1.0, 1.0));
        state.dispatch(click(3.0, 3.0));
        state.dispatch(Event::Subtract);
        let before = state.controller.session().clone();

        save(&mut state, &dir.path().join("missing").join("out.txt"));
        assert_eq!(state.status_message.unwrap().severity, Severity::Error);
        assert_eq!(state.controller.session(), &before);
    }
}
