use std::mem;

use crate::data::model::Dataset;
use crate::error::BaselineError;
use crate::fit::{FittedLine, LeastSquares, LineFitter};
use crate::selection::{ReferencePoint, SelectionSet};

// ---------------------------------------------------------------------------
// Events and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Input to [`Controller::step`]. File I/O happens outside the controller:
/// `Load` carries an already-parsed dataset and `Export` hands rows back.
#[derive(Debug, Clone)]
pub enum Event {
    /// A click in plot coordinates. `view_span` is the visible x-axis width.
    Click {
        button: PointerButton,
        x: f64,
        y: f64,
        view_span: f64,
    },
    Load(Dataset),
    Subtract,
    Export,
}

/// What a successful [`Controller::step`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Loaded { samples: usize },
    PointAdded(ReferencePoint),
    /// Right click; `None` if nothing was within reach.
    PointRemoved(Option<ReferencePoint>),
    /// Click with no dataset, or with y outside the data range.
    ClickIgnored,
    Subtracted(FittedLine),
    Exported(Vec<(f64, f64)>),
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The result of the last explicit subtract and the line that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtraction {
    pub line: FittedLine,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Empty,
    Loaded {
        dataset: Dataset,
        selection: SelectionSet,
        fit: Option<FittedLine>,
    },
    Subtracted {
        dataset: Dataset,
        selection: SelectionSet,
        fit: Option<FittedLine>,
        subtraction: Subtraction,
    },
}

impl Session {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            Session::Empty => None,
            Session::Loaded { dataset, .. } | Session::Subtracted { dataset, .. } => Some(dataset),
        }
    }

    pub fn selection(&self) -> Option<&SelectionSet> {
        match self {
            Session::Empty => None,
            Session::Loaded { selection, .. } | Session::Subtracted { selection, .. } => {
                Some(selection)
            }
        }
    }

    pub fn fit(&self) -> Option<FittedLine> {
        match self {
            Session::Empty => None,
            Session::Loaded { fit, .. } | Session::Subtracted { fit, .. } => *fit,
        }
    }

    pub fn subtraction(&self) -> Option<&Subtraction> {
        match self {
            Session::Subtracted { subtraction, .. } => Some(subtraction),
            _ => None,
        }
    }

    /// A subtraction exists but the live fit has moved on since.
    pub fn is_stale(&self) -> bool {
        match self {
            Session::Subtracted {
                fit, subtraction, ..
            } => *fit != Some(subtraction.line),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the session and turns events into state transitions.
pub struct Controller<F: LineFitter = LeastSquares> {
    session: Session,
    fitter: F,
    radius_fraction: f64,
}

impl Controller<LeastSquares> {
    pub fn new(radius_fraction: f64) -> Self {
        Self::with_fitter(LeastSquares, radius_fraction)
    }
}

impl<F: LineFitter> Controller<F> {
    pub fn with_fitter(fitter: F, radius_fraction: f64) -> Self {
        Self {
            session: Session::Empty,
            fitter,
            radius_fraction,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process one event to completion.
    ///
    /// On error the session is exactly as it was before the call.
    pub fn step(&mut self, event: Event) -> Result<Outcome, BaselineError> {
        match event {
            Event::Load(dataset) => Ok(self.load(dataset)),
            Event::Click {
                button,
                x,
                y,
                view_span,
            } => Ok(self.click(button, x, y, view_span)),
            Event::Subtract => self.subtract(),
            Event::Export => self.export_rows().map(Outcome::Exported),
        }
    }

    fn load(&mut self, dataset: Dataset) -> Outcome {
        let samples = dataset.len();
        let mut selection = match mem::take(&mut self.session) {
            Session::Empty => SelectionSet::default(),
            Session::Loaded { selection, .. } | Session::Subtracted { selection, .. } => selection,
        };
        selection.clear();
        self.session = Session::Loaded {
            dataset,
            selection,
            fit: None,
        };
        Outcome::Loaded { samples }
    }

    fn click(&mut self, button: PointerButton, x: f64, y: f64, view_span: f64) -> Outcome {
        let radius_fraction = self.radius_fraction;
        let (dataset, selection, fit) = match &mut self.session {
            Session::Empty => return Outcome::ClickIgnored,
            Session::Loaded {
                dataset,
                selection,
                fit,
            }
            | Session::Subtracted {
                dataset,
                selection,
                fit,
                ..
            } => (&*dataset, selection, fit),
        };

        let outcome = match button {
            PointerButton::Primary => {
                let point = ReferencePoint::new(x, y);
                match selection.add(point, dataset) {
                    Ok(()) => Outcome::PointAdded(point),
                    Err(e) => {
                        log::debug!("Ignoring click: {e}");
                        return Outcome::ClickIgnored;
                    }
                }
            }
            PointerButton::Secondary => {
                Outcome::PointRemoved(selection.remove_nearest((x, y), view_span, radius_fraction))
            }
        };

        *fit = refit(&self.fitter, selection);
        outcome
    }

    fn subtract(&mut self) -> Result<Outcome, BaselineError> {
        match mem::take(&mut self.session) {
            Session::Loaded {
                dataset,
                selection,
                fit: Some(line),
            }
            | Session::Subtracted {
                dataset,
                selection,
                fit: Some(line),
                ..
            } => {
                let values = dataset.apply_subtraction(&line);
                self.session = Session::Subtracted {
                    dataset,
                    selection,
                    fit: Some(line),
                    subtraction: Subtraction { line, values },
                };
                Ok(Outcome::Subtracted(line))
            }
            other => {
                self.session = other;
                Err(BaselineError::NoFit)
            }
        }
    }

    /// Rows of the last explicit subtraction.
    pub fn export_rows(&self) -> Result<Vec<(f64, f64)>, BaselineError> {
        match &self.session {
            Session::Subtracted {
                dataset,
                subtraction,
                ..
            } => dataset.export_rows(Some(&subtraction.values)),
            Session::Loaded { dataset, .. } => dataset.export_rows(None),
            Session::Empty => Err(BaselineError::NotReady),
        }
    }
}

/// The line through the current selection, or `None` below two points.
fn refit<F: LineFitter>(fitter: &F, selection: &SelectionSet) -> Option<FittedLine> {
    if selection.len() < 2 {
        return None;
    }
    match fitter.fit(&selection.pairs()) {
        Ok(line) => Some(line),
        Err(e) => {
            log::warn!("Fit failed: {e}");
            None
        }
    }
}
