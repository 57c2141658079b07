use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong inside the selection / fit / subtract core.
///
/// None of these are fatal: the UI reports them (or swallows them, in the
/// case of [`BaselineError::OutOfRange`]) and the session carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BaselineError {
    /// Input could not be read as two numeric columns.
    #[error("invalid data format: {0}")]
    Format(String),

    /// A clicked y lies outside the loaded data's y-range.
    #[error("y = {y} is outside the data range [{min}, {max}]")]
    OutOfRange { y: f64, min: f64, max: f64 },

    #[error("at least 2 points are required for a fit, got {0}")]
    InsufficientData(usize),

    #[error("Select at least two points to define a line first.")]
    NoFit,

    #[error("No subtracted data to save yet.")]
    NotReady,
}

impl BaselineError {
    /// How loudly the UI should report this error.
    pub fn severity(&self) -> Severity {
        match self {
            BaselineError::Format(_) => Severity::Error,
            BaselineError::NoFit => Severity::Warning,
            BaselineError::NotReady
            | BaselineError::OutOfRange { .. }
            | BaselineError::InsufficientData(_) => Severity::Info,
        }
    }
}

/// Status-line severity used by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}
