use crate::error::BaselineError;
use crate::fit::FittedLine;

// ---------------------------------------------------------------------------
// Sample – one row of the two-column input
// ---------------------------------------------------------------------------

/// A single (x, y) pair of the loaded data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded series
// ---------------------------------------------------------------------------

/// The loaded series with its pre-computed y-range.
///
/// Never empty: [`Dataset::from_rows`] rejects zero rows, so the range
/// accessors are always well defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
    y_min: f64,
    y_max: f64,
}

impl Dataset {
    /// Validate parsed rows and build the dataset.
    pub fn from_rows(rows: Vec<(f64, f64)>) -> Result<Self, BaselineError> {
        if rows.is_empty() {
            return Err(BaselineError::Format("no data rows found".into()));
        }
        if let Some(i) = rows
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(BaselineError::Format(format!(
                "row {i}: values must be finite numbers"
            )));
        }

        let y_min = rows.iter().map(|r| r.1).fold(f64::INFINITY, f64::min);
        let y_max = rows.iter().map(|r| r.1).fold(f64::NEG_INFINITY, f64::max);
        let samples = rows.into_iter().map(|(x, y)| Sample { x, y }).collect();

        Ok(Dataset {
            samples,
            y_min,
            y_max,
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Smallest and largest y value.
    pub fn y_range(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    /// Smallest and largest x value (x need not be sorted).
    pub fn x_range(&self) -> (f64, f64) {
        let min = self.samples.iter().map(|s| s.x).fold(f64::INFINITY, f64::min);
        let max = self
            .samples
            .iter()
            .map(|s| s.x)
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    /// Whether `y` lies inside the closed y-range of the data.
    pub fn contains_y(&self, y: f64) -> bool {
        self.y_min <= y && y <= self.y_max
    }

    /// Residual of every sample against `line`, aligned by index.
    pub fn apply_subtraction(&self, line: &FittedLine) -> Vec<f64> {
        let xs: Vec<f64> = self.samples.iter().map(|s| s.x).collect();
        self.samples
            .iter()
            .zip(line.evaluate(&xs))
            .map(|(s, baseline)| s.y - baseline)
            .collect()
    }

    /// Pair each x with its subtracted value for export.
    ///
    /// Fails with [`BaselineError::NotReady`] when no subtraction exists.
    pub fn export_rows(&self, subtracted: Option<&[f64]>) -> Result<Vec<(f64, f64)>, BaselineError> {
        let subtracted = subtracted.ok_or(BaselineError::NotReady)?;
        debug_assert_eq!(subtracted.len(), self.samples.len());
        Ok(self
            .samples
            .iter()
            .zip(subtracted)
            .map(|(s, &v)| (s.x, v))
            .collect())
    }
}
