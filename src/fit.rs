use crate::error::BaselineError;

// ---------------------------------------------------------------------------
// FittedLine – y = slope * x + intercept
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    /// Value of the line at `x`.
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate the line at every x.
    pub fn evaluate(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.at(x)).collect()
    }

    /// `n` evenly spaced points on the line between `x_min` and `x_max`
    /// (inclusive), ready for plotting.
    pub fn sample_over(&self, x_min: f64, x_max: f64, n: usize) -> Vec<[f64; 2]> {
        let xs: Vec<f64> = match n {
            0 => Vec::new(),
            1 => vec![x_min],
            _ => {
                let step = (x_max - x_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { x_max } else { x_min + step * i as f64 })
                    .collect()
            }
        };
        let ys = self.evaluate(&xs);
        xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect()
    }
}

// ---------------------------------------------------------------------------
// Fit engine
// ---------------------------------------------------------------------------

/// Anything that can turn paired samples into a straight line.
pub trait LineFitter {
    fn fit(&self, points: &[(f64, f64)]) -> Result<FittedLine, BaselineError>;
}

/// Ordinary least squares of y on x.
///
/// Points are sorted before accumulation, so the result is bit-for-bit
/// identical for every ordering of the same input.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastSquares;

impl LineFitter for LeastSquares {
    fn fit(&self, points: &[(f64, f64)]) -> Result<FittedLine, BaselineError> {
        if points.len() < 2 {
            return Err(BaselineError::InsufficientData(points.len()));
        }

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let n = sorted.len() as f64;
        let mean_x = sorted.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = sorted.iter().map(|p| p.1).sum::<f64>() / n;

        // Centered sums (two-pass) for numerical stability.
        let (sxx, sxy) = sorted.iter().fold((0.0, 0.0), |(sxx, sxy), &(x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

        // All x identical: minimum-norm solution is a flat line through the mean.
        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        Ok(FittedLine {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }
}
