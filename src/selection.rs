use crate::data::model::Dataset;
use crate::error::BaselineError;

/// A user-chosen point the baseline is fitted through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub x: f64,
    pub y: f64,
}

impl ReferencePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

// ---------------------------------------------------------------------------
// SelectionSet
// ---------------------------------------------------------------------------

/// Reference points in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    points: Vec<ReferencePoint>,
}

impl SelectionSet {
    /// Append `point` if its y lies within the dataset's y-range.
    pub fn add(&mut self, point: ReferencePoint, dataset: &Dataset) -> Result<(), BaselineError> {
        if !dataset.contains_y(point.y) {
            let (min, max) = dataset.y_range();
            return Err(BaselineError::OutOfRange {
                y: point.y,
                min,
                max,
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Remove the point closest to the click, if it is nearer than
    /// `radius_fraction * view_span`.
    ///
    /// Ties go to the earliest point. Returns the removed point, or `None`
    /// when nothing qualified.
    pub fn remove_nearest(
        &mut self,
        click: (f64, f64),
        view_span: f64,
        radius_fraction: f64,
    ) -> Option<ReferencePoint> {
        let threshold = radius_fraction * view_span;
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance_to(click.0, click.1);
            if d < threshold && best.map_or(true, |(_, min)| d < min) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| self.points.remove(i))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    /// Points as plain (x, y) pairs for the fit engine.
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}
