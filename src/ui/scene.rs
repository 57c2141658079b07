use eframe::egui::Color32;

use crate::controller::Session;
use crate::state::PlotView;

// ---------------------------------------------------------------------------
// Scene – what the plot should draw, independent of egui_plot
// ---------------------------------------------------------------------------

pub const ORIGINAL_TITLE: &str = "Click to select, right-click to unselect";
pub const SUBTRACTED_TITLE: &str = "Data after Subtracting Fit Line";

const DATA_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const MARKER_COLOR: Color32 = Color32::from_rgb(214, 39, 40);
const FIT_COLOR: Color32 = Color32::from_rgb(44, 160, 44);
const SUBTRACTED_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: &'static str,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    pub style: CurveStyle,
}

/// A reference point with its coordinate label.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: [f64; 2],
    pub label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub title: &'static str,
    pub curves: Vec<Curve>,
    pub markers: Vec<Marker>,
}

impl Scene {
    /// Build the scene for `session`, or `None` when nothing is loaded.
    ///
    /// `PlotView::Subtracted` falls back to the original view if no
    /// subtraction exists.
    pub fn build(session: &Session, view: PlotView, fit_line_samples: usize) -> Option<Scene> {
        let dataset = session.dataset()?;

        if let (PlotView::Subtracted, Some(subtraction)) = (view, session.subtraction()) {
            let points = dataset
                .samples()
                .iter()
                .zip(&subtraction.values)
                .map(|(s, &v)| [s.x, v])
                .collect();
            return Some(Scene {
                title: SUBTRACTED_TITLE,
                curves: vec![Curve {
                    name: "Subtracted Data",
                    points,
                    color: SUBTRACTED_COLOR,
                    style: CurveStyle::Solid,
                }],
                markers: Vec::new(),
            });
        }

        let mut curves = vec![Curve {
            name: "Original Data",
            points: dataset.samples().iter().map(|s| [s.x, s.y]).collect(),
            color: DATA_COLOR,
            style: CurveStyle::Solid,
        }];

        if let Some(line) = session.fit() {
            let (x_min, x_max) = dataset.x_range();
            curves.push(Curve {
                name: "Fit Line",
                points: line.sample_over(x_min, x_max, fit_line_samples),
                color: FIT_COLOR,
                style: CurveStyle::Dashed,
            });
        }

        let markers = session
            .selection()
            .map(|sel| {
                sel.points()
                    .iter()
                    .map(|p| Marker {
                        position: [p.x, p.y],
                        label: format!("({:.2}, {:.2})", p.x, p.y),
                        color: MARKER_COLOR,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Scene {
            title: ORIGINAL_TITLE,
            curves,
            markers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, Event, PointerButton};
    use crate::data::model::Dataset;

    fn click(c: &mut Controller, x: f64, y: f64) {
        c.step(Event::Click {
            button: PointerButton::Primary,
            x,
            y,
            view_span: 10.0,
        })
        .unwrap();
    }

    fn loaded() -> Controller {
        let mut c = Controller::new(0.05);
        let ds = Dataset::from_rows(vec![(0.0, 1.0), (2.0, 3.0), (4.0, 2.0)]).unwrap();
        c.step(Event::Load(ds)).unwrap();
        c
    }

    #[test]
    fn empty_session_has_no_scene() {
        let c = Controller::new(0.05);
        assert_eq!(Scene::build(c.session(), PlotView::Original, 500), None);
    }

    #[test]
    fn markers_are_labelled_and_fit_is_dense_and_dashed() {
        let mut c = loaded();
        click(&mut c, 1.0, 1.5);
        let scene = Scene::build(c.session(), PlotView::Original, 500).unwrap();
        assert_eq!(scene.curves.len(), 1);
        assert_eq!(scene.markers[0].label, "(1.00, 1.50)");

        click(&mut c, 3.0, 2.5);
        let scene = Scene::build(c.session(), PlotView::Original, 500).unwrap();
        assert_eq!(scene.title, ORIGINAL_TITLE);
        assert_eq!(scene.markers.len(), 2);
        let fit = &scene.curves[1];
        assert_eq!(fit.style, CurveStyle::Dashed);
        assert_eq!(fit.points.len(), 500);
        assert_eq!(fit.points[0][0], 0.0);
        assert_eq!(fit.points[499][0], 4.0);
    }

    #[test]
    fn subtracted_view_shows_only_the_residual_curve() {
        let mut c = loaded();
        click(&mut c, 0.0, 1.0);
        click(&mut c, 4.0, 2.0);
        c.step(Event::Subtract).unwrap();

        let scene = Scene::build(c.session(), PlotView::Subtracted, 500).unwrap();
        assert_eq!(scene.title, SUBTRACTED_TITLE);
        assert!(scene.markers.is_empty());
        assert_eq!(scene.curves.len(), 1);
        assert_eq!(scene.curves[0].points.len(), 3);
    }

    #[test]
    fn subtracted_view_without_subtraction_falls_back() {
        let c = loaded();
        let scene = Scene::build(c.session(), PlotView::Subtracted, 500).unwrap();
        assert_eq!(scene.title, ORIGINAL_TITLE);
    }
}
