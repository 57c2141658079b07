use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::controller::{Event, PointerButton};
use crate::state::AppState;

use super::scene::{CurveStyle, Scene};

// ---------------------------------------------------------------------------
// Baseline plot (central panel)
// ---------------------------------------------------------------------------

/// Render the plot and translate clicks on it into controller events.
///
/// The caller dispatches the returned event, so drawing never mutates state.
pub fn baseline_plot(ui: &mut Ui, state: &AppState) -> Option<Event> {
    let scene = match Scene::build(
        state.controller.session(),
        state.view,
        state.settings.fit_line_samples,
    ) {
        Some(scene) => scene,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Load a data file to begin  (Load Data…)");
            });
            return None;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(scene.title);
    });

    let response = Plot::new("baseline_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("x")
        .y_axis_label("y")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in &scene.curves {
                let mut line = Line::new(PlotPoints::from(curve.points.clone()))
                    .name(curve.name)
                    .color(curve.color)
                    .width(1.5);
                if curve.style == CurveStyle::Dashed {
                    line = line.style(LineStyle::dashed_loose());
                }
                plot_ui.line(line);
            }

            for marker in &scene.markers {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![marker.position]))
                        .shape(MarkerShape::Circle)
                        .radius(4.0)
                        .color(marker.color),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(marker.position[0], marker.position[1]),
                        RichText::new(&marker.label).size(11.0),
                    )
                    .anchor(Align2::LEFT_BOTTOM),
                );
            }
        });

    let button = if response.response.clicked() {
        PointerButton::Primary
    } else if response.response.secondary_clicked() {
        PointerButton::Secondary
    } else {
        return None;
    };

    let screen_pos = response.response.interact_pointer_pos()?;
    let value = response.transform.value_from_position(screen_pos);
    let view_span = response.transform.bounds().width();
    Some(Event::Click {
        button,
        x: value.x,
        y: value.y,
        view_span,
    })
}

