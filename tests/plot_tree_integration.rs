//! Integration tests for the plot tree: transitions, coordinate contexts and hover

mod common;

use common::builders::TraceBuilder;
use common::{assert_float_eq, rendered_plotter, TRANSITION_MS};
use flowplot_rs::config::SurfaceLayout;
use flowplot_rs::plot::{surface, CoordinateContext, PlotTree, Surface};
use flowplot_rs::render::{ElementKey, ElementKind, Offset, Phase};
use flowplot_rs::{AppConfig, Plotter};

fn ten_lines() -> TraceBuilder {
    TraceBuilder::new("ten.py")
        .visit_all(1..=10)
        .visit_with_effects(5, "stmt_5()", &["x = 5"])
}

fn flow_point_center(plotter: &Plotter, step_uid: u64) -> Offset {
    let layers = plotter.plot().layers();
    let view = layers
        .iter()
        .find(|v| v.component == surface::FLOW_POINTS)
        .unwrap();
    let rect = view
        .layer
        .get(&ElementKey::Step(step_uid))
        .unwrap()
        .bounds(view.origin);
    Offset::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

#[test]
fn test_first_render_fades_in() {
    let mut plotter = rendered_plotter(ten_lines().build());
    let flow_points = plotter.plot().layer(surface::FLOW_POINTS).unwrap();
    assert_eq!(flow_points.len(), 11);
    assert!(flow_points
        .iter()
        .all(|e| e.phase == Phase::Entering && e.attrs.opacity == 0.0));

    assert!(plotter.tick(TRANSITION_MS / 2.0));
    assert!(!plotter.tick(TRANSITION_MS));
    let flow_points = plotter.plot().layer(surface::FLOW_POINTS).unwrap();
    assert!(flow_points
        .iter()
        .all(|e| e.phase == Phase::Present && e.attrs.opacity == 1.0));
}

#[test]
fn test_entering_points_start_in_previous_context() {
    let mut plotter = rendered_plotter(ten_lines().build());
    plotter.tick(TRANSITION_MS);

    plotter.submit_filter("lines: 1-5", 1000.0).unwrap();
    plotter.process_events(1000.0);
    plotter.tick(1000.0 + TRANSITION_MS);
    let narrow = plotter.indexed().clone();

    plotter.submit_filter("", 2000.0).unwrap();
    plotter.process_events(2000.0);

    let layout = SurfaceLayout::default().plot.plot_body.flow_points;
    let old = CoordinateContext::compute(&layout, &narrow);
    let new = CoordinateContext::compute(&layout, plotter.indexed());

    // step 7 visits line 8, outside the narrow domain
    let element = plotter
        .plot()
        .layer(surface::FLOW_POINTS)
        .unwrap()
        .get(&ElementKey::Step(7))
        .unwrap();
    let transition = element.transition.unwrap();
    assert_eq!(element.phase, Phase::Entering);
    assert_float_eq(transition.from.y, old.line_top(8), 1e-9);
    assert_float_eq(transition.to.y, new.line_top(8), 1e-9);
    assert_eq!(transition.from.opacity, 0.0);
}

#[test]
fn test_filtered_out_points_exit_after_duration() {
    let mut plotter = rendered_plotter(ten_lines().build());
    plotter.tick(TRANSITION_MS);

    plotter.submit_filter("lines: 1-3", 1000.0).unwrap();
    plotter.process_events(1000.0);

    let layer = plotter.plot().layer(surface::FLOW_POINTS).unwrap();
    assert_eq!(layer.len(), 11);
    assert_eq!(layer.live().count(), 3);

    plotter.tick(1000.0 + TRANSITION_MS - 1.0);
    assert_eq!(plotter.plot().layer(surface::FLOW_POINTS).unwrap().len(), 11);
    plotter.tick(1000.0 + TRANSITION_MS);
    assert_eq!(plotter.plot().layer(surface::FLOW_POINTS).unwrap().len(), 3);

    // line numbers follow the filtered domain
    let numbers = plotter.plot().layer(surface::CODE_LINE_NUMBERS).unwrap();
    let lines: Vec<_> = numbers.live().map(|e| e.data.line_number).collect();
    assert_eq!(lines, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn test_interrupted_transition_last_write_wins() {
    let mut plotter = rendered_plotter(ten_lines().build());
    plotter.tick(TRANSITION_MS);

    plotter.submit_filter("lines: 1-5", 1000.0).unwrap();
    plotter.process_events(1000.0);
    plotter.tick(1350.0);
    plotter.submit_filter("lines: 1-10", 1350.0).unwrap();
    plotter.process_events(1350.0);
    plotter.tick(1350.0 + TRANSITION_MS);

    // every point is back where it started, fully visible
    let layout = SurfaceLayout::default().plot.plot_body.flow_points;
    let ctx = CoordinateContext::compute(&layout, plotter.indexed());
    for element in plotter.plot().layer(surface::FLOW_POINTS).unwrap().iter() {
        let line = element.data.line_number.unwrap();
        assert_float_eq(element.attrs.y, ctx.line_top(line), 1e-9);
        assert_eq!(element.attrs.opacity, 1.0);
    }
}

#[test]
fn test_index_axis_label_follows_mode() {
    let mut plotter = rendered_plotter(ten_lines().build());
    plotter.select_index_mode(flowplot_rs::IndexMode::Time);
    plotter.process_events(100.0);
    plotter.tick(100.0 + TRANSITION_MS);

    let labels: Vec<String> = plotter
        .plot()
        .layers()
        .iter()
        .flat_map(|v| v.layer.iter())
        .filter(|e| e.kind == ElementKind::IndexAxisLabel)
        .map(|e| e.data.text.clone())
        .collect();
    assert_eq!(labels, vec!["elapsed time".to_string()]);
}

#[test]
fn test_pointer_hover_selects_line_and_shows_side_effect() {
    let mut plotter = rendered_plotter(ten_lines().build());
    plotter.tick(TRANSITION_MS);

    let centre = flow_point_center(&plotter, 10);
    plotter.pointer_moved(centre, TRANSITION_MS);

    assert_eq!(plotter.selection().hovered_step(), Some(10));
    assert_eq!(plotter.selection().hovered_line(), Some(5));
    assert_eq!(plotter.selection().status(), Some("x = 5"));
    assert_eq!(plotter.code_text().active_line(), Some(5));

    let code_text = plotter.code_text().layer();
    let selected: Vec<_> = code_text
        .iter()
        .filter(|e| e.selected)
        .map(|e| e.data.line_number)
        .collect();
    assert_eq!(selected, vec![Some(5)]);
    assert_eq!(code_text.len(), 5);

    plotter.pointer_left();
    assert_eq!(plotter.selection().hovered_line(), None);
    assert_eq!(plotter.selection().status(), None);
    assert!(plotter
        .plot()
        .layers()
        .iter()
        .all(|v| v.layer.iter().all(|e| !e.selected)));
}

#[test]
fn test_hover_survives_rerender() {
    let mut plotter = rendered_plotter(ten_lines().build());
    plotter.tick(TRANSITION_MS);
    plotter.hover_line(2, TRANSITION_MS);

    plotter.select_index_mode(flowplot_rs::IndexMode::Histogram);
    plotter.process_events(1000.0);

    let selected_lines: Vec<_> = plotter
        .plot()
        .layers()
        .iter()
        .flat_map(|v| v.layer.live())
        .filter(|e| e.selected)
        .map(|e| e.data.line_number)
        .collect();
    assert!(!selected_lines.is_empty());
    assert!(selected_lines.iter().all(|l| *l == Some(2)));
}

#[test]
fn test_missing_code_text_anchor_fails_creation() {
    let surface = Surface::standard().without(surface::CODE_TEXT);
    let result = Plotter::create(ten_lines().build(), &AppConfig::default(), &surface);
    let err = result.err().unwrap();
    assert!(err.is_fatal());

    // the tree alone does not need the viewer's anchor
    assert!(PlotTree::new(&surface, &SurfaceLayout::default(), TRANSITION_MS).is_ok());
}
