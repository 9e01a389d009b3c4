//! The plot tree.
//!
//! ```text
//! Plot
//! ├── IndexAxis ── IndexNumbers
//! ├── CodeLineAxis ── CodeLineNumbers
//! └── PlotBody
//!     ├── BarSelectorsContainer ── IndexBarSelectors, CodeBarSelectors
//!     ├── FlowPoints
//!     └── CodeLines
//! ```
//!
//! [`PlotTree::update`] hands the same [`IndexedData`] to every component.
//! Each leaf recomputes its [`CoordinateContext`] from its own region and
//! reconciles its [`ElementLayer`]. Selection queries cut across the tree by
//! line number, independent of which component owns an element.

pub mod axes;
pub mod body;
pub mod code_text;
pub mod component;
pub mod context;
pub mod surface;
pub mod ticks;

pub use axes::{CodeLineAxis, CodeLineNumbers, IndexAxis, IndexNumbers};
pub use body::{CodeBarSelectors, CodeLines, FlowPoints, IndexBarSelectors};
pub use code_text::{nearby_window, CodeText, NEARBY_WINDOW};
pub use component::{Component, ComponentBase, Container, ContextStep, LayerView};
pub use context::CoordinateContext;
pub use surface::{require_anchor, AnchorSurface, Surface, STANDARD_ANCHORS};
pub use ticks::{axis_numbers_for_domain, format_tick};

use crate::config::SurfaceLayout;
use crate::error::Result;
use crate::pipeline::IndexedData;
use crate::render::{ElementKey, ElementKind, ElementLayer, Offset};

/// What the pointer is over
#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    pub component: &'static str,
    pub key: ElementKey,
    pub kind: ElementKind,
    pub line_number: Option<u32>,
    pub step_uid: Option<u64>,
    pub side_effect: Option<String>,
}

pub struct PlotTree {
    plot: Container,
}

impl PlotTree {
    /// Build the tree against `surface`, failing on the first missing anchor
    pub fn new(
        surface: &dyn AnchorSurface,
        layout: &SurfaceLayout,
        transition_ms: f64,
    ) -> Result<Self> {
        let plot_layout = &layout.plot;
        let body_layout = &plot_layout.plot_body;
        let bars_layout = &body_layout.bar_selectors;

        let bar_selectors =
            Container::anchored(surface, surface::BAR_SELECTORS_CONTAINER, bars_layout.region)?
                .with_child(IndexBarSelectors::new(
                    surface,
                    bars_layout.index_bar_selectors,
                    transition_ms,
                )?)
                .with_child(CodeBarSelectors::new(
                    surface,
                    bars_layout.code_bar_selectors,
                    transition_ms,
                )?);

        let plot_body = Container::anchored(surface, surface::PLOT_BODY, body_layout.region)?
            .with_child(bar_selectors)
            .with_child(FlowPoints::new(surface, body_layout.flow_points, transition_ms)?)
            .with_child(CodeLines::new(surface, body_layout.code_lines, transition_ms)?);

        let plot = Container::anchored(surface, surface::PLOT, plot_layout.region)?
            .with_child(IndexAxis::new(surface, &plot_layout.index_axis, transition_ms)?)
            .with_child(CodeLineAxis::new(
                surface,
                &plot_layout.code_line_axis,
                transition_ms,
            )?)
            .with_child(plot_body);

        Ok(Self { plot })
    }

    pub fn update(&mut self, data: &IndexedData, now: f64) {
        tracing::debug!(
            "Plot update: {} points, index {} ({}), lines {}",
            data.flow_points.len(),
            data.index_domain,
            data.index,
            data.code_lines_domain
        );
        self.plot.update(data, now);
    }

    /// Advance every layer; returns whether anything is still animating
    pub fn tick(&mut self, now: f64) -> bool {
        self.plot.tick(now)
    }

    /// Every layer with its absolute origin, in paint order
    pub fn layers(&self) -> Vec<LayerView<'_>> {
        let mut layers = Vec::new();
        self.plot
            .visit_layers(Offset::ZERO, &mut |view| layers.push(view));
        layers
    }

    /// The last layer owned by the named component
    pub fn layer(&self, component: &str) -> Option<&ElementLayer> {
        self.layers()
            .into_iter()
            .filter(|view| view.component == component)
            .last()
            .map(|view| view.layer)
    }

    pub fn is_animating(&self) -> bool {
        self.layers().iter().any(|view| view.layer.is_animating())
    }

    /// Mark every element carrying `line_number` as (un)selected.
    ///
    /// Returns how many elements were touched.
    pub fn select_line(&mut self, line_number: u32, selected: bool) -> usize {
        let mut touched = 0;
        self.plot.visit_layers_mut(&mut |_, layer| {
            for element in layer.iter_mut() {
                if element.data.line_number == Some(line_number) {
                    element.selected = selected;
                    touched += 1;
                }
            }
        });
        touched
    }

    /// Topmost hoverable element under `point`.
    ///
    /// Higher [`ElementKind::hit_priority`] wins; among equals the element
    /// painted last wins. Exiting elements never take hover.
    pub fn hit_test(&self, point: Offset) -> Option<HitTarget> {
        let mut best: Option<(u8, HitTarget)> = None;
        for view in self.layers() {
            for element in view.layer.live() {
                let Some(priority) = element.kind.hit_priority() else {
                    continue;
                };
                if !element.bounds(view.origin).contains(point) {
                    continue;
                }
                if best.as_ref().is_some_and(|(p, _)| *p > priority) {
                    continue;
                }
                best = Some((
                    priority,
                    HitTarget {
                        component: view.component,
                        key: element.key.clone(),
                        kind: element.kind,
                        line_number: element.data.line_number,
                        step_uid: element.data.step_uid,
                        side_effect: element.data.side_effect.clone(),
                    },
                ));
            }
        }
        best.map(|(_, target)| target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{index_points, IndexMode};
    use crate::plot::surface::MockAnchorSurface;
    use crate::types::FlowPoint;

    fn data() -> IndexedData {
        let points = vec![
            FlowPoint::new(0, 0.0, 1.0, "a.py", 1, "a = 1", vec![]),
            FlowPoint::new(1, 1.0, 2.0, "a.py", 2, "b = 2", vec!["b = 2".to_string()]),
            FlowPoint::new(2, 2.0, 3.0, "a.py", 1, "a = 1", vec![]),
        ];
        index_points(&points, IndexMode::Step)
    }

    #[test]
    fn test_missing_anchor_fails_construction() {
        let mut surface = MockAnchorSurface::new();
        surface
            .expect_has_anchor()
            .returning(|anchor| anchor != surface::CODE_BAR_SELECTORS);

        let err = PlotTree::new(&surface, &SurfaceLayout::default(), 700.0)
            .err()
            .unwrap();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("code-bar-selectors"));
    }

    #[test]
    fn test_layers_cover_every_leaf() {
        let tree = PlotTree::new(&Surface::standard(), &SurfaceLayout::default(), 700.0).unwrap();
        let names: Vec<&str> = tree.layers().iter().map(|v| v.component).collect();
        for leaf in [
            surface::INDEX_NUMBERS,
            surface::CODE_LINE_NUMBERS,
            surface::INDEX_BAR_SELECTORS,
            surface::CODE_BAR_SELECTORS,
            surface::FLOW_POINTS,
            surface::CODE_LINES,
        ] {
            assert!(names.contains(&leaf), "missing {}", leaf);
        }
    }

    #[test]
    fn test_select_line_crosses_components() {
        let mut tree =
            PlotTree::new(&Surface::standard(), &SurfaceLayout::default(), 700.0).unwrap();
        tree.update(&data(), 0.0);

        // two flow points, one code line, one line number, one code bar
        assert_eq!(tree.select_line(1, true), 5);
        let selected = tree
            .layers()
            .iter()
            .flat_map(|v| v.layer.iter())
            .filter(|e| e.selected)
            .count();
        assert_eq!(selected, 5);

        tree.select_line(1, false);
        assert!(tree
            .layers()
            .iter()
            .flat_map(|v| v.layer.iter())
            .all(|e| !e.selected));
    }

    #[test]
    fn test_hit_test_prefers_flow_points() {
        let mut tree =
            PlotTree::new(&Surface::standard(), &SurfaceLayout::default(), 700.0).unwrap();
        tree.update(&data(), 0.0);
        tree.tick(700.0);

        // step 1 sits on line 2: x in [1, 1.8] index units, lower half of the body
        let layout = SurfaceLayout::default();
        let origin = layout.plot.region.offset;
        let unit = 500.0 / 2.8;
        let point = Offset::new(origin.x + 1.4 * unit, origin.y + 300.0);

        let hit = tree.hit_test(point).unwrap();
        assert_eq!(hit.kind, ElementKind::FlowPoint);
        assert_eq!(hit.step_uid, Some(1));
        assert_eq!(hit.side_effect.as_deref(), Some("b = 2"));

        // between points only the line bands remain
        let point = Offset::new(origin.x + 0.9 * unit, origin.y + 300.0);
        let hit = tree.hit_test(point).unwrap();
        assert_eq!(hit.line_number, Some(2));
        assert_ne!(hit.kind, ElementKind::FlowPoint);

        assert!(tree.hit_test(Offset::new(-100.0, -100.0)).is_none());
    }
}
