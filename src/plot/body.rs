//! Plot body leaves: source lines, selector bands and the flow points
//! themselves.

use crate::config::LayoutRegion;
use crate::error::Result;
use crate::pipeline::IndexedData;
use crate::plot::component::{Component, ComponentBase, LayerView};
use crate::plot::context::CoordinateContext;
use crate::plot::surface::{self, require_anchor, AnchorSurface};
use crate::plot::ticks::axis_numbers_for_domain;
use crate::render::{Attrs, ElementData, ElementKey, ElementKind, ElementLayer, ElementSpec, Offset};
use crate::types::{CodeLine, FlowPoint};

/// Implements the layer plumbing shared by single-layer leaves
macro_rules! single_layer_leaf {
    ($leaf:ty) => {
        impl $leaf {
            pub fn layer(&self) -> &ElementLayer {
                &self.layer
            }
        }

        impl Component for $leaf {
            fn base(&self) -> &ComponentBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut ComponentBase {
                &mut self.base
            }

            fn update(&mut self, data: &IndexedData, now: f64) {
                self.ensure_rendered();
                let step = self.advance_context(data);
                self.join(data, step.enter, step.current, now);
            }

            fn tick(&mut self, now: f64) -> bool {
                self.layer.tick(now)
            }

            fn visit_layers<'a>(
                &'a self,
                parent: Offset,
                visitor: &mut dyn FnMut(LayerView<'a>),
            ) {
                visitor(LayerView {
                    component: self.base.name,
                    origin: self.base.origin(parent),
                    layer: &self.layer,
                });
            }

            fn visit_layers_mut(
                &mut self,
                visitor: &mut dyn FnMut(&'static str, &mut ElementLayer),
            ) {
                visitor(self.base.name, &mut self.layer);
            }
        }
    };
}

// ==================== Code Lines ====================

/// Source text of every row, drawn behind the flow points
pub struct CodeLines {
    base: ComponentBase,
    layer: ElementLayer,
}

impl CodeLines {
    pub fn new(surface: &dyn AnchorSurface, layout: LayoutRegion, transition_ms: f64) -> Result<Self> {
        require_anchor(surface, surface::CODE_LINES)?;
        Ok(Self {
            base: ComponentBase::new(surface::CODE_LINES, layout),
            layer: ElementLayer::new(transition_ms),
        })
    }

    fn attrs(ctx: &CoordinateContext, layout: &LayoutRegion, line: u32) -> Attrs {
        Attrs::new(0.0, ctx.line_center(line), layout.width, ctx.code_line_height_unit, 1.0)
    }

    fn join(&mut self, data: &IndexedData, enter: CoordinateContext, current: CoordinateContext, now: f64) {
        let layout = self.base.layout;
        let summary = self.layer.join(
            &data.code_lines,
            |c: &CodeLine| ElementKey::Line(c.line_number),
            |c| ElementSpec {
                kind: ElementKind::CodeLine,
                data: ElementData {
                    text: c.trimmed_text().to_string(),
                    indent: c.indentation(),
                    line_number: Some(c.line_number),
                    placeholder: c.is_hole,
                    ..Default::default()
                },
                enter_from: Self::attrs(&enter, &layout, c.line_number).with_opacity(0.0),
                target: Self::attrs(&current, &layout, c.line_number),
            },
            |e| {
                let line = e.data.line_number.unwrap_or_default();
                Self::attrs(&current, &layout, line).with_opacity(0.0)
            },
            now,
        );
        tracing::trace!("{}: {:?}", self.base.name, summary);
    }
}

single_layer_leaf!(CodeLines);

// ==================== Index Bar Selectors ====================

/// One full-height band per index tick
pub struct IndexBarSelectors {
    base: ComponentBase,
    layer: ElementLayer,
}

impl IndexBarSelectors {
    pub fn new(surface: &dyn AnchorSurface, layout: LayoutRegion, transition_ms: f64) -> Result<Self> {
        require_anchor(surface, surface::INDEX_BAR_SELECTORS)?;
        Ok(Self {
            base: ComponentBase::new(surface::INDEX_BAR_SELECTORS, layout),
            layer: ElementLayer::new(transition_ms),
        })
    }

    fn attrs(ctx: &CoordinateContext, layout: &LayoutRegion, value: f64, width: f64) -> Attrs {
        Attrs::new(ctx.index_x(value), 0.0, width, layout.height, 1.0)
    }

    fn join(&mut self, data: &IndexedData, enter: CoordinateContext, current: CoordinateContext, now: f64) {
        let layout = self.base.layout;
        let values = axis_numbers_for_domain(data.index_domain, data.index.is_discrete());
        let width = layout.width / values.len().max(1) as f64;

        // bands appear in place and leave without fading
        let summary = self.layer.join(
            &values,
            |v| ElementKey::tick(*v),
            |v| ElementSpec {
                kind: ElementKind::IndexBarSelector,
                data: ElementData {
                    index_value: Some(*v),
                    ..Default::default()
                },
                enter_from: Self::attrs(&enter, &layout, *v, width),
                target: Self::attrs(&current, &layout, *v, width),
            },
            |e| e.attrs,
            now,
        );
        tracing::trace!("{}: {:?}", self.base.name, summary);
    }
}

single_layer_leaf!(IndexBarSelectors);

// ==================== Code Bar Selectors ====================

/// One full-width band per source row
pub struct CodeBarSelectors {
    base: ComponentBase,
    layer: ElementLayer,
}

impl CodeBarSelectors {
    pub fn new(surface: &dyn AnchorSurface, layout: LayoutRegion, transition_ms: f64) -> Result<Self> {
        require_anchor(surface, surface::CODE_BAR_SELECTORS)?;
        Ok(Self {
            base: ComponentBase::new(surface::CODE_BAR_SELECTORS, layout),
            layer: ElementLayer::new(transition_ms),
        })
    }

    fn attrs(ctx: &CoordinateContext, layout: &LayoutRegion, line: u32) -> Attrs {
        Attrs::new(0.0, ctx.line_top(line), layout.width, ctx.code_line_height_unit, 1.0)
    }

    fn join(&mut self, data: &IndexedData, enter: CoordinateContext, current: CoordinateContext, now: f64) {
        let layout = self.base.layout;
        let summary = self.layer.join(
            &data.code_lines,
            |c: &CodeLine| ElementKey::Line(c.line_number),
            |c| ElementSpec {
                kind: ElementKind::CodeBarSelector,
                data: ElementData {
                    line_number: Some(c.line_number),
                    ..Default::default()
                },
                enter_from: Self::attrs(&enter, &layout, c.line_number),
                target: Self::attrs(&current, &layout, c.line_number),
            },
            |e| {
                let line = e.data.line_number.unwrap_or_default();
                Self::attrs(&current, &layout, line)
            },
            now,
        );
        tracing::trace!("{}: {:?}", self.base.name, summary);
    }
}

single_layer_leaf!(CodeBarSelectors);

// ==================== Flow Points ====================

/// One bar per flow point, keyed by step UID
pub struct FlowPoints {
    base: ComponentBase,
    layer: ElementLayer,
}

impl FlowPoints {
    pub fn new(surface: &dyn AnchorSurface, layout: LayoutRegion, transition_ms: f64) -> Result<Self> {
        require_anchor(surface, surface::FLOW_POINTS)?;
        Ok(Self {
            base: ComponentBase::new(surface::FLOW_POINTS, layout),
            layer: ElementLayer::new(transition_ms),
        })
    }

    fn attrs(ctx: &CoordinateContext, index: f64, length: f64, line: u32) -> Attrs {
        Attrs::new(
            ctx.index_x(index),
            ctx.line_top(line),
            ctx.index_width(length),
            ctx.code_line_height_unit,
            1.0,
        )
    }

    fn element_data(point: &FlowPoint) -> ElementData {
        ElementData {
            line_number: Some(point.line_number),
            index_value: Some(point.index),
            index_length: point.length,
            step_uid: Some(point.step_uid),
            side_effect: point.first_side_effect().map(str::to_string),
            has_side_effect: point.has_side_effect(),
            ..Default::default()
        }
    }

    fn join(&mut self, data: &IndexedData, enter: CoordinateContext, current: CoordinateContext, now: f64) {
        let summary = self.layer.join(
            &data.flow_points,
            |p: &FlowPoint| ElementKey::Step(p.step_uid),
            |p| ElementSpec {
                kind: ElementKind::FlowPoint,
                data: Self::element_data(p),
                enter_from: Self::attrs(&enter, p.index, p.length, p.line_number).with_opacity(0.0),
                target: Self::attrs(&current, p.index, p.length, p.line_number),
            },
            |e| {
                // exits move with the new axes but keep their size
                let mut to = Self::attrs(
                    &current,
                    e.data.index_value.unwrap_or_default(),
                    e.data.index_length,
                    e.data.line_number.unwrap_or_default(),
                );
                to.width = e.attrs.width;
                to.height = e.attrs.height;
                to.with_opacity(0.0)
            },
            now,
        );
        tracing::debug!(
            "{}: +{} ~{} -{}",
            self.base.name,
            summary.entered,
            summary.updated,
            summary.exited
        );
    }
}

single_layer_leaf!(FlowPoints);
