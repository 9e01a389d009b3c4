//! Axis components: the index axis along the bottom and the code-line axis
//! down the left side.

use crate::config::{CodeLineAxisLayout, IndexAxisLayout, LayoutRegion};
use crate::error::Result;
use crate::pipeline::IndexedData;
use crate::plot::component::{Component, ComponentBase, LayerView};
use crate::plot::context::CoordinateContext;
use crate::plot::surface::{self, require_anchor, AnchorSurface};
use crate::plot::ticks::{axis_numbers_for_domain, format_tick};
use crate::render::{
    Attrs, ElementData, ElementKey, ElementKind, ElementLayer, ElementSpec, Offset, VisualElement,
};
use crate::types::CodeLine;

/// Height given to single-line text elements
const TEXT_HEIGHT: f64 = 15.0;

fn axis_bar(attrs: Attrs) -> VisualElement {
    VisualElement::new(
        ElementKey::Static("axis-bar"),
        ElementKind::AxisBar,
        ElementData::default(),
        attrs,
    )
}

/// Join a single fading label into `layer`
fn join_label(layer: &mut ElementLayer, text: Option<String>, kind: ElementKind, at: Attrs, now: f64) {
    let items: Vec<String> = text.into_iter().collect();
    layer.join(
        &items,
        |text| ElementKey::label(text.as_str()),
        |text| ElementSpec {
            kind,
            data: ElementData {
                text: text.clone(),
                ..Default::default()
            },
            enter_from: at.with_opacity(0.0),
            target: at.with_opacity(1.0),
        },
        |e| e.attrs.with_opacity(0.0),
        now,
    );
}

// ==================== Index Axis ====================

pub struct IndexAxis {
    base: ComponentBase,
    bar: ElementLayer,
    label: ElementLayer,
    index_numbers: IndexNumbers,
}

impl IndexAxis {
    pub fn new(
        surface: &dyn AnchorSurface,
        layout: &IndexAxisLayout,
        transition_ms: f64,
    ) -> Result<Self> {
        require_anchor(surface, surface::INDEX_AXIS)?;
        Ok(Self {
            base: ComponentBase::new(surface::INDEX_AXIS, layout.region),
            bar: ElementLayer::new(0.0),
            label: ElementLayer::new(transition_ms),
            index_numbers: IndexNumbers::new(surface, layout.index_numbers, transition_ms)?,
        })
    }
}

impl Component for IndexAxis {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn render(&mut self) {
        // one unit wider so zero-length points at the far end stay on the bar
        let width = self.base.layout.width + 1.0;
        self.bar
            .insert_static(axis_bar(Attrs::new(0.0, 5.0, width, 5.0, 1.0)));
    }

    fn update(&mut self, data: &IndexedData, now: f64) {
        self.ensure_rendered();
        self.advance_context(data);

        let layout = self.base.layout;
        let at = Attrs::new(layout.width / 2.0, 40.0, layout.width, TEXT_HEIGHT, 1.0);
        join_label(
            &mut self.label,
            Some(data.index.axis_label().to_string()),
            ElementKind::IndexAxisLabel,
            at,
            now,
        );

        self.index_numbers.update(data, now);
    }

    fn tick(&mut self, now: f64) -> bool {
        let label = self.label.tick(now);
        self.index_numbers.tick(now) | label
    }

    fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>)) {
        let origin = self.base.origin(parent);
        visitor(LayerView {
            component: self.base.name,
            origin,
            layer: &self.bar,
        });
        visitor(LayerView {
            component: self.base.name,
            origin,
            layer: &self.label,
        });
        self.index_numbers.visit_layers(origin, visitor);
    }

    fn visit_layers_mut(&mut self, visitor: &mut dyn FnMut(&'static str, &mut ElementLayer)) {
        visitor(self.base.name, &mut self.bar);
        visitor(self.base.name, &mut self.label);
        self.index_numbers.visit_layers_mut(visitor);
    }
}

/// Tick numbers along the index axis
pub struct IndexNumbers {
    base: ComponentBase,
    layer: ElementLayer,
}

impl IndexNumbers {
    pub fn new(
        surface: &dyn AnchorSurface,
        layout: LayoutRegion,
        transition_ms: f64,
    ) -> Result<Self> {
        require_anchor(surface, surface::INDEX_NUMBERS)?;
        Ok(Self {
            base: ComponentBase::new(surface::INDEX_NUMBERS, layout),
            layer: ElementLayer::new(transition_ms),
        })
    }
}

fn index_number_attrs(ctx: &CoordinateContext, layout: &LayoutRegion, value: f64, width: f64) -> Attrs {
    Attrs::new(ctx.index_x(value), 0.0, width, layout.height, 1.0)
}

impl Component for IndexNumbers {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, data: &IndexedData, now: f64) {
        self.ensure_rendered();
        let step = self.advance_context(data);
        let layout = self.base.layout;

        let values = axis_numbers_for_domain(data.index_domain, data.index.is_discrete());
        let width = layout.width / values.len().max(1) as f64;

        let summary = self.layer.join(
            &values,
            |v| ElementKey::tick(*v),
            |v| ElementSpec {
                kind: ElementKind::IndexNumber,
                data: ElementData {
                    text: format_tick(*v),
                    index_value: Some(*v),
                    ..Default::default()
                },
                enter_from: index_number_attrs(&step.enter, &layout, *v, width).with_opacity(0.0),
                target: index_number_attrs(&step.current, &layout, *v, width),
            },
            |e| {
                let value = e.data.index_value.unwrap_or_default();
                index_number_attrs(&step.current, &layout, value, e.attrs.width).with_opacity(0.0)
            },
            now,
        );
        tracing::trace!("{}: {:?}", self.base.name, summary);
    }

    fn tick(&mut self, now: f64) -> bool {
        self.layer.tick(now)
    }

    fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>)) {
        visitor(LayerView {
            component: self.base.name,
            origin: self.base.origin(parent),
            layer: &self.layer,
        });
    }

    fn visit_layers_mut(&mut self, visitor: &mut dyn FnMut(&'static str, &mut ElementLayer)) {
        visitor(self.base.name, &mut self.layer);
    }
}

// ==================== Code Line Axis ====================

pub struct CodeLineAxis {
    base: ComponentBase,
    bar: ElementLayer,
    label: ElementLayer,
    code_line_numbers: CodeLineNumbers,
}

impl CodeLineAxis {
    pub fn new(
        surface: &dyn AnchorSurface,
        layout: &CodeLineAxisLayout,
        transition_ms: f64,
    ) -> Result<Self> {
        require_anchor(surface, surface::CODE_AXIS)?;
        Ok(Self {
            base: ComponentBase::new(surface::CODE_AXIS, layout.region),
            bar: ElementLayer::new(0.0),
            label: ElementLayer::new(transition_ms),
            code_line_numbers: CodeLineNumbers::new(
                surface,
                layout.code_line_numbers,
                transition_ms,
            )?,
        })
    }
}

impl Component for CodeLineAxis {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn render(&mut self) {
        let layout = self.base.layout;
        self.bar.insert_static(axis_bar(Attrs::new(
            layout.width - 10.0,
            0.0,
            5.0,
            layout.height,
            1.0,
        )));
    }

    fn update(&mut self, data: &IndexedData, now: f64) {
        self.ensure_rendered();
        self.advance_context(data);

        // rotated a quarter turn, centred along the axis
        let layout = self.base.layout;
        let at = Attrs::new(10.0, layout.height / 2.0, TEXT_HEIGHT, layout.height, 1.0);
        let filename = data.flow_points.first().map(|p| p.filename.clone());
        join_label(&mut self.label, filename, ElementKind::CodeAxisLabel, at, now);

        self.code_line_numbers.update(data, now);
    }

    fn tick(&mut self, now: f64) -> bool {
        let label = self.label.tick(now);
        self.code_line_numbers.tick(now) | label
    }

    fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>)) {
        let origin = self.base.origin(parent);
        visitor(LayerView {
            component: self.base.name,
            origin,
            layer: &self.bar,
        });
        visitor(LayerView {
            component: self.base.name,
            origin,
            layer: &self.label,
        });
        self.code_line_numbers.visit_layers(origin, visitor);
    }

    fn visit_layers_mut(&mut self, visitor: &mut dyn FnMut(&'static str, &mut ElementLayer)) {
        visitor(self.base.name, &mut self.bar);
        visitor(self.base.name, &mut self.label);
        self.code_line_numbers.visit_layers_mut(visitor);
    }
}

/// Line numbers down the code-line axis, one per row including holes
pub struct CodeLineNumbers {
    base: ComponentBase,
    layer: ElementLayer,
}

impl CodeLineNumbers {
    pub fn new(
        surface: &dyn AnchorSurface,
        layout: LayoutRegion,
        transition_ms: f64,
    ) -> Result<Self> {
        require_anchor(surface, surface::CODE_LINE_NUMBERS)?;
        Ok(Self {
            base: ComponentBase::new(surface::CODE_LINE_NUMBERS, layout),
            layer: ElementLayer::new(transition_ms),
        })
    }
}

fn code_line_number_attrs(ctx: &CoordinateContext, layout: &LayoutRegion, line: u32) -> Attrs {
    Attrs::new(
        0.0,
        ctx.line_center(line),
        layout.width,
        ctx.code_line_height_unit,
        1.0,
    )
}

impl Component for CodeLineNumbers {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, data: &IndexedData, now: f64) {
        self.ensure_rendered();
        let step = self.advance_context(data);
        let layout = self.base.layout;

        let summary = self.layer.join(
            &data.code_lines,
            |c: &CodeLine| ElementKey::Line(c.line_number),
            |c| ElementSpec {
                kind: ElementKind::CodeLineNumber,
                data: ElementData {
                    text: c.line_number.to_string(),
                    line_number: Some(c.line_number),
                    ..Default::default()
                },
                enter_from: code_line_number_attrs(&step.enter, &layout, c.line_number)
                    .with_opacity(0.0),
                target: code_line_number_attrs(&step.current, &layout, c.line_number),
            },
            |e| {
                let line = e.data.line_number.unwrap_or_default();
                code_line_number_attrs(&step.current, &layout, line).with_opacity(0.0)
            },
            now,
        );
        tracing::trace!("{}: {:?}", self.base.name, summary);
    }

    fn tick(&mut self, now: f64) -> bool {
        self.layer.tick(now)
    }

    fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>)) {
        visitor(LayerView {
            component: self.base.name,
            origin: self.base.origin(parent),
            layer: &self.layer,
        });
    }

    fn visit_layers_mut(&mut self, visitor: &mut dyn FnMut(&'static str, &mut ElementLayer)) {
        visitor(self.base.name, &mut self.layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceLayout;
    use crate::pipeline::{index_points, IndexMode};
    use crate::plot::surface::Surface;
    use crate::types::FlowPoint;

    fn data(mode: IndexMode) -> IndexedData {
        let points: Vec<FlowPoint> = [2u32, 3, 2, 6]
            .iter()
            .enumerate()
            .map(|(i, line)| {
                FlowPoint::new(i as u64, i as f64, i as f64 + 1.0, "coins.py", *line, "x", vec![])
            })
            .collect();
        index_points(&points, mode)
    }

    #[test]
    fn test_index_axis_label_swaps_on_mode_change() {
        let layout = SurfaceLayout::default();
        let mut axis =
            IndexAxis::new(&Surface::standard(), &layout.plot.index_axis, 700.0).unwrap();

        axis.update(&data(IndexMode::Step), 0.0);
        axis.tick(700.0);
        axis.update(&data(IndexMode::Time), 1000.0);

        let texts: Vec<&str> = axis.label.iter().map(|e| e.data.text.as_str()).collect();
        assert_eq!(texts, vec!["step", "elapsed time"]);
        assert!(axis.label.get(&ElementKey::label("step")).unwrap().is_exiting());

        axis.tick(1700.0);
        assert_eq!(axis.label.len(), 1);
        assert_eq!(axis.bar.len(), 1);
    }

    #[test]
    fn test_index_numbers_positions() {
        let layout = SurfaceLayout::default();
        let mut numbers = IndexNumbers::new(
            &Surface::standard(),
            layout.plot.index_axis.index_numbers,
            700.0,
        )
        .unwrap();
        numbers.update(&data(IndexMode::Step), 0.0);
        numbers.tick(700.0);

        // step domain [0, 3.8]
        let zero = numbers.layer.get(&ElementKey::tick(0.0)).unwrap();
        assert_eq!(zero.attrs.x, 0.0);
        assert_eq!(zero.attrs.opacity, 1.0);
        let three = numbers.layer.get(&ElementKey::tick(3.0)).unwrap();
        assert!((three.attrs.x - 3.0 * 500.0 / 3.8).abs() < 1e-9);
        assert_eq!(three.data.text, "3");
    }

    #[test]
    fn test_code_line_numbers_include_holes() {
        let layout = SurfaceLayout::default();
        let mut axis =
            CodeLineAxis::new(&Surface::standard(), &layout.plot.code_line_axis, 700.0).unwrap();
        axis.update(&data(IndexMode::Step), 0.0);
        axis.tick(700.0);

        let numbers = &axis.code_line_numbers.layer;
        assert_eq!(numbers.len(), 5);
        let hole = numbers.get(&ElementKey::Line(4)).unwrap();
        assert_eq!(hole.data.text, "4");
        // lines 2..=6 over 400 px
        assert_eq!(hole.attrs.y, 2.5 * 80.0);

        let label = axis.label.iter().next().unwrap();
        assert_eq!(label.data.text, "coins.py");
    }

    #[test]
    fn test_missing_index_numbers_anchor() {
        let layout = SurfaceLayout::default();
        let surface = Surface::standard().without(surface::INDEX_NUMBERS);
        let err = IndexAxis::new(&surface, &layout.plot.index_axis, 700.0)
            .err()
            .unwrap();
        assert!(err.is_fatal());
    }
}
