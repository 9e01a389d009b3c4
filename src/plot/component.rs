//! Plot component capability and the generic container.

use crate::config::LayoutRegion;
use crate::error::Result;
use crate::pipeline::IndexedData;
use crate::plot::context::CoordinateContext;
use crate::plot::surface::{require_anchor, AnchorSurface};
use crate::render::{ElementLayer, Offset};

/// A layer together with where it sits on the surface
#[derive(Debug, Clone, Copy)]
pub struct LayerView<'a> {
    /// Name of the owning component
    pub component: &'static str,
    /// Absolute origin of the owning component
    pub origin: Offset,
    pub layer: &'a ElementLayer,
}

/// A node of the plot tree.
///
/// Components own a fixed layout region and re-render entirely from the
/// [`IndexedData`] they are handed. Containers forward the data to their
/// children unchanged, in declaration order.
pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    fn name(&self) -> &'static str {
        self.base().name
    }

    fn layout(&self) -> &LayoutRegion {
        &self.base().layout
    }

    /// Coordinate units for `data` in this component's region
    fn compute_context(&self, data: &IndexedData) -> CoordinateContext {
        CoordinateContext::compute(self.layout(), data)
    }

    /// Compute the context for `data` and make it current
    fn advance_context(&mut self, data: &IndexedData) -> ContextStep {
        let current = self.compute_context(data);
        self.base_mut().advance(current)
    }

    /// One-time setup before the first update
    fn render(&mut self) {}

    /// Run [`Component::render`] if it has not run yet
    fn ensure_rendered(&mut self) {
        if !self.base().rendered {
            self.base_mut().rendered = true;
            self.render();
        }
    }

    /// Reconcile against new data at clock time `now`
    fn update(&mut self, data: &IndexedData, now: f64);

    /// Advance transitions; returns whether anything is still animating
    fn tick(&mut self, now: f64) -> bool;

    /// Visit every layer in the subtree, in paint order
    fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>));

    /// Visit every layer in the subtree mutably
    fn visit_layers_mut(&mut self, visitor: &mut dyn FnMut(&'static str, &mut ElementLayer));
}

/// Coordinate contexts for one update
#[derive(Debug, Clone, Copy)]
pub struct ContextStep {
    /// Context new elements enter from
    pub enter: CoordinateContext,
    /// Context everything transitions toward
    pub current: CoordinateContext,
}

/// State shared by every component
#[derive(Debug, Clone)]
pub struct ComponentBase {
    pub name: &'static str,
    pub layout: LayoutRegion,
    pub rendered: bool,
    context: Option<CoordinateContext>,
}

impl ComponentBase {
    pub fn new(name: &'static str, layout: LayoutRegion) -> Self {
        Self {
            name,
            layout,
            rendered: false,
            context: None,
        }
    }

    /// The context of the last update
    pub fn context(&self) -> Option<&CoordinateContext> {
        self.context.as_ref()
    }

    /// Swap in `current` as the component's context.
    ///
    /// Entering elements start where they would have been under the
    /// previous context; on the first update there is none and they start
    /// at their target.
    pub fn advance(&mut self, current: CoordinateContext) -> ContextStep {
        let enter = self.context.replace(current).unwrap_or(current);
        ContextStep { enter, current }
    }

    /// Absolute origin given the parent's absolute origin
    pub fn origin(&self, parent: Offset) -> Offset {
        self.layout.origin(parent)
    }
}

/// A component that only composes children
pub struct Container {
    base: ComponentBase,
    children: Vec<Box<dyn Component>>,
}

impl Container {
    pub fn new(name: &'static str, layout: LayoutRegion) -> Self {
        Self {
            base: ComponentBase::new(name, layout),
            children: Vec::new(),
        }
    }

    /// A container attached to `anchor` on `surface`
    pub fn anchored(
        surface: &dyn AnchorSurface,
        anchor: &'static str,
        layout: LayoutRegion,
    ) -> Result<Self> {
        require_anchor(surface, anchor)?;
        Ok(Self::new(anchor, layout))
    }

    pub fn with_child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }
}

impl Component for Container {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, data: &IndexedData, now: f64) {
        self.ensure_rendered();
        self.advance_context(data);
        for child in &mut self.children {
            child.update(data, now);
        }
    }

    fn tick(&mut self, now: f64) -> bool {
        let mut animating = false;
        for child in &mut self.children {
            animating |= child.tick(now);
        }
        animating
    }

    fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>)) {
        let origin = self.base.origin(parent);
        for child in &self.children {
            child.visit_layers(origin, visitor);
        }
    }

    fn visit_layers_mut(&mut self, visitor: &mut dyn FnMut(&'static str, &mut ElementLayer)) {
        for child in &mut self.children {
            child.visit_layers_mut(visitor);
        }
    }
}
