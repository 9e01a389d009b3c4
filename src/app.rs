//! Application state
//!
//! [`Plotter`] owns everything one plotted trace needs: the [`TraceStore`],
//! the [`EventBus`] that drives the pipeline, the [`PlotTree`], the
//! nearby-source [`CodeText`] viewer and the hover [`Selection`]. Input
//! handlers mutate the store; [`Plotter::process_events`] then runs the
//! stages the resulting events call for and finally re-renders.

pub use crate::frontend::FlowPlotApp;

use crate::config::AppConfig;
use crate::error::Result;
use crate::pipeline::{EventBus, Filter, IndexMode, IndexedData, PipelineEvent, Stage, TraceStore};
use crate::plot::{AnchorSurface, CodeText, PlotTree};
use crate::render::{ElementKind, Offset};
use crate::selection::Selection;
use crate::types::Trace;

/// How long the filter input shows its error state, in milliseconds
pub const FILTER_ERROR_FLASH_MS: f64 = 600.0;

pub struct Plotter {
    store: TraceStore,
    bus: EventBus,
    plot: PlotTree,
    code_text: CodeText,
    selection: Selection,
    filter_error_at: Option<f64>,
    render_count: u64,
}

impl Plotter {
    /// Build the plotter for `trace`.
    ///
    /// Derived data is computed up front without events; the first render is
    /// queued and happens on the next [`Plotter::process_events`].
    pub fn create(trace: Trace, config: &AppConfig, surface: &dyn AnchorSurface) -> Result<Self> {
        let store = TraceStore::new(trace, config.initial_filter(), config.default_index_mode);
        let plot = PlotTree::new(surface, &config.layout, config.transition_ms)?;
        let code_text = CodeText::new(surface, config.layout.code_text)?;

        let mut bus = EventBus::new();
        bus.subscribe(|event| tracing::trace!("Handling {}", event));
        bus.publish(PipelineEvent::IndexedDataChanged);

        tracing::info!(
            "Plotter created: {} flow points, filter '{}', index mode {}",
            store.trace().len(),
            store.filter(),
            store.index_mode()
        );

        Ok(Self {
            store,
            bus,
            plot,
            code_text,
            selection: Selection::default(),
            filter_error_at: None,
            render_count: 0,
        })
    }

    /// Tear down and hand back the trace
    pub fn destroy(self) -> Trace {
        tracing::info!("Plotter destroyed after {} renders", self.render_count);
        self.store.into_trace()
    }

    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    pub fn indexed(&self) -> &IndexedData {
        self.store.indexed()
    }

    pub fn plot(&self) -> &PlotTree {
        &self.plot
    }

    pub fn code_text(&self) -> &CodeText {
        &self.code_text
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Full re-renders so far
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    // ==================== Input ====================

    /// Parse filter text and apply it.
    ///
    /// Invalid text leaves the configuration untouched and starts the error
    /// flash. Returns whether the filter changed.
    pub fn submit_filter(&mut self, text: &str, now: f64) -> Result<bool> {
        match Filter::parse(text) {
            Ok(filter) => {
                self.filter_error_at = None;
                Ok(self.set_filter(filter))
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.filter_error_at = Some(now);
                Err(e)
            }
        }
    }

    pub fn set_filter(&mut self, filter: Filter) -> bool {
        self.store.update_filter(filter, &self.bus)
    }

    pub fn select_index_mode(&mut self, mode: IndexMode) -> bool {
        self.store.update_index_mode(mode, &self.bus)
    }

    /// Replace the plotted trace, keeping filter and index mode
    pub fn load_trace(&mut self, trace: Trace) {
        self.pointer_left();
        self.store.replace_trace(trace, &self.bus);
    }

    /// Whether the filter input should currently show its error state
    pub fn filter_error_active(&self, now: f64) -> bool {
        self.filter_error_at
            .is_some_and(|at| now - at < FILTER_ERROR_FLASH_MS)
    }

    // ==================== Pipeline ====================

    /// Handle queued events until the bus is idle; returns how many ran
    pub fn process_events(&mut self, now: f64) -> usize {
        let mut handled = 0;
        while let Some(event) = self.bus.next() {
            handled += 1;
            match event.stage() {
                Stage::Render => self.render(now),
                stage => {
                    if let Some(next) = self.store.run_stage(stage) {
                        self.bus.publish(next);
                    }
                }
            }
        }
        handled
    }

    fn render(&mut self, now: f64) {
        let data = self.store.indexed();
        self.plot.update(data, now);
        self.code_text.update(data, now);
        if let Some(line) = self.selection.hovered_line() {
            self.plot.select_line(line, true);
        }
        self.render_count += 1;
    }

    /// Advance transitions; returns whether another frame is needed
    pub fn tick(&mut self, now: f64) -> bool {
        self.plot.tick(now) || !self.bus.is_idle()
    }

    // ==================== Hover ====================

    /// Route a pointer position (surface coordinates) to enter/leave handlers
    pub fn pointer_moved(&mut self, point: Offset, now: f64) {
        let hit = self.plot.hit_test(point);
        let line = hit.as_ref().and_then(|h| h.line_number);
        let step = hit
            .as_ref()
            .filter(|h| h.kind == ElementKind::FlowPoint)
            .and_then(|h| h.step_uid);

        if let Some(change) = self.selection.set_line(line) {
            if let Some(old) = change.left {
                self.plot.select_line(old, false);
            }
            if let Some(new) = change.entered {
                self.select_line(new, now);
            }
        }

        if step != self.selection.hovered_step() {
            self.selection.leave_flow_point();
            if let Some(uid) = step {
                self.hover_flow_point(uid);
            }
        }
    }

    /// The pointer left the surface
    pub fn pointer_left(&mut self) {
        if let Some(line) = self.selection.hovered_line() {
            self.leave_line(line);
        }
        self.selection.leave_flow_point();
    }

    /// Select every element on `line_number` and centre the source viewer on it
    pub fn hover_line(&mut self, line_number: u32, now: f64) {
        if let Some(change) = self.selection.set_line(Some(line_number)) {
            if let Some(old) = change.left {
                self.plot.select_line(old, false);
            }
        }
        self.select_line(line_number, now);
    }

    pub fn leave_line(&mut self, line_number: u32) {
        self.plot.select_line(line_number, false);
        if self.selection.hovered_line() == Some(line_number) {
            self.selection.set_line(None);
        }
    }

    /// Show the first side effect of a flow point in the status region
    pub fn hover_flow_point(&mut self, step_uid: u64) {
        let side_effect = self
            .store
            .indexed()
            .flow_point(step_uid)
            .and_then(|p| p.first_side_effect())
            .map(str::to_string);
        self.selection.enter_flow_point(step_uid, side_effect);
    }

    pub fn leave_flow_point(&mut self) {
        self.selection.leave_flow_point();
    }

    fn select_line(&mut self, line_number: u32, now: f64) {
        let touched = self.plot.select_line(line_number, true);
        tracing::trace!("Selected line {} ({} elements)", line_number, touched);
        self.code_text
            .activate(line_number, self.store.indexed(), now);
    }
}
