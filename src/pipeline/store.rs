//! Trace store: the immutable trace plus the current configuration and the
//! data derived from it.
//!
//! Configuration changes go through [`TraceStore::update_filter`] and
//! [`TraceStore::update_index_mode`], which compare against the current value
//! and publish a change event only when something actually changed. Derived
//! data is rebuilt from scratch by [`TraceStore::run_stage`].

use crate::error::FlowPlotError;
use crate::pipeline::events::{EventBus, PipelineEvent, Stage};
use crate::pipeline::filter::{filter_points, Filter};
use crate::pipeline::index::{index_points, IndexMode, IndexedData};
use crate::types::{FlowPoint, Trace};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TraceStore {
    trace: Trace,
    filter: Filter,
    index_mode: IndexMode,
    filtered: Vec<FlowPoint>,
    indexed: IndexedData,
    filter_runs: u64,
    index_runs: u64,
}

impl TraceStore {
    /// Create a store and compute its derived data without publishing anything
    pub fn new(trace: Trace, filter: Filter, index_mode: IndexMode) -> Self {
        let mut store = Self {
            trace,
            filter,
            index_mode,
            filtered: Vec::new(),
            indexed: IndexedData::empty(index_mode),
            filter_runs: 0,
            index_runs: 0,
        };
        store.run_filter();
        store.run_index();
        store
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn index_mode(&self) -> IndexMode {
        self.index_mode
    }

    pub fn filtered(&self) -> &[FlowPoint] {
        &self.filtered
    }

    pub fn indexed(&self) -> &IndexedData {
        &self.indexed
    }

    /// Times the filter stage has run
    pub fn filter_runs(&self) -> u64 {
        self.filter_runs
    }

    /// Times the index stage has run
    pub fn index_runs(&self) -> u64 {
        self.index_runs
    }

    /// Set the filter. No-op (and no event) if it equals the current one.
    pub fn update_filter(&mut self, filter: Filter, bus: &EventBus) -> bool {
        if filter == self.filter {
            return false;
        }
        tracing::debug!("Filter changed: '{}' -> '{}'", self.filter, filter);
        self.filter = filter;
        bus.publish(PipelineEvent::FilterChanged);
        true
    }

    /// Set the index mode. No-op (and no event) if unchanged.
    pub fn update_index_mode(&mut self, mode: IndexMode, bus: &EventBus) -> bool {
        if mode == self.index_mode {
            return false;
        }
        tracing::debug!("Index mode changed: {} -> {}", self.index_mode, mode);
        self.index_mode = mode;
        bus.publish(PipelineEvent::IndexModeChanged);
        true
    }

    /// Swap in a new trace, keeping the configuration.
    ///
    /// Publishes [`PipelineEvent::FilterChanged`] so the whole chain reruns.
    pub fn replace_trace(&mut self, trace: Trace, bus: &EventBus) {
        tracing::info!("Replacing trace ({} -> {} points)", self.trace.len(), trace.len());
        self.trace = trace;
        bus.publish(PipelineEvent::FilterChanged);
    }

    /// Hand the trace back, consuming the store
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Run one pipeline stage and return the event announcing its result.
    ///
    /// [`Stage::Render`] is not the store's job and returns `None`.
    pub fn run_stage(&mut self, stage: Stage) -> Option<PipelineEvent> {
        match stage {
            Stage::Filter => self.run_filter(),
            Stage::Index => self.run_index(),
            Stage::Render => return None,
        }
        stage.completion_event()
    }

    fn run_filter(&mut self) {
        let started = Instant::now();
        self.filtered = filter_points(self.trace.points(), &self.filter);
        self.filter_runs += 1;
        if self.filtered.is_empty() && !self.trace.is_empty() {
            tracing::debug!("{}", FlowPlotError::EmptyResultSet);
        }
        tracing::debug!(
            "Filter stage: {} of {} points in {:?}",
            self.filtered.len(),
            self.trace.len(),
            started.elapsed()
        );
    }

    fn run_index(&mut self) {
        let started = Instant::now();
        self.indexed = index_points(&self.filtered, self.index_mode);
        self.index_runs += 1;
        tracing::debug!(
            "Index stage ({}): domain {}, lines {} in {:?}",
            self.index_mode,
            self.indexed.index_domain,
            self.indexed.code_lines_domain,
            started.elapsed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::filter::LineRange;

    fn trace() -> Trace {
        Trace::new(
            [3u32, 5, 6, 9]
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    FlowPoint::new(i as u64, i as f64, i as f64 + 0.5, "a.py", *line, "x", vec![])
                })
                .collect(),
        )
    }

    #[test]
    fn test_new_computes_silently() {
        let store = TraceStore::new(trace(), Filter::none(), IndexMode::Step);
        assert_eq!(store.filtered().len(), 4);
        assert_eq!(store.indexed().flow_points.len(), 4);
        assert_eq!(store.filter_runs(), 1);
        assert_eq!(store.index_runs(), 1);
    }

    #[test]
    fn test_update_filter_is_idempotent() {
        let bus = EventBus::new();
        let mut store = TraceStore::new(trace(), Filter::none(), IndexMode::Step);

        let filter = Filter::lines([LineRange::new(5, 8)]);
        assert!(store.update_filter(filter.clone(), &bus));
        assert!(!store.update_filter(filter, &bus));
        assert_eq!(bus.drain(), vec![PipelineEvent::FilterChanged]);
    }

    #[test]
    fn test_update_index_mode_is_idempotent() {
        let bus = EventBus::new();
        let mut store = TraceStore::new(trace(), Filter::none(), IndexMode::Step);
        assert!(!store.update_index_mode(IndexMode::Step, &bus));
        assert!(bus.is_idle());
        assert!(store.update_index_mode(IndexMode::Time, &bus));
        assert_eq!(bus.drain(), vec![PipelineEvent::IndexModeChanged]);
    }

    #[test]
    fn test_run_stage_rebuilds_and_chains() {
        let bus = EventBus::new();
        let mut store = TraceStore::new(trace(), Filter::none(), IndexMode::Step);
        store.update_filter(Filter::lines([LineRange::new(5, 8)]), &bus);

        assert_eq!(
            store.run_stage(Stage::Filter),
            Some(PipelineEvent::FilteredDataChanged)
        );
        let lines: Vec<u32> = store.filtered().iter().map(|p| p.line_number).collect();
        assert_eq!(lines, vec![5, 6]);

        // indexed data is stale until the index stage runs
        assert_eq!(store.indexed().flow_points.len(), 4);
        assert_eq!(
            store.run_stage(Stage::Index),
            Some(PipelineEvent::IndexedDataChanged)
        );
        assert_eq!(store.indexed().flow_points.len(), 2);
        assert_eq!(store.run_stage(Stage::Render), None);
    }

    #[test]
    fn test_trace_is_never_mutated() {
        let mut store = TraceStore::new(trace(), Filter::none(), IndexMode::Time);
        store.run_stage(Stage::Index);
        assert_eq!(store.trace().points(), trace().points());
    }
}
