//! Reactive data pipeline.
//!
//! A change to the filter or index mode flows through the stages as typed
//! events:
//!
//! ```text
//! TraceStore::update_filter ──► FilterChanged ──► filter_points ──► FilteredDataChanged
//!                                                                        │
//! TraceStore::update_index_mode ──► IndexModeChanged ──► index_points ◄──┘
//!                                                             │
//!                                                 IndexedDataChanged ──► PlotTree::update
//! ```
//!
//! # Design
//!
//! - **Pure stages**: [`filter_points`] and [`index_points`] deep-copy their
//!   input and never touch the trace.
//! - **Typed dispatch**: the chain lives in [`PipelineEvent::stage`], not in
//!   subscription order.
//! - **Single thread**: the bus is a crossbeam queue drained synchronously
//!   by its owner.

pub mod events;
pub mod filter;
pub mod index;
pub mod store;

pub use events::{EventBus, EventPublisher, PipelineEvent, Stage};
pub use filter::{filter_points, Filter, LineRange};
pub use index::{index_points, IndexMode, IndexModeDescriptor, IndexedData};
pub use store::TraceStore;
