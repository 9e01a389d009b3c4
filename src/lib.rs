//! # FlowPlot-RS: Execution Trace Flow-Point Plotter
//!
//! Plots an execution trace as flow points: one bar per executed source
//! line, laid out with the source line on one axis and an index (step, time
//! or per-line visit count) on the other. Changing the line filter or the
//! index mode re-derives the data and animates the plot from its old layout
//! to the new one.
//!
//! ## Architecture
//!
//! - **Pipeline**: [`pipeline::TraceStore`] owns the trace and configuration;
//!   an [`pipeline::EventBus`] chains filter → index → render stages
//! - **Plot**: [`plot::PlotTree`] is a tree of components, each with its own
//!   coordinate context, reconciling keyed [`render::VisualElement`]s
//! - **Render**: backend-agnostic elements, transitions and the keyed diff
//! - **Frontend**: paints the element layers using eframe/egui
//!
//! ## Configuration
//!
//! User configuration (`config.toml`) and application state (recent traces)
//! are stored in the platform-appropriate data directory under
//! `dev.flowplot.flowplot-rs`.
//!
//! ## Example
//!
//! ```ignore
//! use flowplot_rs::{load_trace, plot::Surface, AppConfig, Plotter};
//!
//! let trace = load_trace("trace.json")?;
//! let mut plotter = Plotter::create(trace, &AppConfig::default(), &Surface::standard())?;
//! plotter.process_events(0.0);
//!
//! plotter.submit_filter("lines: 10-20", 100.0)?;
//! plotter.process_events(100.0);
//! while plotter.tick(now()) {
//!     // paint plotter.plot().layers()
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod pipeline;
pub mod plot;
pub mod render;
pub mod selection;
pub mod trace;
pub mod types;

// Re-export commonly used types
pub use app::{FlowPlotApp, Plotter};
pub use config::{AppConfig, AppState};
pub use error::{FlowPlotError, Result};
pub use pipeline::{EventBus, Filter, IndexMode, IndexedData, PipelineEvent, TraceStore};
pub use plot::PlotTree;
pub use trace::{load_trace, parse_trace};
pub use types::{CodeLine, Domain, FlowPoint, Trace};
