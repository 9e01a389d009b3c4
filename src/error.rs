//! Error handling for FlowPlot-RS
//!
//! This module defines the error type shared by the ingestion, pipeline and
//! plot layers, and a Result alias for use throughout the crate.

use thiserror::Error;

/// Main error type for FlowPlot-RS operations
#[derive(Error, Debug)]
pub enum FlowPlotError {
    /// A filter clause did not match the `lines: N[-M], ...` grammar
    #[error("Invalid filter syntax: {0}")]
    InvalidFilterSyntax(String),

    /// The filter/index pipeline produced no flow points
    #[error("Filter selected no flow points")]
    EmptyResultSet,

    /// A degenerate domain produced a non-finite coordinate unit
    #[error("Non-finite coordinate unit for domain [{min}, {max}]")]
    NonFiniteCoordinateUnit { min: f64, max: f64 },

    /// A component was constructed against a surface region that does not exist
    #[error("Missing anchor region '{0}' on the render surface")]
    MissingAnchor(String),

    /// A trace record could not be parsed
    #[error("Trace record {record}: {message}")]
    TraceFormat { record: usize, message: String },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FlowPlotError>,
    },
}

impl FlowPlotError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FlowPlotError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error is a configuration/layout mismatch that should halt startup
    pub fn is_fatal(&self) -> bool {
        match self {
            FlowPlotError::MissingAnchor(_) => true,
            FlowPlotError::WithContext { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Result type alias for FlowPlot-RS operations
pub type Result<T> = std::result::Result<T, FlowPlotError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FlowPlotError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| FlowPlotError::Io(e).with_context(f()))
    }
}
