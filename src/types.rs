//! Core data types for FlowPlot-RS
//!
//! This module defines the fundamental data structures shared by the
//! ingestion, pipeline and plot layers.
//!
//! # Main Types
//!
//! - [`FlowPoint`] - One recorded visit to a source line
//! - [`Trace`] - The immutable, ingested sequence of flow points
//! - [`CodeLine`] - One row of the dense per-line source table
//! - [`Domain`] - An inclusive numeric range spanned by a plot axis

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plot length given to every point by the discrete index modes.
///
/// Less than one so neighbouring bars keep a visible gap.
pub const DISCRETE_POINT_LENGTH: f64 = 0.8;

/// One recorded visit to a source line during an execution trace.
///
/// `step_uid` is the point's identity for reconciliation and is never
/// reassigned once ingested. `index` and `length` belong to whichever index
/// mode ran last; everything else is fixed at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPoint {
    /// Ordinal position in the trace and unique ID
    pub step_uid: u64,
    /// Plot position along the index axis
    pub index: f64,
    /// Plot extent along the index axis
    pub length: f64,
    /// Elapsed time when evaluation of this line began
    pub time_enter: f64,
    /// Elapsed time when evaluation of this line ended
    pub time_exit: f64,
    /// File the line belongs to
    pub filename: String,
    /// Line number within `filename`
    pub line_number: u32,
    /// Source text of the line
    pub line_text: String,
    /// Side effects observed while evaluating the line
    pub side_effects: Vec<String>,
}

impl FlowPoint {
    /// Create a flow point with step-mode defaults for `index` and `length`
    pub fn new(
        step_uid: u64,
        time_enter: f64,
        time_exit: f64,
        filename: impl Into<String>,
        line_number: u32,
        line_text: impl Into<String>,
        side_effects: Vec<String>,
    ) -> Self {
        Self {
            step_uid,
            index: step_uid as f64,
            length: DISCRETE_POINT_LENGTH,
            time_enter,
            time_exit,
            filename: filename.into(),
            line_number,
            line_text: line_text.into(),
            side_effects,
        }
    }

    /// End of this point's extent along the index axis
    #[inline]
    pub fn index_end(&self) -> f64 {
        self.index + self.length
    }

    /// Time spent evaluating this line
    #[inline]
    pub fn duration(&self) -> f64 {
        self.time_exit - self.time_enter
    }

    /// Whether any side effect was recorded for this point
    pub fn has_side_effect(&self) -> bool {
        !self.side_effects.is_empty()
    }

    /// The first recorded side effect, if any
    pub fn first_side_effect(&self) -> Option<&str> {
        self.side_effects.first().map(String::as_str)
    }
}

/// The immutable, ingested execution trace.
///
/// Stages never see the trace's own points; they receive a deep copy from
/// [`Trace::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct Trace {
    points: Vec<FlowPoint>,
}

impl Trace {
    pub fn new(points: Vec<FlowPoint>) -> Self {
        Self { points }
    }

    /// Read-only view of the ingested points
    pub fn points(&self) -> &[FlowPoint] {
        &self.points
    }

    /// Deep copy of all points, safe for a stage to mutate
    pub fn snapshot(&self) -> Vec<FlowPoint> {
        self.points.clone()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Name of the traced file (taken from the first point)
    pub fn filename(&self) -> Option<&str> {
        self.points.first().map(|p| p.filename.as_str())
    }
}

/// One row of the dense per-line source table.
///
/// Rows for lines that no flow point visited are holes with empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub line_number: u32,
    pub line_text: String,
    pub is_hole: bool,
}

impl CodeLine {
    pub fn new(line_number: u32, line_text: impl Into<String>) -> Self {
        Self {
            line_number,
            line_text: line_text.into(),
            is_hole: false,
        }
    }

    /// A placeholder row for a line with no observed flow point
    pub fn hole(line_number: u32) -> Self {
        Self {
            line_number,
            line_text: String::new(),
            is_hole: true,
        }
    }

    /// Number of leading whitespace characters
    pub fn indentation(&self) -> usize {
        self.line_text.len() - self.line_text.trim_start().len()
    }

    /// Source text without its indentation
    pub fn trimmed_text(&self) -> &str {
        self.line_text.trim_start()
    }
}

/// An inclusive numeric range spanned by a plot axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Domain<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> Domain<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range, bounds included
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Domain<f64> {
    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Domain<u32> {
    /// Number of lines in the range, both ends included
    pub fn line_count(&self) -> u32 {
        self.max - self.min + 1
    }
}

impl<T: fmt::Display> fmt::Display for Domain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_point_step_defaults() {
        let p = FlowPoint::new(7, 0.5, 0.75, "coins.py", 12, "x = 1", vec![]);
        assert_eq!(p.index, 7.0);
        assert_eq!(p.length, DISCRETE_POINT_LENGTH);
        assert_eq!(p.duration(), 0.25);
        assert!(!p.has_side_effect());
        assert_eq!(p.first_side_effect(), None);
    }

    #[test]
    fn test_snapshot_is_deep() {
        let trace = Trace::new(vec![FlowPoint::new(
            0,
            0.0,
            1.0,
            "a.py",
            1,
            "print(1)",
            vec!["stdout: 1".to_string()],
        )]);
        let mut copy = trace.snapshot();
        copy[0].index = 99.0;
        copy[0].side_effects.push("extra".to_string());

        assert_eq!(trace.points()[0].index, 0.0);
        assert_eq!(trace.points()[0].side_effects.len(), 1);
    }

    #[test]
    fn test_code_line_indentation() {
        let line = CodeLine::new(3, "    return x");
        assert_eq!(line.indentation(), 4);
        assert_eq!(line.trimmed_text(), "return x");

        let hole = CodeLine::hole(4);
        assert!(hole.is_hole);
        assert_eq!(hole.indentation(), 0);
    }

    #[test]
    fn test_domain_helpers() {
        let d = Domain::new(2.0, 5.5);
        assert_eq!(d.span(), 3.5);
        assert!(d.contains(5.5));

        let lines = Domain::new(10u32, 10u32);
        assert_eq!(lines.line_count(), 1);
        assert_eq!(lines.to_string(), "[10, 10]");
    }
}
