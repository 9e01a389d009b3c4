//! Filter stage: line-range filtering of the trace.
//!
//! The filter text grammar is a `;`-separated list of clauses. The only
//! recognized clause is `lines[:] N[-M][, N[-M], ...]`; blank clauses are
//! skipped and anything else rejects the whole input.
//!
//! Only the first configured range is applied when filtering.

use crate::error::{FlowPlotError, Result};
use crate::types::FlowPoint;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static LINES_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *lines:? ([0-9][0-9\-, ]*)$").expect("valid lines clause regex"));

static LINE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)-?([0-9]+)?").expect("valid line range regex"));

/// An inclusive range of source line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a range, ordering the bounds low to high
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn contains(&self, line_number: u32) -> bool {
        self.start <= line_number && line_number <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Active filter configuration. No ranges means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub line_ranges: Vec<LineRange>,
}

impl Filter {
    /// The identity filter
    pub fn none() -> Self {
        Self::default()
    }

    pub fn lines(ranges: impl IntoIterator<Item = LineRange>) -> Self {
        Self {
            line_ranges: ranges.into_iter().collect(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.line_ranges.is_empty()
    }

    /// The range actually applied by [`filter_points`]
    pub fn active_range(&self) -> Option<LineRange> {
        self.line_ranges.first().copied()
    }

    /// Parse user filter text.
    ///
    /// Returns [`FlowPlotError::InvalidFilterSyntax`] naming the first
    /// offending clause.
    pub fn parse(input: &str) -> Result<Self> {
        let mut line_ranges = Vec::new();

        for clause in input.split(';') {
            if clause.trim().is_empty() {
                continue;
            }
            let captures = LINES_CLAUSE
                .captures(clause)
                .ok_or_else(|| FlowPlotError::InvalidFilterSyntax(clause.trim().to_string()))?;

            for part in captures[1].split(',') {
                let range = LINE_RANGE
                    .captures(part)
                    .ok_or_else(|| FlowPlotError::InvalidFilterSyntax(clause.trim().to_string()))?;
                let start = parse_bound(&range[1], clause)?;
                let end = match range.get(2) {
                    Some(end) => parse_bound(end.as_str(), clause)?,
                    None => start,
                };
                line_ranges.push(LineRange::new(start, end));
            }
        }

        Ok(Self { line_ranges })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_ranges.is_empty() {
            return Ok(());
        }
        write!(f, "lines: ")?;
        for (i, range) in self.line_ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

fn parse_bound(digits: &str, clause: &str) -> Result<u32> {
    digits
        .parse::<u32>()
        .map_err(|_| FlowPlotError::InvalidFilterSyntax(clause.trim().to_string()))
}

/// Deep-copy `points` and keep those inside the filter's first line range.
pub fn filter_points(points: &[FlowPoint], filter: &Filter) -> Vec<FlowPoint> {
    match filter.active_range() {
        Some(range) => points
            .iter()
            .filter(|p| range.contains(p.line_number))
            .cloned()
            .collect(),
        None => points.to_vec(),
    }
}
