//! Index stage. Lays filtered flow points out along the index axis.
//!
//! Each [`IndexMode`] is bound, through a static descriptor table, to the
//! function that assigns `index`/`length`, a `discrete` flag used for axis
//! tick generation, and the axis label.

use crate::types::{CodeLine, Domain, FlowPoint, DISCRETE_POINT_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Mapping from a flow point to its position on the index axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Execution order
    #[default]
    Step,
    /// Elapsed time
    Time,
    /// Per-line visit count
    Histogram,
}

/// Static binding of an index mode to its behavior
pub struct IndexModeDescriptor {
    pub mode: IndexMode,
    pub apply: fn(&mut [FlowPoint]),
    pub discrete: bool,
    pub axis_label: &'static str,
}

static DESCRIPTORS: &[IndexModeDescriptor] = &[
    IndexModeDescriptor {
        mode: IndexMode::Step,
        apply: step_indexed,
        discrete: true,
        axis_label: "step",
    },
    IndexModeDescriptor {
        mode: IndexMode::Time,
        apply: time_indexed,
        discrete: false,
        axis_label: "elapsed time",
    },
    IndexModeDescriptor {
        mode: IndexMode::Histogram,
        apply: histogram_indexed,
        discrete: true,
        axis_label: "step count",
    },
];

impl IndexMode {
    pub fn all() -> &'static [IndexMode] {
        &[IndexMode::Step, IndexMode::Time, IndexMode::Histogram]
    }

    pub fn descriptor(self) -> &'static IndexModeDescriptor {
        match self {
            IndexMode::Step => &DESCRIPTORS[0],
            IndexMode::Time => &DESCRIPTORS[1],
            IndexMode::Histogram => &DESCRIPTORS[2],
        }
    }

    /// Whether axis ticks should be whole numbers
    pub fn is_discrete(self) -> bool {
        self.descriptor().discrete
    }

    pub fn axis_label(self) -> &'static str {
        self.descriptor().axis_label
    }

    /// Name used by the mode selector and in config files
    pub fn name(self) -> &'static str {
        match self {
            IndexMode::Step => "step",
            IndexMode::Time => "time",
            IndexMode::Histogram => "histogram",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn step_indexed(points: &mut [FlowPoint]) {
    for p in points {
        p.index = p.step_uid as f64;
        p.length = DISCRETE_POINT_LENGTH;
    }
}

fn time_indexed(points: &mut [FlowPoint]) {
    for p in points {
        p.index = p.time_enter;
        p.length = p.time_exit - p.time_enter;
    }
}

/// Stack repeated visits to a line. Counters are local to one call.
fn histogram_indexed(points: &mut [FlowPoint]) {
    let mut bar_heights: HashMap<u32, u32> = HashMap::new();
    for p in points {
        let height = bar_heights.entry(p.line_number).or_insert(0);
        p.index = f64::from(*height);
        p.length = DISCRETE_POINT_LENGTH;
        *height += 1;
    }
}

/// The single object handed down the plot tree
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedData {
    pub flow_points: Vec<FlowPoint>,
    /// Dense over `code_lines_domain`, holes included
    pub code_lines: Vec<CodeLine>,
    pub code_lines_domain: Domain<u32>,
    pub index_domain: Domain<f64>,
    pub index: IndexMode,
}

impl IndexedData {
    /// A defined, renderable result for zero flow points
    pub fn empty(index: IndexMode) -> Self {
        Self {
            flow_points: Vec::new(),
            code_lines: Vec::new(),
            code_lines_domain: Domain::new(0, 0),
            index_domain: Domain::new(0.0, 0.0),
            index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flow_points.is_empty()
    }

    /// Look up a row of the code-line table by line number
    pub fn code_line(&self, line_number: u32) -> Option<&CodeLine> {
        if !self.code_lines_domain.contains(line_number) {
            return None;
        }
        self.code_lines
            .get((line_number - self.code_lines_domain.min) as usize)
    }

    /// Look up a flow point by its step UID
    pub fn flow_point(&self, step_uid: u64) -> Option<&FlowPoint> {
        self.flow_points.iter().find(|p| p.step_uid == step_uid)
    }
}

/// Deep-copy `points`, apply `mode`, and derive the plot domains and code-line table.
pub fn index_points(points: &[FlowPoint], mode: IndexMode) -> IndexedData {
    if points.is_empty() {
        return IndexedData::empty(mode);
    }

    let mut flow_points = points.to_vec();
    (mode.descriptor().apply)(&mut flow_points);

    let mut observed: BTreeMap<u32, &str> = BTreeMap::new();
    for p in &flow_points {
        observed.insert(p.line_number, p.line_text.as_str());
    }
    let code_lines_min = observed.keys().next().copied().unwrap_or(0);
    let code_lines_max = observed.keys().next_back().copied().unwrap_or(0);
    let code_lines = (code_lines_min..=code_lines_max)
        .map(|n| match observed.get(&n) {
            Some(text) => CodeLine::new(n, *text),
            None => CodeLine::hole(n),
        })
        .collect();

    let index_min = flow_points
        .iter()
        .map(|p| p.index)
        .fold(f64::INFINITY, f64::min);
    let index_max = flow_points
        .iter()
        .map(FlowPoint::index_end)
        .fold(f64::NEG_INFINITY, f64::max);

    IndexedData {
        flow_points,
        code_lines,
        code_lines_domain: Domain::new(code_lines_min, code_lines_max),
        index_domain: Domain::new(index_min, index_max),
        index: mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(uid: u64, line: u32, enter: f64, exit: f64) -> FlowPoint {
        FlowPoint::new(uid, enter, exit, "a.py", line, format!("line {}", line), vec![])
    }

    fn sample() -> Vec<FlowPoint> {
        vec![
            point(0, 10, 0.0, 0.5),
            point(1, 12, 0.5, 0.75),
            point(2, 10, 0.75, 1.0),
            point(3, 14, 1.0, 2.0),
            point(4, 10, 2.0, 2.25),
        ]
    }

    #[test]
    fn test_step_mode() {
        let data = index_points(&sample(), IndexMode::Step);
        for p in &data.flow_points {
            assert_eq!(p.index, p.step_uid as f64);
            assert_eq!(p.length, DISCRETE_POINT_LENGTH);
        }
        assert_eq!(data.index_domain.min, 0.0);
        assert!((data.index_domain.max - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_time_mode() {
        let data = index_points(&sample(), IndexMode::Time);
        assert_eq!(data.flow_points[3].index, 1.0);
        assert_eq!(data.flow_points[3].length, 1.0);
        assert_eq!(data.index_domain, Domain::new(0.0, 2.25));
    }

    #[test]
    fn test_histogram_stacks_repeated_lines() {
        let data = index_points(&sample(), IndexMode::Histogram);
        let line_10: Vec<f64> = data
            .flow_points
            .iter()
            .filter(|p| p.line_number == 10)
            .map(|p| p.index)
            .collect();
        assert_eq!(line_10, vec![0.0, 1.0, 2.0]);
        assert_eq!(data.flow_points[1].index, 0.0);
        assert_eq!(data.flow_points[3].index, 0.0);
    }

    #[test]
    fn test_histogram_counters_reset_between_calls() {
        let first = index_points(&sample(), IndexMode::Histogram);
        let second = index_points(&sample(), IndexMode::Histogram);
        assert_eq!(first, second);
    }

    #[test]
    fn test_code_lines_are_dense_with_holes() {
        let data = index_points(&sample(), IndexMode::Step);
        assert_eq!(data.code_lines_domain, Domain::new(10, 14));
        assert_eq!(data.code_lines.len(), 5);

        let numbers: Vec<u32> = data.code_lines.iter().map(|c| c.line_number).collect();
        assert_eq!(numbers, vec![10, 11, 12, 13, 14]);
        assert!(data.code_lines[1].is_hole);
        assert_eq!(data.code_lines[1].line_text, "");
        assert_eq!(data.code_line(12).unwrap().line_text, "line 12");
        assert!(data.code_line(9).is_none());
    }

    #[test]
    fn test_empty_input_is_defined() {
        let data = index_points(&[], IndexMode::Time);
        assert!(data.is_empty());
        assert_eq!(data.index_domain, Domain::new(0.0, 0.0));
        assert_eq!(data.code_lines_domain, Domain::new(0, 0));
        assert!(data.index_domain.min.is_finite());
        assert_eq!(data.index, IndexMode::Time);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = sample();
        let _ = index_points(&input, IndexMode::Time);
        assert_eq!(input, sample());
    }

    #[test]
    fn test_descriptor_table() {
        assert!(IndexMode::Step.is_discrete());
        assert!(!IndexMode::Time.is_discrete());
        assert_eq!(IndexMode::Histogram.axis_label(), "step count");
        for mode in IndexMode::all() {
            assert_eq!(mode.descriptor().mode, *mode);
            assert_eq!(IndexMode::from_name(mode.name()), Some(*mode));
        }
    }
}
