//! Test data builders for creating test traces

use flowplot_rs::{FlowPoint, Trace};

/// Builder for creating test Traces.
///
/// Each visit takes `step_duration` of simulated time, back to back.
pub struct TraceBuilder {
    filename: String,
    step_duration: f64,
    visits: Vec<(u32, String, Vec<String>)>,
}

impl TraceBuilder {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            step_duration: 1.0,
            visits: Vec::new(),
        }
    }

    pub fn step_duration(mut self, duration: f64) -> Self {
        self.step_duration = duration;
        self
    }

    /// Visit a line with generated source text
    pub fn visit(self, line_number: u32) -> Self {
        let text = format!("stmt_{}()", line_number);
        self.visit_text(line_number, &text)
    }

    pub fn visit_text(self, line_number: u32, text: &str) -> Self {
        self.visit_with_effects(line_number, text, &[])
    }

    pub fn visit_with_effects(mut self, line_number: u32, text: &str, effects: &[&str]) -> Self {
        self.visits.push((
            line_number,
            text.to_string(),
            effects.iter().map(|e| e.to_string()).collect(),
        ));
        self
    }

    /// Visit every line in `lines` once, in order
    pub fn visit_all(self, lines: impl IntoIterator<Item = u32>) -> Self {
        lines.into_iter().fold(self, |b, line| b.visit(line))
    }

    fn times(&self, position: usize) -> (f64, f64) {
        let enter = position as f64 * self.step_duration;
        (enter, enter + self.step_duration)
    }

    pub fn build(self) -> Trace {
        let points = self
            .visits
            .iter()
            .enumerate()
            .map(|(i, (line, text, effects))| {
                let (enter, exit) = self.times(i);
                FlowPoint::new(
                    i as u64,
                    enter,
                    exit,
                    self.filename.clone(),
                    *line,
                    text.clone(),
                    effects.clone(),
                )
            })
            .collect();
        Trace::new(points)
    }

    /// The trace in the on-disk JSON format
    pub fn to_json(&self) -> String {
        let lines: Vec<serde_json::Value> = self
            .visits
            .iter()
            .enumerate()
            .map(|(i, (line, text, effects))| {
                let (enter, exit) = self.times(i);
                serde_json::json!([
                    enter.to_string(),
                    exit.to_string(),
                    self.filename,
                    line.to_string(),
                    text,
                    effects
                ])
            })
            .collect();
        serde_json::json!({ "lines": lines }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_builder() {
        let trace = TraceBuilder::new("a.py")
            .step_duration(0.5)
            .visit(3)
            .visit_with_effects(4, "x = 1", &["x = 1"])
            .build();

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.points()[1].time_enter, 0.5);
        assert_eq!(trace.points()[1].first_side_effect(), Some("x = 1"));
    }
}
