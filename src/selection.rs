//! Hover state shared across the plot.
//!
//! Tracks which source line and which flow point the pointer is over, and
//! the side-effect text shown in the status region. Nothing survives a leave.

/// A change of hovered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChange {
    pub left: Option<u32>,
    pub entered: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    hovered_line: Option<u32>,
    hovered_step: Option<u64>,
    status: Option<String>,
}

impl Selection {
    pub fn hovered_line(&self) -> Option<u32> {
        self.hovered_line
    }

    pub fn hovered_step(&self) -> Option<u64> {
        self.hovered_step
    }

    /// Side effect of the hovered flow point
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Move the hovered line; `None` if nothing changed
    pub fn set_line(&mut self, line: Option<u32>) -> Option<LineChange> {
        if line == self.hovered_line {
            return None;
        }
        let change = LineChange {
            left: self.hovered_line,
            entered: line,
        };
        self.hovered_line = line;
        Some(change)
    }

    /// Enter a flow point, showing its side effect if it has one
    pub fn enter_flow_point(&mut self, step_uid: u64, side_effect: Option<String>) {
        self.hovered_step = Some(step_uid);
        self.status = side_effect;
    }

    pub fn leave_flow_point(&mut self) {
        self.hovered_step = None;
        self.status = None;
    }
}
