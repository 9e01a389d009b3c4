//! Action types for the frontend
//!
//! Panels return `AppAction`s instead of mutating the plotter directly; the
//! app applies them in one place after the frame's UI has been built.

use std::path::PathBuf;

use crate::pipeline::IndexMode;

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Load a trace file, replacing the current one
    OpenTrace(PathBuf),
    /// Apply filter text typed by the user
    SubmitFilter(String),
    /// Clear the filter and its input
    ClearFilter,
    SelectIndexMode(IndexMode),
    ToggleDarkMode,
    /// Drop a recent entry whose file is gone
    ForgetRecentTrace(PathBuf),
    Quit,
}
