//! Configuration module for FlowPlot-RS
//!
//! This module handles:
//! - User configuration (`config.toml`): layout, transition timing, default
//!   index mode and filter, theme
//! - Application state persistence (`app_state.json`): recent traces and the
//!   last opened trace
//!
//! # App Data Location
//!
//! Both files live in the platform-appropriate data directory:
//! - **Linux**: `~/.local/share/dev.flowplot.flowplot-rs/`
//! - **macOS**: `~/Library/Application Support/dev.flowplot.flowplot-rs/`
//! - **Windows**: `%APPDATA%\dev.flowplot.flowplot-rs\`
//!
//! # Example
//!
//! ```ignore
//! use flowplot_rs::config::{AppConfig, AppState};
//!
//! let config = AppConfig::load_or_default();
//! let mut state = AppState::load_or_default();
//! state.add_recent_trace("data/coins.py.extract.json");
//! state.save()?;
//! ```

pub mod layout;

pub use layout::{
    BarSelectorsLayout, CodeLineAxisLayout, IndexAxisLayout, LayoutRegion, PlotBodyLayout,
    PlotLayout, SurfaceLayout,
};

use crate::error::{FlowPlotError, Result};
use crate::pipeline::{Filter, IndexMode};
use crate::render::DEFAULT_TRANSITION_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.flowplot.flowplot-rs";

/// User configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Maximum number of recent traces to remember
pub const MAX_RECENT_TRACES: usize = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        FlowPlotError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            FlowPlotError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the user configuration file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== App Config ====================

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Duration of every enter/update/exit transition, in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: f64,

    /// Index mode selected at startup
    #[serde(default)]
    pub default_index_mode: IndexMode,

    /// Filter text applied at startup, in the filter input syntax
    #[serde(default)]
    pub initial_filter: Option<String>,

    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Render surface layout
    #[serde(default)]
    pub layout: SurfaceLayout,
}

fn default_transition_ms() -> f64 {
    DEFAULT_TRANSITION_MS
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transition_ms: DEFAULT_TRANSITION_MS,
            default_index_mode: IndexMode::default(),
            initial_filter: None,
            dark_mode: true,
            layout: SurfaceLayout::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FlowPlotError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            FlowPlotError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load configuration from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save configuration as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlowPlotError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| FlowPlotError::Config(format!("Failed to write config: {}", e)))
    }

    /// The startup filter.
    ///
    /// Text that does not parse falls back to no filter.
    pub fn initial_filter(&self) -> Filter {
        match self.initial_filter.as_deref() {
            None => Filter::none(),
            Some(text) => Filter::parse(text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring configured filter: {}", e);
                Filter::none()
            }),
        }
    }
}

// ==================== Recent Trace Entry ====================

/// Information about a recently opened trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTrace {
    pub path: PathBuf,

    /// Traced source file, from the first flow point
    #[serde(default)]
    pub source_file: Option<String>,

    /// Last opened timestamp (Unix seconds)
    pub last_opened: u64,
}

impl RecentTrace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            path: path.into(),
            source_file: None,
            last_opened: now,
        }
    }

    /// Check if the trace file still exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

// ==================== App State ====================

/// Persistent application state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Recently opened traces, most recent first
    #[serde(default)]
    pub recent_traces: Vec<RecentTrace>,

    /// Path to the last opened trace
    #[serde(default)]
    pub last_trace_path: Option<PathBuf>,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_traces: Vec::new(),
            last_trace_path: None,
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            FlowPlotError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load app state from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FlowPlotError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| FlowPlotError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(APP_STATE_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FlowPlotError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| FlowPlotError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Add or refresh a recent trace and make it the last opened one
    pub fn add_recent_trace(&mut self, path: impl AsRef<Path>) -> &mut RecentTrace {
        let path = path.as_ref().to_path_buf();

        self.recent_traces.retain(|t| t.path != path);
        self.recent_traces.insert(0, RecentTrace::new(path.clone()));
        self.recent_traces.truncate(MAX_RECENT_TRACES);
        self.last_trace_path = Some(path);

        &mut self.recent_traces[0]
    }

    /// Remove a trace from recents
    pub fn remove_recent_trace(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_traces.retain(|t| t.path != path);

        if self.last_trace_path.as_deref() == Some(path) {
            self.last_trace_path = None;
        }
    }

    /// Clean up recent traces that no longer exist
    pub fn cleanup_missing_traces(&mut self) {
        self.recent_traces.retain(|t| t.exists());

        if let Some(ref last) = self.last_trace_path {
            if !last.exists() {
                self.last_trace_path = None;
            }
        }
    }

    /// Get the most recent trace path if it exists
    pub fn get_last_trace(&self) -> Option<&Path> {
        self.last_trace_path
            .as_ref()
            .filter(|p| p.exists())
            .map(|p| p.as_path())
    }
}
