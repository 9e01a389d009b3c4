//! Render surface anchors.
//!
//! Components attach to named regions of the surface. A component refuses
//! to be built against a surface that lacks its region.

use crate::error::{FlowPlotError, Result};
use std::collections::BTreeSet;

pub const PLOT: &str = "plot";
pub const INDEX_AXIS: &str = "index-axis";
pub const INDEX_NUMBERS: &str = "index-numbers";
pub const CODE_AXIS: &str = "code-axis";
pub const CODE_LINE_NUMBERS: &str = "code-line-numbers";
pub const PLOT_BODY: &str = "plot-body";
pub const BAR_SELECTORS_CONTAINER: &str = "bar-selectors-container";
pub const INDEX_BAR_SELECTORS: &str = "index-bar-selectors";
pub const CODE_BAR_SELECTORS: &str = "code-bar-selectors";
pub const FLOW_POINTS: &str = "flow-points";
pub const CODE_LINES: &str = "code-lines";
pub const CODE_TEXT: &str = "code-text";

/// Every anchor the plotter expects, in tree order
pub const STANDARD_ANCHORS: &[&str] = &[
    PLOT,
    INDEX_AXIS,
    INDEX_NUMBERS,
    CODE_AXIS,
    CODE_LINE_NUMBERS,
    PLOT_BODY,
    BAR_SELECTORS_CONTAINER,
    INDEX_BAR_SELECTORS,
    CODE_BAR_SELECTORS,
    FLOW_POINTS,
    CODE_LINES,
    CODE_TEXT,
];

/// Anything that can answer whether a named region exists
#[cfg_attr(test, mockall::automock)]
pub trait AnchorSurface {
    fn has_anchor(&self, anchor: &str) -> bool;
}

/// Fail with [`FlowPlotError::MissingAnchor`] unless `surface` has `anchor`
pub fn require_anchor(surface: &dyn AnchorSurface, anchor: &str) -> Result<()> {
    if surface.has_anchor(anchor) {
        Ok(())
    } else {
        tracing::error!("Render surface has no '{}' region", anchor);
        Err(FlowPlotError::MissingAnchor(anchor.to_string()))
    }
}

/// A surface described by its set of anchor names
#[derive(Debug, Clone, Default)]
pub struct Surface {
    anchors: BTreeSet<String>,
}

impl Surface {
    /// The surface with every standard anchor
    pub fn standard() -> Self {
        Self::with_anchors(STANDARD_ANCHORS.iter().copied())
    }

    pub fn with_anchors<'a>(anchors: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            anchors: anchors.into_iter().map(str::to_string).collect(),
        }
    }

    /// Same surface without `anchor`
    pub fn without(mut self, anchor: &str) -> Self {
        self.anchors.remove(anchor);
        self
    }
}

impl AnchorSurface for Surface {
    fn has_anchor(&self, anchor: &str) -> bool {
        self.anchors.contains(anchor)
    }
}
