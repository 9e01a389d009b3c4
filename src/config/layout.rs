//! Static layout tree of the render surface
//!
//! Every plot component owns one [`LayoutRegion`]: its size and its offset
//! relative to the parent component. The defaults reproduce the fixed
//! 560×560 surface the plotter was designed around.

use crate::render::{Offset, Rect};
use serde::{Deserialize, Serialize};

/// Size and parent-relative offset of one component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRegion {
    pub height: f64,
    pub width: f64,
    #[serde(default)]
    pub offset: Offset,
}

impl LayoutRegion {
    pub fn new(height: f64, width: f64) -> Self {
        Self {
            height,
            width,
            offset: Offset::ZERO,
        }
    }

    /// Same region translated by `(x, y)` relative to its parent
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.offset = Offset::new(x, y);
        self
    }

    /// Absolute origin given the parent's absolute origin
    pub fn origin(&self, parent: Offset) -> Offset {
        parent + self.offset
    }

    /// Absolute bounds given the parent's absolute origin
    pub fn bounds(&self, parent: Offset) -> Rect {
        let origin = self.origin(parent);
        Rect {
            x: origin.x,
            y: origin.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAxisLayout {
    pub region: LayoutRegion,
    pub index_numbers: LayoutRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeLineAxisLayout {
    pub region: LayoutRegion,
    pub code_line_numbers: LayoutRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSelectorsLayout {
    pub region: LayoutRegion,
    pub index_bar_selectors: LayoutRegion,
    pub code_bar_selectors: LayoutRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotBodyLayout {
    pub region: LayoutRegion,
    pub code_lines: LayoutRegion,
    pub bar_selectors: BarSelectorsLayout,
    pub flow_points: LayoutRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub region: LayoutRegion,
    pub index_axis: IndexAxisLayout,
    pub code_line_axis: CodeLineAxisLayout,
    pub plot_body: PlotBodyLayout,
}

/// Layout of the whole render surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    pub surface: LayoutRegion,
    pub plot: PlotLayout,
    pub code_text: LayoutRegion,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            surface: LayoutRegion::new(560.0, 560.0),
            plot: PlotLayout {
                region: LayoutRegion::new(450.0, 550.0).at(50.0, 10.0),
                index_axis: IndexAxisLayout {
                    region: LayoutRegion::new(50.0, 500.0).at(0.0, 400.0),
                    index_numbers: LayoutRegion::new(15.0, 500.0).at(0.0, 20.0),
                },
                code_line_axis: CodeLineAxisLayout {
                    region: LayoutRegion::new(400.0, 50.0).at(-50.0, 0.0),
                    code_line_numbers: LayoutRegion::new(400.0, 15.0).at(35.0, 0.0),
                },
                plot_body: PlotBodyLayout {
                    region: LayoutRegion::new(400.0, 500.0),
                    code_lines: LayoutRegion::new(400.0, 400.0),
                    bar_selectors: BarSelectorsLayout {
                        region: LayoutRegion::new(400.0, 500.0),
                        index_bar_selectors: LayoutRegion::new(400.0, 500.0),
                        code_bar_selectors: LayoutRegion::new(400.0, 500.0),
                    },
                    flow_points: LayoutRegion::new(400.0, 500.0),
                },
            },
            code_text: LayoutRegion::new(100.0, 500.0).at(50.0, 460.0),
        }
    }
}
