//! Per-component coordinate context.
//!
//! Each component converts data values to local coordinates with units
//! derived from its own layout region and the current data domains:
//!
//! - `code_line_height_unit = height / (max_line - min_line + 1)`
//! - `index_width_unit = width / (max_index - min_index)`
//!
//! A zero-width index domain has no finite width unit; positions along the
//! index axis then degrade to `0` and widths to `1`.

use crate::config::LayoutRegion;
use crate::error::{FlowPlotError, Result};
use crate::pipeline::IndexedData;
use crate::types::Domain;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateContext {
    pub code_lines_domain: Domain<u32>,
    pub index_domain: Domain<f64>,
    /// Height of one source line
    pub code_line_height_unit: f64,
    /// Width of a length-1 index interval, if finite
    pub index_width_unit: Option<f64>,
}

impl CoordinateContext {
    pub fn compute(layout: &LayoutRegion, data: &IndexedData) -> Self {
        let code_lines_domain = data.code_lines_domain;
        let index_domain = data.index_domain;

        let code_line_height_unit = layout.height / f64::from(code_lines_domain.line_count());
        let unit = layout.width / index_domain.span();

        Self {
            code_lines_domain,
            index_domain,
            code_line_height_unit,
            index_width_unit: unit.is_finite().then_some(unit),
        }
    }

    /// The index width unit, or the error describing why there is none
    pub fn try_index_width_unit(&self) -> Result<f64> {
        self.index_width_unit
            .ok_or_else(|| FlowPlotError::NonFiniteCoordinateUnit {
                min: self.index_domain.min,
                max: self.index_domain.max,
            })
    }

    /// Horizontal position of an index value
    pub fn index_x(&self, value: f64) -> f64 {
        let x = self
            .index_width_unit
            .map_or(0.0, |unit| (value - self.index_domain.min) * unit);
        if x.is_finite() {
            x
        } else {
            0.0
        }
    }

    /// Width of an index interval; never zero
    pub fn index_width(&self, length: f64) -> f64 {
        match self.index_width_unit.map(|unit| length * unit) {
            Some(w) if w.is_finite() && w != 0.0 => w,
            _ => 1.0,
        }
    }

    /// Offset of a line from the first line of the domain, in lines
    fn line_offset(&self, line_number: u32) -> f64 {
        f64::from(line_number) - f64::from(self.code_lines_domain.min)
    }

    /// Top edge of a line's band
    pub fn line_top(&self, line_number: u32) -> f64 {
        self.line_offset(line_number) * self.code_line_height_unit
    }

    /// Vertical centre of a line's band
    pub fn line_center(&self, line_number: u32) -> f64 {
        (self.line_offset(line_number) + 0.5) * self.code_line_height_unit
    }
}
