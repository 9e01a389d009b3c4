//! Nearby-source viewer.
//!
//! Shows a small window of source lines around the active line. Rows appear
//! and disappear immediately; only the `selected` flag marks the active row.

use crate::config::LayoutRegion;
use crate::error::Result;
use crate::pipeline::IndexedData;
use crate::plot::component::LayerView;
use crate::plot::surface::{self, require_anchor, AnchorSurface};
use crate::render::{Attrs, ElementData, ElementKey, ElementKind, ElementLayer, ElementSpec, Offset};
use crate::types::{CodeLine, Domain};

/// Number of rows shown around the active line
pub const NEARBY_WINDOW: u32 = 5;

/// Text drawn, invisibly, for blank rows so the row keeps its height
const BLANK_ROW_TEXT: &str = "#";

/// Window of `NEARBY_WINDOW` lines around `active`, clamped inside `domain`.
///
/// The window only shrinks when the domain itself is smaller.
pub fn nearby_window(domain: Domain<u32>, active: u32) -> Domain<u32> {
    let reach = NEARBY_WINDOW - 1;
    let mut min = domain.min.max(active.saturating_sub(reach / 2));
    let max = domain.max.min(min.saturating_add(reach));
    if max.saturating_sub(min) < reach {
        min = domain.min.max(max.saturating_sub(reach));
    }
    Domain::new(min, max)
}

pub struct CodeText {
    layout: LayoutRegion,
    layer: ElementLayer,
    active_line: Option<u32>,
}

impl CodeText {
    pub fn new(surface: &dyn AnchorSurface, layout: LayoutRegion) -> Result<Self> {
        require_anchor(surface, surface::CODE_TEXT)?;
        Ok(Self {
            layout,
            layer: ElementLayer::new(0.0),
            active_line: None,
        })
    }

    pub fn active_line(&self) -> Option<u32> {
        self.active_line
    }

    pub fn layer(&self) -> &ElementLayer {
        &self.layer
    }

    /// Re-centre on `line_number` and redraw from `data`
    pub fn activate(&mut self, line_number: u32, data: &IndexedData, now: f64) {
        self.active_line = Some(line_number);
        self.update(data, now);
    }

    /// Redraw the window around the active line; nothing shows until a line is active
    pub fn update(&mut self, data: &IndexedData, now: f64) {
        let Some(active) = self.active_line else {
            return;
        };

        let window = nearby_window(data.code_lines_domain, active);
        let rows: Vec<&CodeLine> = data
            .code_lines
            .iter()
            .filter(|c| window.contains(c.line_number))
            .collect();
        let row_height = self.layout.height / f64::from(NEARBY_WINDOW);
        let width = self.layout.width;

        self.layer.join(
            &rows,
            |c| ElementKey::Line(c.line_number),
            |c| {
                let blank = c.trimmed_text().is_empty();
                let row = f64::from(c.line_number - window.min);
                let attrs = Attrs::new(
                    0.0,
                    (row + 0.5) * row_height,
                    width,
                    row_height,
                    if blank { 0.0 } else { 1.0 },
                );
                ElementSpec {
                    kind: ElementKind::CodeTextLine,
                    data: ElementData {
                        text: if blank {
                            BLANK_ROW_TEXT.to_string()
                        } else {
                            c.trimmed_text().to_string()
                        },
                        indent: c.indentation(),
                        line_number: Some(c.line_number),
                        placeholder: blank,
                        ..Default::default()
                    },
                    enter_from: attrs,
                    target: attrs,
                }
            },
            |e| e.attrs,
            now,
        );
        self.layer.tick(now);

        for element in self.layer.iter_mut() {
            element.selected = element.data.line_number == Some(active);
        }
    }

    pub fn visit_layers<'a>(&'a self, parent: Offset, visitor: &mut dyn FnMut(LayerView<'a>)) {
        visitor(LayerView {
            component: surface::CODE_TEXT,
            origin: self.layout.origin(parent),
            layer: &self.layer,
        });
    }
}
