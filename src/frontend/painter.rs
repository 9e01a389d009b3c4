//! Paints element layers onto an egui surface.
//!
//! The plot tree only knows abstract [`VisualElement`]s; this module maps
//! each [`ElementKind`] to shapes, colours and fonts.

use std::f32::consts::FRAC_PI_2;

use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2, Visuals};

use crate::plot::LayerView;
use crate::render::{Anchor, ElementKind, Offset, Rect, VisualElement};

const FLOW_POINT_COLOR: Color32 = Color32::from_rgb(70, 130, 220);
const SIDE_EFFECT_COLOR: Color32 = Color32::from_rgb(240, 150, 50);
const SELECTED_COLOR: Color32 = Color32::from_rgb(255, 220, 90);

const NUMBER_FONT_SIZE: f32 = 10.0;
const LABEL_FONT_SIZE: f32 = 12.0;
const CODE_FONT_SIZE: f32 = 11.0;

/// Paint `layers` in order with `origin` as the surface's top-left corner
pub fn paint_layers(painter: &Painter, origin: Pos2, layers: &[LayerView<'_>], visuals: &Visuals) {
    for view in layers {
        let base = origin + to_vec2(view.origin);
        for element in view.layer.iter() {
            paint_element(painter, base, element, visuals);
        }
    }
}

fn paint_element(painter: &Painter, base: Pos2, element: &VisualElement, visuals: &Visuals) {
    let opacity = element.attrs.opacity.clamp(0.0, 1.0) as f32;
    if opacity <= 0.0 || element.data.placeholder {
        return;
    }

    match element.kind {
        ElementKind::FlowPoint => {
            let fill = if element.data.has_side_effect {
                SIDE_EFFECT_COLOR
            } else {
                FLOW_POINT_COLOR
            };
            let rect = screen_rect(base, element.bounds(Offset::ZERO));
            painter.rect_filled(rect, 0.0, fill.gamma_multiply(opacity));
            if element.selected {
                painter.rect_stroke(
                    rect,
                    0.0,
                    Stroke::new(1.5, SELECTED_COLOR.gamma_multiply(opacity)),
                    egui::StrokeKind::Outside,
                );
            }
        }
        ElementKind::IndexBarSelector => {
            let rect = screen_rect(base, element.bounds(Offset::ZERO));
            painter.rect_stroke(
                rect,
                0.0,
                Stroke::new(0.5, visuals.faint_bg_color.gamma_multiply(opacity)),
                egui::StrokeKind::Inside,
            );
        }
        ElementKind::CodeBarSelector => {
            if element.selected {
                let rect = screen_rect(base, element.bounds(Offset::ZERO));
                painter.rect_filled(rect, 0.0, visuals.selection.bg_fill.gamma_multiply(0.35 * opacity));
            }
        }
        ElementKind::AxisBar => {
            let rect = screen_rect(base, element.bounds(Offset::ZERO));
            painter.rect_filled(rect, 0.0, visuals.weak_text_color().gamma_multiply(opacity));
        }
        ElementKind::CodeAxisLabel => {
            let font = FontId::proportional(LABEL_FONT_SIZE);
            let color = visuals.text_color().gamma_multiply(opacity);
            let galley = painter.layout_no_wrap(element.data.text.clone(), font, color);
            let centre = base + Vec2::new(element.attrs.x as f32, element.attrs.y as f32);
            let pos = rotated_text_pos(centre, galley.size());
            painter.add(TextShape::new(pos, galley, color).with_angle(-FRAC_PI_2));
        }
        kind => {
            let color = text_color(element, visuals).gamma_multiply(opacity);
            let pos = base + Vec2::new(element.attrs.x as f32, element.attrs.y as f32);
            painter.text(
                pos,
                text_align(kind.anchor()),
                display_text(element),
                font_for(kind),
                color,
            );
        }
    }
}

fn text_color(element: &VisualElement, visuals: &Visuals) -> Color32 {
    match element.kind {
        _ if element.selected => SELECTED_COLOR,
        ElementKind::IndexNumber | ElementKind::CodeLineNumber => visuals.weak_text_color(),
        _ => visuals.text_color(),
    }
}

fn font_for(kind: ElementKind) -> FontId {
    match kind {
        ElementKind::IndexNumber | ElementKind::CodeLineNumber => {
            FontId::monospace(NUMBER_FONT_SIZE)
        }
        ElementKind::IndexAxisLabel => FontId::proportional(LABEL_FONT_SIZE),
        _ => FontId::monospace(CODE_FONT_SIZE),
    }
}

/// Source text with its leading indentation restored
fn display_text(element: &VisualElement) -> String {
    match element.kind {
        ElementKind::CodeLine | ElementKind::CodeTextLine => {
            format!("{}{}", " ".repeat(element.data.indent), element.data.text)
        }
        _ => element.data.text.clone(),
    }
}

fn text_align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::TopLeft => Align2::LEFT_TOP,
        Anchor::CenterLeft => Align2::LEFT_CENTER,
        Anchor::CenterRight => Align2::RIGHT_CENTER,
        Anchor::Center => Align2::CENTER_CENTER,
    }
}

fn to_vec2(offset: Offset) -> Vec2 {
    Vec2::new(offset.x as f32, offset.y as f32)
}

fn screen_rect(base: Pos2, rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        base + Vec2::new(rect.x as f32, rect.y as f32),
        Vec2::new(rect.width as f32, rect.height as f32),
    )
}

/// Galley origin that centres text rotated a quarter turn counter-clockwise on `centre`
fn rotated_text_pos(centre: Pos2, size: Vec2) -> Pos2 {
    Pos2::new(centre.x - size.y / 2.0, centre.y + size.x / 2.0)
}
