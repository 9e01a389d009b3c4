//! Status bar panel: hovered side effect, point counts and errors.
//!
//! Sits below the plot surface.

use egui::{Color32, RichText, Ui};

use crate::pipeline::IndexMode;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    /// First side effect of the hovered flow point
    pub side_effect: Option<&'a str>,
    pub source_file: Option<&'a str>,
    pub total_points: usize,
    pub shown_points: usize,
    pub index_mode: IndexMode,
    pub hovered_line: Option<u32>,
    pub filter_error: bool,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Source file ===
        let file = ctx.source_file.unwrap_or("No trace");
        ui.label(RichText::new(file).small().strong());

        ui.separator();

        // === Point counts ===
        let count_color = if ctx.shown_points == 0 && ctx.total_points > 0 {
            Color32::YELLOW
        } else {
            Color32::GRAY
        };
        ui.colored_label(
            count_color,
            RichText::new(format!("Points: {}/{}", ctx.shown_points, ctx.total_points)).small(),
        );

        ui.separator();

        ui.label(RichText::new(format!("Index: {}", ctx.index_mode.axis_label())).small());

        if let Some(line) = ctx.hovered_line {
            ui.separator();
            ui.label(RichText::new(format!("Line {}", line)).small());
        }

        // === Side effect ===
        if let Some(effect) = ctx.side_effect {
            ui.separator();
            ui.colored_label(
                Color32::from_rgb(255, 180, 80),
                RichText::new(effect).small().monospace(),
            );
        }

        // === Errors (right-aligned) ===
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(error) = ctx.last_error {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            } else if ctx.filter_error {
                ui.colored_label(Color32::LIGHT_RED, RichText::new("Invalid filter").small());
            }
        });
    });
}
