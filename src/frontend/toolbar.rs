//! Toolbar panel: trace name, filter input and index mode selector.
//!
//! Sits between the menu bar and the plot surface.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::pipeline::IndexMode;

/// Context needed to render the toolbar.
pub struct ToolbarContext<'a> {
    pub filter_input: &'a str,
    /// Show the input in its error state
    pub filter_error: bool,
    pub index_mode: IndexMode,
    pub has_trace: bool,
}

/// Mutable state changes from the toolbar
#[derive(Default)]
pub struct ToolbarStateChanges {
    pub filter_input: Option<String>,
}

/// Result from rendering the toolbar
pub struct ToolbarResult {
    pub actions: Vec<AppAction>,
    pub state_changes: ToolbarStateChanges,
}

/// Render the toolbar.
///
/// Returns actions and state changes to be applied by the app.
pub fn render_toolbar(ui: &mut Ui, ctx: &ToolbarContext<'_>) -> ToolbarResult {
    let mut actions = Vec::new();
    let mut state_changes = ToolbarStateChanges::default();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        if ui.button("Open Trace...").clicked() {
            if let Some(path) = pick_trace_file() {
                actions.push(AppAction::OpenTrace(path));
            }
        }

        ui.separator();

        ui.add_enabled_ui(ctx.has_trace, |ui| {
            render_filter_group(ui, ctx, &mut actions, &mut state_changes);

            ui.separator();

            render_index_group(ui, ctx, &mut actions);
        });
    });

    ToolbarResult {
        actions,
        state_changes,
    }
}

fn render_filter_group(
    ui: &mut Ui,
    ctx: &ToolbarContext<'_>,
    actions: &mut Vec<AppAction>,
    state_changes: &mut ToolbarStateChanges,
) {
    ui.label("Filter:");

    let mut input = ctx.filter_input.to_string();
    let mut edit = egui::TextEdit::singleline(&mut input)
        .id_salt("filter_input")
        .hint_text("lines: 10-20")
        .desired_width(180.0);
    if ctx.filter_error {
        edit = edit.text_color(Color32::LIGHT_RED);
    }

    let response = ui.add(edit).on_hover_text("Press Enter to apply");
    if response.changed() {
        state_changes.filter_input = Some(input.clone());
    }
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        actions.push(AppAction::SubmitFilter(input));
    }

    if ui
        .small_button("✕")
        .on_hover_text("Clear filter")
        .clicked()
    {
        actions.push(AppAction::ClearFilter);
    }
}

fn render_index_group(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    ui.label("Index:");
    for mode in IndexMode::all() {
        let selected = *mode == ctx.index_mode;
        let text = RichText::new(mode.name());
        if ui.selectable_label(selected, text).clicked() && !selected {
            actions.push(AppAction::SelectIndexMode(*mode));
        }
    }
}

/// Show the native file picker for trace JSON files
pub fn pick_trace_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Execution Trace", &["json"])
        .pick_file()
}
