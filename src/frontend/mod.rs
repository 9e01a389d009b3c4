//! Frontend module for egui UI
//!
//! Hosts one [`Plotter`] on a fixed-size painter surface. Each frame the app
//! drains the plotter's event bus, advances transitions with the egui clock
//! and paints every layer; pointer movement over the surface is routed back
//! into the plotter's hover handling.
//!
//! # Submodules
//!
//! - [`painter`] - Maps visual elements to egui shapes
//! - [`toolbar`] - Trace picker, filter input, index mode selector
//! - [`status_bar`] - Hovered side effect and counts
//! - [`state`] - [`AppAction`]

pub mod painter;
pub mod state;
pub mod status_bar;
pub mod toolbar;

pub use state::AppAction;

use std::path::{Path, PathBuf};

use crate::app::Plotter;
use crate::config::{AppConfig, AppState};
use crate::pipeline::Filter;
use crate::plot::Surface;
use crate::render::Offset;
use crate::trace::load_trace;
use status_bar::{render_status_bar, StatusBarContext};
use toolbar::{render_toolbar, ToolbarContext};

/// Main application state for the flow plotter
pub struct FlowPlotApp {
    config: AppConfig,
    app_state: AppState,
    surface: Surface,
    plotter: Option<Plotter>,
    trace_path: Option<PathBuf>,
    filter_input: String,
    last_error: Option<String>,
}

impl FlowPlotApp {
    /// Create the app, opening `initial_trace` if given
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        app_state: AppState,
        initial_trace: Option<PathBuf>,
    ) -> Self {
        let visuals = if config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        let filter_input = config.initial_filter().to_string();
        let mut app = Self {
            config,
            app_state,
            surface: Surface::standard(),
            plotter: None,
            trace_path: None,
            filter_input,
            last_error: None,
        };

        if let Some(path) = initial_trace {
            app.open_trace(&path);
        }
        app
    }

    fn open_trace(&mut self, path: &Path) {
        let trace = match load_trace(path) {
            Ok(trace) => trace,
            Err(e) => {
                tracing::error!("Failed to open {:?}: {}", path, e);
                self.last_error = Some(e.to_string());
                return;
            }
        };
        let source_file = trace.filename().map(str::to_string);

        match self.plotter.as_mut() {
            Some(plotter) => plotter.load_trace(trace),
            None => match Plotter::create(trace, &self.config, &self.surface) {
                Ok(plotter) => self.plotter = Some(plotter),
                Err(e) => {
                    tracing::error!("Failed to create plotter: {}", e);
                    self.last_error = Some(e.to_string());
                    return;
                }
            },
        }

        self.app_state.add_recent_trace(path).source_file = source_file;
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
        self.trace_path = Some(path.to_path_buf());
        self.last_error = None;
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: AppAction, now: f64) {
        tracing::debug!("Action: {:?}", action);
        match action {
            AppAction::OpenTrace(path) => self.open_trace(&path),
            AppAction::SubmitFilter(text) => {
                if let Some(plotter) = self.plotter.as_mut() {
                    // errors only flash the input
                    let _ = plotter.submit_filter(&text, now);
                }
            }
            AppAction::ClearFilter => {
                self.filter_input.clear();
                if let Some(plotter) = self.plotter.as_mut() {
                    plotter.set_filter(Filter::none());
                }
            }
            AppAction::SelectIndexMode(mode) => {
                if let Some(plotter) = self.plotter.as_mut() {
                    plotter.select_index_mode(mode);
                }
            }
            AppAction::ToggleDarkMode => {
                self.config.dark_mode = !self.config.dark_mode;
                let visuals = if self.config.dark_mode {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                };
                ctx.set_visuals(visuals);
                if let Some(path) = crate::config::config_path() {
                    if let Err(e) = crate::config::ensure_app_data_dir()
                        .and_then(|_| self.config.save(&path))
                    {
                        tracing::warn!("Failed to save config: {}", e);
                    }
                }
            }
            AppAction::ForgetRecentTrace(path) => {
                self.app_state.remove_recent_trace(&path);
                if let Err(e) = self.app_state.save() {
                    tracing::warn!("Failed to save app state: {}", e);
                }
            }
            AppAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn render_menu_bar(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Trace...").clicked() {
                    if let Some(path) = toolbar::pick_trace_file() {
                        actions.push(AppAction::OpenTrace(path));
                    }
                    ui.close();
                }

                let reload = ui.add_enabled(self.trace_path.is_some(), egui::Button::new("Reload Trace"));
                if reload.clicked() {
                    if let Some(path) = &self.trace_path {
                        actions.push(AppAction::OpenTrace(path.clone()));
                    }
                    ui.close();
                }

                ui.menu_button("Recent Traces", |ui| {
                    if self.app_state.recent_traces.is_empty() {
                        ui.weak("None");
                    }
                    for recent in &self.app_state.recent_traces {
                        let name = recent
                            .path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| recent.path.display().to_string());
                        let response = ui
                            .button(name)
                            .on_hover_text(recent.path.display().to_string());
                        if response.clicked() {
                            if recent.exists() {
                                actions.push(AppAction::OpenTrace(recent.path.clone()));
                            } else {
                                actions.push(AppAction::ForgetRecentTrace(recent.path.clone()));
                            }
                            ui.close();
                        }
                    }
                });

                ui.separator();

                if ui.button("Quit").clicked() {
                    actions.push(AppAction::Quit);
                }
            });

            ui.menu_button("View", |ui| {
                let label = if self.config.dark_mode {
                    "Light Mode"
                } else {
                    "Dark Mode"
                };
                if ui.button(label).clicked() {
                    actions.push(AppAction::ToggleDarkMode);
                    ui.close();
                }
            });
        });
    }

    fn render_surface(&mut self, ui: &mut egui::Ui, now: f64) {
        let region = self.config.layout.surface;
        let size = egui::vec2(region.width as f32, region.height as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let origin = response.rect.min;

        let Some(plotter) = self.plotter.as_mut() else {
            painter.text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "Open a trace to begin",
                egui::FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        match response.hover_pos() {
            Some(pos) => {
                let local = pos - origin;
                plotter.pointer_moved(Offset::new(local.x as f64, local.y as f64), now);
            }
            None => {
                let selection = plotter.selection();
                if selection.hovered_line().is_some() || selection.hovered_step().is_some() {
                    plotter.pointer_left();
                }
            }
        }

        let mut layers = plotter.plot().layers();
        plotter
            .code_text()
            .visit_layers(Offset::ZERO, &mut |view| layers.push(view));
        painter::paint_layers(&painter, origin, &layers, ui.visuals());
    }
}

impl eframe::App for FlowPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time) * 1000.0;
        let mut actions = Vec::new();

        let mut animating = false;
        if let Some(plotter) = self.plotter.as_mut() {
            plotter.process_events(now);
            animating = plotter.tick(now);
        }
        let filter_error = self
            .plotter
            .as_ref()
            .is_some_and(|p| p.filter_error_active(now));
        if animating || filter_error {
            ctx.request_repaint();
        }

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui, &mut actions);
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let toolbar_ctx = ToolbarContext {
                filter_input: &self.filter_input,
                filter_error,
                index_mode: self
                    .plotter
                    .as_ref()
                    .map(|p| p.store().index_mode())
                    .unwrap_or(self.config.default_index_mode),
                has_trace: self.plotter.is_some(),
            };
            let result = render_toolbar(ui, &toolbar_ctx);
            if let Some(input) = result.state_changes.filter_input {
                self.filter_input = input;
            }
            actions.extend(result.actions);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let plotter = self.plotter.as_ref();
            let status_ctx = StatusBarContext {
                side_effect: plotter.and_then(|p| p.selection().status()),
                source_file: plotter.and_then(|p| p.store().trace().filename()),
                total_points: plotter.map_or(0, |p| p.store().trace().len()),
                shown_points: plotter.map_or(0, |p| p.indexed().flow_points.len()),
                index_mode: plotter
                    .map(|p| p.store().index_mode())
                    .unwrap_or(self.config.default_index_mode),
                hovered_line: plotter.and_then(|p| p.selection().hovered_line()),
                filter_error,
                last_error: self.last_error.as_deref(),
            };
            render_status_bar(ui, &status_ctx);
        });

        // Plot surface
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.render_surface(ui, now);
            });
        });

        // queued pipeline events run on the next frame
        if !actions.is_empty() {
            ctx.request_repaint();
        }
        for action in actions {
            self.handle_action(ctx, action, now);
        }
    }
}
