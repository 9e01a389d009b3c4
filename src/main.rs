//! FlowPlot-RS - Main Entry Point
//!
//! Usage: `flowplot-rs [TRACE.json]`. Without an argument the last opened
//! trace is restored.

use flowplot_rs::{
    config::{self, AppConfig, AppState},
    frontend::FlowPlotApp,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "flowplot.log";

fn main() -> eframe::Result<()> {
    // Initialize logging; the guard flushes the file writer on exit
    let file_appender = config::ensure_app_data_dir()
        .map(|dir| tracing_appender::rolling::daily(dir.join("logs"), LOG_FILE_PREFIX));
    let (file_writer, _guard) = match file_appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,flowplot_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
        }))
        .init();

    tracing::info!("Starting FlowPlot-RS");

    let config = AppConfig::load_or_default();

    // Load application state (recent traces) and drop entries that vanished
    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_traces();

    let initial_trace = std::env::args_os().nth(1).map(PathBuf::from).or_else(|| {
        app_state.get_last_trace().map(|path| {
            tracing::info!("Restoring last trace from {:?}", path);
            path.to_path_buf()
        })
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.layout.surface.width as f32 + 40.0,
                config.layout.surface.height as f32 + 120.0,
            ])
            .with_min_inner_size([400.0, 400.0])
            .with_title("FlowPlot"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "FlowPlot",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(FlowPlotApp::new(
                cc,
                config,
                app_state,
                initial_trace,
            )))
        }),
    );

    tracing::info!("Shutting down...");
    result
}
