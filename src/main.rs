//! Hotel Admin - desktop back office for room and staff enrollment.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use hotel_admin as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;

/// Desktop back office for room and staff enrollment.
#[derive(Parser)]
#[command(name = "hotel-admin")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to the config file
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// API token to send instead of the stored one
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging();

    tracing::info!("Hotel Admin starting...");

    // Determine config path based on mode
    let config_path = if let Some(path) = cli.config {
        path
    } else if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let (config, initial_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            (config, None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (
                AppConfig::default(),
                Some(format!("{e}\n\nUsing default settings. Fix them in Settings.")),
            )
        }
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;
    let app = App::new(config, config_path, cli.token, rt, initial_error)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Hotel Admin")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hotel Admin",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Log to stderr and to a daily file under the data directory.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let log_dir = app::token::data_dir().join("logs");

    let file_layer = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "hotel-admin.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            Some((tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false), guard))
        }
        Err(e) => {
            eprintln!("Failed to create log directory {}: {e}", log_dir.display());
            None
        }
    };

    let (file_layer, guard) = match file_layer {
        Some((layer, guard)) => (Some(layer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}
