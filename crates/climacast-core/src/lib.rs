pub mod app;
pub mod config;
pub mod error;
pub mod page;

pub use app::App;
pub use config::{
    ApiConfig, Config, DashboardConfig, GeocodingConfig, LocationConfig, LocationPreset, UiConfig,
    ValidationResult,
};
pub use error::{AppError, ConfigError, GeocodingError, LocationError};
pub use page::{NavLink, PageContent, PageContext, PageProvider, PageSection, Route, NAV_LINKS};

use anyhow::Result;
use std::path::Path;

/// Application name shown in titles and the user agent.
pub const APP_NAME: &str = "ClimaCast AI";

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging to stderr for one-shot commands
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("ClimaCast core initialized");
    Ok(())
}

/// Initialize logging into a file.
///
/// The interactive dashboard owns the terminal, so its logs go to
/// `<config_dir>/climacast.log` instead.
pub fn init_with_log_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("ClimaCast core initialized (logging to {})", path.display());
    Ok(())
}
