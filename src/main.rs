//! ClimaCast AI: terminal weather dashboard with 7-day AI forecasts.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive dashboard
//! climacast
//! climacast --route /dashboard
//!
//! # One-shot commands (JSON on stdout)
//! climacast search Pune --limit 3
//! climacast forecast --city London --days 5
//! climacast alerts --lat 19.076 --lon 72.8777
//! climacast health
//! ```

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;

use climacast_core::{AppError, Config, ConfigError, GeocodingError};
use climacast_geocoding::{find_preset, PresetCity, POPULAR_CITIES};
use climacast_ui::{AppServices, DashboardApp, ServiceMessage};

/// ClimaCast AI terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "climacast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page to open on start, e.g. /dashboard
    #[arg(long, default_value = "/")]
    route: String,

    /// Override the prediction backend URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search cities by name
    Search {
        query: String,
        #[arg(long, default_value_t = climacast_geocoding::client::DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Name the place at a coordinate
    Reverse {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Fetch the multi-day forecast
    Forecast {
        #[command(flatten)]
        location: LocationArgs,
        #[arg(long, default_value_t = 7)]
        days: u8,
    },
    /// Fetch extreme-weather alerts
    Alerts {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Show prediction model metadata
    ModelInfo,
    /// Check that the backend is reachable
    Health,
    /// List the popular cities
    Presets,
}

#[derive(Args, Debug)]
struct LocationArgs {
    /// City name; popular cities resolve without a lookup
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    city: Option<String>,
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.api_url)?;

    match cli.command {
        None => {
            climacast_core::init_with_log_file(&config.log_path())?;
            run_dashboard(config, &cli.route).await
        }
        Some(command) => {
            climacast_core::init()?;
            run_command(config, command).await
        }
    }
}

/// Load the saved config, apply `--api-url` for this run, then validate
fn load_config(api_url: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = api_url {
        config.api.set_override(url);
    }

    config
        .ensure_valid()
        .map_err(|e| AppError::Config(ConfigError::Invalid(e.to_string())))?;
    Ok(config)
}

async fn run_dashboard(config: Config, route: &str) -> Result<()> {
    let (mut app, rx) = DashboardApp::new(config)?;
    app.navigate(route);
    tracing::info!("ClimaCast dashboard started on {}", app.route.path());

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, rx);

    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Dashboard error: {:#}", e);
    }
    result
}

/// Main loop: draw, apply finished background work, then handle one key.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
    mut rx: UnboundedReceiver<ServiceMessage>,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| climacast_ui::ui::render(frame, app))?;

        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn run_command(config: Config, command: Command) -> Result<()> {
    let (services, _rx) = AppServices::from_config(&config)?;

    let output = match command {
        Command::Search { query, limit } => {
            let places = services
                .geocoder
                .search_cities(&query, limit)
                .await
                .map_err(|e| AppError::Geocoding(GeocodingError::SearchFailed(e.to_string())))?;
            serde_json::to_value(places)?
        }
        Command::Reverse { lat, lon } => {
            let place = services
                .geocoder
                .get_city_name(lat, lon)
                .await
                .map_err(|e| AppError::Geocoding(GeocodingError::ReverseFailed(e.to_string())))?;
            serde_json::to_value(place)?
        }
        Command::Forecast { location, days } => {
            let (lat, lon) = resolve(&services, &location).await?;
            let forecast = services
                .forecast
                .get_forecast(lat, lon, days)
                .await
                .map_err(|e| api_failure(e, &config))?;
            serde_json::to_value(forecast)?
        }
        Command::Alerts { location } => {
            let (lat, lon) = resolve(&services, &location).await?;
            let events = services
                .forecast
                .get_extreme_weather(lat, lon)
                .await
                .map_err(|e| api_failure(e, &config))?;
            serde_json::to_value(events)?
        }
        Command::ModelInfo => {
            let info = services
                .forecast
                .get_model_info()
                .await
                .map_err(|e| api_failure(e, &config))?;
            info.0
        }
        Command::Health => services
            .forecast
            .health_check()
            .await
            .map_err(|e| api_failure(e, &config))?,
        Command::Presets => serde_json::to_value(
            POPULAR_CITIES
                .iter()
                .map(PresetCity::to_place)
                .collect::<Vec<_>>(),
        )?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    services.shutdown();
    Ok(())
}

/// Coordinates for a location argument: explicit lat/lon, a popular city, or a lookup
async fn resolve(services: &AppServices, location: &LocationArgs) -> Result<(f64, f64)> {
    if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
        return Ok((lat, lon));
    }

    let Some(city) = location.city.as_deref() else {
        anyhow::bail!("Pass --city or both --lat and --lon");
    };

    if let Some(preset) = find_preset(city) {
        return Ok((preset.lat, preset.lon));
    }

    let place = services
        .geocoder
        .get_coordinates(city)
        .await
        .map_err(|e| AppError::Geocoding(GeocodingError::SearchFailed(e.to_string())))?
        .ok_or_else(|| {
            AppError::Geocoding(GeocodingError::NoResults(city.to_string()))
        })?;
    tracing::info!("Resolved '{}' to {}", city, place.display_name);
    Ok((place.lat, place.lon))
}

fn api_failure(error: climacast_forecast::ApiError, config: &Config) -> anyhow::Error {
    anyhow::anyhow!(
        "{}. Please check if your backend server is running on {}",
        error.message,
        config.api.url()
    )
}
