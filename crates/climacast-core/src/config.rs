use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable that overrides `api.base_url` for one run.
pub const API_URL_ENV: &str = "CLIMACAST_API_URL";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Prediction backend
    #[serde(default)]
    pub api: ApiConfig,

    /// Place search (Nominatim)
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Device location lookup
    #[serde(default)]
    pub location: LocationConfig,

    /// Dashboard behavior
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the prediction backend, including the `/api` prefix
    pub base_url: String,

    /// Request timeout; model inference can be slow
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,

    /// Runtime override from the environment or command line. Never saved.
    #[serde(skip)]
    url_override: Option<String>,
}

impl ApiConfig {
    /// Backend URL in effect: the runtime override if set, else `base_url`
    pub fn url(&self) -> &str {
        self.url_override.as_deref().unwrap_or(&self.base_url)
    }

    /// Point this run at another backend without touching the saved `base_url`
    pub fn set_override(&mut self, url: impl Into<String>) {
        self.url_override = Some(url.into());
    }
}

fn default_api_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: default_api_timeout(),
            url_override: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Nominatim usage policy allows at most one request per second
    #[serde(default = "default_min_request_interval")]
    pub min_request_interval_ms: u64,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Quiet period after the last keystroke before a search is sent
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_user_agent() -> String {
    format!("ClimaCast/{} (terminal weather dashboard)", env!("CARGO_PKG_VERSION"))
}

fn default_geocoding_timeout() -> u64 {
    10
}

fn default_min_request_interval() -> u64 {
    1000
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_debounce() -> u64 {
    800
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: default_user_agent(),
            timeout_secs: default_geocoding_timeout(),
            min_request_interval_ms: default_min_request_interval(),
            cache_ttl_secs: default_cache_ttl(),
            debounce_ms: default_debounce(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// IP geolocation endpoint returning `{"lat": .., "lon": ..}`
    pub ip_lookup_url: String,

    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            ip_lookup_url: "http://ip-api.com/json".to_string(),
            timeout_secs: default_geocoding_timeout(),
        }
    }
}

/// A named coordinate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPreset {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Location shown before the user picks one
    pub default_location: LocationPreset,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_forecast_days() -> u8 {
    7
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_location: LocationPreset {
                name: "Delhi".to_string(),
                lat: 28.6139,
                lon: 77.2090,
            },
            forecast_days: default_forecast_days(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Dark mode enabled
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            api: ApiConfig::default(),
            geocoding: GeocodingConfig::default(),
            location: LocationConfig::default(),
            dashboard: DashboardConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("climacast")
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating defaults if missing.
    /// Environment overrides are applied after the file is read.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents =
                std::fs::read_to_string(config_path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Validate and log warnings.
    ///
    /// Returns an error if validation fails with critical errors.
    pub fn ensure_valid(&self) -> Result<ValidationResult> {
        let validation = self.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Using {} override: {}", API_URL_ENV, url);
                self.api.set_override(url);
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(self.api.url(), "api.base_url", &mut result);
        validate_url(&self.geocoding.base_url, "geocoding.base_url", &mut result);
        validate_url(
            &self.location.ip_lookup_url,
            "location.ip_lookup_url",
            &mut result,
        );

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        }

        if self.geocoding.user_agent.trim().is_empty() {
            result.add_error(
                "geocoding.user_agent",
                "Nominatim requires an identifying User-Agent",
            );
        }

        if self.geocoding.min_request_interval_ms < 1000 {
            result.add_warning(
                "geocoding.min_request_interval_ms",
                "Public Nominatim allows at most 1 request per second",
            );
        }

        if self.geocoding.cache_ttl_secs == 0 {
            result.add_warning("geocoding.cache_ttl_secs", "Search cache disabled (0 seconds)");
        }

        if !(1..=16).contains(&self.dashboard.forecast_days) {
            result.add_error(
                "dashboard.forecast_days",
                "Forecast days must be between 1 and 16",
            );
        }

        let loc = &self.dashboard.default_location;
        if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lon) {
            result.add_error(
                "dashboard.default_location",
                format!("Coordinates out of range: {}, {}", loc.lat, loc.lon),
            );
        }

        result
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the dashboard log file
    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join("climacast.log")
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("climacast");

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Config file inside this config's own directory
    pub fn file_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_api_url() {
        let mut config = Config::default();
        config.api.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.geocoding.base_url = "ftp://nominatim.example".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_forecast_days_range() {
        let mut config = Config::default();
        config.dashboard.forecast_days = 0;
        assert!(!config.validate().is_valid());

        config.dashboard.forecast_days = 17;
        assert!(!config.validate().is_valid());

        config.dashboard.forecast_days = 16;
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_fast_geocoding_interval_is_warning() {
        let mut config = Config::default();
        config.geocoding.min_request_interval_ms = 200;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "geocoding.min_request_interval_ms"));
    }

    #[test]
    fn test_default_location_is_delhi() {
        let config = Config::default();
        assert_eq!(config.dashboard.default_location.name, "Delhi");
        assert_eq!(config.dashboard.forecast_days, 7);
        assert_eq!(config.geocoding.debounce_ms, 800);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.config_dir, dir.path());
        assert_eq!(config.geocoding.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
config_dir = "/tmp/climacast"

[ui]
dark_mode = true
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.ui.dark_mode);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.geocoding.min_request_interval_ms, 1000);
    }

    #[test]
    fn test_save_round_trips_dark_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ui.dark_mode = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.ui.dark_mode);
    }

    #[test]
    fn test_env_override_wins_and_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        std::env::set_var(API_URL_ENV, "http://staging.example:9999/api");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.url(), "http://staging.example:9999/api");
        assert_eq!(config.api.base_url, "http://localhost:5000/api");

        config.save_to(&path).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("staging.example"));

        std::env::set_var(API_URL_ENV, "   ");
        let config = Config::load_from(&path).unwrap();
        std::env::remove_var(API_URL_ENV);
        assert_eq!(config.api.url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let mut config = Config::default();
        config.api.set_override("localhost:5000");
        let err = config.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
