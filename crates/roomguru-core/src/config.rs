use anyhow::{Context, Result};
use roomguru_calendar::format::{validate_pattern, DEFAULT_FULL_PATTERN, DEFAULT_SHORT_PATTERN};
use roomguru_calendar::{
    parse_weekday, CalendarError, CarouselSettings, GregorianCalendar, PatternFormatter,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

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
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Day picker settings
    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Weeks shown on each side of the current week
    #[serde(default = "default_span_weeks")]
    pub span_weeks: u32,

    /// First day of the week, e.g. "monday"
    #[serde(default = "default_week_start")]
    pub week_start: String,

    /// IANA time zone name used to reckon calendar days
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// strftime pattern for carousel cells
    #[serde(default = "default_short_label_format")]
    pub short_label_format: String,

    /// strftime pattern for the header label
    #[serde(default = "default_full_label_format")]
    pub full_label_format: String,
}

fn default_span_weeks() -> u32 {
    CarouselSettings::default().span_weeks
}

fn default_week_start() -> String {
    "monday".to_string()
}

/// `$TZ` when it names a known zone, UTC otherwise.
fn default_time_zone() -> String {
    std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').to_string())
        .filter(|tz| GregorianCalendar::from_name(tz).is_ok())
        .unwrap_or_else(|| "UTC".to_string())
}

fn default_short_label_format() -> String {
    DEFAULT_SHORT_PATTERN.to_string()
}

fn default_full_label_format() -> String {
    DEFAULT_FULL_PATTERN.to_string()
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            span_weeks: default_span_weeks(),
            week_start: default_week_start(),
            time_zone: default_time_zone(),
            short_label_format: default_short_label_format(),
            full_label_format: default_full_label_format(),
        }
    }
}

impl CarouselConfig {
    pub fn settings(&self) -> Result<CarouselSettings, CalendarError> {
        Ok(CarouselSettings {
            span_weeks: self.span_weeks,
            week_start: parse_weekday(&self.week_start)?,
        })
    }

    pub fn calendar(&self) -> Result<GregorianCalendar, CalendarError> {
        GregorianCalendar::from_name(&self.time_zone)
    }

    pub fn formatter(&self) -> Result<PatternFormatter, CalendarError> {
        PatternFormatter::new(&self.short_label_format, &self.full_label_format)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roomguru");

        Self {
            config_dir,
            carousel: CarouselConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there if it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        Self::from_toml_str(&contents).context("Failed to parse config file")
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        let carousel = &self.carousel;

        if carousel.span_weeks == 0 {
            result.add_error("carousel.span_weeks", "Span must be at least one week");
        } else if carousel.span_weeks > 52 {
            result.add_warning(
                "carousel.span_weeks",
                "Span is more than a year on each side",
            );
        }

        if let Err(e) = parse_weekday(&carousel.week_start) {
            result.add_error("carousel.week_start", e.to_string());
        }

        if let Err(e) = carousel.calendar() {
            result.add_error("carousel.time_zone", e.to_string());
        }

        if let Err(e) = validate_pattern(&carousel.short_label_format) {
            result.add_error("carousel.short_label_format", e.to_string());
        }

        if let Err(e) = validate_pattern(&carousel.full_label_format) {
            result.add_error("carousel.full_label_format", e.to_string());
        }

        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            result.add_error(
                "logging.level",
                format!("Invalid log filter: {}", self.logging.level),
            );
        }

        result
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        tracing::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("roomguru");

        Ok(config_dir.join("config.toml"))
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
    fn test_zero_span_is_error() {
        let mut config = Config::default();
        config.carousel.span_weeks = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "carousel.span_weeks"));
    }

    #[test]
    fn test_huge_span_is_warning() {
        let mut config = Config::default();
        config.carousel.span_weeks = 60;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "carousel.span_weeks"));
    }

    #[test]
    fn test_invalid_time_zone() {
        let mut config = Config::default();
        config.carousel.time_zone = "Mars/Olympus".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("Mars/Olympus")));
    }

    #[test]
    fn test_invalid_week_start_and_pattern() {
        let mut config = Config::default();
        config.carousel.week_start = "funday".to_string();
        config.carousel.full_label_format = "%Q".to_string();
        let result = config.validate();
        assert_eq!(result.errors.len(), 2);
        let summary = result.error_summary();
        assert!(summary.contains("carousel.week_start"));
        assert!(summary.contains("carousel.full_label_format"));
    }

    #[test]
    fn test_carousel_settings_from_config() {
        let mut config = Config::default();
        config.carousel.week_start = "Sunday".to_string();
        config.carousel.span_weeks = 2;
        let settings = config.carousel.settings().unwrap();
        assert_eq!(settings.span_weeks, 2);
        assert_eq!(settings.week_start, roomguru_calendar::Weekday::Sun);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            config_dir = "/tmp/roomguru"

            [carousel]
            time_zone = "Europe/Warsaw"
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.time_zone, "Europe/Warsaw");
        assert_eq!(config.carousel.span_weeks, 4);
        assert_eq!(config.carousel.week_start, "monday");
        assert_eq!(config.carousel.short_label_format, "%-d");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml_str("config_dir = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
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
