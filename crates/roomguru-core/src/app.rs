use anyhow::Result;
use std::sync::Arc;

use roomguru_calendar::{Clock, SystemClock, WeekCarousel};

use crate::error::{AppError, ConfigError};
use crate::Config;

/// Main application state: configuration plus the day picker model
#[derive(Debug)]
pub struct App {
    config: Arc<Config>,
    carousel: WeekCarousel,
}

impl App {
    /// Create a new application instance from the config file on disk
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(config, Arc::new(SystemClock))?)
    }

    /// Build the application from an already loaded configuration.
    ///
    /// The configuration is validated here, once; warnings are logged.
    pub fn from_config(config: Config, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        let settings = config.carousel.settings()?;
        let calendar = config.carousel.calendar()?;
        let formatter = config.carousel.formatter()?;

        tracing::info!(
            "Building week carousel: {} weeks each side, weeks start {}, zone {}",
            settings.span_weeks,
            settings.week_start,
            config.carousel.time_zone
        );

        let carousel = WeekCarousel::new(
            settings,
            Arc::new(calendar),
            Arc::new(formatter),
            clock,
        );

        Ok(Self {
            config: Arc::new(config),
            carousel,
        })
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn carousel(&self) -> &WeekCarousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut WeekCarousel {
        &mut self.carousel
    }
}
