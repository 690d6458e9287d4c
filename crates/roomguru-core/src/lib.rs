pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{CarouselConfig, Config, LoggingConfig, ValidationResult};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize logging with an `info` default
pub fn init() -> Result<()> {
    init_with_level("info")
}

/// Initialize tracing/logging; `RUST_LOG` wins over `default_level`
pub fn init_with_level(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Roomguru core initialized");
    Ok(())
}
