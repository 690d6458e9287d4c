use std::sync::Arc;

use anyhow::Result;
use roomguru_calendar::SystemClock;
use roomguru_core::{App, Config};

fn main() -> Result<()> {
    // Logging level comes from the config file unless RUST_LOG is set
    let config = Config::load()?;
    roomguru_core::init_with_level(&config.logging.level)?;

    let app = App::from_config(config, Arc::new(SystemClock))?;
    let carousel = app.carousel();

    tracing::info!("Roomguru week carousel ready ({} days)", carousel.len());

    println!("Roomguru - Meeting Room Booking");
    println!("Config directory: {}", app.config().config_dir.display());

    let pivot = carousel.pivot_index();
    println!("{}", carousel.label_for_range(pivot)?);
    for index in pivot..(pivot + 7).min(carousel.len()) {
        let entry = carousel.get(index)?;
        println!("{}", serde_json::to_string(&entry)?);
    }

    Ok(())
}
