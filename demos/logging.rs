//! Minimal logging example using PrefixLogger.

use confprint::PrefixLogger;
use confprint::prelude::*;
use log::LevelFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    PrefixLogger::new(PrinterFactory::new())
        .level(LevelFilter::Debug)
        .color(ColorChoice::Auto)
        .init()?;

    log::info!("Server started");
    log::debug!("Listening on\n0.0.0.0:8080\n[::]:8080");
    log::warn!("Cache miss");
    log::error!("Request failed");

    Ok(())
}
