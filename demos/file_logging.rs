//! File logging example
//!
//! Demonstrates logging to the console and a file at the same time, and
//! configuring the logger from a settings file.
//!
//! Run with: cargo run --example file_logging

use rust_sink_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Sink Logger - File Logging Example ===\n");

    // The file sink only appends to files that already exist
    fs::File::create("application.log")?;
    fs::write(
        "logger.settings",
        "# demo settings\nlevel = info\nflags = level,date,time\nfile = application.log\n",
    )?;

    let logger = Logger::new();
    logger.load_settings("logger.settings")?;
    logger.init_writer()?;

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration... (below threshold)");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. File-only records:");
    for i in 1..=5 {
        logger.log_to_file(LogLevel::Info, format!("Processing item {}/5", i));
    }
    logger.write_file("raw line without metadata\n");

    // Blocks until every queued record has been written
    logger.stop_writer()?;
    logger.close_file();

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    fs::remove_file("logger.settings")?;
    Ok(())
}
