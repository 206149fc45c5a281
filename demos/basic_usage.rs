//! Basic logger usage example
//!
//! Demonstrates console logging through the writer thread, thresholds and
//! metadata flags.
//!
//! Run with: cargo run --example basic_usage

use rust_sink_logger::prelude::*;
use rust_sink_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Sink Logger - Basic Usage Example ===\n");

    let logger = Logger::new();
    logger.set_level(LogLevel::Debug);
    logger.init_writer()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.output("This is an output message");
    logger.flush()?;

    println!("\n2. Raising the threshold to WARN, debug and info are skipped:");
    logger.set_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n3. Adding date, time, pid and tid metadata:");
    logger.add_flags(
        MetadataFlags::DATE | MetadataFlags::TIME | MetadataFlags::PID | MetadataFlags::TID,
    );
    warn!(logger, "Disk usage at {}%", 91);

    println!("\n4. Switching to JSON lines:");
    logger.set_flags(MetadataFlags::JSON | MetadataFlags::LEVEL | MetadataFlags::TIME);
    logger.set_level(LogLevel::Info);
    info!(logger, "User {} logged in", "alice");

    logger.stop_writer()?;

    let metrics = logger.metrics();
    println!(
        "\nEnqueued: {}, dispatched: {}, dropped: {}",
        metrics.enqueued(),
        metrics.dispatched(),
        metrics.dropped()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
