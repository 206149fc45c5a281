//! Socket logging example
//!
//! Starts a local TCP listener, points the logger's socket sink at it and
//! prints what arrives on the other end. Also shows the dispatch failure
//! callback firing for records whose socket was closed before delivery.
//!
//! Run with: cargo run --example socket_logging

use rust_sink_logger::prelude::*;
use std::io::Read;
use std::net::TcpListener;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Sink Logger - Socket Logging Example ===\n");

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();

    let logger = Logger::builder()
        .level(LogLevel::Info)
        .console_writer(std::io::sink())
        .failure_policy(DispatchFailurePolicy::Alert)
        .on_dispatch_failure(Arc::new(|destination, total| {
            println!("   dropped {} record, {} so far", destination, total);
        }))
        .build()?;

    logger.set_socket("127.0.0.1", port, Protocol::Tcp)?;
    println!("1. Connected socket sink to 127.0.0.1:{}", port);

    logger.init_writer()?;
    logger.log_to_socket(LogLevel::Info, "hello socket");
    logger.log_to_socket(LogLevel::Error, "something went wrong");
    logger.stop_writer()?;

    println!("\n2. Records queued after the socket closes are dropped:");
    logger.log_to_socket(LogLevel::Info, "queued while open");
    logger.close_socket();
    logger.init_writer()?;
    logger.stop_writer()?;

    let (mut stream, _) = listener.accept()?;
    let mut received = String::new();
    stream.read_to_string(&mut received)?;

    println!("\n3. Listener received:");
    for line in received.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
