//! Query a motion processor once and print its answer.
//!
//! Run with:
//!   cargo run --example probe -- /dev/ttyUSB0 0x0100
//!
//! The second argument is the opcode word; the device is expected to return
//! one result word.

use std::time::Duration;

use motolink::frame::CommandFrame;
use motolink::link::{LinkConfig, SerialTransport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let port = args
        .next()
        .unwrap_or_else(|| motolink::transport::default_port_name().to_string());
    let word = args.next().unwrap_or_else(|| "0x0000".to_string());
    let word = u16::from_str_radix(word.trim_start_matches("0x"), 16)?;

    let config = LinkConfig {
        port,
        ..LinkConfig::default()
    };
    let mut link = SerialTransport::open(&config)?;
    link.set_timeout(Duration::from_millis(250))?;

    if let Err(err) = link.sync() {
        eprintln!("sync failed: {err}");
    }

    let response = link.send(&CommandFrame::new(vec![word])?, 1)?;
    println!(
        "status: {} words: {:04X?}{}",
        response.status,
        response.words,
        if response.error_only { " (error only)" } else { "" }
    );

    link.close()?;
    Ok(())
}
