use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use motolink_frame::ProtocolMode;
use motolink_link::LinkConfig;

use crate::exit::{link_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod ports;
pub mod send;
pub mod sync;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one command frame and print the response.
    Send(SendArgs),
    /// Recover byte alignment with a point-to-point device.
    Sync,
    /// List serial ports on this system.
    Ports,
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, link: &LinkArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, link.to_config()?, format),
        Command::Sync => sync::run(link.to_config()?),
        Command::Ports => ports::run(format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    PointToPoint,
    MultiDrop,
}

impl From<ModeArg> for ProtocolMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::PointToPoint => ProtocolMode::PointToPoint,
            ModeArg::MultiDrop => ProtocolMode::MultiDropIdleLine,
        }
    }
}

/// Link options shared by every subcommand that talks to a device.
///
/// Flags override the config file, which overrides built-in defaults.
#[derive(Args, Debug, Default)]
pub struct LinkArgs {
    /// JSON link configuration file.
    #[arg(long, value_name = "FILE", env = "MOTOLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,
    /// Serial port name.
    #[arg(long, env = "MOTOLINK_PORT", global = true)]
    pub port: Option<String>,
    /// Baud rate.
    #[arg(long, env = "MOTOLINK_BAUD", global = true)]
    pub baud: Option<u32>,
    /// Response timeout (e.g. 100ms, 1s).
    #[arg(long, global = true)]
    pub timeout: Option<String>,
    /// Line protocol.
    #[arg(long, value_name = "MODE", global = true)]
    pub mode: Option<ModeArg>,
    /// Multi-drop node address.
    #[arg(long, global = true)]
    pub node: Option<u8>,
    /// Axis selector for command words.
    #[arg(long, global = true)]
    pub axis: Option<u8>,
    /// Log every device error with the command that caused it.
    #[arg(long, global = true)]
    pub diagnostics: bool,
}

impl LinkArgs {
    pub fn to_config(&self) -> CliResult<LinkConfig> {
        let mut config = match &self.config {
            Some(path) => LinkConfig::from_json_file(path)
                .map_err(|err| link_error("config load failed", err))?,
            None => LinkConfig::default(),
        };

        if let Some(port) = &self.port {
            config.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.baud = baud;
        }
        if let Some(timeout) = &self.timeout {
            let timeout = parse_duration(timeout)?;
            config.read_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        }
        if let Some(mode) = self.mode {
            config.protocol = mode.into();
        }
        if let Some(node) = self.node {
            config.node = node;
        }
        if let Some(axis) = self.axis {
            config.axis = axis;
        }
        if self.diagnostics {
            config.diagnostics = true;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Command words: opcode word first, then parameters (hex `0x0102` or decimal).
    #[arg(required = true, value_parser = parse_word)]
    pub words: Vec<u16>,
    /// Number of result words the command returns.
    #[arg(long, short = 'n', default_value = "0")]
    pub expect: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_word(input: &str) -> Result<u16, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => input.parse::<u16>(),
    };
    parsed.map_err(|err| format!("invalid word {input:?}: {err}"))
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, millis_per_unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, 1)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, 1000)
    } else {
        (input, 1)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(Duration::from_millis(value.saturating_mul(millis_per_unit)))
}
