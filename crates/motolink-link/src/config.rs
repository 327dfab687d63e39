use std::path::Path;
use std::time::Duration;

use motolink_frame::ProtocolMode;
use motolink_transport::{default_port_name, ChannelSettings, Parity, DEFAULT_BAUD};
use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// Default read deadline for one response.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;

/// Configuration for a framed serial link.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Serial port name (`COM1`, `/dev/ttyUSB0`, ...).
    pub port: String,
    /// Line rate in bits per second.
    pub baud: u32,
    /// Parity bit. The protocol itself runs without parity.
    pub parity: Parity,
    /// Point-to-point or multi-drop bus.
    pub protocol: ProtocolMode,
    /// Node address on a multi-drop bus.
    pub node: u8,
    /// Axis selector packed into command words.
    pub axis: u8,
    /// Read deadline for one response, in milliseconds.
    pub read_timeout_ms: u64,
    /// Log every non-zero device status with the command that caused it.
    pub diagnostics: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: default_port_name().to_string(),
            baud: DEFAULT_BAUD,
            parity: Parity::None,
            protocol: ProtocolMode::PointToPoint,
            node: 0,
            axis: 0,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            diagnostics: false,
        }
    }
}

impl LinkConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LinkError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Line settings for the channel.
    pub fn channel_settings(&self) -> ChannelSettings {
        ChannelSettings {
            baud: self.baud,
            parity: self.parity,
        }
    }

    /// Read deadline as a duration.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
