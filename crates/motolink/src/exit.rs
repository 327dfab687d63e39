use std::fmt;

use motolink_link::LinkError;
use motolink_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const TRANSPORT_ERROR: i32 = 3;
pub const DEVICE_ERROR: i32 = 2;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
}

pub fn link_error(context: &str, err: LinkError) -> CliError {
    let code = match &err {
        LinkError::Timeout { .. } => TIMEOUT,
        LinkError::Checksum { .. } => DATA_INVALID,
        LinkError::NotConnected
        | LinkError::InvalidPort(_)
        | LinkError::WriteFault(_)
        | LinkError::ReadFault(_) => TRANSPORT_ERROR,
        LinkError::Frame(_) | LinkError::InvalidOperation(_) => USAGE,
        LinkError::ConfigFile { .. } | LinkError::Json(_) => USAGE,
    };
    CliError::new(code, format!("{context}: {err}"))
}
