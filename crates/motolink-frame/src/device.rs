//! Status codes reported by the motion processor.
//!
//! A status travels inside a successfully transported response, so it is
//! data for the caller rather than a transport failure.

use std::fmt;

use serde::Serialize;

/// Device status word returned at the head of every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceStatus(u16);

impl DeviceStatus {
    pub const OK: Self = Self(0x00);
    pub const RESET: Self = Self(0x01);
    pub const INVALID_INSTRUCTION: Self = Self(0x02);
    pub const INVALID_AXIS: Self = Self(0x03);
    pub const INVALID_PARAMETER: Self = Self(0x04);
    pub const TRACE_RUNNING: Self = Self(0x05);
    pub const BLOCK_OUT_OF_BOUNDS: Self = Self(0x07);
    pub const TRACE_BUFFER_ZERO: Self = Self(0x08);
    pub const BAD_SERIAL_CHECKSUM: Self = Self(0x09);
    pub const INVALID_NEGATIVE_VALUE: Self = Self(0x0B);
    pub const INVALID_PARAMETER_CHANGE: Self = Self(0x0C);
    pub const LIMIT_EVENT_PENDING: Self = Self(0x0D);
    pub const INVALID_MOVE_INTO_LIMIT: Self = Self(0x0E);
    pub const INVALID_OPERATING_MODE_RESTORE: Self = Self(0x10);
    pub const INVALID_OPERATING_MODE_FOR_COMMAND: Self = Self(0x11);
    pub const BAD_STATE: Self = Self(0x12);
    pub const HARD_FAULT: Self = Self(0x13);

    /// Wrap a raw status code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The raw status code.
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Whether the device accepted the command.
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Whether this status means host and device may disagree on byte
    /// boundaries, so the link needs a sync before the next command.
    pub fn desynchronizes_link(self) -> bool {
        matches!(
            self,
            Self::HARD_FAULT | Self::BAD_SERIAL_CHECKSUM | Self::INVALID_INSTRUCTION | Self::INVALID_AXIS
        )
    }

    /// Human-readable description, if the code is known.
    pub fn description(self) -> Option<&'static str> {
        let text = match self {
            Self::OK => "no error",
            Self::RESET => "processor reset",
            Self::INVALID_INSTRUCTION => "invalid instruction",
            Self::INVALID_AXIS => "invalid axis",
            Self::INVALID_PARAMETER => "invalid parameter",
            Self::TRACE_RUNNING => "trace running",
            Self::BLOCK_OUT_OF_BOUNDS => "block out of bounds",
            Self::TRACE_BUFFER_ZERO => "trace buffer zero",
            Self::BAD_SERIAL_CHECKSUM => "bad serial checksum",
            Self::INVALID_NEGATIVE_VALUE => "invalid negative value",
            Self::INVALID_PARAMETER_CHANGE => "invalid parameter change",
            Self::LIMIT_EVENT_PENDING => "limit event pending",
            Self::INVALID_MOVE_INTO_LIMIT => "invalid move into limit",
            Self::INVALID_OPERATING_MODE_RESTORE => "invalid operating mode restore",
            Self::INVALID_OPERATING_MODE_FOR_COMMAND => "invalid operating mode for command",
            Self::BAD_STATE => "bad state",
            Self::HARD_FAULT => "hard fault",
            _ => return None,
        };
        Some(text)
    }
}

impl From<u16> for DeviceStatus {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => write!(f, "{text} ({:#04x})", self.0),
            None => write!(f, "unknown status ({:#04x})", self.0),
        }
    }
}
