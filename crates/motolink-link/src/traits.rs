use motolink_frame::{CommandFrame, Response};

use crate::error::{LinkError, Result};
use crate::serial::SerialTransport;

/// Operations the command layer needs from any physical link kind.
///
/// Serial, CAN and SPI links all carry the same command frames; only the
/// serial link implements the checksummed byte framing and sync.
pub trait MotionTransport {
    /// Send one command and return the device's response.
    fn send(&mut self, command: &CommandFrame, expected_words: usize) -> Result<Response>;

    /// Release the link. Idempotent.
    fn close(&mut self) -> Result<()>;

    /// Host-interface status word.
    fn status(&self) -> u16;

    /// Whether the device can accept a command.
    fn is_ready(&self) -> bool;

    /// Whether the device is signalling a host interrupt.
    fn has_interrupt(&self) -> bool;

    /// Whether the host interface has latched an error.
    fn has_error(&self) -> bool;

    /// Pulse the device's hardware reset line.
    fn hard_reset(&mut self) -> Result<()>;
}

/// A serial line has no status, interrupt or reset signals; the device is
/// always ready between exchanges.
impl MotionTransport for SerialTransport {
    fn send(&mut self, command: &CommandFrame, expected_words: usize) -> Result<Response> {
        SerialTransport::send(self, command, expected_words)
    }

    fn close(&mut self) -> Result<()> {
        SerialTransport::close(self)
    }

    fn status(&self) -> u16 {
        0
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn has_interrupt(&self) -> bool {
        false
    }

    fn has_error(&self) -> bool {
        false
    }

    fn hard_reset(&mut self) -> Result<()> {
        Err(LinkError::InvalidOperation(
            "hard reset is not available on serial links",
        ))
    }
}
