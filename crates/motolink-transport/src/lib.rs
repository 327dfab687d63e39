//! Byte-channel abstraction for motion-controller links.
//!
//! Provides a unified interface over the byte-oriented, timeout-bounded
//! connections a motion processor can be reached through:
//! - OS serial ports (RS-232 point-to-point, RS-485 multi-drop)
//!
//! This is the lowest layer of motolink. Framing, checksums and sync
//! recovery all build on top of the [`ByteChannel`] trait provided here.

pub mod error;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::{available_ports, default_port_name, SerialChannel};
pub use traits::{ByteChannel, ChannelSettings, Parity, DEFAULT_BAUD};
