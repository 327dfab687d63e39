//! Request/response serial link to motion processors.
//!
//! This is the layer a command dispatcher talks to. Send a command frame,
//! get back the device status and result words, with checksum verification,
//! byte-alignment recovery and multi-drop addressing handled here.

pub mod channel;
pub mod config;
pub mod error;
pub mod serial;
pub mod traits;

pub use channel::SharedChannel;
pub use config::{LinkConfig, DEFAULT_READ_TIMEOUT_MS};
pub use error::{LinkError, Result};
pub use serial::{SerialTransport, SYNC_ATTEMPTS};
pub use traits::MotionTransport;
