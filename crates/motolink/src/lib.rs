//! Framed serial link to motion-control processors.
//!
//! motolink sends checksummed command packets to a motion processor over a
//! serial line and decodes its status and result words, recovering byte
//! alignment when the device reports a desynchronizing error.
//!
//! # Crate Structure
//!
//! - [`transport`]: byte channel abstraction and the serial port implementation
//! - [`frame`]: packet encoding, response decoding and device status codes
//! - [`link`]: request/response transport with sync and multi-drop handles

/// Re-export transport types.
pub mod transport {
    pub use motolink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use motolink_frame::*;
}

/// Re-export link types.
pub mod link {
    pub use motolink_link::*;
}
