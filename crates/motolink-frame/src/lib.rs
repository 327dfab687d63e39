//! Checksummed word framing for motion-controller serial links.
//!
//! Every command is framed as:
//! - A 1-byte node address (0 on point-to-point links)
//! - A 1-byte checksum making the packet sum to zero mod 256
//! - Big-endian 16-bit words: opcode word first, then parameters
//!
//! Responses carry a status byte, a checksum byte and the result words,
//! preceded by the node address on multi-drop buses. The codec is pure:
//! reading, writing and sync recovery live in `motolink-link`.

pub mod codec;
pub mod device;
pub mod error;

pub use codec::{
    byte_sum, check_response_words, checksum, decode_response, encode_command, pack_command_word,
    response_len, CommandFrame, ProtocolMode, Response, AXIS_MASK, HEADER_SIZE,
    MAX_COMMAND_WORDS, MAX_PACKET_SIZE, MAX_RESPONSE_WORDS,
};
pub use device::DeviceStatus;
pub use error::{FrameError, Result};
