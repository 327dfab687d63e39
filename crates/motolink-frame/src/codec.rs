use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::device::DeviceStatus;
use crate::error::{FrameError, Result};

/// Packet header: address (1) + checksum (1).
pub const HEADER_SIZE: usize = 2;

/// Largest packet either direction, including a multi-drop address byte.
pub const MAX_PACKET_SIZE: usize = 20;

/// Most words one command packet can carry (opcode word + parameters).
pub const MAX_COMMAND_WORDS: usize = (MAX_PACKET_SIZE - HEADER_SIZE) / 2;

/// Most result words one response packet can carry.
pub const MAX_RESPONSE_WORDS: usize = (MAX_PACKET_SIZE - HEADER_SIZE - 1) / 2;

/// Bits of the command word that select the axis.
pub const AXIS_MASK: u16 = 0x000F;

/// How host and devices share the serial line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolMode {
    /// One device per line; no addressing on responses.
    #[default]
    PointToPoint,
    /// RS-485 bus; devices reset framing after an idle gap and prefix each
    /// response with their node address.
    MultiDropIdleLine,
}

impl ProtocolMode {
    /// Extra leading bytes on every response in this mode.
    pub fn response_prefix(self) -> usize {
        match self {
            Self::PointToPoint => 0,
            Self::MultiDropIdleLine => 1,
        }
    }
}

/// An outgoing command: opcode word followed by parameter words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    words: Vec<u16>,
}

impl CommandFrame {
    /// Create a frame from raw words. Word 0 must already carry axis and opcode.
    pub fn new(words: impl Into<Vec<u16>>) -> Result<Self> {
        let words = words.into();
        if words.is_empty() {
            return Err(FrameError::EmptyCommand);
        }
        if words.len() > MAX_COMMAND_WORDS {
            return Err(FrameError::CommandTooLong {
                words: words.len(),
                max: MAX_COMMAND_WORDS,
            });
        }
        Ok(Self { words })
    }

    /// Create a frame for `opcode` on `axis` with the given parameters.
    pub fn from_parts(axis: u8, opcode: u8, params: &[u16]) -> Result<Self> {
        let mut words = Vec::with_capacity(params.len() + 1);
        words.push(pack_command_word(axis, opcode));
        words.extend_from_slice(params);
        Self::new(words)
    }

    /// All words, opcode word first.
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Opcode carried in the high byte of word 0.
    pub fn opcode(&self) -> u8 {
        (self.words[0] >> 8) as u8
    }

    /// Axis selector carried in the low nibble of word 0.
    pub fn axis(&self) -> u8 {
        (self.words[0] & AXIS_MASK) as u8
    }

    /// Parameter words following the opcode word.
    pub fn params(&self) -> &[u16] {
        &self.words[1..]
    }

    /// The total wire size of this command (header + words).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + 2 * self.words.len()
    }
}

/// Pack an axis selector and opcode into a command word.
pub fn pack_command_word(axis: u8, opcode: u8) -> u16 {
    (u16::from(opcode) << 8) | (u16::from(axis) & AXIS_MASK)
}

/// A decoded response: device status plus result words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Status reported by the device. Non-zero is still a delivered frame.
    pub status: DeviceStatus,
    /// Result words in wire order.
    pub words: Vec<u16>,
    /// The device answered with the 2-byte status frame only.
    pub error_only: bool,
}

impl Response {
    /// Whether the device reported success.
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Two's complement of the wrapping byte sum, so the packet sums to zero.
pub fn checksum(bytes: &[u8]) -> u8 {
    byte_sum(bytes).wrapping_neg()
}

/// Wrapping mod-256 sum of `bytes`.
pub fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Encode a command into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────┬───────────┬───────────────┬──────────────────────┐
/// │ Address   │ Checksum  │ Opcode word   │ Parameter words      │
/// │ (1B)      │ (1B)      │ (2B BE)       │ (2B BE each)         │
/// └───────────┴───────────┴───────────────┴──────────────────────┘
/// ```
///
/// The checksum byte makes the whole packet sum to 0 mod 256. Point-to-point
/// links use address 0.
pub fn encode_command(address: u8, frame: &CommandFrame, dst: &mut BytesMut) {
    let start = dst.len();
    dst.reserve(frame.wire_size());
    dst.put_u8(address);
    dst.put_u8(0);
    for &word in frame.words() {
        dst.put_u16(word);
    }
    dst[start + 1] = checksum(&dst[start..]);
}

/// Bytes to read for a response with `expected_words` result words.
pub fn response_len(expected_words: usize, mode: ProtocolMode) -> usize {
    mode.response_prefix() + HEADER_SIZE + 2 * expected_words
}

/// Validate a caller-requested result word count.
pub fn check_response_words(expected_words: usize) -> Result<()> {
    if expected_words > MAX_RESPONSE_WORDS {
        return Err(FrameError::ResponseTooLong {
            words: expected_words,
            max: MAX_RESPONSE_WORDS,
        });
    }
    Ok(())
}

/// Decode the bytes read back after a command.
///
/// `received` is exactly what the channel delivered before its deadline.
/// A non-zero status in a 2-byte frame is complete on its own: the device
/// skips the result words after most errors. Any other length mismatch is a
/// timeout, checked before the checksum so truncation is never reported as
/// corruption.
pub fn decode_response(
    received: &[u8],
    expected_words: usize,
    mode: ProtocolMode,
    node: u8,
) -> Result<Response> {
    check_response_words(expected_words)?;
    let expected = response_len(expected_words, mode);

    if received.is_empty() {
        return Err(FrameError::Timeout {
            expected,
            received: 0,
        });
    }

    let payload = match mode {
        ProtocolMode::PointToPoint => received,
        ProtocolMode::MultiDropIdleLine => {
            let (&address, rest) = received
                .split_first()
                .ok_or(FrameError::Timeout {
                    expected,
                    received: 0,
                })?;
            if address != node {
                return Err(FrameError::ForeignAddress {
                    expected: node,
                    received: address,
                });
            }
            rest
        }
    };

    // Protocol revision 1 only uses the low byte of the status.
    let status = DeviceStatus::new(payload.first().copied().map_or(0, u16::from));
    let error_only = !status.is_ok() && payload.len() == HEADER_SIZE;

    if !error_only && payload.len() != HEADER_SIZE + 2 * expected_words {
        return Err(FrameError::Timeout {
            expected,
            received: received.len(),
        });
    }

    // The response checksum covers status and words only. On a multi-drop
    // bus the leading address byte is already stripped from `payload`.
    let sum = byte_sum(payload);
    if sum != 0 {
        return Err(FrameError::Checksum { sum });
    }

    let words = if error_only {
        Vec::new()
    } else {
        payload[HEADER_SIZE..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect()
    };

    Ok(Response {
        status,
        words,
        error_only,
    })
}
