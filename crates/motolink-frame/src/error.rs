/// Errors that can occur while encoding commands or decoding responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// A command frame needs at least the opcode word.
    #[error("command frame is empty")]
    EmptyCommand,

    /// The command does not fit in one wire packet.
    #[error("command too long ({words} words, max {max})")]
    CommandTooLong { words: usize, max: usize },

    /// The caller asked for more result words than one packet can carry.
    #[error("response too long ({words} words, max {max})")]
    ResponseTooLong { words: usize, max: usize },

    /// Nothing, or an incomplete frame, arrived before the read deadline.
    #[error("response timed out ({received} of {expected} bytes)")]
    Timeout { expected: usize, received: usize },

    /// A multi-drop response carried another node's address.
    #[error("response from node {received:#04x}, expected {expected:#04x}")]
    ForeignAddress { expected: u8, received: u8 },

    /// The response bytes did not sum to zero.
    #[error("response checksum mismatch (sum {sum:#04x})")]
    Checksum { sum: u8 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
