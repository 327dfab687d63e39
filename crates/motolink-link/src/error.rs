use std::path::PathBuf;

use motolink_frame::FrameError;
use motolink_transport::TransportError;

/// Errors that can occur on a framed serial link.
///
/// A non-zero device status is not an error here; it is returned inside
/// [`Response`](motolink_frame::Response).
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The link was never opened or has been closed.
    #[error("not connected")]
    NotConnected,

    /// The port could not be opened or rejected its line settings.
    #[error("invalid port: {0}")]
    InvalidPort(#[source] TransportError),

    /// The channel failed to accept the whole packet.
    #[error("write fault: {0}")]
    WriteFault(String),

    /// The channel failed while reading, or the response was not ours.
    #[error("read fault: {0}")]
    ReadFault(String),

    /// No response, or an incomplete one, before the read deadline.
    #[error("timed out ({received} of {expected} bytes received)")]
    Timeout { expected: usize, received: usize },

    /// The response did not sum to zero.
    #[error("checksum error (sum {sum:#04x})")]
    Checksum { sum: u8 },

    /// The operation is not supported by this link.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// The command could not be framed.
    #[error("frame error: {0}")]
    Frame(FrameError),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a link config.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FrameError> for LinkError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Timeout { expected, received } => Self::Timeout { expected, received },
            FrameError::Checksum { sum } => Self::Checksum { sum },
            FrameError::ForeignAddress { .. } => Self::ReadFault(err.to_string()),
            other => Self::Frame(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;

/// Map a channel error seen while writing.
pub(crate) fn write_fault(err: TransportError) -> LinkError {
    match err {
        TransportError::Closed => LinkError::NotConnected,
        other => LinkError::WriteFault(other.to_string()),
    }
}

/// Map a channel error seen while reading or flushing.
pub(crate) fn read_fault(err: TransportError) -> LinkError {
    match err {
        TransportError::Closed => LinkError::NotConnected,
        other => LinkError::ReadFault(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_errors_map_to_link_taxonomy() {
        assert!(matches!(
            LinkError::from(FrameError::Timeout {
                expected: 4,
                received: 1
            }),
            LinkError::Timeout {
                expected: 4,
                received: 1
            }
        ));
        assert!(matches!(
            LinkError::from(FrameError::ForeignAddress {
                expected: 1,
                received: 2
            }),
            LinkError::ReadFault(_)
        ));
        assert!(matches!(
            LinkError::from(FrameError::Checksum { sum: 3 }),
            LinkError::Checksum { sum: 3 }
        ));
        assert!(matches!(
            LinkError::from(FrameError::EmptyCommand),
            LinkError::Frame(FrameError::EmptyCommand)
        ));
    }

    #[test]
    fn closed_channel_is_not_connected() {
        assert!(matches!(
            write_fault(TransportError::Closed),
            LinkError::NotConnected
        ));
        assert!(matches!(
            read_fault(TransportError::Closed),
            LinkError::NotConnected
        ));
        assert!(matches!(
            read_fault(TransportError::Io(std::io::Error::other("boom"))),
            LinkError::ReadFault(_)
        ));
    }
}
