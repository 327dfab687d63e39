//! Property-based tests for command encoding and response decoding.

use bytes::BytesMut;
use motolink_frame::{
    byte_sum, checksum, decode_response, encode_command, CommandFrame, FrameError, ProtocolMode,
    MAX_COMMAND_WORDS, MAX_RESPONSE_WORDS,
};
use proptest::prelude::*;

fn response_bytes(status: u8, words: &[u16]) -> Vec<u8> {
    let mut bytes = vec![status, 0];
    for word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    bytes[1] = checksum(&bytes);
    bytes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every encoded command sums to zero mod 256, whatever the address.
    #[test]
    fn prop_packet_sums_to_zero(
        address: u8,
        words in prop::collection::vec(any::<u16>(), 1..=MAX_COMMAND_WORDS),
    ) {
        let frame = CommandFrame::new(words.clone()).map_err(|e| {
            TestCaseError::fail(format!("frame should build: {e}"))
        })?;
        let mut wire = BytesMut::new();
        encode_command(address, &frame, &mut wire);
        prop_assert_eq!(wire.len(), 2 + 2 * words.len());
        prop_assert_eq!(wire[0], address);
        prop_assert_eq!(byte_sum(&wire), 0);
    }

    /// Flipping one bit of a full-length response is always caught and no
    /// words are returned.
    #[test]
    fn prop_single_bit_corruption_detected(
        words in prop::collection::vec(any::<u16>(), 0..=MAX_RESPONSE_WORDS),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut bytes = response_bytes(0, &words);
        let at = index.index(bytes.len());
        bytes[at] ^= 1 << bit;

        let result = decode_response(&bytes, words.len(), ProtocolMode::PointToPoint, 0);
        match result {
            Err(FrameError::Checksum { .. }) => {}
            // A flipped status bit in a 2-byte frame still fails the checksum.
            other => prop_assert!(false, "expected checksum error, got {:?}", other),
        }
    }

    /// A short non-empty read of an OK response is a timeout, never a
    /// partial decode.
    #[test]
    fn prop_short_read_is_timeout(
        words in prop::collection::vec(any::<u16>(), 1..=MAX_RESPONSE_WORDS),
        keep in any::<prop::sample::Index>(),
    ) {
        let bytes = response_bytes(0, &words);
        let keep = 1 + keep.index(bytes.len() - 1);
        let result = decode_response(&bytes[..keep], words.len(), ProtocolMode::PointToPoint, 0);
        let is_timeout = matches!(result, Err(FrameError::Timeout { .. }));
        prop_assert!(is_timeout, "expected timeout, got {:?}", result);
    }

    /// Multi-drop responses from any other node are rejected before decoding.
    #[test]
    fn prop_foreign_node_rejected(
        node: u8,
        other: u8,
        words in prop::collection::vec(any::<u16>(), 0..=MAX_RESPONSE_WORDS),
    ) {
        prop_assume!(node != other);
        let mut bytes = response_bytes(0, &words);
        bytes.insert(0, other);
        let result = decode_response(&bytes, words.len(), ProtocolMode::MultiDropIdleLine, node);
        prop_assert_eq!(
            result,
            Err(FrameError::ForeignAddress { expected: node, received: other })
        );
    }
}
