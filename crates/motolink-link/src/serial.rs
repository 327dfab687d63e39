use std::time::Duration;

use bytes::BytesMut;
use motolink_frame::{
    check_response_words, decode_response, encode_command, response_len, CommandFrame,
    ProtocolMode, Response, MAX_PACKET_SIZE,
};
use motolink_transport::{ByteChannel, ChannelSettings, Parity, SerialChannel};
use tracing::{debug, trace, warn};

use crate::channel::SharedChannel;
use crate::config::LinkConfig;
use crate::error::{read_fault, write_fault, LinkError, Result};

/// Zero-byte probes sent before sync gives up.
pub const SYNC_ATTEMPTS: usize = 15;

/// Bytes a device answers to one sync probe.
const SYNC_REPLY_LEN: usize = 2;

/// Framed request/response link to one motion processor over a serial channel.
///
/// Each `send` writes one checksummed packet and reads back exactly one
/// response; the device never talks unprompted. Handles for other nodes on
/// the same multi-drop bus come from [`multi_drop_handle`] and share the
/// channel; only the handle that opened the channel closes it.
///
/// [`multi_drop_handle`]: SerialTransport::multi_drop_handle
pub struct SerialTransport {
    channel: Option<SharedChannel>,
    owner: bool,
    config: LinkConfig,
    buf: BytesMut,
}

impl SerialTransport {
    /// Open the serial port named in `config`.
    pub fn open(config: &LinkConfig) -> Result<Self> {
        let channel = SerialChannel::open(&config.port, config.channel_settings())
            .map_err(LinkError::InvalidPort)?;
        Self::with_channel(channel, config)
    }

    /// Build a link over an already open channel and apply `config` to it.
    ///
    /// The channel is closed again if it rejects the line settings.
    pub fn with_channel(mut channel: impl ByteChannel + 'static, config: &LinkConfig) -> Result<Self> {
        if !channel.is_open() {
            return Err(LinkError::NotConnected);
        }
        if let Err(err) = channel.configure(&config.channel_settings()) {
            let _ = channel.close();
            return Err(LinkError::InvalidPort(err));
        }

        debug!(
            channel = channel.name(),
            baud = config.baud,
            protocol = ?config.protocol,
            node = config.node,
            "serial link ready"
        );

        Ok(Self {
            channel: Some(SharedChannel::new(channel)),
            owner: true,
            config: config.clone(),
            buf: BytesMut::with_capacity(MAX_PACKET_SIZE),
        })
    }

    /// Send one command and read its response.
    ///
    /// A non-zero device status comes back as `Ok` with
    /// [`Response::status`] set; only transport failures are `Err`. When the
    /// device answers a point-to-point command with a bare status that
    /// signals lost byte alignment, the link is resynchronized before
    /// returning.
    pub fn send(&mut self, command: &CommandFrame, expected_words: usize) -> Result<Response> {
        check_response_words(expected_words)?;
        let shared = self.connected()?;
        let mut channel = shared.lock()?;
        ensure_open(&**channel)?;

        let mode = self.config.protocol;
        let address = match mode {
            ProtocolMode::PointToPoint => 0,
            ProtocolMode::MultiDropIdleLine => self.config.node,
        };

        self.buf.clear();
        encode_command(address, command, &mut self.buf);
        trace!(tx = ?&self.buf[..], "command packet");

        // Drop anything left over from an earlier, misaligned exchange.
        channel.flush_input().map_err(read_fault)?;

        let written = channel.write(&self.buf).map_err(write_fault)?;
        if written != self.buf.len() {
            return Err(LinkError::WriteFault(format!(
                "wrote {written} of {} bytes",
                self.buf.len()
            )));
        }

        let expected = response_len(expected_words, mode);
        let mut rx = [0u8; MAX_PACKET_SIZE];
        let received = channel
            .read(&mut rx[..expected], self.config.read_timeout())
            .map_err(read_fault)?;
        trace!(rx = ?&rx[..received], "response packet");

        let response = decode_response(&rx[..received], expected_words, mode, self.config.node)?;

        if !response.is_ok() && self.config.diagnostics {
            warn!(
                status = %response.status,
                opcode = format_args!("{:#04x}", command.opcode()),
                axis = command.axis(),
                tx = ?command.params(),
                rx = ?response.words,
                "device reported error"
            );
        }

        if response.error_only
            && response.status.desynchronizes_link()
            && mode == ProtocolMode::PointToPoint
        {
            debug!(status = %response.status, "resynchronizing after error");
            if let Err(err) = sync_channel(&mut **channel, self.config.read_timeout()) {
                warn!(error = %err, "sync after device error failed");
            }
        }

        Ok(response)
    }

    /// Send `opcode` with `params` to this handle's axis.
    pub fn command(&mut self, opcode: u8, params: &[u16], expected_words: usize) -> Result<Response> {
        let frame = CommandFrame::from_parts(self.config.axis, opcode, params)?;
        self.send(&frame, expected_words)
    }

    /// Re-establish byte alignment with the device.
    ///
    /// Only meaningful point-to-point; a multi-drop bus resets framing on
    /// every idle gap.
    pub fn sync(&mut self) -> Result<()> {
        let shared = self.connected()?;
        if self.config.protocol != ProtocolMode::PointToPoint {
            return Err(LinkError::InvalidOperation(
                "sync is not used on multi-drop links",
            ));
        }
        let mut channel = shared.lock()?;
        ensure_open(&**channel)?;
        sync_channel(&mut **channel, self.config.read_timeout())
    }

    /// Close the link. The channel is released only by the handle that
    /// opened it. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let Some(shared) = self.channel.take() else {
            return Ok(());
        };
        if self.owner {
            let mut channel = shared.lock()?;
            channel.close().map_err(read_fault)?;
            debug!(channel = channel.name(), "serial link closed");
        } else {
            debug!(node = self.config.node, "multi-drop handle detached");
        }
        Ok(())
    }

    /// Apply a new baud rate and parity to the open channel.
    ///
    /// If the channel rejects them, the previous settings are put back and
    /// `InvalidPort` is returned.
    pub fn configure(&mut self, baud: u32, parity: Parity) -> Result<()> {
        let shared = self.connected()?;
        let mut channel = shared.lock()?;
        ensure_open(&**channel)?;

        let previous = channel.settings();
        let next = ChannelSettings { baud, parity };
        if let Err(err) = channel.configure(&next) {
            if let Err(restore_err) = channel.configure(&previous) {
                warn!(error = %restore_err, "failed to restore previous line settings");
            }
            return Err(LinkError::InvalidPort(err));
        }

        self.config.baud = baud;
        self.config.parity = parity;
        Ok(())
    }

    /// Set the read deadline for each response.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.connected()?;
        self.config.read_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        Ok(())
    }

    /// Switch between point-to-point and multi-drop framing.
    ///
    /// Both modes run without parity, so the line is re-applied at the
    /// current baud rate with parity off. The new mode takes effect even if
    /// the channel rejects that; the rejection is still returned.
    pub fn set_protocol_mode(&mut self, mode: ProtocolMode) -> Result<()> {
        self.connected()?;
        self.config.protocol = mode;
        self.configure(self.config.baud, Parity::None)
    }

    /// Set the node address used on a multi-drop bus.
    pub fn set_multi_drop_address(&mut self, node: u8) -> Result<()> {
        self.connected()?;
        self.config.node = node;
        Ok(())
    }

    /// Derive a handle for another node and axis on the same bus.
    ///
    /// The new handle carries its own copy of the configuration and shares
    /// the channel. It never closes the channel itself.
    pub fn multi_drop_handle(&self, axis: u8, node: u8) -> Result<Self> {
        let shared = self.connected()?;
        let mut config = self.config.clone();
        config.axis = axis;
        config.node = node;
        Ok(Self {
            channel: Some(shared),
            owner: false,
            config,
            buf: BytesMut::with_capacity(MAX_PACKET_SIZE),
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Axis selector packed into commands from this handle.
    pub fn axis(&self) -> u8 {
        self.config.axis
    }

    /// Whether this handle opened, and will close, the channel.
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    /// Whether the link can still exchange packets.
    pub fn is_connected(&self) -> bool {
        match &self.channel {
            Some(shared) => shared.lock().map(|c| c.is_open()).unwrap_or(false),
            None => false,
        }
    }

    /// The shared channel, provided this handle holds it and nobody has
    /// closed it underneath.
    fn connected(&self) -> Result<SharedChannel> {
        let shared = self.channel.clone().ok_or(LinkError::NotConnected)?;
        ensure_open(&**shared.lock()?)?;
        Ok(shared)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            debug!(error = %err, "error closing serial link on drop");
        }
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("config", &self.config)
            .field("owner", &self.owner)
            .field("connected", &self.channel.is_some())
            .finish()
    }
}

fn ensure_open(channel: &dyn ByteChannel) -> Result<()> {
    if channel.is_open() {
        Ok(())
    } else {
        Err(LinkError::NotConnected)
    }
}

/// Probe with single zero bytes until the device answers with its 2-byte
/// reply. A zero byte never starts a valid command, so the reply marks a
/// clean packet boundary.
fn sync_channel(channel: &mut dyn ByteChannel, timeout: Duration) -> Result<()> {
    channel.flush_input().map_err(read_fault)?;

    for attempt in 1..=SYNC_ATTEMPTS {
        let written = channel.write(&[0]).map_err(write_fault)?;
        if written != 1 {
            return Err(LinkError::WriteFault("sync probe not written".to_string()));
        }

        let mut rx = [0u8; SYNC_REPLY_LEN];
        match channel.read(&mut rx, timeout) {
            Ok(SYNC_REPLY_LEN) => {
                debug!(attempt, "link resynchronized");
                channel.flush_input().map_err(read_fault)?;
                return Ok(());
            }
            Ok(received) => trace!(attempt, received, "sync probe unanswered"),
            Err(motolink_transport::TransportError::Closed) => {
                return Err(LinkError::NotConnected)
            }
            Err(err) => trace!(attempt, error = %err, "sync probe read failed"),
        }
    }

    Err(LinkError::Timeout {
        expected: SYNC_REPLY_LEN,
        received: 0,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use motolink_frame::{checksum, DeviceStatus, FrameError};
    use motolink_transport::TransportError;

    use super::*;

    #[derive(Default)]
    struct Wire {
        written: Vec<Vec<u8>>,
        replies: VecDeque<Vec<u8>>,
        flushes: usize,
        closes: usize,
        closed: bool,
        settings: ChannelSettings,
        reject_baud: Option<u32>,
        short_write: bool,
    }

    /// Channel that answers each read with the next scripted reply.
    #[derive(Clone, Default)]
    struct ScriptedChannel(Arc<Mutex<Wire>>);

    impl ScriptedChannel {
        fn reply(&self, bytes: &[u8]) -> &Self {
            self.0.lock().unwrap().replies.push_back(bytes.to_vec());
            self
        }

        fn wire(&self) -> std::sync::MutexGuard<'_, Wire> {
            self.0.lock().unwrap()
        }
    }

    impl ByteChannel for ScriptedChannel {
        fn write(&mut self, bytes: &[u8]) -> motolink_transport::Result<usize> {
            let mut wire = self.wire();
            if wire.closed {
                return Err(TransportError::Closed);
            }
            wire.written.push(bytes.to_vec());
            if wire.short_write {
                return Ok(bytes.len() - 1);
            }
            Ok(bytes.len())
        }

        fn read(&mut self, buf: &mut [u8], _timeout: Duration) -> motolink_transport::Result<usize> {
            let mut wire = self.wire();
            if wire.closed {
                return Err(TransportError::Closed);
            }
            let reply = wire.replies.pop_front().unwrap_or_default();
            let n = reply.len().min(buf.len());
            buf[..n].copy_from_slice(&reply[..n]);
            Ok(n)
        }

        fn flush_input(&mut self) -> motolink_transport::Result<()> {
            let mut wire = self.wire();
            if wire.closed {
                return Err(TransportError::Closed);
            }
            wire.flushes += 1;
            Ok(())
        }

        fn configure(&mut self, settings: &ChannelSettings) -> motolink_transport::Result<()> {
            let mut wire = self.wire();
            if wire.reject_baud == Some(settings.baud) {
                return Err(TransportError::Io(std::io::Error::other("unsupported baud")));
            }
            wire.settings = *settings;
            Ok(())
        }

        fn settings(&self) -> ChannelSettings {
            self.wire().settings
        }

        fn is_open(&self) -> bool {
            !self.wire().closed
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn close(&mut self) -> motolink_transport::Result<()> {
            let mut wire = self.wire();
            if !wire.closed {
                wire.closes += 1;
                wire.closed = true;
            }
            Ok(())
        }
    }

    fn response(status: u8, words: &[u16]) -> Vec<u8> {
        let mut bytes = vec![status, 0];
        for word in words {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes[1] = checksum(&bytes);
        bytes
    }

    fn link(channel: &ScriptedChannel) -> SerialTransport {
        SerialTransport::with_channel(channel.clone(), &LinkConfig::default()).unwrap()
    }

    fn frame(words: &[u16]) -> CommandFrame {
        CommandFrame::new(words.to_vec()).unwrap()
    }

    #[test]
    fn send_worked_example() {
        let channel = ScriptedChannel::default();
        channel.reply(&[0x00, 0xBA, 0x12, 0x34]);
        let mut link = link(&channel);

        let response = link.send(&frame(&[0x0102, 0x00FF]), 1).unwrap();
        assert!(response.is_ok());
        assert_eq!(response.words, vec![0x1234]);
        assert_eq!(
            channel.wire().written,
            vec![vec![0x00, 0xFE, 0x01, 0x02, 0x00, 0xFF]]
        );
    }

    #[test]
    fn send_flushes_before_writing() {
        let channel = ScriptedChannel::default();
        channel.reply(&response(0, &[]));
        let mut link = link(&channel);

        link.send(&frame(&[0x0100]), 0).unwrap();
        assert_eq!(channel.wire().flushes, 1);
    }

    #[test]
    fn short_write_is_write_fault() {
        let channel = ScriptedChannel::default();
        channel.wire().short_write = true;
        let mut link = link(&channel);

        let err = link.send(&frame(&[0x0100]), 0).unwrap_err();
        assert!(matches!(err, LinkError::WriteFault(_)));
    }

    #[test]
    fn silence_is_timeout() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);

        let err = link.send(&frame(&[0x0100]), 2).unwrap_err();
        assert!(matches!(
            err,
            LinkError::Timeout {
                expected: 6,
                received: 0
            }
        ));
    }

    #[test]
    fn device_error_is_a_result_not_a_failure() {
        let channel = ScriptedChannel::default();
        channel.reply(&response(0x04, &[]));
        let mut link = link(&channel);

        let response = link.send(&frame(&[0x0100, 0x0001]), 2).unwrap();
        assert_eq!(response.status, DeviceStatus::INVALID_PARAMETER);
        assert!(response.words.is_empty());
        // Not a desync code: no probe follows the command.
        assert_eq!(channel.wire().written.len(), 1);
    }

    #[test]
    fn desync_error_triggers_one_sync() {
        let channel = ScriptedChannel::default();
        channel
            .reply(&response(0x09, &[]))
            .reply(&[])
            .reply(&[0x00, 0x00]);
        let mut link = link(&channel);

        let response = link.send(&frame(&[0x0100]), 1).unwrap();
        assert_eq!(response.status, DeviceStatus::BAD_SERIAL_CHECKSUM);

        let wire = channel.wire();
        let probes = wire.written.iter().filter(|w| w.as_slice() == [0]).count();
        assert_eq!(probes, 2);
        assert_eq!(wire.written.len(), 3);
    }

    #[test]
    fn failed_sync_after_error_still_returns_status() {
        let channel = ScriptedChannel::default();
        channel.reply(&response(0x13, &[]));
        let mut link = link(&channel);

        let response = link.send(&frame(&[0x0100]), 0).unwrap();
        assert_eq!(response.status, DeviceStatus::HARD_FAULT);
        assert_eq!(channel.wire().written.len(), 1 + SYNC_ATTEMPTS);
    }

    #[test]
    fn sync_succeeds_on_last_attempt() {
        let channel = ScriptedChannel::default();
        for _ in 1..SYNC_ATTEMPTS {
            channel.reply(&[0x00]);
        }
        channel.reply(&[0x00, 0x00]);
        let mut link = link(&channel);

        link.sync().unwrap();
        assert_eq!(channel.wire().written.len(), SYNC_ATTEMPTS);
    }

    #[test]
    fn sync_gives_up_after_ceiling() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);

        let err = link.sync().unwrap_err();
        assert!(matches!(err, LinkError::Timeout { .. }));
        assert_eq!(channel.wire().written.len(), SYNC_ATTEMPTS);
    }

    #[test]
    fn sync_not_used_on_multi_drop() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);
        link.set_protocol_mode(ProtocolMode::MultiDropIdleLine).unwrap();

        let err = link.sync().unwrap_err();
        assert!(matches!(err, LinkError::InvalidOperation(_)));
        assert!(channel.wire().written.is_empty());
    }

    #[test]
    fn multi_drop_send_uses_node_address() {
        let channel = ScriptedChannel::default();
        let mut reply = response(0, &[0x0042]);
        reply.insert(0, 0x03);
        channel.reply(&reply);
        let mut link = link(&channel);
        link.set_protocol_mode(ProtocolMode::MultiDropIdleLine).unwrap();
        link.set_multi_drop_address(0x03).unwrap();

        let response = link.send(&frame(&[0x0100]), 1).unwrap();
        assert_eq!(response.words, vec![0x0042]);
        assert_eq!(channel.wire().written[0][0], 0x03);
    }

    #[test]
    fn multi_drop_foreign_reply_is_read_fault() {
        let channel = ScriptedChannel::default();
        let mut reply = response(0, &[0x0042]);
        reply.insert(0, 0x04);
        channel.reply(&reply);
        let mut link = link(&channel);
        link.set_protocol_mode(ProtocolMode::MultiDropIdleLine).unwrap();
        link.set_multi_drop_address(0x03).unwrap();

        let err = link.send(&frame(&[0x0100]), 1).unwrap_err();
        assert!(matches!(err, LinkError::ReadFault(_)));
    }

    #[test]
    fn close_is_idempotent_and_disconnects() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);

        link.close().unwrap();
        link.close().unwrap();
        assert_eq!(channel.wire().closes, 1);
        assert!(!link.is_connected());

        assert!(matches!(
            link.send(&frame(&[0x0100]), 0),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(link.sync(), Err(LinkError::NotConnected)));
        assert!(matches!(
            link.configure(9600, Parity::None),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(
            link.set_timeout(Duration::from_millis(5)),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(
            link.set_multi_drop_address(1),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(
            link.multi_drop_handle(1, 1),
            Err(LinkError::NotConnected)
        ));
    }

    #[test]
    fn configure_restores_previous_settings_on_rejection() {
        let channel = ScriptedChannel::default();
        channel.wire().reject_baud = Some(1_000_000);
        let mut link = link(&channel);

        let err = link.configure(1_000_000, Parity::None).unwrap_err();
        assert!(matches!(err, LinkError::InvalidPort(_)));
        assert_eq!(channel.wire().settings.baud, 57_600);
        assert_eq!(link.config().baud, 57_600);

        link.configure(115_200, Parity::Even).unwrap();
        assert_eq!(channel.wire().settings.baud, 115_200);
        assert_eq!(link.config().parity, Parity::Even);
    }

    #[test]
    fn protocol_mode_change_clears_parity() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);
        link.configure(57_600, Parity::Odd).unwrap();

        link.set_protocol_mode(ProtocolMode::MultiDropIdleLine).unwrap();
        assert_eq!(channel.wire().settings.parity, Parity::None);
        assert_eq!(link.config().protocol, ProtocolMode::MultiDropIdleLine);
    }

    #[test]
    fn protocol_mode_switches_even_if_line_rejects_settings() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);
        channel.wire().reject_baud = Some(57_600);

        let err = link
            .set_protocol_mode(ProtocolMode::MultiDropIdleLine)
            .unwrap_err();
        assert!(matches!(err, LinkError::InvalidPort(_)));
        assert_eq!(link.config().protocol, ProtocolMode::MultiDropIdleLine);
    }

    #[test]
    fn handle_outliving_owner_is_disconnected_everywhere() {
        let channel = ScriptedChannel::default();
        let mut owner = link(&channel);
        let mut derived = owner.multi_drop_handle(1, 4).unwrap();
        owner.close().unwrap();

        assert!(!derived.is_connected());
        assert!(matches!(
            derived.set_timeout(Duration::from_millis(5)),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(
            derived.set_multi_drop_address(2),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(
            derived.set_protocol_mode(ProtocolMode::PointToPoint),
            Err(LinkError::NotConnected)
        ));
        assert!(matches!(
            derived.multi_drop_handle(2, 5),
            Err(LinkError::NotConnected)
        ));
        assert_eq!(derived.config().read_timeout_ms, owner.config().read_timeout_ms);
        assert_eq!(derived.config().node, 4);

        derived.close().unwrap();
    }

    #[test]
    fn rejected_initial_settings_close_channel() {
        let channel = ScriptedChannel::default();
        channel.wire().reject_baud = Some(57_600);

        let err = SerialTransport::with_channel(channel.clone(), &LinkConfig::default()).unwrap_err();
        assert!(matches!(err, LinkError::InvalidPort(_)));
        assert!(channel.wire().closed);
    }

    #[test]
    fn derived_handle_never_closes_shared_channel() {
        let channel = ScriptedChannel::default();
        let mut owner = link(&channel);
        let mut derived = owner.multi_drop_handle(2, 9).unwrap();

        assert!(!derived.is_owner());
        assert_eq!(derived.axis(), 2);
        assert_eq!(derived.config().node, 9);
        assert_eq!(owner.config().node, 0);

        derived.close().unwrap();
        assert!(!channel.wire().closed);
        assert!(owner.is_connected());

        let mut second = owner.multi_drop_handle(1, 4).unwrap();
        owner.close().unwrap();
        assert!(channel.wire().closed);
        assert!(matches!(
            second.send(&frame(&[0x0100]), 0),
            Err(LinkError::NotConnected)
        ));
    }

    #[test]
    fn command_packs_handle_axis() {
        let channel = ScriptedChannel::default();
        channel.reply(&response(0, &[]));
        let mut link = link(&channel);
        let mut axis_two = link.multi_drop_handle(2, 0).unwrap();

        axis_two.command(0x11, &[0x0005], 0).unwrap();
        assert_eq!(&channel.wire().written[0][2..], &[0x11, 0x02, 0x00, 0x05]);
        drop(axis_two);
        assert!(link.is_connected());
        link.close().unwrap();
    }

    #[test]
    fn oversized_response_request_rejected_before_io() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);

        let err = link.send(&frame(&[0x0100]), 9).unwrap_err();
        assert!(matches!(
            err,
            LinkError::Frame(FrameError::ResponseTooLong { .. })
        ));
        assert!(channel.wire().written.is_empty());
    }

    #[test]
    fn set_timeout_updates_config() {
        let channel = ScriptedChannel::default();
        let mut link = link(&channel);
        link.set_timeout(Duration::from_millis(250)).unwrap();
        assert_eq!(link.config().read_timeout(), Duration::from_millis(250));
    }
}
