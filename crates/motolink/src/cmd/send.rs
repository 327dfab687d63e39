use motolink_frame::{pack_command_word, CommandFrame};
use motolink_link::{LinkConfig, SerialTransport};

use crate::cmd::SendArgs;
use crate::exit::{link_error, CliResult, DEVICE_ERROR, SUCCESS};
use crate::output::{print_response, OutputFormat};

pub fn run(args: SendArgs, config: LinkConfig, format: OutputFormat) -> CliResult<i32> {
    let frame = build_frame(args.words, config.axis)?;

    let mut link =
        SerialTransport::open(&config).map_err(|err| link_error("open failed", err))?;
    let response = link
        .send(&frame, args.expect)
        .map_err(|err| link_error("send failed", err))?;
    link.close().map_err(|err| link_error("close failed", err))?;

    print_response(&config.port, &frame, &response, format);

    if response.is_ok() {
        Ok(SUCCESS)
    } else {
        Ok(DEVICE_ERROR)
    }
}

/// A non-zero `--axis` replaces the axis nibble of the opcode word.
fn build_frame(mut words: Vec<u16>, axis: u8) -> CliResult<CommandFrame> {
    if axis != 0 {
        if let Some(first) = words.first_mut() {
            *first = pack_command_word(axis, (*first >> 8) as u8);
        }
    }
    CommandFrame::new(words)
        .map_err(|err| link_error("invalid command", err.into()))
}
