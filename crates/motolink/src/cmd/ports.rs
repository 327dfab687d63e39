use motolink_transport::{available_ports, default_port_name};

use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::{print_lines, OutputFormat};

pub fn run(format: OutputFormat) -> CliResult<i32> {
    let ports = available_ports().map_err(|err| transport_error("port scan failed", err))?;
    if ports.is_empty() {
        eprintln!("no serial ports found (default: {})", default_port_name());
    }
    print_lines("port", &ports, format);
    Ok(SUCCESS)
}
