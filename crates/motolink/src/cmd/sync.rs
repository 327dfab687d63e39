use motolink_link::{LinkConfig, SerialTransport};
use tracing::info;

use crate::exit::{link_error, CliResult, SUCCESS};

pub fn run(config: LinkConfig) -> CliResult<i32> {
    let mut link =
        SerialTransport::open(&config).map_err(|err| link_error("open failed", err))?;
    link.sync().map_err(|err| link_error("sync failed", err))?;
    link.close().map_err(|err| link_error("close failed", err))?;

    info!(port = %config.port, "link synchronized");
    println!("synchronized: {}", config.port);
    Ok(SUCCESS)
}
