use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("motolink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: motolink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("MOTOLINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("default_port: {}", motolink_transport::default_port_name());
    println!("default_baud: {}", motolink_transport::DEFAULT_BAUD);
    println!(
        "max_packet_bytes: {}",
        motolink_frame::MAX_PACKET_SIZE
    );

    Ok(SUCCESS)
}
