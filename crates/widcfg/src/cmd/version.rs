use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("widcfg {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: widcfg");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("target: {}", env!("WIDCFG_BUILD_TARGET"));
    println!(
        "frame: max_size={} header={}",
        widcfg_frame::MAX_CFG_FRAME_SIZE,
        widcfg_frame::HEADER_SIZE
    );

    Ok(SUCCESS)
}
