use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use widcfg_frame::{HEADER_SIZE, MAX_CFG_FRAME_SIZE};
use widcfg_table::{TableConfig, MAX_SLOT_CAPACITY};

use crate::cmd::{load_config, EnvinfoArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

const ENV_VARS: [&str; 2] = ["WIDCFG_SEED_FILE", "RUST_LOG"];

#[derive(Serialize)]
struct PlatformInfo {
    os: &'static str,
    arch: &'static str,
}

#[derive(Debug, PartialEq, Serialize)]
struct SeedInfo {
    source: String,
    entries: usize,
    buffered: usize,
}

#[derive(Serialize)]
struct FrameLimits {
    max_frame_size: usize,
    header_size: usize,
    max_slot_capacity: usize,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    version: &'static str,
    target: &'static str,
    platform: PlatformInfo,
    seed: SeedInfo,
    frame: FrameLimits,
    environment: BTreeMap<&'static str, Option<String>>,
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat, seed: Option<&Path>) -> CliResult<i32> {
    let config = load_config(seed)?;

    let output = EnvInfoOutput {
        version: env!("CARGO_PKG_VERSION"),
        target: env!("WIDCFG_BUILD_TARGET"),
        platform: PlatformInfo {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        },
        seed: seed_info(seed, &config),
        frame: FrameLimits {
            max_frame_size: MAX_CFG_FRAME_SIZE,
            header_size: HEADER_SIZE,
            max_slot_capacity: MAX_SLOT_CAPACITY,
        },
        environment: ENV_VARS
            .into_iter()
            .map(|name| (name, std::env::var(name).ok()))
            .collect(),
    };

    print_envinfo(&output, format);
    Ok(SUCCESS)
}

fn seed_info(seed: Option<&Path>, config: &TableConfig) -> SeedInfo {
    SeedInfo {
        source: seed.map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
        entries: config.seed.len(),
        buffered: config.seed.iter().filter(|e| e.capacity.is_some()).count(),
    }
}

fn print_envinfo(output: &EnvInfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => crate::output::print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("widcfg environment\n");
            println!("  Version:    {}", output.version);
            println!("  Target:     {}", output.target);
            println!(
                "  Platform:   {} ({})",
                output.platform.os, output.platform.arch
            );
            println!(
                "  Seed:       {} ({} WIDs, {} buffered)",
                output.seed.source, output.seed.entries, output.seed.buffered
            );
            println!(
                "  Frame:      max {} bytes, header {}, slot capacity {}",
                output.frame.max_frame_size,
                output.frame.header_size,
                output.frame.max_slot_capacity
            );
            println!("\n  Environment:");
            for (k, v) in &output.environment {
                println!("    {:<20} {}", k, v.as_deref().unwrap_or("(not set)"));
            }
        }
        OutputFormat::Raw => println!("{}", output.version),
    }
}
