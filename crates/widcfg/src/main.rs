mod cmd;
mod exit;
mod logging;
mod output;
mod parse;

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "widcfg", version, about = "WID configuration frame tool")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Seed config (JSON) listing the tracked WIDs.
    #[arg(long, value_name = "FILE", env = "WIDCFG_SEED_FILE", global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format, cli.seed.as_deref());

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from(["widcfg", "encode", "STATUS=3", "--header", "W:1"])
            .expect("encode args should parse");
        assert!(matches!(cli.command, Command::Encode(_)));
    }

    #[test]
    fn encode_requires_records() {
        let err = Cli::try_parse_from(["widcfg", "encode"]).expect_err("records are required");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn decode_rejects_hex_and_file_together() {
        let err = Cli::try_parse_from(["widcfg", "decode", "52010000", "--file", "f.bin"])
            .expect_err("conflicting args should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn wids_rejects_unknown_kind() {
        let err = Cli::try_parse_from(["widcfg", "wids", "--kind", "float"])
            .expect_err("unknown kind should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn seed_flag_is_global() {
        let cli = Cli::try_parse_from(["widcfg", "table", "--seed", "seed.json"])
            .expect("global seed should parse");
        assert_eq!(cli.seed, Some(PathBuf::from("seed.json")));
    }
}
