use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use tracing::debug;
use widcfg_frame::WidKind;
use widcfg_table::{ConfigTable, TableConfig};

use crate::exit::{table_error, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod doctor;
pub mod encode;
pub mod envinfo;
pub mod query;
pub mod table;
pub mod version;
pub mod wids;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode set-records into a configuration frame (hex).
    Encode(EncodeArgs),
    /// Encode query records into a configuration frame (hex).
    Query(QueryArgs),
    /// Decode an inbound frame (hex) into the configuration table.
    Decode(DecodeArgs),
    /// Show the configuration table built from the seed.
    Table(TableArgs),
    /// List known WIDs.
    Wids(WidsArgs),
    /// Validate the seed configuration and frame limits.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat, seed: Option<&Path>) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Query(args) => query::run(args, format),
        Command::Decode(args) => decode::run(args, format, seed),
        Command::Table(args) => table::run(args, format, seed),
        Command::Wids(args) => wids::run(args, format),
        Command::Doctor(args) => doctor::run(args, format, seed),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format, seed),
    }
}

/// Seed config from `path`, or the built-in default.
pub fn load_config(seed: Option<&Path>) -> CliResult<TableConfig> {
    match seed {
        Some(path) => {
            debug!(path = %path.display(), "loading seed config");
            TableConfig::from_file(path).map_err(|err| table_error("seed config", err))
        }
        None => Ok(TableConfig::default()),
    }
}

pub fn load_table(seed: Option<&Path>) -> CliResult<ConfigTable> {
    let config = load_config(seed)?;
    ConfigTable::with_config(config).map_err(|err| table_error("table init failed", err))
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Records as WID=VALUE (WID by name or number).
    #[arg(required = true, value_name = "WID=VALUE")]
    pub records: Vec<String>,
    /// Prepend a frame header, e.g. W:1.
    #[arg(long, value_name = "TYPE:SEQ")]
    pub header: Option<String>,
    /// Frame size limit in bytes, header included (at most 1468).
    #[arg(long, value_name = "BYTES")]
    pub max_frame_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// WIDs to query (by name or number).
    #[arg(required = true, value_name = "WID")]
    pub wids: Vec<String>,
    /// Prepend a frame header, e.g. Q:1.
    #[arg(long, value_name = "TYPE:SEQ")]
    pub header: Option<String>,
    /// Frame size limit in bytes, header included (at most 1468).
    #[arg(long, value_name = "BYTES")]
    pub max_frame_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Inbound frame as hex, header included.
    #[arg(value_name = "HEX", conflicts_with = "file")]
    pub frame: Option<String>,
    /// Read the raw frame bytes from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Print the seed configuration as JSON instead of slot values.
    #[arg(long)]
    pub seed_config: bool,
}

#[derive(Args, Debug, Default)]
pub struct WidsArgs {
    /// Only list WIDs of this kind.
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Byte,
    Hword,
    Word,
    Str,
    Bin,
}

impl From<KindArg> for WidKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Byte => WidKind::Byte,
            KindArg::Hword => WidKind::HalfWord,
            KindArg::Word => WidKind::Word,
            KindArg::Str => WidKind::Str,
            KindArg::Bin => WidKind::Bin,
        }
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
