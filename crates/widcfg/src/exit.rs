use std::fmt;

use widcfg_dispatch::DispatchError;
use widcfg_frame::FrameError;
use widcfg_table::TableError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const CONFIG_INVALID: i32 = 40;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::KindMismatch { .. } | FrameError::UnknownKind { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        FrameError::ValueTooLong { .. } | FrameError::FrameTooShort { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn table_error(context: &str, err: TableError) -> CliError {
    match err {
        TableError::ResourceExhausted(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
        TableError::LoadFailed(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(CONFIG_INVALID, format!("{context}: {other}")),
    }
}

pub fn dispatch_error(context: &str, err: DispatchError) -> CliError {
    match err {
        DispatchError::Frame(err) => frame_error(context, err),
    }
}
