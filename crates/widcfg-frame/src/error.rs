use crate::wid::{Wid, WidKind};

/// Errors that can occur during record encoding and header decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The value's kind does not match the kind encoded in the WID.
    #[error("kind mismatch for {wid}: id encodes {expected}, value is {actual}")]
    KindMismatch {
        wid: Wid,
        expected: WidKind,
        actual: WidKind,
    },

    /// The WID carries a kind tag outside the known range.
    #[error("unrecognized kind tag {tag} in {wid}")]
    UnknownKind { wid: Wid, tag: u8 },

    /// A string or binary value does not fit the 16-bit length field.
    #[error("value too long for {wid} ({len} bytes, max {max})")]
    ValueTooLong { wid: Wid, len: usize, max: usize },

    /// The frame is shorter than the fixed header.
    #[error("frame too short ({len} bytes, header needs {needed})")]
    FrameTooShort { len: usize, needed: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
