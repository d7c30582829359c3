//! WID-keyed TLV framing for radio configuration messages.
//!
//! Every configuration parameter is named by a 16-bit Wireless ID (WID) whose
//! bits 12-14 carry the value kind. Records are little-endian throughout:
//! - byte / half-word / word: `id(2) len(2) value(1|2|4)`
//! - string: `id(2) len(2) bytes(len)`
//! - binary: `id(2) len(2) bytes(len) checksum(1)`
//! - query: `id(2)`
//!
//! Incoming frames carry a 4-byte header (type tag, sequence number, two
//! reserved bytes) followed by zero or more records.

pub mod codec;
pub mod error;
pub mod reader;
pub mod value;
pub mod wid;
pub mod writer;

pub use codec::{
    checksum, decode_header, encode, encode_query, encode_value, FrameConfig, FrameHeader,
    HEADER_SIZE, MAX_CFG_FRAME_SIZE, MAX_VALUE_LEN, QUERY_RECORD_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::{parse_info_record, DecodeAbort, InfoRecord, Record, RecordReader};
pub use value::WidValue;
pub use wid::{wid_by_name, Wid, WidKind, KNOWN_WIDS};
pub use writer::CfgFrameWriter;
