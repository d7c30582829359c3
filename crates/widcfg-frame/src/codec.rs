use bytes::BufMut;
use tracing::warn;

use crate::error::{FrameError, Result};
use crate::value::WidValue;
use crate::wid::{Wid, WidKind};

/// Maximum size of a configuration frame.
pub const MAX_CFG_FRAME_SIZE: usize = 1468;

/// Incoming frame header: type (1) + sequence number (1) + reserved (2).
pub const HEADER_SIZE: usize = 4;

/// Query record: id only.
pub const QUERY_RECORD_SIZE: usize = 2;

/// Largest string or binary content representable in the length field.
pub const MAX_VALUE_LEN: usize = u16::MAX as usize;

/// Header of an incoming frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Message type tag (`b'R'`, `b'I'`, `b'N'`, `b'S'`, ...).
    pub msg_type: u8,
    /// Sequence number echoed from the request.
    pub seq_no: u8,
}

impl FrameHeader {
    pub fn new(msg_type: u8, seq_no: u8) -> Self {
        Self { msg_type, seq_no }
    }

    /// Wire form of the header; the reserved bytes are zero.
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        [self.msg_type, self.seq_no, 0, 0]
    }
}

/// Split an incoming frame into its header and record payload.
pub fn decode_header(frame: &[u8]) -> Result<(FrameHeader, &[u8])> {
    if frame.len() < HEADER_SIZE {
        return Err(FrameError::FrameTooShort {
            len: frame.len(),
            needed: HEADER_SIZE,
        });
    }
    let header = FrameHeader {
        msg_type: frame[0],
        seq_no: frame[1],
    };
    Ok((header, &frame[HEADER_SIZE..]))
}

/// Sum of `content` modulo 256.
pub fn checksum(content: &[u8]) -> u8 {
    content.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Encode a record from raw little-endian value bytes.
///
/// The kind comes from `wid`. Returns the number of bytes written, or 0 when
/// the record would not end strictly inside `frame` and inside
/// [`MAX_CFG_FRAME_SIZE`], when a fixed-width kind
/// gets fewer value bytes than it needs, or when the id has no known kind.
/// Nothing is written when 0 is returned.
pub fn encode(frame: &mut [u8], offset: usize, wid: Wid, value: &[u8]) -> usize {
    let Some(kind) = wid.kind() else {
        warn!(%wid, tag = wid.tag(), "illegal id, record not encoded");
        return 0;
    };

    match kind {
        WidKind::Byte => put_leading(frame, offset, wid, value, 1),
        WidKind::HalfWord => put_leading(frame, offset, wid, value, 2),
        WidKind::Word => put_leading(frame, offset, wid, value, 4),
        WidKind::Str => put_str(frame, offset, wid, value),
        WidKind::Bin => put_bin(frame, offset, wid, value),
    }
}

/// Encode a typed value.
///
/// The value's kind must match the kind carried by `wid`. Capacity overflow is
/// not an error: it returns `Ok(0)` and leaves `frame` untouched.
pub fn encode_value(frame: &mut [u8], offset: usize, wid: Wid, value: &WidValue) -> Result<usize> {
    let expected = wid.kind().ok_or(FrameError::UnknownKind {
        wid,
        tag: wid.tag(),
    })?;
    if expected != value.kind() {
        return Err(FrameError::KindMismatch {
            wid,
            expected,
            actual: value.kind(),
        });
    }

    let written = match value {
        WidValue::Byte(v) => put_fixed(frame, offset, wid, &[*v]),
        WidValue::HalfWord(v) => put_fixed(frame, offset, wid, &v.to_le_bytes()),
        WidValue::Word(v) => put_fixed(frame, offset, wid, &v.to_le_bytes()),
        WidValue::Str(content) => {
            check_value_len(wid, content.len())?;
            put_str(frame, offset, wid, content)
        }
        WidValue::Bin(content) => {
            check_value_len(wid, content.len())?;
            put_bin(frame, offset, wid, content)
        }
    };
    Ok(written)
}

/// Encode a query record (id only) asking the radio for the current value.
pub fn encode_query(frame: &mut [u8], offset: usize, wid: Wid) -> usize {
    match record_span(frame, offset, QUERY_RECORD_SIZE) {
        Some(mut buf) => {
            buf.put_u16_le(wid.raw());
            QUERY_RECORD_SIZE
        }
        None => 0,
    }
}

/// Configuration for frame building.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Capacity of an outgoing frame in bytes. Default: [`MAX_CFG_FRAME_SIZE`].
    pub max_frame_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_CFG_FRAME_SIZE,
        }
    }
}

fn check_value_len(wid: Wid, len: usize) -> Result<()> {
    if len > MAX_VALUE_LEN {
        return Err(FrameError::ValueTooLong {
            wid,
            len,
            max: MAX_VALUE_LEN,
        });
    }
    Ok(())
}

/// The writable span for a record, if it ends strictly inside both `frame`
/// and the protocol's frame limit.
fn record_span(frame: &mut [u8], offset: usize, len: usize) -> Option<&mut [u8]> {
    let end = offset.checked_add(len)?;
    if end >= frame.len().min(MAX_CFG_FRAME_SIZE) {
        return None;
    }
    Some(&mut frame[offset..end])
}

/// Fixed-width record from the first `width` value bytes; 0 if fewer are given.
fn put_leading(frame: &mut [u8], offset: usize, wid: Wid, value: &[u8], width: usize) -> usize {
    value
        .get(..width)
        .map_or(0, |raw| put_fixed(frame, offset, wid, raw))
}

fn put_fixed(frame: &mut [u8], offset: usize, wid: Wid, raw: &[u8]) -> usize {
    let len = 4 + raw.len();
    let Some(mut buf) = record_span(frame, offset, len) else {
        return 0;
    };
    buf.put_u16_le(wid.raw());
    buf.put_u16_le(raw.len() as u16);
    buf.put_slice(raw);
    len
}

fn put_str(frame: &mut [u8], offset: usize, wid: Wid, content: &[u8]) -> usize {
    if content.len() > MAX_VALUE_LEN {
        return 0;
    }
    let len = 4 + content.len();
    let Some(mut buf) = record_span(frame, offset, len) else {
        return 0;
    };
    buf.put_u16_le(wid.raw());
    buf.put_u16_le(content.len() as u16);
    buf.put_slice(content);
    len
}

fn put_bin(frame: &mut [u8], offset: usize, wid: Wid, content: &[u8]) -> usize {
    if content.len() > MAX_VALUE_LEN {
        return 0;
    }
    let len = 5 + content.len();
    let Some(mut buf) = record_span(frame, offset, len) else {
        return 0;
    };
    buf.put_u16_le(wid.raw());
    buf.put_u16_le(content.len() as u16);
    let mut sum = 0u8;
    for byte in content {
        buf.put_u8(*byte);
        sum = sum.wrapping_add(*byte);
    }
    buf.put_u8(sum);
    len
}
