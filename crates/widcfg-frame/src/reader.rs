use bytes::{Buf, Bytes};
use tracing::debug;

use crate::codec::checksum;
use crate::value::WidValue;
use crate::wid::{Wid, WidKind};

/// One decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub wid: Wid,
    /// `None` when the id carries an unassigned kind tag; such records span
    /// only the 2-byte id.
    pub value: Option<WidValue>,
}

/// Why record decoding stopped before the end of the payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeAbort {
    /// The checksum of a binary record does not match its content.
    #[error("checksum failed for {wid} (computed {computed:#04x}, received {received:#04x})")]
    ChecksumMismatch {
        wid: Wid,
        computed: u8,
        received: u8,
    },

    /// A record claims more bytes than the payload holds.
    #[error("truncated record{} (needs {needed} bytes, {remaining} left)", fmt_wid(.wid))]
    Truncated {
        wid: Option<Wid>,
        needed: usize,
        remaining: usize,
    },
}

fn fmt_wid(wid: &Option<Wid>) -> String {
    wid.map(|wid| format!(" for {wid}")).unwrap_or_default()
}

/// Iterates over the TLV records of a response payload.
///
/// Yields `Err` at most once; after an error or the end of input the iterator
/// is exhausted. Never reads past the end of the payload.
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    buf: &'a [u8],
    done: bool,
}

impl<'a> RecordReader<'a> {
    /// Create a reader over a record payload (frame header already removed).
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            buf: payload,
            done: false,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn next_record(&mut self) -> Result<Record, DecodeAbort> {
        let mut cur = self.buf;
        if cur.remaining() < 2 {
            return Err(DecodeAbort::Truncated {
                wid: None,
                needed: 2,
                remaining: cur.remaining(),
            });
        }
        let wid = Wid(cur.get_u16_le());

        let value = match wid.kind() {
            None => {
                debug!(%wid, tag = wid.tag(), "skipping record with unknown kind");
                None
            }
            Some(WidKind::Byte) => {
                fixed_header(&mut cur, wid, 1)?;
                Some(WidValue::Byte(cur.get_u8()))
            }
            Some(WidKind::HalfWord) => {
                fixed_header(&mut cur, wid, 2)?;
                Some(WidValue::HalfWord(cur.get_u16_le()))
            }
            Some(WidKind::Word) => {
                fixed_header(&mut cur, wid, 4)?;
                Some(WidValue::Word(cur.get_u32_le()))
            }
            Some(WidKind::Str) => {
                need(&cur, wid, 2)?;
                let len = usize::from(cur.get_u16_le());
                need(&cur, wid, len)?;
                let content = Bytes::copy_from_slice(&cur[..len]);
                cur.advance(len);
                Some(WidValue::Str(content))
            }
            Some(WidKind::Bin) => {
                need(&cur, wid, 2)?;
                let len = usize::from(cur.get_u16_le());
                need(&cur, wid, len + 1)?;
                let content = &cur[..len];
                let computed = checksum(content);
                let received = cur[len];
                if computed != received {
                    return Err(DecodeAbort::ChecksumMismatch {
                        wid,
                        computed,
                        received,
                    });
                }
                let content = Bytes::copy_from_slice(content);
                cur.advance(len + 1);
                Some(WidValue::Bin(content))
            }
        };

        self.buf = cur;
        Ok(Record { wid, value })
    }
}

/// Check room for a fixed-width record body and consume its length field.
fn fixed_header(cur: &mut &[u8], wid: Wid, width: usize) -> Result<(), DecodeAbort> {
    need(*cur, wid, 2 + width)?;
    let declared = cur.get_u16_le();
    if usize::from(declared) != width {
        debug!(%wid, declared, width, "declared length differs from kind width");
    }
    Ok(())
}

fn need(cur: &[u8], wid: Wid, needed: usize) -> Result<(), DecodeAbort> {
    if cur.remaining() < needed {
        return Err(DecodeAbort::Truncated {
            wid: Some(wid),
            needed,
            remaining: cur.remaining(),
        });
    }
    Ok(())
}

impl Iterator for RecordReader<'_> {
    type Item = Result<Record, DecodeAbort>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.buf.is_empty() {
            return None;
        }
        let result = self.next_record();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// The single record of an info ('I') frame: `id(2) len(1) value(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoRecord {
    pub wid: Wid,
    pub len: u8,
    pub value: Option<u8>,
}

/// Read the info record at the start of `payload`, if the id and length fit.
pub fn parse_info_record(payload: &[u8]) -> Option<InfoRecord> {
    let mut cur = payload;
    if cur.remaining() < 3 {
        return None;
    }
    let wid = Wid(cur.get_u16_le());
    let len = cur.get_u8();
    let value = cur.first().copied();
    Some(InfoRecord { wid, len, value })
}
