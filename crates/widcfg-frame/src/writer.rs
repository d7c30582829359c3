use tracing::{debug, trace};

use crate::codec::{encode, encode_query, encode_value, FrameConfig, MAX_CFG_FRAME_SIZE};
use crate::error::Result;
use crate::value::WidValue;
use crate::wid::Wid;

/// Builds one outgoing configuration frame in a fixed-capacity buffer.
///
/// Every append returns the bytes written; 0 means the record did not fit and
/// the frame is unchanged. The offset only ever advances by what was written.
#[derive(Debug)]
pub struct CfgFrameWriter {
    buf: Vec<u8>,
    offset: usize,
    records: usize,
}

impl CfgFrameWriter {
    /// Create a writer with default configuration.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a writer with explicit configuration.
    ///
    /// `max_frame_size` is capped at [`MAX_CFG_FRAME_SIZE`].
    pub fn with_config(config: FrameConfig) -> Self {
        Self {
            buf: vec![0u8; config.max_frame_size.min(MAX_CFG_FRAME_SIZE)],
            offset: 0,
            records: 0,
        }
    }

    /// Append a set-record for a typed value.
    pub fn set(&mut self, wid: Wid, value: &WidValue) -> Result<usize> {
        let written = encode_value(&mut self.buf, self.offset, wid, value)?;
        Ok(self.advance(wid, written))
    }

    /// Append a set-record from raw little-endian value bytes.
    pub fn set_raw(&mut self, wid: Wid, value: &[u8]) -> usize {
        let written = encode(&mut self.buf, self.offset, wid, value);
        self.advance(wid, written)
    }

    /// Append a query record for `wid`.
    pub fn query(&mut self, wid: Wid) -> usize {
        let written = encode_query(&mut self.buf, self.offset, wid);
        self.advance(wid, written)
    }

    fn advance(&mut self, wid: Wid, written: usize) -> usize {
        if written == 0 {
            debug!(%wid, offset = self.offset, capacity = self.capacity(), "record does not fit in frame");
            return 0;
        }
        trace!(%wid, offset = self.offset, written, "record appended");
        self.offset += written;
        self.records += 1;
        written
    }

    /// Encoded bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.offset]
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.offset
    }

    /// Returns true if no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Number of records appended.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Frame capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Discard all records and zero the buffer.
    pub fn clear(&mut self) {
        self.buf.fill(0);
        self.offset = 0;
        self.records = 0;
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.offset);
        self.buf
    }
}

impl Default for CfgFrameWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::reader::RecordReader;

    #[test]
    fn appends_records_in_order() {
        let mut writer = CfgFrameWriter::new();
        assert_eq!(writer.set(Wid::STATUS, &WidValue::Byte(1)).unwrap(), 5);
        assert_eq!(writer.set(Wid::SSID, &WidValue::str("net")).unwrap(), 7);
        assert_eq!(writer.set_raw(Wid::FAILED_COUNT, &[1, 0, 0, 0]), 8);
        assert_eq!(writer.len(), 20);
        assert_eq!(writer.record_count(), 3);

        let records: Vec<_> = RecordReader::new(writer.as_bytes())
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].value, Some(WidValue::Word(1)));
    }

    #[test]
    fn oversized_config_is_capped_at_frame_limit() {
        let mut writer = CfgFrameWriter::with_config(FrameConfig {
            max_frame_size: 5000,
        });
        assert_eq!(writer.capacity(), MAX_CFG_FRAME_SIZE);

        let mut written = 0;
        while writer.set(Wid::STATUS, &WidValue::Byte(1)).unwrap() > 0 {
            written += 1;
        }
        assert_eq!(written, (MAX_CFG_FRAME_SIZE - 1) / 5);
        assert!(writer.len() < MAX_CFG_FRAME_SIZE);
    }

    #[test]
    fn rejected_record_does_not_advance() {
        let cfg = FrameConfig { max_frame_size: 12 };
        let mut writer = CfgFrameWriter::with_config(cfg);

        assert_eq!(writer.set(Wid::STATUS, &WidValue::Byte(1)).unwrap(), 5);
        assert_eq!(writer.set(Wid::FAILED_COUNT, &WidValue::Word(1)).unwrap(), 0);
        assert_eq!(writer.len(), 5);
        assert_eq!(writer.record_count(), 1);

        // Still room for a byte record ending strictly inside the frame.
        assert_eq!(writer.set_raw(Wid::RSSI, &[2]), 5);
        assert_eq!(writer.len(), 10);
        assert_eq!(writer.query(Wid::MAC_ADDR), 0);
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        let mut writer = CfgFrameWriter::new();
        let err = writer.set(Wid::MAC_ADDR, &WidValue::Byte(1)).unwrap_err();
        assert!(matches!(err, FrameError::KindMismatch { .. }));
        assert!(writer.is_empty());
    }

    #[test]
    fn query_records() {
        let mut writer = CfgFrameWriter::new();
        writer.query(Wid::FIRMWARE_VERSION);
        writer.query(Wid::MAC_ADDR);
        assert_eq!(writer.as_bytes(), &[0x01, 0x30, 0x0C, 0x30]);
    }

    #[test]
    fn clear_resets_state() {
        let mut writer = CfgFrameWriter::new();
        writer.set_raw(Wid::STATUS, &[1]);
        writer.clear();
        assert!(writer.is_empty());
        assert_eq!(writer.record_count(), 0);
        assert_eq!(writer.capacity(), crate::codec::MAX_CFG_FRAME_SIZE);
    }

    #[test]
    fn into_bytes_truncates() {
        let mut writer = CfgFrameWriter::new();
        writer.set_raw(Wid::STATUS, &[9]);
        assert_eq!(writer.into_bytes(), vec![0x05, 0x00, 0x01, 0x00, 0x09]);
    }
}
