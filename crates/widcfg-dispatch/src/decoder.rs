use tracing::{debug, warn};
use widcfg_frame::{parse_info_record, DecodeAbort, RecordReader, Wid, WidValue};
use widcfg_table::{ConfigTable, UpdateOutcome};

/// Outcome of applying one response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSummary {
    /// Records stored in the table.
    pub applied: usize,
    /// Records for untracked ids, unknown kinds, or rejected values.
    pub ignored: usize,
    /// Set when decoding stopped early. Records before the failure stay applied.
    pub aborted: Option<DecodeAbort>,
}

/// Apply every record of a response ('R') payload to `table`.
///
/// A binary record with a bad checksum, or a record running past the end of
/// the payload, stops decoding; the rest of the frame is discarded.
pub fn parse_response(table: &mut ConfigTable, payload: &[u8]) -> ResponseSummary {
    let mut summary = ResponseSummary::default();

    for record in RecordReader::new(payload) {
        let record = match record {
            Ok(record) => record,
            Err(abort) => {
                match &abort {
                    DecodeAbort::ChecksumMismatch { .. } => warn!(%abort, "checksum failed, frame discarded"),
                    DecodeAbort::Truncated { .. } => warn!(%abort, "malformed response frame"),
                }
                summary.aborted = Some(abort);
                break;
            }
        };

        debug!(wid = %record.wid, "processing response");
        let Some(value) = record.value else {
            summary.ignored += 1;
            continue;
        };
        match table.lookup_and_set(record.wid, &value) {
            UpdateOutcome::Applied => summary.applied += 1,
            _ => summary.ignored += 1,
        }
    }

    summary
}

/// Apply an info ('I') payload to `table`.
///
/// Only a status record with a 1-byte value is honored. Returns true if the
/// status slot was updated.
pub fn parse_info(table: &mut ConfigTable, payload: &[u8]) -> bool {
    let Some(info) = parse_info_record(payload) else {
        debug!(len = payload.len(), "info payload too short");
        return false;
    };
    debug!(wid = %info.wid, len = info.len, "status info");

    match info {
        widcfg_frame::InfoRecord {
            wid: Wid::STATUS,
            len: 1,
            value: Some(status),
        } => table.lookup_and_set(Wid::STATUS, &WidValue::Byte(status)) == UpdateOutcome::Applied,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widcfg_frame::{CfgFrameWriter, WidValue};
    use widcfg_table::SlotValue;

    fn payload(records: &[(Wid, WidValue)]) -> Vec<u8> {
        let mut writer = CfgFrameWriter::new();
        for (wid, value) in records {
            assert!(writer.set(*wid, value).unwrap() > 0);
        }
        writer.into_bytes()
    }

    #[test]
    fn applies_every_kind() {
        let mut table = ConfigTable::init().unwrap();
        let bytes = payload(&[
            (Wid::STATUS, WidValue::Byte(3)),
            (Wid::GET_INACTIVE_TIME, WidValue::Word(u32::MAX)),
            (Wid::MAC_ADDR, WidValue::str(vec![0x02u8, 0, 0, 0, 0, 1])),
            (Wid::ANTENNA_SELECTION, WidValue::bin(vec![1u8, 2, 3])),
        ]);

        let summary = parse_response(&mut table, &bytes);
        assert_eq!(summary.applied, 4);
        assert_eq!(summary.ignored, 0);
        assert!(summary.aborted.is_none());

        assert_eq!(table.get(Wid::STATUS), Some(&SlotValue::Byte(3)));
        assert_eq!(table.get(Wid::GET_INACTIVE_TIME), Some(&SlotValue::Word(u32::MAX)));
        let mut out = [0u8; 6];
        assert_eq!(table.read(Wid::MAC_ADDR, &mut out), 6);
        assert_eq!(out, [0x02, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn untracked_ids_are_counted_not_applied() {
        let mut table = ConfigTable::init().unwrap();
        let bytes = payload(&[
            (Wid::BEACON_INTERVAL, WidValue::HalfWord(100)),
            (Wid::RSSI, WidValue::Byte(0xC4)),
        ]);
        let summary = parse_response(&mut table, &bytes);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(table.get(Wid::RSSI), Some(&SlotValue::Byte(0xC4)));
    }

    #[test]
    fn checksum_failure_keeps_earlier_records_only() {
        let mut table = ConfigTable::init().unwrap();
        let mut bytes = payload(&[
            (Wid::STATUS, WidValue::Byte(1)),
            (Wid::ANTENNA_SELECTION, WidValue::bin(vec![5u8, 6, 7])),
            (Wid::RSSI, WidValue::Byte(9)),
        ]);
        bytes[5 + 4 + 1] = bytes[5 + 4 + 1].wrapping_add(1);

        let summary = parse_response(&mut table, &bytes);
        assert_eq!(summary.applied, 1);
        assert!(matches!(
            summary.aborted,
            Some(DecodeAbort::ChecksumMismatch { .. })
        ));
        assert_eq!(table.get(Wid::STATUS), Some(&SlotValue::Byte(1)));
        assert_eq!(table.get(Wid::RSSI), Some(&SlotValue::Byte(0)));
        let mut out = [0u8; 3];
        assert_eq!(table.read(Wid::ANTENNA_SELECTION, &mut out), 0);
    }

    #[test]
    fn empty_string_record_clears_slot() {
        let mut table = ConfigTable::init().unwrap();
        parse_response(&mut table, &payload(&[(Wid::FIRMWARE_VERSION, WidValue::str("1.0"))]));
        let bytes = payload(&[(Wid::FIRMWARE_VERSION, WidValue::str(Vec::<u8>::new()))]);
        assert_eq!(bytes.len(), 4);

        let summary = parse_response(&mut table, &bytes);
        assert_eq!(summary.applied, 1);
        let mut out = [0u8; 8];
        assert_eq!(table.read(Wid::FIRMWARE_VERSION, &mut out), 0);
    }

    #[test]
    fn truncated_payload_aborts() {
        let mut table = ConfigTable::init().unwrap();
        let mut bytes = payload(&[(Wid::STATUS, WidValue::Byte(2))]);
        bytes.extend_from_slice(&[0x1F, 0x00, 0x01]);

        let summary = parse_response(&mut table, &bytes);
        assert_eq!(summary.applied, 1);
        assert!(matches!(summary.aborted, Some(DecodeAbort::Truncated { .. })));
        assert_eq!(table.get(Wid::RSSI), Some(&SlotValue::Byte(0)));
    }

    #[test]
    fn info_updates_status() {
        let mut table = ConfigTable::init().unwrap();
        assert!(parse_info(&mut table, &[0x05, 0x00, 0x01, 0x01]));
        assert_eq!(table.get(Wid::STATUS), Some(&SlotValue::Byte(1)));
    }

    #[test]
    fn info_ignores_other_ids_and_lengths() {
        let mut table = ConfigTable::init().unwrap();
        assert!(!parse_info(&mut table, &[0x1F, 0x00, 0x01, 0x07]));
        assert!(!parse_info(&mut table, &[0x05, 0x00, 0x02, 0x07, 0x00]));
        assert!(!parse_info(&mut table, &[0x05, 0x00]));
        assert_eq!(table.get(Wid::STATUS), Some(&SlotValue::Byte(0)));
        assert_eq!(table.get(Wid::RSSI), Some(&SlotValue::Byte(0)));
    }
}
