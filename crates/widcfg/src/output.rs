use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use widcfg_frame::{Wid, WidValue};
use widcfg_table::{ConfigTable, SlotValue};

use crate::parse::to_hex;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// `0x0005`
pub fn wid_hex(wid: Wid) -> String {
    format!("0x{:04X}", wid.raw())
}

pub fn wid_name(wid: Wid) -> &'static str {
    wid.name().unwrap_or("-")
}

/// Human-readable value: numbers in decimal, printable strings as text,
/// everything else as hex.
pub fn value_text(value: &WidValue) -> String {
    match value {
        WidValue::Byte(v) => v.to_string(),
        WidValue::HalfWord(v) => v.to_string(),
        WidValue::Word(v) => v.to_string(),
        WidValue::Str(content) => match std::str::from_utf8(content) {
            Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
            _ => format!("hex:{}", to_hex(content)),
        },
        WidValue::Bin(content) => to_hex(content),
    }
}

#[derive(Debug, Serialize)]
pub struct SlotOutput {
    pub wid: String,
    pub name: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    pub value: String,
}

impl SlotOutput {
    pub fn new(wid: Wid, slot: &SlotValue) -> Self {
        let capacity = match slot {
            SlotValue::Str(buf) | SlotValue::Bin(buf) => Some(buf.capacity()),
            _ => None,
        };
        Self {
            wid: wid_hex(wid),
            name: wid_name(wid),
            kind: slot.kind().as_str(),
            capacity,
            value: value_text(&slot.to_value()),
        }
    }
}

pub fn slot_outputs(table: &ConfigTable) -> Vec<SlotOutput> {
    table
        .iter()
        .map(|(wid, slot)| SlotOutput::new(wid, slot))
        .collect()
}

pub fn slots_table(slots: &[SlotOutput]) -> Table {
    let mut table = new_table(vec!["WID", "NAME", "KIND", "CAPACITY", "VALUE"]);
    for slot in slots {
        table.add_row(vec![
            slot.wid.clone(),
            slot.name.to_string(),
            slot.kind.to_string(),
            slot.capacity.map(|c| c.to_string()).unwrap_or_default(),
            slot.value.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_text_prefers_readable_forms() {
        assert_eq!(value_text(&WidValue::Word(70000)), "70000");
        assert_eq!(value_text(&WidValue::str(b"fw-1.2".to_vec())), "fw-1.2");
        assert_eq!(value_text(&WidValue::str(vec![0x00, 0x1F])), "hex:001f");
        assert_eq!(value_text(&WidValue::bin(vec![0xAA, 0x01])), "aa01");
    }

    #[test]
    fn slot_output_reports_capacity_for_buffers() {
        let table = ConfigTable::init().unwrap();
        let slots = slot_outputs(&table);
        let mac = slots
            .iter()
            .find(|s| s.name == "MAC_ADDR")
            .expect("default seed tracks MAC_ADDR");
        assert_eq!(mac.capacity, Some(6));
        assert_eq!(mac.kind, "str");
        let status = slots.iter().find(|s| s.name == "STATUS").unwrap();
        assert_eq!(status.capacity, None);
        assert_eq!(status.wid, "0x0005");
    }
}
