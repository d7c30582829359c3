use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use widcfg_frame::{Wid, WidKind, HEADER_SIZE, MAX_CFG_FRAME_SIZE};

use crate::error::{Result, TableError};
use crate::seed::default_seed;

/// Largest string or binary capacity: content that fits one binary record
/// after the frame header. A record may not end on the last frame byte.
pub const MAX_SLOT_CAPACITY: usize = MAX_CFG_FRAME_SIZE - HEADER_SIZE - 5 - 1;

/// Maximum bytes accepted from a table config file.
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// One tracked parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub wid: Wid,
    /// Content capacity for string and binary parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl SeedEntry {
    /// A byte, half-word or word parameter.
    pub fn fixed(wid: Wid) -> Self {
        Self {
            wid,
            capacity: None,
        }
    }

    /// A string or binary parameter holding up to `capacity` content bytes.
    pub fn buffer(wid: Wid, capacity: usize) -> Self {
        Self {
            wid,
            capacity: Some(capacity),
        }
    }

    fn validate(&self) -> Result<WidKind> {
        if self.wid.is_nil() {
            return Err(TableError::NilWid);
        }
        let kind = self.wid.kind().ok_or(TableError::UnknownKind(self.wid))?;
        match (kind, self.capacity) {
            (WidKind::Str | WidKind::Bin, None) => Err(TableError::MissingCapacity(self.wid)),
            (WidKind::Str | WidKind::Bin, Some(capacity)) if capacity > MAX_SLOT_CAPACITY => {
                Err(TableError::CapacityTooLarge {
                    wid: self.wid,
                    capacity,
                    max: MAX_SLOT_CAPACITY,
                })
            }
            (WidKind::Byte | WidKind::HalfWord | WidKind::Word, Some(_)) => {
                Err(TableError::UnexpectedCapacity(self.wid))
            }
            _ => Ok(kind),
        }
    }
}

/// Which parameters a table tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub seed: Vec<SeedEntry>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

impl TableConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| TableError::LoadFailed(format!("{}: {err}", path.display())))?;

        let mut text = String::new();
        file.take(MAX_CONFIG_FILE_SIZE + 1)
            .read_to_string(&mut text)
            .map_err(|err| TableError::LoadFailed(format!("{}: {err}", path.display())))?;
        if text.len() as u64 > MAX_CONFIG_FILE_SIZE {
            return Err(TableError::LoadFailed(format!(
                "{} exceeds max config size ({MAX_CONFIG_FILE_SIZE} bytes)",
                path.display()
            )));
        }

        Self::from_json_str(&text)
    }

    /// Check every entry and reject duplicate ids.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.seed {
            entry.validate()?;
            if !seen.insert(entry.wid) {
                return Err(TableError::DuplicateWid(entry.wid));
            }
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        TableConfig::default().validate().unwrap();
    }

    #[test]
    fn parses_json_seed() {
        let cfg = TableConfig::from_json_str(
            r#"{"seed":[{"wid":5},{"wid":4096},{"wid":12300,"capacity":6}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed.len(), 3);
        assert_eq!(cfg.seed[1].wid, Wid::RTS_THRESHOLD);
        assert_eq!(cfg.seed[2], SeedEntry::buffer(Wid::MAC_ADDR, 6));
    }

    #[test]
    fn json_roundtrip() {
        let cfg = TableConfig::default();
        let json = cfg.to_json_pretty().unwrap();
        assert_eq!(TableConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn rejects_duplicates() {
        let cfg = TableConfig {
            seed: vec![SeedEntry::fixed(Wid::STATUS), SeedEntry::fixed(Wid::STATUS)],
        };
        assert!(matches!(
            cfg.validate(),
            Err(TableError::DuplicateWid(Wid::STATUS))
        ));
    }

    #[test]
    fn rejects_nil_and_unknown_kind() {
        let nil = TableConfig {
            seed: vec![SeedEntry::fixed(Wid::NIL)],
        };
        assert!(matches!(nil.validate(), Err(TableError::NilWid)));

        let unknown = TableConfig {
            seed: vec![SeedEntry::fixed(Wid(0x5001))],
        };
        assert!(matches!(unknown.validate(), Err(TableError::UnknownKind(_))));
    }

    #[test]
    fn rejects_capacity_mismatch() {
        let missing = TableConfig {
            seed: vec![SeedEntry::fixed(Wid::MAC_ADDR)],
        };
        assert!(matches!(
            missing.validate(),
            Err(TableError::MissingCapacity(Wid::MAC_ADDR))
        ));

        let unexpected = TableConfig {
            seed: vec![SeedEntry::buffer(Wid::STATUS, 4)],
        };
        assert!(matches!(
            unexpected.validate(),
            Err(TableError::UnexpectedCapacity(Wid::STATUS))
        ));

        let too_large = TableConfig {
            seed: vec![SeedEntry::buffer(Wid::SSID, MAX_SLOT_CAPACITY + 1)],
        };
        assert!(matches!(
            too_large.validate(),
            Err(TableError::CapacityTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            TableConfig::from_json_str("{not json"),
            Err(TableError::InvalidJson(_))
        ));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let path = std::env::temp_dir().join(format!(
            "widcfg-table-missing-{}.json",
            std::process::id()
        ));
        assert!(matches!(
            TableConfig::from_file(&path),
            Err(TableError::LoadFailed(_))
        ));
    }

    #[test]
    fn from_file_loads_seed() {
        let dir = std::env::temp_dir().join(format!("widcfg-table-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("seed.json");
        std::fs::write(&path, r#"{"seed":[{"wid":31}]}"#).unwrap();

        let cfg = TableConfig::from_file(&path).unwrap();
        assert_eq!(cfg.seed, vec![SeedEntry::fixed(Wid::RSSI)]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
