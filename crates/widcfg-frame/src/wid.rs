//! Wireless IDs and their value kinds.
//!
//! Bits 12-14 of a WID select the value kind. The top bit is ignored, so
//! `0x8005` and `0x0005` share the byte kind.

use std::fmt;

/// Value kind carried in bits 12-14 of a WID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WidKind {
    /// 1-byte value.
    Byte,
    /// 2-byte little-endian value.
    #[cfg_attr(feature = "serde", serde(rename = "hword"))]
    HalfWord,
    /// 4-byte little-endian value.
    Word,
    /// Length-prefixed byte string.
    Str,
    /// Length-prefixed binary blob followed by a checksum byte.
    Bin,
}

impl WidKind {
    /// Map a 3-bit kind tag to a kind. Tags 5-7 are unassigned.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Byte),
            1 => Some(Self::HalfWord),
            2 => Some(Self::Word),
            3 => Some(Self::Str),
            4 => Some(Self::Bin),
            _ => None,
        }
    }

    /// The 3-bit tag for this kind.
    pub fn tag(self) -> u8 {
        match self {
            Self::Byte => 0,
            Self::HalfWord => 1,
            Self::Word => 2,
            Self::Str => 3,
            Self::Bin => 4,
        }
    }

    /// Width of the value for fixed-size kinds.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Byte => Some(1),
            Self::HalfWord => Some(2),
            Self::Word => Some(4),
            Self::Str | Self::Bin => None,
        }
    }

    /// Lowercase name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::HalfWord => "hword",
            Self::Word => "word",
            Self::Str => "str",
            Self::Bin => "bin",
        }
    }
}

impl fmt::Display for WidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 16-bit Wireless ID naming one configuration or status parameter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Wid(pub u16);

impl Wid {
    /// Reserved end-of-table marker. Never a valid tracked parameter.
    pub const NIL: Wid = Wid(0xFFFF);

    // Byte parameters.
    pub const BSS_TYPE: Wid = Wid(0x0000);
    pub const CURRENT_TX_RATE: Wid = Wid(0x0001);
    pub const CURRENT_CHANNEL: Wid = Wid(0x0002);
    pub const PREAMBLE: Wid = Wid(0x0003);
    pub const STATUS: Wid = Wid(0x0005);
    pub const SCAN_TYPE: Wid = Wid(0x0007);
    pub const POWER_MANAGEMENT: Wid = Wid(0x000B);
    pub const AUTH_TYPE: Wid = Wid(0x000D);
    pub const LISTEN_INTERVAL: Wid = Wid(0x000F);
    pub const DTIM_PERIOD: Wid = Wid(0x0010);
    pub const RSSI: Wid = Wid(0x001F);
    pub const LINKSPEED: Wid = Wid(0x0026);
    pub const TX_POWER: Wid = Wid(0x003F);
    pub const WOWLAN_TRIGGER: Wid = Wid(0x00A6);

    // Half-word parameters.
    pub const RTS_THRESHOLD: Wid = Wid(0x1000);
    pub const FRAG_THRESHOLD: Wid = Wid(0x1001);
    pub const SHORT_RETRY_LIMIT: Wid = Wid(0x1002);
    pub const LONG_RETRY_LIMIT: Wid = Wid(0x1003);
    pub const BEACON_INTERVAL: Wid = Wid(0x1006);
    pub const ACTIVE_SCAN_TIME: Wid = Wid(0x100C);
    pub const PASSIVE_SCAN_TIME: Wid = Wid(0x100D);
    pub const JOIN_START_TIMEOUT: Wid = Wid(0x100F);

    // Word parameters.
    pub const FAILED_COUNT: Wid = Wid(0x2000);
    pub const RETRY_COUNT: Wid = Wid(0x2001);
    pub const RECEIVED_FRAGMENT_COUNT: Wid = Wid(0x2005);
    pub const SUCCESS_FRAME_COUNT: Wid = Wid(0x2008);
    pub const GET_INACTIVE_TIME: Wid = Wid(0x2084);

    // String parameters.
    pub const SSID: Wid = Wid(0x3000);
    pub const FIRMWARE_VERSION: Wid = Wid(0x3001);
    pub const BSSID: Wid = Wid(0x3003);
    pub const MAC_ADDR: Wid = Wid(0x300C);
    pub const ASSOC_REQ_INFO: Wid = Wid(0x301F);
    pub const ASSOC_RES_INFO: Wid = Wid(0x3020);

    // Binary parameters.
    pub const NETWORK_INFO: Wid = Wid(0x4005);
    pub const STA_JOIN_INFO: Wid = Wid(0x4006);
    pub const CONNECTED_STA_LIST: Wid = Wid(0x4007);
    pub const ANTENNA_SELECTION: Wid = Wid(0x4021);

    /// Raw 16-bit value.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// The 3-bit kind tag (bits 12-14).
    pub fn tag(self) -> u8 {
        ((self.0 >> 12) & 0x7) as u8
    }

    /// The value kind this id encodes, or `None` for unassigned tags.
    pub fn kind(self) -> Option<WidKind> {
        WidKind::from_tag(self.tag())
    }

    /// Returns true for the reserved NIL id.
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Human-readable name for well-known ids.
    pub fn name(self) -> Option<&'static str> {
        KNOWN_WIDS
            .iter()
            .find(|(wid, _)| *wid == self)
            .map(|(_, name)| *name)
    }
}

impl From<u16> for Wid {
    fn from(raw: u16) -> Self {
        Wid(raw)
    }
}

impl From<Wid> for u16 {
    fn from(wid: Wid) -> Self {
        wid.0
    }
}

impl fmt::Debug for Wid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Wid({:#06x} {name})", self.0),
            None => write!(f, "Wid({:#06x})", self.0),
        }
    }
}

impl fmt::Display for Wid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:#06x})", self.0),
            None => write!(f, "WID {:#06x}", self.0),
        }
    }
}

/// Well-known ids and their names, in ascending order.
pub const KNOWN_WIDS: &[(Wid, &str)] = &[
    (Wid::BSS_TYPE, "BSS_TYPE"),
    (Wid::CURRENT_TX_RATE, "CURRENT_TX_RATE"),
    (Wid::CURRENT_CHANNEL, "CURRENT_CHANNEL"),
    (Wid::PREAMBLE, "PREAMBLE"),
    (Wid::STATUS, "STATUS"),
    (Wid::SCAN_TYPE, "SCAN_TYPE"),
    (Wid::POWER_MANAGEMENT, "POWER_MANAGEMENT"),
    (Wid::AUTH_TYPE, "AUTH_TYPE"),
    (Wid::LISTEN_INTERVAL, "LISTEN_INTERVAL"),
    (Wid::DTIM_PERIOD, "DTIM_PERIOD"),
    (Wid::RSSI, "RSSI"),
    (Wid::LINKSPEED, "LINKSPEED"),
    (Wid::TX_POWER, "TX_POWER"),
    (Wid::WOWLAN_TRIGGER, "WOWLAN_TRIGGER"),
    (Wid::RTS_THRESHOLD, "RTS_THRESHOLD"),
    (Wid::FRAG_THRESHOLD, "FRAG_THRESHOLD"),
    (Wid::SHORT_RETRY_LIMIT, "SHORT_RETRY_LIMIT"),
    (Wid::LONG_RETRY_LIMIT, "LONG_RETRY_LIMIT"),
    (Wid::BEACON_INTERVAL, "BEACON_INTERVAL"),
    (Wid::ACTIVE_SCAN_TIME, "ACTIVE_SCAN_TIME"),
    (Wid::PASSIVE_SCAN_TIME, "PASSIVE_SCAN_TIME"),
    (Wid::JOIN_START_TIMEOUT, "JOIN_START_TIMEOUT"),
    (Wid::FAILED_COUNT, "FAILED_COUNT"),
    (Wid::RETRY_COUNT, "RETRY_COUNT"),
    (Wid::RECEIVED_FRAGMENT_COUNT, "RECEIVED_FRAGMENT_COUNT"),
    (Wid::SUCCESS_FRAME_COUNT, "SUCCESS_FRAME_COUNT"),
    (Wid::GET_INACTIVE_TIME, "GET_INACTIVE_TIME"),
    (Wid::SSID, "SSID"),
    (Wid::FIRMWARE_VERSION, "FIRMWARE_VERSION"),
    (Wid::BSSID, "BSSID"),
    (Wid::MAC_ADDR, "MAC_ADDR"),
    (Wid::ASSOC_REQ_INFO, "ASSOC_REQ_INFO"),
    (Wid::ASSOC_RES_INFO, "ASSOC_RES_INFO"),
    (Wid::NETWORK_INFO, "NETWORK_INFO"),
    (Wid::STA_JOIN_INFO, "STA_JOIN_INFO"),
    (Wid::CONNECTED_STA_LIST, "CONNECTED_STA_LIST"),
    (Wid::ANTENNA_SELECTION, "ANTENNA_SELECTION"),
    (Wid::NIL, "NIL"),
];

/// Look up a well-known id by name (case-insensitive).
pub fn wid_by_name(name: &str) -> Option<Wid> {
    KNOWN_WIDS
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
        .map(|(wid, _)| *wid)
}
