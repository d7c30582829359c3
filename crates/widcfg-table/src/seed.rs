//! Parameters tracked by default.

use widcfg_frame::Wid;

use crate::config::SeedEntry;

/// Firmware version string content capacity.
pub const FIRMWARE_VERSION_CAPACITY: usize = 127;
/// MAC address content capacity.
pub const MAC_ADDR_CAPACITY: usize = 6;
/// Association response content capacity.
pub const ASSOC_RES_INFO_CAPACITY: usize = 254;
/// Antenna selection parameter content capacity.
pub const ANTENNA_SELECTION_CAPACITY: usize = 3;

/// The default seed: status and link counters the driver reads back.
pub fn default_seed() -> Vec<SeedEntry> {
    vec![
        SeedEntry::fixed(Wid::STATUS),
        SeedEntry::fixed(Wid::RSSI),
        SeedEntry::fixed(Wid::LINKSPEED),
        SeedEntry::fixed(Wid::TX_POWER),
        SeedEntry::fixed(Wid::WOWLAN_TRIGGER),
        SeedEntry::fixed(Wid::FAILED_COUNT),
        SeedEntry::fixed(Wid::RECEIVED_FRAGMENT_COUNT),
        SeedEntry::fixed(Wid::SUCCESS_FRAME_COUNT),
        SeedEntry::fixed(Wid::GET_INACTIVE_TIME),
        SeedEntry::buffer(Wid::FIRMWARE_VERSION, FIRMWARE_VERSION_CAPACITY),
        SeedEntry::buffer(Wid::MAC_ADDR, MAC_ADDR_CAPACITY),
        SeedEntry::buffer(Wid::ASSOC_RES_INFO, ASSOC_RES_INFO_CAPACITY),
        SeedEntry::buffer(Wid::ANTENNA_SELECTION, ANTENNA_SELECTION_CAPACITY),
    ]
}
