//! Configuration table for WID-keyed radio parameters.
//!
//! The table tracks a fixed set of parameters chosen at initialization (the
//! seed). Decoded responses update slot values in place; no slot is added or
//! removed afterwards.

pub mod config;
pub mod error;
pub mod seed;
pub mod slot;
pub mod table;

pub use config::{SeedEntry, TableConfig, MAX_SLOT_CAPACITY};
pub use error::{Result, TableError};
pub use seed::default_seed;
pub use slot::{SlotBuffer, SlotValue};
pub use table::{ConfigTable, UpdateOutcome};
