use std::collections::HashMap;

use tracing::{debug, trace, warn};
use widcfg_frame::{Wid, WidValue};

use crate::config::TableConfig;
use crate::error::Result;
use crate::slot::SlotValue;

/// What [`ConfigTable::lookup_and_set`] did with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The slot now holds the value.
    Applied,
    /// The id is not tracked; nothing changed.
    Untracked,
    /// The value's kind differs from the slot's; nothing changed.
    KindMismatch,
    /// The content exceeds the slot capacity; nothing changed.
    TooLong,
}

/// Last known values of the tracked parameters, keyed by WID.
///
/// The set of ids is fixed at construction. The table does no locking; callers
/// that share it must serialize access.
#[derive(Debug)]
pub struct ConfigTable {
    slots: HashMap<Wid, SlotValue>,
    order: Vec<Wid>,
}

impl ConfigTable {
    /// Build a table tracking the default seed.
    pub fn init() -> Result<Self> {
        Self::with_config(TableConfig::default())
    }

    /// Build a table tracking the ids of `config`.
    ///
    /// Allocation failure returns [`TableError::ResourceExhausted`]; whatever
    /// was allocated before the failure is released.
    ///
    /// [`TableError::ResourceExhausted`]: crate::TableError::ResourceExhausted
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;

        let mut slots = HashMap::new();
        slots.try_reserve(config.seed.len())?;
        let mut order = Vec::new();
        order.try_reserve_exact(config.seed.len())?;

        for entry in &config.seed {
            // Kind is checked by validate().
            let Some(kind) = entry.wid.kind() else {
                continue;
            };
            let slot = SlotValue::zeroed(kind, entry.capacity.unwrap_or_default())?;
            slots.insert(entry.wid, slot);
            order.push(entry.wid);
        }

        trace!(slots = order.len(), "configuration table initialized");
        Ok(Self { slots, order })
    }

    /// Release the table.
    pub fn deinit(self) {
        trace!(slots = self.order.len(), "configuration table released");
    }

    /// Store `value` in the slot for `wid`, if it is tracked.
    pub fn lookup_and_set(&mut self, wid: Wid, value: &WidValue) -> UpdateOutcome {
        let Some(slot) = self.slots.get_mut(&wid) else {
            debug!(%wid, "ignoring value for untracked id");
            return UpdateOutcome::Untracked;
        };

        match (slot, value) {
            (SlotValue::Byte(v), WidValue::Byte(new)) => *v = *new,
            (SlotValue::HalfWord(v), WidValue::HalfWord(new)) => *v = *new,
            (SlotValue::Word(v), WidValue::Word(new)) => *v = *new,
            (SlotValue::Str(buf), WidValue::Str(content))
            | (SlotValue::Bin(buf), WidValue::Bin(content)) => {
                if !buf.set(content) {
                    warn!(
                        %wid,
                        len = content.len(),
                        capacity = buf.capacity(),
                        "value exceeds slot capacity, dropped"
                    );
                    return UpdateOutcome::TooLong;
                }
            }
            (slot, value) => {
                warn!(%wid, slot = %slot.kind(), value = %value.kind(), "value kind does not match slot");
                return UpdateOutcome::KindMismatch;
            }
        }
        UpdateOutcome::Applied
    }

    /// Copy the current value of `wid` into `out`.
    ///
    /// Scalars are copied little-endian; strings and binaries copy their
    /// content only. Returns the bytes copied, or 0 when the id is untracked
    /// or `out` is too small (nothing is copied then).
    pub fn read(&self, wid: Wid, out: &mut [u8]) -> usize {
        let Some(slot) = self.slots.get(&wid) else {
            return 0;
        };
        match slot {
            SlotValue::Byte(v) => copy_into(out, &[*v]),
            SlotValue::HalfWord(v) => copy_into(out, &v.to_le_bytes()),
            SlotValue::Word(v) => copy_into(out, &v.to_le_bytes()),
            SlotValue::Str(buf) | SlotValue::Bin(buf) => copy_into(out, buf.as_slice()),
        }
    }

    /// Current value of `wid`.
    pub fn get(&self, wid: Wid) -> Option<&SlotValue> {
        self.slots.get(&wid)
    }

    /// Returns true if `wid` is tracked.
    pub fn contains(&self, wid: Wid) -> bool {
        self.slots.contains_key(&wid)
    }

    /// Number of tracked ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no id is tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tracked ids and values in seed order.
    pub fn iter(&self) -> impl Iterator<Item = (Wid, &SlotValue)> + '_ {
        self.order
            .iter()
            .filter_map(|wid| self.slots.get(wid).map(|slot| (*wid, slot)))
    }

    /// Zero every value.
    pub fn reset(&mut self) {
        for slot in self.slots.values_mut() {
            slot.reset();
        }
    }
}

fn copy_into(out: &mut [u8], value: &[u8]) -> usize {
    if out.len() < value.len() {
        return 0;
    }
    out[..value.len()].copy_from_slice(value);
    value.len()
}
