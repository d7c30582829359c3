use std::collections::TryReserveError;

use widcfg_frame::{WidKind, WidValue};

/// Owned content buffer of a string or binary slot.
///
/// Storage is allocated once at its full capacity; `len` tracks how much of
/// it holds the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBuffer {
    data: Vec<u8>,
    len: usize,
}

impl SlotBuffer {
    /// Allocate an empty buffer able to hold `capacity` content bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        data.resize(capacity, 0);
        Ok(Self { data, len: 0 })
    }

    /// Replace the content. Returns false, leaving the buffer unchanged, when
    /// `content` exceeds the capacity.
    pub fn set(&mut self, content: &[u8]) -> bool {
        if content.len() > self.data.len() {
            return false;
        }
        self.data[..content.len()].copy_from_slice(content);
        self.len = content.len();
        true
    }

    /// Current content.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Current content length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum content length.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.data.fill(0);
        self.len = 0;
    }
}

/// Current value of one tracked parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Byte(u8),
    HalfWord(u16),
    Word(u32),
    Str(SlotBuffer),
    Bin(SlotBuffer),
}

impl SlotValue {
    /// A zeroed slot of `kind`. `capacity` is used by string and binary kinds.
    pub fn zeroed(kind: WidKind, capacity: usize) -> Result<Self, TryReserveError> {
        Ok(match kind {
            WidKind::Byte => Self::Byte(0),
            WidKind::HalfWord => Self::HalfWord(0),
            WidKind::Word => Self::Word(0),
            WidKind::Str => Self::Str(SlotBuffer::with_capacity(capacity)?),
            WidKind::Bin => Self::Bin(SlotBuffer::with_capacity(capacity)?),
        })
    }

    pub fn kind(&self) -> WidKind {
        match self {
            Self::Byte(_) => WidKind::Byte,
            Self::HalfWord(_) => WidKind::HalfWord,
            Self::Word(_) => WidKind::Word,
            Self::Str(_) => WidKind::Str,
            Self::Bin(_) => WidKind::Bin,
        }
    }

    /// Snapshot as a wire value.
    pub fn to_value(&self) -> WidValue {
        match self {
            Self::Byte(v) => WidValue::Byte(*v),
            Self::HalfWord(v) => WidValue::HalfWord(*v),
            Self::Word(v) => WidValue::Word(*v),
            Self::Str(buf) => WidValue::str(buf.as_slice().to_vec()),
            Self::Bin(buf) => WidValue::bin(buf.as_slice().to_vec()),
        }
    }

    /// Zero the value, keeping any buffer allocation.
    pub fn reset(&mut self) {
        match self {
            Self::Byte(v) => *v = 0,
            Self::HalfWord(v) => *v = 0,
            Self::Word(v) => *v = 0,
            Self::Str(buf) | Self::Bin(buf) => buf.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_rejects_oversized_content() {
        let mut buf = SlotBuffer::with_capacity(4).unwrap();
        assert!(buf.set(b"abcd"));
        assert!(!buf.set(b"abcde"));
        assert_eq!(buf.as_slice(), b"abcd");
        assert!(buf.set(b""));
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn zeroed_matches_kind() {
        for kind in [
            WidKind::Byte,
            WidKind::HalfWord,
            WidKind::Word,
            WidKind::Str,
            WidKind::Bin,
        ] {
            assert_eq!(SlotValue::zeroed(kind, 8).unwrap().kind(), kind);
        }
    }

    #[test]
    fn reset_zeroes_content() {
        let mut slot = SlotValue::zeroed(WidKind::Str, 8).unwrap();
        if let SlotValue::Str(buf) = &mut slot {
            buf.set(b"fw-1.0");
        }
        slot.reset();
        assert_eq!(slot.to_value(), WidValue::str(Vec::<u8>::new()));
    }
}
