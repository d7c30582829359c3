use bytes::Bytes;

use crate::wid::WidKind;

/// A typed WID value as carried in one TLV record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidValue {
    Byte(u8),
    HalfWord(u16),
    Word(u32),
    Str(Bytes),
    Bin(Bytes),
}

impl WidValue {
    /// Build a string value.
    pub fn str(content: impl Into<Bytes>) -> Self {
        Self::Str(content.into())
    }

    /// Build a binary value.
    pub fn bin(content: impl Into<Bytes>) -> Self {
        Self::Bin(content.into())
    }

    /// The kind of this value.
    pub fn kind(&self) -> WidKind {
        match self {
            Self::Byte(_) => WidKind::Byte,
            Self::HalfWord(_) => WidKind::HalfWord,
            Self::Word(_) => WidKind::Word,
            Self::Str(_) => WidKind::Str,
            Self::Bin(_) => WidKind::Bin,
        }
    }

    /// Bytes this value occupies on the wire, including id, length and checksum.
    pub fn record_len(&self) -> usize {
        match self {
            Self::Byte(_) => 5,
            Self::HalfWord(_) => 6,
            Self::Word(_) => 8,
            Self::Str(content) => 4 + content.len(),
            Self::Bin(content) => 5 + content.len(),
        }
    }

    /// Content bytes for string and binary values.
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            Self::Str(content) | Self::Bin(content) => Some(content.as_ref()),
            _ => None,
        }
    }

    /// Interpret raw little-endian bytes as a value of `kind`.
    ///
    /// Fixed-width kinds take the leading 1/2/4 bytes and return `None` if
    /// fewer are available. String and binary kinds take the whole slice.
    pub fn from_le_slice(kind: WidKind, raw: &[u8]) -> Option<Self> {
        match kind {
            WidKind::Byte => raw.first().map(|b| Self::Byte(*b)),
            WidKind::HalfWord => raw
                .get(..2)
                .map(|b| Self::HalfWord(u16::from_le_bytes([b[0], b[1]]))),
            WidKind::Word => raw
                .get(..4)
                .map(|b| Self::Word(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))),
            WidKind::Str => Some(Self::Str(Bytes::copy_from_slice(raw))),
            WidKind::Bin => Some(Self::Bin(Bytes::copy_from_slice(raw))),
        }
    }

    /// The value's little-endian bytes (content only for string and binary).
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Self::Byte(v) => vec![*v],
            Self::HalfWord(v) => v.to_le_bytes().to_vec(),
            Self::Word(v) => v.to_le_bytes().to_vec(),
            Self::Str(content) | Self::Bin(content) => content.to_vec(),
        }
    }
}
