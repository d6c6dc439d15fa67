//! Type detail header tagging each field with its wire kind and ordinal.
//!
//! The header is a single 32-bit value, stored little-endian:
//!
//! ```txt
//! [0..4]   reserved
//! [4..8]   kind
//! [8..32]  ordinal
//! ```
//!
//! Only kinds 0 through 3 are defined.  The remaining nibble values are kept
//! intact in the backing value, but [`TypeDetail::kind`] refuses them.

use std::fmt;

use crate::errors::{WireError, WireResult};

/// Size of an encoded type detail.
pub const TYPE_DETAIL_LEN: usize = 4;

/// Largest ordinal a type detail can carry.
pub const MAX_ORDINAL: u32 = 0x00ff_ffff;

const KIND_SHIFT: u32 = 4;
const KIND_MASK: u32 = 0x0000_00f0;
const ORDINAL_SHIFT: u32 = 8;
const ORDINAL_MASK: u32 = 0xffff_ff00;

/// How a field's payload is laid out on the wire.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Kind {
    /// Variable length integer.
    Varint = 0,

    /// Fixed length 32-bit value.
    Fixed32 = 1,

    /// Fixed length 64-bit value.
    Fixed64 = 2,

    /// Arbitrary, explicitly sized value.
    LengthDelimited = 3,
}

impl Kind {
    /// All defined kinds, in discriminant order.
    pub const ALL: [Kind; 4] = [
        Kind::Varint,
        Kind::Fixed32,
        Kind::Fixed64,
        Kind::LengthDelimited,
    ];

    /// Returns the name used when printing.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Varint => "varint",
            Kind::Fixed32 => "fixed32",
            Kind::Fixed64 => "fixed64",
            Kind::LengthDelimited => "length",
        }
    }
}

impl From<Kind> for u8 {
    fn from(kind: Kind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for Kind {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Kind::ALL
            .get(value as usize)
            .copied()
            .ok_or(WireError::UnrecognizedKind(value))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Packed header holding a [`Kind`] and a field ordinal.
///
/// Setting either field never disturbs the other, or the reserved low bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TypeDetail(u32);

impl TypeDetail {
    /// Constructs a new instance with every bit cleared, which is a varint
    /// with ordinal 0.
    pub fn new() -> Self {
        Self(0)
    }

    /// Wraps a raw backing value without inspecting it.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw backing value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Reads a header from the start of a buffer.
    ///
    /// Always consumes [`TYPE_DETAIL_LEN`] bytes, which is also returned so
    /// callers can advance a cursor.  The kind is not validated here.
    pub fn from_bytes(buf: &[u8]) -> WireResult<(Self, usize)> {
        if buf.is_empty() {
            return Err(WireError::EmptyBuffer);
        }

        let arr: [u8; TYPE_DETAIL_LEN] = buf
            .get(..TYPE_DETAIL_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(WireError::BufTooShort {
                need: TYPE_DETAIL_LEN,
                have: buf.len(),
            })?;

        Ok((Self(u32::from_le_bytes(arr)), TYPE_DETAIL_LEN))
    }

    /// Returns the encoded header bytes.
    pub fn to_bytes(&self) -> [u8; TYPE_DETAIL_LEN] {
        self.0.to_le_bytes()
    }

    /// Writes the header to the start of a buffer, returning the number of
    /// bytes written.
    pub fn write_bytes(&self, out: &mut [u8]) -> WireResult<usize> {
        if out.is_empty() {
            return Err(WireError::EmptyBuffer);
        }

        let have = out.len();
        let dst = out
            .get_mut(..TYPE_DETAIL_LEN)
            .ok_or(WireError::BufTooShort {
                need: TYPE_DETAIL_LEN,
                have,
            })?;
        dst.copy_from_slice(&self.to_bytes());

        Ok(TYPE_DETAIL_LEN)
    }

    /// Returns the kind nibble as stored, including undefined values.
    pub fn raw_kind(&self) -> u8 {
        ((self.0 & KIND_MASK) >> KIND_SHIFT) as u8
    }

    /// Returns the kind, or [`WireError::UnrecognizedKind`] if the nibble
    /// isn't one of the defined kinds.
    pub fn kind(&self) -> WireResult<Kind> {
        Kind::try_from(self.raw_kind())
    }

    /// Overwrites the kind in place.
    pub fn set_kind(&mut self, kind: Kind) {
        self.0 &= !KIND_MASK;
        self.0 |= (u32::from(u8::from(kind)) << KIND_SHIFT) & KIND_MASK;
    }

    /// Returns a copy with the kind replaced.
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.set_kind(kind);
        self
    }

    /// Returns the field ordinal.
    pub fn ordinal(&self) -> u32 {
        (self.0 & ORDINAL_MASK) >> ORDINAL_SHIFT
    }

    /// Overwrites the ordinal in place.  Bits above [`MAX_ORDINAL`] are
    /// dropped.
    pub fn set_ordinal(&mut self, ordinal: u32) {
        self.0 &= !ORDINAL_MASK;
        self.0 |= (ordinal << ORDINAL_SHIFT) & ORDINAL_MASK;
    }

    /// Returns a copy with the ordinal replaced.
    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.set_ordinal(ordinal);
        self
    }
}

impl From<u32> for TypeDetail {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<TypeDetail> for u32 {
    fn from(detail: TypeDetail) -> Self {
        detail.raw()
    }
}

impl fmt::Display for TypeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Ok(kind) => write!(f, "{kind}#{}", self.ordinal()),
            Err(_) => write!(f, "kind{}#{}", self.raw_kind(), self.ordinal()),
        }
    }
}
