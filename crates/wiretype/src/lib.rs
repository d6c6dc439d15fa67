//! Primitives for a protobuf-style binary wire format.
//!
//! Two independent pieces live here:
//!
//! - varint encoding of 32 and 64-bit integers, see [`read_varint_u32`] and
//!   friends
//! - the packed [`TypeDetail`] header that tags each field with its [`Kind`]
//!   and ordinal
//!
//! A caller reads a header to learn how the payload is laid out, then reads
//! the payload with the matching routine.  [`WireReader`] and [`WireWriter`]
//! do that bookkeeping over a flat buffer.

#[cfg(feature = "arbitrary")]
mod arbitrary;
mod detail;
mod errors;
mod stream;
mod varint;

pub use detail::{Kind, MAX_ORDINAL, TYPE_DETAIL_LEN, TypeDetail};
pub use errors::{WireError, WireResult};
pub use stream::{ReadConfig, VarintCodec, VarintMode, WireReader, WireWriter};
pub use varint::{
    MAX_VARINT32_LEN, MAX_VARINT64_LEN, read_varint_f32, read_varint_f64, read_varint_i32,
    read_varint_i64, read_varint_u32, read_varint_u32_strict, read_varint_u64,
    read_varint_u64_strict, varint_len_u32, varint_len_u64, write_varint_f32, write_varint_f64,
    write_varint_i32, write_varint_i64, write_varint_u32, write_varint_u64,
};
