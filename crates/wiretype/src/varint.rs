//! Variable-length integers.
//!
//! Each byte carries 7 payload bits in its low bits, least significant chunk
//! first.  The high bit is the continuation flag, set on every byte except the
//! last.
//!
//! ```txt
//! 1bbbbbbb 1bbbbbbb ... 0bbbbbbb
//! ```
//!
//! Signed and floating point values are written as the unsigned integer with
//! the same bit pattern.  There is no zig-zag step, so a negative `i32` always
//! takes the full 5 bytes.
//!
//! Lenient readers stop after the byte cap for the width and keep whatever bits
//! fit, which is what existing encoders expect.  The `_strict` readers reject
//! those inputs instead.

use crate::errors::{WireError, WireResult};

/// Max encoded size of a 32-bit varint.
pub const MAX_VARINT32_LEN: usize = 5;

/// Max encoded size of a 64-bit varint.
pub const MAX_VARINT64_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

/// Generates the decode, encode and length helpers for an unsigned width.
///
/// `$last_payload` is the largest payload the byte at the cap may carry
/// without dropping bits.
macro_rules! impl_varint_width {
    ($uty:ident, $max_len:ident, $last_payload:literal, $decode:ident, $encode:ident, $len:ident) => {
        fn $decode(buf: &[u8], strict: bool) -> WireResult<($uty, usize)> {
            if buf.is_empty() {
                return Err(WireError::EmptyBuffer);
            }

            let mut value: $uty = 0;
            for (i, &byte) in buf.iter().take($max_len).enumerate() {
                let chunk = byte & PAYLOAD_MASK;
                value |= <$uty>::from(chunk) << (7 * i);

                let at_cap = i + 1 == $max_len;
                if strict && at_cap && (byte & CONTINUATION != 0 || chunk > $last_payload) {
                    return Err(WireError::Truncated {
                        width: <$uty>::BITS,
                    });
                }

                if byte & CONTINUATION == 0 {
                    return Ok((value, i + 1));
                }
            }

            if buf.len() < $max_len {
                return Err(WireError::BufTooShort {
                    need: buf.len() + 1,
                    have: buf.len(),
                });
            }

            Ok((value, $max_len))
        }

        fn $encode(value: $uty, out: &mut [u8]) -> WireResult<usize> {
            if out.is_empty() {
                return Err(WireError::EmptyBuffer);
            }

            let need = $len(value);
            if out.len() < need {
                return Err(WireError::BufTooShort {
                    need,
                    have: out.len(),
                });
            }

            let mut rest = value;
            for slot in &mut out[..need - 1] {
                *slot = (rest as u8) | CONTINUATION;
                rest >>= 7;
            }
            out[need - 1] = rest as u8;

            Ok(need)
        }

        /// Returns the number of bytes the value takes when written as a
        /// varint.
        pub fn $len(value: $uty) -> usize {
            let bits = <$uty>::BITS - value.leading_zeros();
            (bits.max(1) as usize).div_ceil(7)
        }
    };
}

impl_varint_width!(u32, MAX_VARINT32_LEN, 0x0f, decode_u32, encode_u32, varint_len_u32);
impl_varint_width!(u64, MAX_VARINT64_LEN, 0x01, decode_u64, encode_u64, varint_len_u64);

/// Reads an unsigned 32-bit varint from the start of the buffer.
///
/// Returns the value and the number of bytes consumed.  Reading stops after
/// [`MAX_VARINT32_LEN`] bytes even if the last one still has its continuation
/// bit set.  Bits that don't fit in 32 bits are dropped.
pub fn read_varint_u32(buf: &[u8]) -> WireResult<(u32, usize)> {
    decode_u32(buf, false)
}

/// Like [`read_varint_u32`], but fails with [`WireError::Truncated`] instead of
/// dropping bits at the byte cap.
pub fn read_varint_u32_strict(buf: &[u8]) -> WireResult<(u32, usize)> {
    decode_u32(buf, true)
}

/// Writes an unsigned 32-bit varint to the start of the buffer, returning the
/// number of bytes written.
///
/// The buffer only has to be as long as [`varint_len_u32`] says, passing one
/// of [`MAX_VARINT32_LEN`] is always enough.
pub fn write_varint_u32(value: u32, out: &mut [u8]) -> WireResult<usize> {
    encode_u32(value, out)
}

/// Reads an unsigned 64-bit varint from the start of the buffer.
///
/// Same cap behavior as [`read_varint_u32`], with a cap of
/// [`MAX_VARINT64_LEN`].
pub fn read_varint_u64(buf: &[u8]) -> WireResult<(u64, usize)> {
    decode_u64(buf, false)
}

/// Strict version of [`read_varint_u64`].
pub fn read_varint_u64_strict(buf: &[u8]) -> WireResult<(u64, usize)> {
    decode_u64(buf, true)
}

/// Writes an unsigned 64-bit varint, returning the number of bytes written.
pub fn write_varint_u64(value: u64, out: &mut [u8]) -> WireResult<usize> {
    encode_u64(value, out)
}

/// Reads a signed 32-bit varint, taking the decoded bits as-is.
pub fn read_varint_i32(buf: &[u8]) -> WireResult<(i32, usize)> {
    read_varint_u32(buf).map(|(v, n)| (v as i32, n))
}

/// Writes a signed 32-bit varint from its raw bit pattern.
pub fn write_varint_i32(value: i32, out: &mut [u8]) -> WireResult<usize> {
    write_varint_u32(value as u32, out)
}

/// Reads a signed 64-bit varint, taking the decoded bits as-is.
pub fn read_varint_i64(buf: &[u8]) -> WireResult<(i64, usize)> {
    read_varint_u64(buf).map(|(v, n)| (v as i64, n))
}

/// Writes a signed 64-bit varint from its raw bit pattern.
pub fn write_varint_i64(value: i64, out: &mut [u8]) -> WireResult<usize> {
    write_varint_u64(value as u64, out)
}

/// Reads an `f32` stored as the varint of its IEEE-754 bits.
pub fn read_varint_f32(buf: &[u8]) -> WireResult<(f32, usize)> {
    read_varint_u32(buf).map(|(v, n)| (f32::from_bits(v), n))
}

/// Writes an `f32` as the varint of its IEEE-754 bits.
pub fn write_varint_f32(value: f32, out: &mut [u8]) -> WireResult<usize> {
    write_varint_u32(value.to_bits(), out)
}

/// Reads an `f64` stored as the varint of its IEEE-754 bits.
pub fn read_varint_f64(buf: &[u8]) -> WireResult<(f64, usize)> {
    read_varint_u64(buf).map(|(v, n)| (f64::from_bits(v), n))
}

/// Writes an `f64` as the varint of its IEEE-754 bits.
pub fn write_varint_f64(value: f64, out: &mut [u8]) -> WireResult<usize> {
    write_varint_u64(value.to_bits(), out)
}
