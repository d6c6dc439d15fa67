//! Cursor-style reading and writing of headers and varint payloads.

use tracing::trace;

use crate::detail::TypeDetail;
use crate::errors::{WireError, WireResult};
use crate::varint::{
    MAX_VARINT32_LEN, MAX_VARINT64_LEN, read_varint_u32, read_varint_u32_strict, read_varint_u64,
    read_varint_u64_strict, write_varint_f32, write_varint_f64, write_varint_i32,
    write_varint_i64, write_varint_u32, write_varint_u64,
};

/// How varints at the byte cap are handled when reading.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum VarintMode {
    /// Stop at the cap and drop bits that don't fit, matching existing
    /// encoders.
    #[default]
    Lenient,

    /// Fail with [`WireError::Truncated`] at the cap.
    Strict,
}

/// Config for reading from a [`WireReader`].
#[derive(Clone, Debug, Default)]
pub struct ReadConfig {
    varint_mode: VarintMode,
}

impl ReadConfig {
    /// Constructs a new instance.
    pub fn new(varint_mode: VarintMode) -> Self {
        Self { varint_mode }
    }

    /// Shorthand for a strict config.
    pub fn strict() -> Self {
        Self::new(VarintMode::Strict)
    }

    /// Gets the varint mode.
    pub fn varint_mode(&self) -> VarintMode {
        self.varint_mode
    }
}

/// Types that travel on the wire as a single varint.
pub trait VarintCodec: Sized {
    /// Max number of bytes an encoded value can take.
    const MAX_LEN: usize;

    /// Reads a value, returning it with the number of bytes consumed.
    fn read_varint(buf: &[u8], mode: VarintMode) -> WireResult<(Self, usize)>;

    /// Writes the value, returning the number of bytes written.
    fn write_varint(&self, out: &mut [u8]) -> WireResult<usize>;
}

/// Wires a type to the reader and writer of its width, reinterpreting the
/// unsigned wire bits on the way in.
macro_rules! impl_varint_codec {
    ( $ty:ident, $max:ident, $read:ident, $read_strict:ident, $write:ident ) => {
        impl VarintCodec for $ty {
            const MAX_LEN: usize = $max;

            fn read_varint(buf: &[u8], mode: VarintMode) -> WireResult<(Self, usize)> {
                let (bits, n) = match mode {
                    VarintMode::Lenient => $read(buf)?,
                    VarintMode::Strict => $read_strict(buf)?,
                };
                Ok((<$ty>::from_wire_bits(bits), n))
            }

            fn write_varint(&self, out: &mut [u8]) -> WireResult<usize> {
                $write(*self, out)
            }
        }
    };
}

/// Bit reinterpretation from the unsigned wire value.
trait FromWireBits<U> {
    fn from_wire_bits(bits: U) -> Self;
}

impl FromWireBits<u32> for u32 {
    fn from_wire_bits(bits: u32) -> Self {
        bits
    }
}

impl FromWireBits<u32> for i32 {
    fn from_wire_bits(bits: u32) -> Self {
        bits as i32
    }
}

impl FromWireBits<u32> for f32 {
    fn from_wire_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
}

impl FromWireBits<u64> for u64 {
    fn from_wire_bits(bits: u64) -> Self {
        bits
    }
}

impl FromWireBits<u64> for i64 {
    fn from_wire_bits(bits: u64) -> Self {
        bits as i64
    }
}

impl FromWireBits<u64> for f64 {
    fn from_wire_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

impl_varint_codec!(u32, MAX_VARINT32_LEN, read_varint_u32, read_varint_u32_strict, write_varint_u32);
impl_varint_codec!(i32, MAX_VARINT32_LEN, read_varint_u32, read_varint_u32_strict, write_varint_i32);
impl_varint_codec!(f32, MAX_VARINT32_LEN, read_varint_u32, read_varint_u32_strict, write_varint_f32);
impl_varint_codec!(u64, MAX_VARINT64_LEN, read_varint_u64, read_varint_u64_strict, write_varint_u64);
impl_varint_codec!(i64, MAX_VARINT64_LEN, read_varint_u64, read_varint_u64_strict, write_varint_i64);
impl_varint_codec!(f64, MAX_VARINT64_LEN, read_varint_u64, read_varint_u64_strict, write_varint_f64);

/// Reader over a flat buffer of headers and varints.
///
/// Reads are all-or-nothing, a failed read leaves the position where it was.
#[derive(Debug)]
pub struct WireReader<B> {
    buf: B,
    at: usize,
    config: ReadConfig,
}

impl<B: AsRef<[u8]>> WireReader<B> {
    /// Constructs a new lenient reader starting at the beginning of the
    /// buffer.
    pub fn new(buf: B) -> Self {
        Self::with_config(buf, ReadConfig::default())
    }

    /// Constructs a new reader with a custom config.
    pub fn with_config(buf: B, config: ReadConfig) -> Self {
        Self { buf, at: 0, config }
    }

    /// Returns the config in use.
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Returns the offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.at
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.buf.as_ref().len() - self.at
    }

    /// Returns if every byte has been consumed.
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the slice of the remaining unread bytes, which might be empty.
    fn rest(&self) -> &[u8] {
        &self.buf.as_ref()[self.at..]
    }

    /// Reads the next type detail.
    pub fn read_detail(&mut self) -> WireResult<TypeDetail> {
        let (detail, n) = TypeDetail::from_bytes(self.rest())?;
        trace!(at = self.at, %detail, "read type detail");
        self.at += n;
        Ok(detail)
    }

    /// Reads the next varint as a `T`.
    pub fn read_varint<T: VarintCodec>(&mut self) -> WireResult<T> {
        let (v, n) = T::read_varint(self.rest(), self.config.varint_mode).inspect_err(|e| {
            if let WireError::Truncated { width } = e {
                trace!(at = self.at, %width, "rejected truncated varint");
            }
        })?;
        self.at += n;
        Ok(v)
    }
}

/// Writer appending headers and varints to a vec.
#[derive(Clone, Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Constructs a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer, returning the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Appends a type detail.
    pub fn write_detail(&mut self, detail: TypeDetail) {
        self.buf.extend_from_slice(&detail.to_bytes());
    }

    /// Appends a varint, returning the number of bytes it took.
    pub fn write_varint<T: VarintCodec>(&mut self, value: T) -> WireResult<usize> {
        let mut scratch = [0; MAX_VARINT64_LEN];
        let n = value.write_varint(&mut scratch[..T::MAX_LEN])?;
        self.buf.extend_from_slice(&scratch[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::Kind;

    #[test]
    fn test_reader_advances() {
        let mut w = WireWriter::new();
        w.write_detail(TypeDetail::new().with_kind(Kind::Varint).with_ordinal(1));
        assert_eq!(w.write_varint(300u32), Ok(2));
        assert_eq!(w.write_varint(-1i32), Ok(5));

        let bytes = w.into_inner();
        assert_eq!(bytes.len(), 11);

        let mut r = WireReader::new(&bytes);
        let d = r.read_detail().unwrap();
        assert_eq!(d.ordinal(), 1);
        assert_eq!(r.position(), 4);
        assert_eq!(r.read_varint::<u32>(), Ok(300));
        assert_eq!(r.read_varint::<i32>(), Ok(-1));
        assert!(r.is_finished());
    }

    #[test]
    fn test_failed_read_keeps_position() {
        let buf = [0x80, 0x80];
        let mut r = WireReader::new(&buf[..]);
        assert_eq!(
            r.read_varint::<u64>(),
            Err(WireError::BufTooShort { need: 3, have: 2 })
        );
        assert_eq!(r.position(), 0);
        assert_eq!(r.remaining(), 2);

        assert_eq!(
            r.read_detail(),
            Err(WireError::BufTooShort { need: 4, have: 2 })
        );
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_strict_mode() {
        let buf = [0xff; 5];

        let mut lenient = WireReader::new(buf);
        assert_eq!(lenient.read_varint::<u32>(), Ok(u32::MAX));

        let mut strict = WireReader::with_config(buf, ReadConfig::strict());
        assert_eq!(strict.config().varint_mode(), VarintMode::Strict);
        assert_eq!(
            strict.read_varint::<i32>(),
            Err(WireError::Truncated { width: 32 })
        );
        assert_eq!(strict.position(), 0);
    }

    #[test]
    fn test_strict_mode_reinterprets() {
        let mut w = WireWriter::new();
        w.write_varint(-2i64).unwrap();
        w.write_varint(1.5f32).unwrap();

        let mut r = WireReader::with_config(w.as_bytes(), ReadConfig::strict());
        assert_eq!(r.read_varint::<i64>(), Ok(-2));
        assert_eq!(r.read_varint::<f32>(), Ok(1.5));
        assert!(r.is_finished());
    }
}
