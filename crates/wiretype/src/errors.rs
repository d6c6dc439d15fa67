use thiserror::Error;

/// Errors from the wire type primitives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum WireError {
    /// Input or output buffer had no bytes at all.
    #[error("empty buffer")]
    EmptyBuffer,

    /// Buffer ended before the operation had the bytes it needed.
    #[error("buffer too short (need {need}, have {have})")]
    BufTooShort {
        /// Minimum number of bytes the operation required.
        need: usize,

        /// Number of bytes the buffer actually provided.
        have: usize,
    },

    /// Kind nibble of a type detail outside the defined kinds.
    #[error("unrecognized kind {0}")]
    UnrecognizedKind(u8),

    /// Varint ran to the byte cap without ending cleanly for its width.
    ///
    /// Only produced by strict readers.
    #[error("truncated {width}-bit varint")]
    Truncated {
        /// Bit width of the integer being decoded.
        width: u32,
    },
}

impl WireError {
    /// Returns if this is a bad-argument error, ie. an empty or undersized
    /// buffer, as opposed to an error in the decoded data itself.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::EmptyBuffer | Self::BufTooShort { .. })
    }
}

/// Wrapper result type.
pub type WireResult<T> = Result<T, WireError>;
