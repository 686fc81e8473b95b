//! QPack encoder/decoder error types.

use thiserror::Error;

/// Encode-time failure: the value cannot be represented within the
/// format's numeric or length limits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("integer does not fit in 64-bit signed range")]
    IntegerOverflow,
    #[error("raw payload length does not fit in a 64-bit length field")]
    LengthOverflow,
    #[error("value nesting exceeds the configured maximum depth")]
    NestingTooDeep,
}

/// Decode-time failure: malformed, truncated, or structurally
/// inconsistent input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("close marker without a matching open marker at offset {0}")]
    UnexpectedClose(usize),
    #[error("invalid UTF-8 in text payload")]
    InvalidUtf8,
    #[error("input nesting exceeds the configured maximum depth")]
    NestingTooDeep,
}
