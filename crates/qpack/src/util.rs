//! Convenience QPack helpers.

use crate::decoder::TextDecoding;
use crate::error::{FormatError, RangeError};
use crate::{QpackDecoder, QpackEncoder, QpackValue};

/// Encode a value to QPack bytes.
pub fn encode(value: &QpackValue) -> Result<Vec<u8>, RangeError> {
    let mut encoder = QpackEncoder::new();
    encoder.encode(value)
}

/// Decode one value in raw-bytes mode, discarding the consumed count.
pub fn decode(blob: &[u8]) -> Result<QpackValue, FormatError> {
    let mut decoder = QpackDecoder::new();
    decoder.decode(blob).map(|(value, _)| value)
}

/// Decode one value with raw payloads interpreted as UTF-8 text,
/// discarding the consumed count.
pub fn decode_utf8(blob: &[u8]) -> Result<QpackValue, FormatError> {
    let mut decoder = QpackDecoder::new_text(TextDecoding::Utf8);
    decoder.decode(blob).map(|(value, _)| value)
}
