//! QPack binary serialization codec.
//!
//! QPack converts a value tree (null, booleans, signed 64-bit integers,
//! IEEE-754 doubles, UTF-8 text, raw bytes, sequences, and ordered maps)
//! to and from a compact, self-describing tagged byte stream. Common
//! small values fit in a single tag byte; everything else carries a
//! little-endian payload after its tag.
//!
//! # Example
//!
//! ```
//! use qpack::{QpackDecoder, QpackEncoder, QpackValue, TextDecoding};
//!
//! let value = QpackValue::Array(vec![
//!     QpackValue::Int(1),
//!     QpackValue::Str("two".into()),
//!     QpackValue::Double(3.5),
//! ]);
//!
//! let mut encoder = QpackEncoder::new();
//! let bytes = encoder.encode(&value).unwrap();
//!
//! let mut decoder = QpackDecoder::new_text(TextDecoding::Utf8);
//! let (decoded, consumed) = decoder.decode(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(consumed, bytes.len());
//! ```

pub mod constants;
mod decoder;
mod encoder;
mod error;
pub mod util;
mod value;

pub use decoder::{QpackDecoder, TextDecoding};
pub use encoder::{QpackEncoder, DEFAULT_MAX_DEPTH};
pub use error::{FormatError, RangeError};
pub use value::QpackValue;

#[cfg(test)]
mod tests {
    use super::util::{decode, decode_utf8, encode};
    use super::QpackValue;
    use serde_json::json;

    #[test]
    fn json_qpack_roundtrip_matrix() {
        let cases = vec![
            json!(null),
            json!(true),
            json!(123),
            json!("hello"),
            json!([1, 2, 3]),
            json!({"a": 1, "b": [true, null, "x"]}),
        ];
        for case in cases {
            let value = QpackValue::from(case.clone());
            let bin = encode(&value).expect("encode qpack");
            let back = decode_utf8(&bin).expect("decode qpack");
            assert_eq!(serde_json::Value::from(back), case);
        }
    }

    #[test]
    fn bytes_payloads_survive_raw_mode() {
        let value = QpackValue::Bytes(vec![0x00, 0xff, 0x80]);
        let bin = encode(&value).expect("encode");
        assert_eq!(decode(&bin).expect("decode"), value);
    }
}
