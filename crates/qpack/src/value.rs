//! [`QpackValue`] — the value model the codec encodes and decodes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Closed value model for the QPack format.
///
/// The wire format stores no text/bytes distinction, so a decoder yields
/// either [`QpackValue::Bytes`] or [`QpackValue::Str`] for raw payloads
/// depending on the caller-selected decoding mode.
///
/// Maps are ordered pair lists: insertion order is preserved on encode and
/// reproduced on decode, keys may be any encodable value, and duplicate
/// keys are kept as-is. Last-write-wins resolution happens only when the
/// pairs are materialized into a native keyed map (see the `serde_json`
/// conversion below).
#[derive(Debug, Clone, PartialEq)]
pub enum QpackValue {
    /// Null singleton.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// IEEE-754 64-bit float.
    Double(f64),
    /// Opaque octet sequence.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Str(String),
    /// Ordered sequence.
    Array(Vec<QpackValue>),
    /// Ordered key/value pairs.
    Map(Vec<(QpackValue, QpackValue)>),
}

impl QpackValue {
    /// Structural equality with doubles compared by bit pattern, so NaN
    /// payloads and signed zero distinguish values the way the wire does.
    pub fn bitwise_eq(&self, other: &QpackValue) -> bool {
        match (self, other) {
            (QpackValue::Double(a), QpackValue::Double(b)) => a.to_bits() == b.to_bits(),
            (QpackValue::Array(a), QpackValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.bitwise_eq(y))
            }
            (QpackValue::Map(a), QpackValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ak, av), (bk, bv))| ak.bitwise_eq(bk) && av.bitwise_eq(bv))
            }
            _ => self == other,
        }
    }
}

impl From<serde_json::Value> for QpackValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => QpackValue::Null,
            serde_json::Value::Bool(b) => QpackValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    QpackValue::Int(i)
                } else {
                    // u64 above i64::MAX and non-integer numbers go through f64.
                    QpackValue::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => QpackValue::Str(s),
            serde_json::Value::Array(arr) => {
                QpackValue::Array(arr.into_iter().map(QpackValue::from).collect())
            }
            serde_json::Value::Object(obj) => QpackValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (QpackValue::Str(k), QpackValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<QpackValue> for serde_json::Value {
    fn from(v: QpackValue) -> Self {
        match v {
            QpackValue::Null => serde_json::Value::Null,
            QpackValue::Bool(b) => serde_json::Value::Bool(b),
            QpackValue::Int(i) => serde_json::json!(i),
            QpackValue::Double(f) => serde_json::json!(f),
            QpackValue::Bytes(b) => {
                let b64 = BASE64.encode(&b);
                serde_json::Value::String(format!("data:application/octet-stream;base64,{}", b64))
            }
            QpackValue::Str(s) => serde_json::Value::String(s),
            QpackValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            QpackValue::Map(pairs) => {
                // JSON objects key by string; duplicate keys collapse here
                // with last-write-wins.
                let mut obj = serde_json::Map::new();
                for (key, val) in pairs {
                    obj.insert(json_key(key), serde_json::Value::from(val));
                }
                serde_json::Value::Object(obj)
            }
        }
    }
}

/// Renders a map key as a JSON object key. String keys pass through;
/// any other key type is rendered via its JSON form.
fn json_key(key: QpackValue) -> String {
    match key {
        QpackValue::Str(s) => s,
        other => serde_json::Value::from(other).to_string(),
    }
}
