//! `QpackEncoder` — recursive QPack encoder.

use qpack_buffers::Writer;

use crate::constants::*;
use crate::error::RangeError;
use crate::QpackValue;

/// Default maximum value nesting depth for encode and decode.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// QPack encoder.
///
/// Walks a [`QpackValue`] tree pre-order and appends the shortest legal
/// tag+payload encoding for each value to an owned, auto-growing
/// [`Writer`]. Encoding is pure with respect to its input; each encoder
/// owns its buffer, so independent encoders may run concurrently.
pub struct QpackEncoder {
    pub writer: Writer,
    max_depth: usize,
}

impl Default for QpackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QpackEncoder {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates an encoder that rejects values nested deeper than
    /// `max_depth` with [`RangeError::NestingTooDeep`] instead of
    /// exhausting the call stack.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            writer: Writer::new(),
            max_depth,
        }
    }

    /// Encode a value and return the QPack bytes.
    ///
    /// On failure any partially written output is discarded by the next
    /// call's reset; nothing is flushed.
    pub fn encode(&mut self, value: &QpackValue) -> Result<Vec<u8>, RangeError> {
        self.writer.reset();
        self.write_any(value)?;
        Ok(self.writer.flush())
    }

    pub fn write_any(&mut self, value: &QpackValue) -> Result<(), RangeError> {
        self.write_value(value, 0)
    }

    fn write_value(&mut self, value: &QpackValue, depth: usize) -> Result<(), RangeError> {
        if depth > self.max_depth {
            return Err(RangeError::NestingTooDeep);
        }
        match value {
            QpackValue::Null => self.write_null(),
            QpackValue::Bool(b) => self.write_boolean(*b),
            QpackValue::Int(i) => self.write_integer(*i),
            QpackValue::Double(f) => self.write_double(*f),
            QpackValue::Bytes(b) => self.write_bin(b)?,
            QpackValue::Str(s) => self.write_str(s)?,
            QpackValue::Array(arr) => self.write_arr(arr, depth)?,
            QpackValue::Map(pairs) => self.write_map(pairs, depth)?,
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.writer.u8(QP_NULL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { QP_BOOL_TRUE } else { QP_BOOL_FALSE });
    }

    /// Write an integer using the narrowest representation: one-byte
    /// inline for 0..=63 and -60..=-1, otherwise the smallest of
    /// int8/int16/int32/int64 whose range contains the value.
    ///
    /// Byte 0x7c is reserved for the hook tag, so -61 is never encoded
    /// inline and takes the int8 path.
    pub fn write_integer(&mut self, int: i64) {
        if (0..64).contains(&int) {
            self.writer.u8(int as u8);
        } else if (-60..0).contains(&int) {
            self.writer.u8((63 - int) as u8);
        } else if (i8::MIN as i64..=i8::MAX as i64).contains(&int) {
            self.writer.u8i8(QP_INT8, int as i8);
        } else if (i16::MIN as i64..=i16::MAX as i64).contains(&int) {
            self.writer.u8i16(QP_INT16, int as i16);
        } else if (i32::MIN as i64..=i32::MAX as i64).contains(&int) {
            self.writer.u8i32(QP_INT32, int as i32);
        } else {
            self.writer.u8i64(QP_INT64, int);
        }
    }

    /// Write a double. The singleton tags are selected by exact bit
    /// pattern, so -0.0, NaN and infinities all take the 8-byte path and
    /// round-trip bit-for-bit.
    pub fn write_double(&mut self, float: f64) {
        let bits = float.to_bits();
        if bits == 0.0f64.to_bits() {
            self.writer.u8(QP_DOUBLE_0);
        } else if bits == 1.0f64.to_bits() {
            self.writer.u8(QP_DOUBLE_1);
        } else if bits == (-1.0f64).to_bits() {
            self.writer.u8(QP_DOUBLE_N1);
        } else {
            self.writer.u8f64(QP_DOUBLE, float);
        }
    }

    /// Write the header for a raw (text or bytes) payload of `length`
    /// bytes: inline for lengths 0..=99, otherwise the smallest of the
    /// 8/16/32/64-bit unsigned length prefixes.
    pub fn write_raw_hdr(&mut self, length: usize) -> Result<(), RangeError> {
        if length <= INLINE_RAW_MAX {
            self.writer.u8(128 + length as u8);
        } else if length <= 0xff {
            self.writer.u8(QP_RAW8);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(QP_RAW16, length as u16);
        } else if length <= 0xffff_ffff {
            self.writer.u8u32(QP_RAW32, length as u32);
        } else {
            let length = u64::try_from(length).map_err(|_| RangeError::LengthOverflow)?;
            self.writer.u8u64(QP_RAW64, length);
        }
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), RangeError> {
        self.write_raw_hdr(s.len())?;
        self.writer.utf8(s);
        Ok(())
    }

    pub fn write_bin(&mut self, buf: &[u8]) -> Result<(), RangeError> {
        self.write_raw_hdr(buf.len())?;
        self.writer.buf(buf);
        Ok(())
    }

    fn write_arr(&mut self, arr: &[QpackValue], depth: usize) -> Result<(), RangeError> {
        let length = arr.len();
        if length < CONTAINER_THRESHOLD {
            self.writer.u8(START_ARR + length as u8);
            for item in arr {
                self.write_value(item, depth + 1)?;
            }
        } else {
            self.writer.u8(QP_OPEN_ARRAY);
            for item in arr {
                self.write_value(item, depth + 1)?;
            }
            self.writer.u8(QP_CLOSE_ARRAY);
        }
        Ok(())
    }

    fn write_map(
        &mut self,
        pairs: &[(QpackValue, QpackValue)],
        depth: usize,
    ) -> Result<(), RangeError> {
        let length = pairs.len();
        if length < CONTAINER_THRESHOLD {
            self.writer.u8(START_MAP + length as u8);
            for (key, val) in pairs {
                self.write_value(key, depth + 1)?;
                self.write_value(val, depth + 1)?;
            }
        } else {
            self.writer.u8(QP_OPEN_MAP);
            for (key, val) in pairs {
                self.write_value(key, depth + 1)?;
                self.write_value(val, depth + 1)?;
            }
            self.writer.u8(QP_CLOSE_MAP);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &QpackValue) -> Vec<u8> {
        QpackEncoder::new().encode(value).unwrap()
    }

    #[test]
    fn test_inline_integers() {
        assert_eq!(encode(&QpackValue::Int(0)), [0x00]);
        assert_eq!(encode(&QpackValue::Int(63)), [0x3f]);
        assert_eq!(encode(&QpackValue::Int(-1)), [0x40]);
        assert_eq!(encode(&QpackValue::Int(-60)), [0x7b]);
    }

    #[test]
    fn test_minus_61_avoids_hook_byte() {
        assert_eq!(encode(&QpackValue::Int(-61)), [QP_INT8, 0xc3]);
    }

    #[test]
    fn test_integer_width_by_range_containment() {
        assert_eq!(encode(&QpackValue::Int(100)), [QP_INT8, 0x64]);
        assert_eq!(encode(&QpackValue::Int(-128)), [QP_INT8, 0x80]);
        assert_eq!(encode(&QpackValue::Int(128)), [QP_INT16, 0x80, 0x00]);
        assert_eq!(
            encode(&QpackValue::Int(-32768)),
            [QP_INT16, 0x00, 0x80]
        );
        assert_eq!(encode(&QpackValue::Int(1 << 20)).len(), 5);
        assert_eq!(encode(&QpackValue::Int(1 << 40)).len(), 9);
    }

    #[test]
    fn test_double_singletons() {
        assert_eq!(encode(&QpackValue::Double(0.0)), [QP_DOUBLE_0]);
        assert_eq!(encode(&QpackValue::Double(1.0)), [QP_DOUBLE_1]);
        assert_eq!(encode(&QpackValue::Double(-1.0)), [QP_DOUBLE_N1]);
        assert_eq!(encode(&QpackValue::Double(2.0)).len(), 9);
        // Signed zero is not the 0.0 singleton.
        let neg_zero = encode(&QpackValue::Double(-0.0));
        assert_eq!(neg_zero.len(), 9);
        assert_eq!(neg_zero[0], QP_DOUBLE);
    }

    #[test]
    fn test_raw_headers() {
        assert_eq!(encode(&QpackValue::Str("AB".into())), [0x82, 0x41, 0x42]);
        let long = "a".repeat(100);
        let out = encode(&QpackValue::Str(long));
        assert_eq!(&out[..2], &[QP_RAW8, 100]);
        assert_eq!(out.len(), 102);
        let longer = QpackValue::Bytes(vec![0u8; 0x100]);
        let out = encode(&longer);
        assert_eq!(&out[..3], &[QP_RAW16, 0x00, 0x01]);
    }

    #[test]
    fn test_container_threshold() {
        let five = QpackValue::Array((0..5).map(QpackValue::Int).collect());
        assert_eq!(encode(&five), [0xf2, 0, 1, 2, 3, 4]);
        let six = QpackValue::Array((0..6).map(QpackValue::Int).collect());
        assert_eq!(encode(&six), [QP_OPEN_ARRAY, 0, 1, 2, 3, 4, 5, QP_CLOSE_ARRAY]);
    }

    #[test]
    fn test_depth_limit() {
        let mut encoder = QpackEncoder::with_max_depth(4);
        let mut value = QpackValue::Int(1);
        for _ in 0..6 {
            value = QpackValue::Array(vec![value]);
        }
        assert_eq!(encoder.encode(&value), Err(RangeError::NestingTooDeep));
        // A failed encode leaves the encoder reusable.
        assert_eq!(encoder.encode(&QpackValue::Int(1)).unwrap(), [0x01]);
    }
}
