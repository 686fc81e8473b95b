//! `QpackDecoder` — recursive-descent QPack decoder.

use crate::constants::*;
use crate::encoder::DEFAULT_MAX_DEPTH;
use crate::error::FormatError;
use crate::QpackValue;

/// Caller-selected interpretation of raw payloads.
///
/// The wire format stores no text/bytes distinction, so whether a raw
/// payload decodes to [`QpackValue::Str`] or [`QpackValue::Bytes`] is a
/// property of the decoder, not of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoding {
    Utf8,
}

/// QPack decoder.
///
/// Walks an input buffer once, left to right, advancing a single cursor
/// and reconstructing the value tree. The input is never mutated; on any
/// error the partially decoded tree is dropped.
pub struct QpackDecoder {
    pub data: Vec<u8>,
    pub x: usize,
    /// When set, raw payloads are validated and returned as text;
    /// when `None`, raw payloads are returned as bytes unvalidated.
    pub text_decoding: Option<TextDecoding>,
    /// Input nested deeper than this fails with
    /// [`FormatError::NestingTooDeep`].
    pub max_depth: usize,
}

impl Default for QpackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QpackDecoder {
    /// Creates a decoder in raw-bytes mode.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            x: 0,
            text_decoding: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a decoder that interprets raw payloads as text under the
    /// given charset.
    pub fn new_text(charset: TextDecoding) -> Self {
        Self {
            text_decoding: Some(charset),
            ..Self::new()
        }
    }

    /// Decode exactly one value from the start of `input`.
    ///
    /// Returns the value and the number of bytes consumed. Trailing bytes
    /// after the value are permitted and ignored, so a concatenated
    /// stream can be walked by re-slicing with the consumed count.
    pub fn decode(&mut self, input: &[u8]) -> Result<(QpackValue, usize), FormatError> {
        self.data = input.to_vec();
        self.x = 0;
        let value = self.read_value(0)?;
        Ok((value, self.x))
    }

    /// Read one value at the current cursor position.
    pub fn read_any(&mut self) -> Result<QpackValue, FormatError> {
        self.read_value(0)
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), FormatError> {
        // RAW64 lengths come straight off the wire, so the end position
        // must be computed without wrapping.
        match self.x.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(FormatError::UnexpectedEof),
        }
    }

    #[inline]
    fn u8(&mut self) -> Result<u8, FormatError> {
        self.check(1)?;
        let v = self.data[self.x];
        self.x += 1;
        Ok(v)
    }

    #[inline]
    fn u16(&mut self) -> Result<u16, FormatError> {
        self.check(2)?;
        let v = u16::from_le_bytes([self.data[self.x], self.data[self.x + 1]]);
        self.x += 2;
        Ok(v)
    }

    #[inline]
    fn u32(&mut self) -> Result<u32, FormatError> {
        self.check(4)?;
        let v = u32::from_le_bytes([
            self.data[self.x],
            self.data[self.x + 1],
            self.data[self.x + 2],
            self.data[self.x + 3],
        ]);
        self.x += 4;
        Ok(v)
    }

    #[inline]
    fn u64(&mut self) -> Result<u64, FormatError> {
        self.check(8)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[self.x..self.x + 8]);
        self.x += 8;
        Ok(u64::from_le_bytes(bytes))
    }

    #[inline]
    fn i8(&mut self) -> Result<i8, FormatError> {
        self.u8().map(|v| v as i8)
    }

    #[inline]
    fn i16(&mut self) -> Result<i16, FormatError> {
        self.u16().map(|v| v as i16)
    }

    #[inline]
    fn i32(&mut self) -> Result<i32, FormatError> {
        self.u32().map(|v| v as i32)
    }

    #[inline]
    fn i64(&mut self) -> Result<i64, FormatError> {
        self.u64().map(|v| v as i64)
    }

    #[inline]
    fn f64(&mut self) -> Result<f64, FormatError> {
        self.u64().map(f64::from_bits)
    }

    /// Read a raw payload of `size` bytes, interpreted per the decoder's
    /// text mode. Raw-bytes mode never validates encoding.
    fn read_raw(&mut self, size: usize) -> Result<QpackValue, FormatError> {
        self.check(size)?;
        let slice = &self.data[self.x..self.x + size];
        let value = match self.text_decoding {
            Some(TextDecoding::Utf8) => {
                let s = std::str::from_utf8(slice).map_err(|_| FormatError::InvalidUtf8)?;
                QpackValue::Str(s.to_string())
            }
            None => QpackValue::Bytes(slice.to_vec()),
        };
        self.x += size;
        Ok(value)
    }

    /// Tag dispatch: a total, ordered ladder of range checks covering
    /// every byte value 0x00–0xff.
    fn read_value(&mut self, depth: usize) -> Result<QpackValue, FormatError> {
        if depth > self.max_depth {
            return Err(FormatError::NestingTooDeep);
        }
        let tag = self.u8()?;

        // Inline unsigned integer: 0x00–0x3f.
        if tag < 0x40 {
            return Ok(QpackValue::Int(tag as i64));
        }
        // Inline negative integer: 0x40–0x7b, value = 63 - tag.
        if tag < QP_HOOK {
            return Ok(QpackValue::Int(63 - tag as i64));
        }
        // Reserved hook tag: consumed as an ignorable placeholder.
        if tag == QP_HOOK {
            return Ok(QpackValue::Int(0));
        }
        // Double singletons: 0x7d–0x7f map to -1.0, 0.0, 1.0.
        if tag < 0x80 {
            return Ok(QpackValue::Double((tag as i64 - 126) as f64));
        }
        // Inline raw: 0x80–0xe3, length = tag - 128.
        if tag < QP_RAW8 {
            return self.read_raw((tag - 128) as usize);
        }
        // Fixed-size array: 0xed–0xf2, count = tag - START_ARR.
        if (START_ARR..START_MAP).contains(&tag) {
            return self.read_arr((tag - START_ARR) as usize, depth);
        }
        // Fixed-size map: 0xf3–0xf8, pair count = tag - START_MAP.
        if (START_MAP..QP_BOOL_TRUE).contains(&tag) {
            return self.read_map((tag - START_MAP) as usize, depth);
        }

        match tag {
            QP_RAW8 => {
                let n = self.u8()? as usize;
                self.read_raw(n)
            }
            QP_RAW16 => {
                let n = self.u16()? as usize;
                self.read_raw(n)
            }
            QP_RAW32 => {
                let n = self.u32()? as usize;
                self.read_raw(n)
            }
            QP_RAW64 => {
                let n = self.u64()?;
                let n = usize::try_from(n).map_err(|_| FormatError::UnexpectedEof)?;
                self.read_raw(n)
            }
            QP_INT8 => Ok(QpackValue::Int(self.i8()? as i64)),
            QP_INT16 => Ok(QpackValue::Int(self.i16()? as i64)),
            QP_INT32 => Ok(QpackValue::Int(self.i32()? as i64)),
            QP_INT64 => Ok(QpackValue::Int(self.i64()?)),
            QP_DOUBLE => Ok(QpackValue::Double(self.f64()?)),
            QP_BOOL_TRUE => Ok(QpackValue::Bool(true)),
            QP_BOOL_FALSE => Ok(QpackValue::Bool(false)),
            QP_NULL => Ok(QpackValue::Null),
            QP_OPEN_ARRAY => self.read_open_arr(depth),
            QP_OPEN_MAP => self.read_open_map(depth),
            // QP_CLOSE_ARRAY | QP_CLOSE_MAP in value position.
            _ => Err(FormatError::UnexpectedClose(self.x - 1)),
        }
    }

    fn read_arr(&mut self, size: usize, depth: usize) -> Result<QpackValue, FormatError> {
        let mut arr = Vec::with_capacity(size);
        for _ in 0..size {
            arr.push(self.read_value(depth + 1)?);
        }
        Ok(QpackValue::Array(arr))
    }

    fn read_map(&mut self, size: usize, depth: usize) -> Result<QpackValue, FormatError> {
        let mut pairs = Vec::with_capacity(size);
        for _ in 0..size {
            let key = self.read_value(depth + 1)?;
            let val = self.read_value(depth + 1)?;
            pairs.push((key, val));
        }
        Ok(QpackValue::Map(pairs))
    }

    fn read_open_arr(&mut self, depth: usize) -> Result<QpackValue, FormatError> {
        let mut arr = Vec::new();
        loop {
            self.check(1)?;
            if self.data[self.x] == QP_CLOSE_ARRAY {
                self.x += 1;
                return Ok(QpackValue::Array(arr));
            }
            arr.push(self.read_value(depth + 1)?);
        }
    }

    fn read_open_map(&mut self, depth: usize) -> Result<QpackValue, FormatError> {
        let mut pairs = Vec::new();
        loop {
            self.check(1)?;
            if self.data[self.x] == QP_CLOSE_MAP {
                self.x += 1;
                return Ok(QpackValue::Map(pairs));
            }
            let key = self.read_value(depth + 1)?;
            let val = self.read_value(depth + 1)?;
            pairs.push((key, val));
        }
    }
}
