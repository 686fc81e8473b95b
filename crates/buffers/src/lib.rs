//! Binary buffer utilities for qpack.
//!
//! QPack is a little-endian format, so all multi-byte write methods here
//! are little-endian.
//!
//! # Example
//!
//! ```
//! use qpack_buffers::Writer;
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//! assert_eq!(&data[..3], [0x01, 0x03, 0x02]);
//! ```

mod writer;

pub use writer::Writer;
