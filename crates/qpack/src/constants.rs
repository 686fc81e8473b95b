//! QPack tag-byte constants.
//!
//! The tag table is the single shared contract between the encoder and the
//! decoder; every byte value 0x00–0xFF has a defined meaning. All
//! multi-byte payloads are little-endian.

// Inline unsigned integers: 0x00–0x3f, value = byte.
// Inline negative integers: 0x40–0x7b, value = 63 - byte (-1..-60).

/// Reserved hook tag. Sits at the arithmetic end of the inline negative
/// integer range; the encoder never emits it and the decoder consumes it
/// as an ignorable placeholder.
pub const QP_HOOK: u8 = 0x7c;

/// Double literal -1.0.
pub const QP_DOUBLE_N1: u8 = 0x7d;
/// Double literal 0.0.
pub const QP_DOUBLE_0: u8 = 0x7e;
/// Double literal 1.0.
pub const QP_DOUBLE_1: u8 = 0x7f;

// Inline raw (text/bytes): 0x80–0xe3, length = byte - 128 (0..99).

/// Raw with 8-bit unsigned length prefix.
pub const QP_RAW8: u8 = 0xe4;
/// Raw with 16-bit unsigned length prefix.
pub const QP_RAW16: u8 = 0xe5;
/// Raw with 32-bit unsigned length prefix.
pub const QP_RAW32: u8 = 0xe6;
/// Raw with 64-bit unsigned length prefix.
pub const QP_RAW64: u8 = 0xe7;

/// Signed 8-bit integer payload.
pub const QP_INT8: u8 = 0xe8;
/// Signed 16-bit integer payload.
pub const QP_INT16: u8 = 0xe9;
/// Signed 32-bit integer payload.
pub const QP_INT32: u8 = 0xea;
/// Signed 64-bit integer payload.
pub const QP_INT64: u8 = 0xeb;

/// Double with 8-byte IEEE-754 payload.
pub const QP_DOUBLE: u8 = 0xec;

/// Base tag for fixed-size arrays; count = tag - START_ARR (0..5).
pub const START_ARR: u8 = 0xed;
/// Base tag for fixed-size maps; pair count = tag - START_MAP (0..5).
pub const START_MAP: u8 = 0xf3;

/// Boolean true.
pub const QP_BOOL_TRUE: u8 = 0xf9;
/// Boolean false.
pub const QP_BOOL_FALSE: u8 = 0xfa;
/// Null.
pub const QP_NULL: u8 = 0xfb;

/// Open array; elements follow until [`QP_CLOSE_ARRAY`].
pub const QP_OPEN_ARRAY: u8 = 0xfc;
/// Open map; key/value pairs follow until [`QP_CLOSE_MAP`].
pub const QP_OPEN_MAP: u8 = 0xfd;
/// Array terminator, only valid after [`QP_OPEN_ARRAY`].
pub const QP_CLOSE_ARRAY: u8 = 0xfe;
/// Map terminator, only valid after [`QP_OPEN_MAP`].
pub const QP_CLOSE_MAP: u8 = 0xff;

/// Containers with fewer elements/pairs than this use a fixed-size tag;
/// larger containers use the open/close form. Both sides of the wire must
/// agree on this threshold exactly.
pub const CONTAINER_THRESHOLD: usize = 6;

/// Maximum byte length of an inline raw header (lengths 0..=99).
pub const INLINE_RAW_MAX: usize = 99;
