//! Wire-level constants of the CBOR data model.
//!
//! An encoded item starts with a single *initial byte*: the top three bits are the major type and
//! the bottom five bits are the additional information. Additional information `0..=23` is the
//! magnitude itself; `24..=27` announce a 1, 2, 4, or 8 byte big-endian magnitude that follows.
//!
//! Canonical form requires the shortest such field for every integer and every length.

/// The eight CBOR major types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Major {
    /// Unsigned integer (major 0).
    Unsigned = 0,
    /// Negative integer `-1 - n` (major 1).
    Negative = 1,
    /// Byte string (major 2).
    Bytes = 2,
    /// UTF-8 text string (major 3).
    Text = 3,
    /// Array of data items (major 4).
    Array = 4,
    /// Map of key/value pairs (major 5).
    Map = 5,
    /// Tagged data item (major 6). Never produced by this crate.
    Tag = 6,
    /// Simple values and floats (major 7).
    Simple = 7,
}

impl Major {
    /// Return the initial byte for this major type with the given additional information.
    #[inline]
    #[must_use]
    pub const fn initial_byte(self, additional: u8) -> u8 {
        debug_assert!(additional < 32);
        ((self as u8) << 5) | (additional & 0x1f)
    }
}

/// Additional information: a 1-byte magnitude follows.
pub const AI_ONE_BYTE: u8 = 24;
/// Additional information: a 2-byte magnitude follows.
pub const AI_TWO_BYTES: u8 = 25;
/// Additional information: a 4-byte magnitude follows.
pub const AI_FOUR_BYTES: u8 = 26;
/// Additional information: an 8-byte magnitude follows.
pub const AI_EIGHT_BYTES: u8 = 27;

/// Simple value `false`.
pub const SIMPLE_FALSE: u8 = 20;
/// Simple value `true`.
pub const SIMPLE_TRUE: u8 = 21;
/// Simple value `null`.
pub const SIMPLE_NULL: u8 = 22;
/// Simple value `undefined`. Never produced by this crate.
pub const SIMPLE_UNDEFINED: u8 = 23;
/// Half-precision float. Never produced by this crate.
pub const SIMPLE_FLOAT16: u8 = 25;
/// Single-precision float.
pub const SIMPLE_FLOAT32: u8 = 26;
/// Double-precision float.
pub const SIMPLE_FLOAT64: u8 = 27;
/// Break stop code of indefinite-length items. Never produced by this crate.
pub const SIMPLE_BREAK: u8 = 31;

/// The additional information that encodes `n` in the fewest bytes.
///
/// Returns `n` itself below 24, otherwise the escape ([`AI_ONE_BYTE`] ..= [`AI_EIGHT_BYTES`]) of the
/// narrowest field that holds `n`. Every header width decision derives from this.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn minimal_additional_info(n: u64) -> u8 {
    if n < 24 {
        n as u8
    } else if n <= 0xff {
        AI_ONE_BYTE
    } else if n <= 0xffff {
        AI_TWO_BYTES
    } else if n <= 0xffff_ffff {
        AI_FOUR_BYTES
    } else {
        AI_EIGHT_BYTES
    }
}

/// Number of magnitude bytes that follow the initial byte for additional information `ai`.
///
/// Returns `None` for the reserved values `28..=30` and the indefinite-length marker `31`.
#[inline]
#[must_use]
pub const fn argument_len(ai: u8) -> Option<usize> {
    match ai {
        0..=23 => Some(0),
        AI_ONE_BYTE => Some(1),
        AI_TWO_BYTES => Some(2),
        AI_FOUR_BYTES => Some(4),
        AI_EIGHT_BYTES => Some(8),
        _ => None,
    }
}

/// Length in bytes of the canonical header for a magnitude of `n`.
#[inline]
#[must_use]
pub const fn encoded_header_len(n: u64) -> usize {
    match argument_len(minimal_additional_info(n)) {
        Some(len) => 1 + len,
        None => unreachable!(),
    }
}
