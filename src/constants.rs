//! Grammar markers and decoder defaults.
//!
//! The byte values here are the fixed tokens of the bencode grammar; the
//! limits are the defaults a [`Decoder`](crate::bencode::Decoder) starts with
//! and can be overridden per decoder.

// ============================================================================
// Grammar markers
// ============================================================================

/// Discriminator opening a dictionary (`d...e`).
pub const DICT_PREFIX: u8 = b'd';

/// Discriminator opening a list (`l...e`).
pub const LIST_PREFIX: u8 = b'l';

/// Discriminator opening an integer (`i...e`).
pub const INTEGER_PREFIX: u8 = b'i';

/// Terminator shared by integers, lists and dictionaries.
pub const END_SUFFIX: u8 = b'e';

/// Separator between a byte string's length prefix and its payload.
pub const LENGTH_DELIMITER: u8 = b':';

// ============================================================================
// Limits
// ============================================================================

/// Maximum container nesting accepted by a decoder unless configured otherwise.
///
/// Atoms at the top level are at depth 0; each enclosing list or dictionary
/// adds one.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound on the buffer reserved ahead of reading a byte string.
///
/// Larger strings still decode; the buffer grows as bytes actually arrive.
pub const STRING_PREALLOC_LIMIT: usize = 64 * 1024;
