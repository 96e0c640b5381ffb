//! Queue entries are stored under fixed-width keys: a tag byte followed by the
//! big-endian sequence number. Big endian plus a fixed width means the store's
//! lexicographic key order *is* insertion order, which is the whole trick.
//!
//! The tag keeps queue entries in their own corner of the keyspace, so the store
//! can hold other things without the queue ever tripping over them.

use crate::error::{Error, Result};
use std::ops::Range;

/// The tag byte that prefixes every queue entry key.
pub const ENTRY_TAG: u8 = 0x01;

/// Total key width: tag + u64
pub const KEY_LEN: usize = 1 + std::mem::size_of::<u64>();

/// A queue entry key.
pub type Key = [u8; KEY_LEN];

/// Encode a sequence number into its key.
pub fn encode(seq: u64) -> Key {
    let mut key = [0u8; KEY_LEN];
    key[0] = ENTRY_TAG;
    key[1..].copy_from_slice(&seq.to_be_bytes());
    key
}

/// Decode a key back into its sequence number, making sure it's actually shaped
/// like one of ours first.
pub fn decode(key: &[u8]) -> Result<u64> {
    if key.len() != KEY_LEN || key[0] != ENTRY_TAG {
        return Err(Error::InvalidKey(Vec::from(key)));
    }
    let mut seq = [0u8; 8];
    seq.copy_from_slice(&key[1..]);
    Ok(u64::from_be_bytes(seq))
}

/// First key of the entry range.
static RANGE_START: Key = [ENTRY_TAG, 0, 0, 0, 0, 0, 0, 0, 0];

/// The tag's successor. Anything starting with a higher tag sorts at or past this.
static RANGE_LIMIT: [u8; 1] = [ENTRY_TAG + 1];

/// The half-open range holding every possible entry key. The limit is the bare successor
/// tag, so `encode(u64::MAX)` is still inside and no other tag's keys are.
pub fn range() -> Range<&'static [u8]> {
    &RANGE_START[..]..&RANGE_LIMIT[..]
}
