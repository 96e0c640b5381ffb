//! The storage seam. The queue only needs a handful of things from its storage engine:
//! ordered keys, durable single-key puts and deletes, ranged iteration that can be walked
//! from either end, and an open that recovers whatever a crash left behind.
//!
//! [`disk::DiskStore`] is the real thing (sled). [`memory::MemoryStore`] keeps everything
//! in a `BTreeMap` and is handy for tests that don't care about crashes.

pub mod disk;
pub mod memory;

use crate::{
    error::{Result},
};

/// A key/value pair read from a `Store`.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// An iterator over a key range. It must see a consistent view of the store, and it must be
/// double-ended: `next()` walks up from the start of the range, `next_back()` down from
/// the end.
pub type StoreIter<'a> = Box<dyn DoubleEndedIterator<Item = Result<KeyValue>> + 'a>;

/// The `Store` trait defines an interface for our storage systems.
pub trait Store: Send + Sync {
    /// Put a value into this `Store`. Must not return until the write is on stable storage.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove a key from this `Store`. Same durability rules as `put`. Removing a key that
    /// isn't there is not an error.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Iterate over the half-open range `[start, limit)`.
    fn range<'a>(&'a self, start: &[u8], limit: &[u8]) -> StoreIter<'a>;

    /// Flush anything outstanding and release the store.
    fn close(self) -> Result<()>;

    /// Grab the first pair in `[start, limit)`
    fn first(&self, start: &[u8], limit: &[u8]) -> Result<Option<KeyValue>> {
        self.range(start, limit).next().transpose()
    }

    /// Grab the last pair in `[start, limit)`
    fn last(&self, start: &[u8], limit: &[u8]) -> Result<Option<KeyValue>> {
        self.range(start, limit).next_back().transpose()
    }
}
