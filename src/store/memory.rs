//! This module holds our in-memory storage interface.

use crate::{
    error::{Error, Result},
    store::{KeyValue, Store, StoreIter},
};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

/// A storage layer that lives entirely in-memory. "Durable" until the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.data.write()?.insert(Vec::from(key), Vec::from(value));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.data.write()?.remove(key);
        Ok(())
    }

    fn range<'a>(&'a self, start: &[u8], limit: &[u8]) -> StoreIter<'a> {
        if start >= limit {
            return Box::new(std::iter::empty());
        }
        let guard = match self.data.read() {
            Ok(guard) => guard,
            Err(e) => return Box::new(std::iter::once(Err(Error::from(e)))),
        };
        // copy the range out so the iterator is a snapshot and we don't hold the lock
        let snapshot = guard
            .range::<[u8], _>((Bound::Included(start), Bound::Excluded(limit)))
            .map(|(k, v)| Ok((k.clone(), v.clone())))
            .collect::<Vec<Result<KeyValue>>>();
        Box::new(snapshot.into_iter())
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn ordered_range() {
        let store = MemoryStore::new();
        for key in [&b"b2"[..], &b"b0"[..], &b"a"[..], &b"b1"[..], &b"c"[..]] {
            store.put(key, key).unwrap();
        }
        let keys = store.range(b"b", b"c")
            .map(|x| x.map(|(k, _)| k))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(keys, vec![b"b0".to_vec(), b"b1".to_vec(), b"b2".to_vec()]);
        assert_eq!(store.last(b"b", b"c").unwrap().unwrap().0, b"b2".to_vec());
        assert_eq!(store.range(b"c", b"b").count(), 0);
        assert_eq!(store.range(b"b", b"b").count(), 0);
    }

    #[test]
    fn iter_is_a_snapshot() {
        let store = MemoryStore::new();
        store.put(b"k1", b"v1").unwrap();
        let mut iter = store.range(b"k", b"l");
        store.delete(b"k1").unwrap();
        store.put(b"k2", b"v2").unwrap();
        assert_eq!(iter.next().unwrap().unwrap(), (b"k1".to_vec(), b"v1".to_vec()));
        assert!(iter.next().is_none());
    }

    #[test]
    fn concurrent_puts() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8u8 {
            let local_store = store.clone();
            handles.push(std::thread::spawn(move || {
                for x in 0..5u8 {
                    local_store.put(&[i, x], &[x]).unwrap();
                }
            }));
        }
        for handle in handles { handle.join().unwrap(); }
        assert_eq!(store.range(&[0], &[255]).count(), 40);
    }
}
