//! An [`Entry`] is what you get back from [`Queue::peek`][crate::queue::Queue::peek]: a
//! copy of one queue entry's key and value at the time it was read.
//!
//! It is *not* a reservation. Other threads can peek (and delete) the same entry while
//! you hold it, and deleting it doesn't invalidate anybody else's copy.

use crate::{
    error::Result,
    key,
    ser,
};
use getset::Getters;
use serde::de::DeserializeOwned;

/// A snapshot of a single queue entry.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Entry {
    /// The raw key this entry was stored under
    key: Vec<u8>,
    /// The entry's payload
    value: Vec<u8>,
}

impl Entry {
    /// Create an entry from raw parts. The queue only ever hands out entries it read from
    /// storage, but this is here for anyone who needs to rebuild one (the key gets
    /// validated again on delete anyway).
    pub fn from_parts<K, V>(key: K, value: V) -> Self
        where K: Into<Vec<u8>>,
              V: Into<Vec<u8>>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The payload, as a byte slice.
    pub fn bytes(&self) -> &[u8] {
        self.value.as_slice()
    }

    /// The sequence number of this entry, or `InvalidKey` if the key is junk.
    pub fn seq(&self) -> Result<u64> {
        key::decode(&self.key)
    }

    /// Deserialize the payload of an entry pushed via
    /// [`Queue::push_ser`][crate::queue::Queue::push_ser].
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        ser::deserialize(&self.value)
    }

    /// Consume the entry, returning its payload.
    pub fn into_value(self) -> Vec<u8> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn accessors() {
        let entry = Entry::from_parts(key::encode(42), "get a job".as_bytes());
        assert_eq!(entry.key(), &key::encode(42).to_vec());
        assert_eq!(entry.value(), &Vec::from("get a job".as_bytes()));
        assert_eq!(entry.bytes(), b"get a job");
        assert_eq!(entry.seq().unwrap(), 42);
        assert_eq!(entry.clone().into_value(), b"get a job".to_vec());
    }

    #[test]
    fn bad_key_seq() {
        let entry = Entry::from_parts(b"nope".as_slice(), b"".as_slice());
        assert!(matches!(entry.seq(), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn deserializes() {
        let payload = ser::serialize(&(77u32, String::from("process-vid1"))).unwrap();
        let entry = Entry::from_parts(key::encode(0), payload);
        let (num, name): (u32, String) = entry.deserialize().unwrap();
        assert_eq!(num, 77);
        assert_eq!(name, "process-vid1");
    }

    #[test]
    fn sharable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Entry>();
    }
}
