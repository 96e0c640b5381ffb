use bincode::Options;
use crate::{
    error::{Error, Result},
};
use serde::{
    de::Deserialize,
    ser::Serialize,
};

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
}

/// Serialize a value into a byte vector
pub(crate) fn serialize<T: Serialize + ?Sized>(val: &T) -> Result<Vec<u8>> {
    options()
        .serialize(val)
        .map_err(|e| Error::Serde(e))
}

/// Deserialize a value from a byte vector
pub(crate) fn deserialize<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    options()
        .deserialize(bytes)
        .map_err(|e| Error::Serde(e))
}
