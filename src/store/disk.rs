//! The on-disk store, backed by sled.
//!
//! sled replays its log when it opens and throws away any torn write at the tail, which
//! is exactly the recovery-open we want. What sled does *not* do by default is sync every
//! write, so we flush after each put/delete ourselves.

use crate::{
    config::QueueConfig,
    error::{Error, Result},
    store::{Store, StoreIter},
};
use sled::Db;
use tracing::{debug, trace};

/// A [`Store`] living on disk.
#[derive(Debug)]
pub struct DiskStore {
    db: Db,
}

impl DiskStore {
    /// Open (creating if needed, recovering if dirty) the store described by `config`.
    pub fn open(config: &QueueConfig) -> Result<Self> {
        let db = config.sled_config().open()?;
        debug!("DiskStore::open() -- opened {:?} (recovered: {})", config.path(), db.was_recovered());
        Ok(Self { db })
    }

    /// Wrap an existing [`sled::Db`].
    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn sync(&self) -> Result<()> {
        let bytes = self.db.flush()?;
        trace!("DiskStore::sync() -- flushed {} bytes", bytes);
        Ok(())
    }
}

impl Store for DiskStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        self.sync()
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.remove(key)?;
        self.sync()
    }

    fn range<'a>(&'a self, start: &[u8], limit: &[u8]) -> StoreIter<'a> {
        let iter = self.db.range(start.to_vec()..limit.to_vec())
            .map(|res| {
                res.map(|(k, v)| (k.to_vec(), v.to_vec()))
                    .map_err(Error::from)
            });
        Box::new(iter)
    }

    fn close(self) -> Result<()> {
        self.sync()?;
        debug!("DiskStore::close() -- closed");
        Ok(())
    }
}
