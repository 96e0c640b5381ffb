//! The queue module is the main interface to the system: push entries in, peek the oldest
//! one, delete it when you're done with it.
//!
//! Ordering comes entirely from the keys (see [`key`][crate::key]): every push gets the
//! next sequence number, and the store keeps keys sorted, so the first key in the entry
//! range is always the oldest entry. There is no in-memory index to rebuild. On open we
//! look at the *last* key to figure out where numbering picks back up.
//!
//! Locking is a single `RwLock` around the store handle and the sequence counter. Pushes,
//! deletes and closes take it exclusively. Peeks take it shared and only for the one read;
//! a peek that finds nothing lets go of the lock and sleeps on a [`Signal`] until a push
//! wakes it up or the queue closes.

use crate::{
    config::QueueConfig,
    entry::Entry,
    error::{Error, Result},
    key,
    ser,
    signal::{Shutdown, Signal, Wake},
    store::{disk::DiskStore, Store},
};
use serde::Serialize;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info, trace};

/// Everything the queue lock protects.
struct State<S> {
    /// Our backing store. `None` once the queue is closed.
    db: Option<S>,
    /// The sequence number the next push gets
    next: u64,
}

impl<S> State<S> {
    fn db(&self) -> Result<&S> {
        self.db.as_ref().ok_or(Error::Closed)
    }
}

/// A durable FIFO queue. Share it between threads with an `Arc`.
pub struct Queue<S: Store = DiskStore> {
    state: RwLock<State<S>>,
    /// Posted on every successful push
    signal: Signal,
    /// Fired once, on close
    shutdown: Shutdown,
}

impl Queue<DiskStore> {
    /// Open the queue living at `path`, creating it if it doesn't exist and recovering it if
    /// the last process to use it died without closing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(&QueueConfig::for_path(path))
    }

    /// Open a queue using a full [`QueueConfig`].
    pub fn open_with(config: &QueueConfig) -> Result<Self> {
        let store = DiskStore::open(config)?;
        Self::with_store(store)
    }
}

impl<S: Store> Queue<S> {
    /// Create a `Queue` on top of an already-opened store. Reads the last entry key in the
    /// store to find where sequence numbering resumes.
    pub fn with_store(store: S) -> Result<Self> {
        let range = key::range();
        let next = match store.last(range.start, range.end)? {
            Some((last, _)) => {
                key::decode(&last)?
                    .checked_add(1)
                    .ok_or(Error::SequenceExhausted)?
            }
            None => 0,
        };
        info!("Queue::with_store() -- opened queue, next sequence is {}", next);
        Ok(Self {
            state: RwLock::new(State { db: Some(store), next }),
            signal: Signal::new(),
            shutdown: Shutdown::new(),
        })
    }

    /// Push a value onto the end of the queue. When this returns `Ok`, the value is on disk.
    #[tracing::instrument(skip_all)]
    pub fn push<V: AsRef<[u8]>>(&self, value: V) -> Result<()> {
        let mut state = self.state.write()?;
        let seq = state.next;
        let after = {
            let db = state.db()?;
            let after = seq.checked_add(1).ok_or(Error::SequenceExhausted)?;
            db.put(&key::encode(seq), value.as_ref())?;
            after
        };
        state.next = after;
        trace!("Queue::push() -- pushed entry {} ({} bytes)", seq, value.as_ref().len());
        self.signal.notify();
        Ok(())
    }

    /// Serialize an item and push it. Read it back out with [`Entry::deserialize`].
    pub fn push_ser<T: Serialize + ?Sized>(&self, item: &T) -> Result<()> {
        let bytes = ser::serialize(item)?;
        self.push(bytes)
    }

    /// Get the oldest entry in the queue, blocking until there is one.
    ///
    /// This does not remove or reserve anything: call [`Queue::delete`] with the returned
    /// entry once you've processed it. Until then, other peekers will see the same entry.
    ///
    /// The only ways out are an entry, [`Error::Closed`], or a storage error.
    #[tracing::instrument(skip(self))]
    pub fn peek(&self) -> Result<Entry> {
        let shutdown = self.shutdown.listener();
        let range = key::range();
        let mut woken = false;
        loop {
            let found = {
                let state = self.state.read()?;
                state.db()?.first(range.start, range.end)?
            };
            if let Some((key, value)) = found {
                // the signal only holds one wake-up, so whoever got it hands it to the next
                // waiter in line. everyone blocked gets a look at what's there.
                if woken {
                    self.signal.notify();
                }
                return Ok(Entry::from_parts(key, value));
            }
            trace!("Queue::peek() -- queue empty, waiting");
            match self.signal.wait(&shutdown) {
                Wake::Signaled => woken = true,
                Wake::Shutdown => return Err(Error::Closed),
            }
        }
    }

    /// Delete an entry returned from [`Queue::peek`]. Deleting an entry somebody else
    /// already deleted is fine.
    #[tracing::instrument(skip_all)]
    pub fn delete(&self, entry: &Entry) -> Result<()> {
        let seq = key::decode(entry.key())?;
        let state = self.state.write()?;
        state.db()?.delete(entry.key())?;
        trace!("Queue::delete() -- deleted entry {}", seq);
        Ok(())
    }

    /// Close the queue. Anybody blocked in [`Queue::peek`] gets [`Error::Closed`], as does
    /// every call after this one (except `close`, which is a no-op the second time around).
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.write()?;
        match state.db.take() {
            Some(db) => {
                self.shutdown.trigger();
                info!("Queue::close() -- closing queue at sequence {}", state.next);
                db.close()
            }
            None => {
                debug!("Queue::close() -- already closed");
                Ok(())
            }
        }
    }

    /// Whether this queue has been closed.
    pub fn is_closed(&self) -> bool {
        match self.state.read() {
            Ok(state) => state.db.is_none(),
            Err(poisoned) => poisoned.into_inner().db.is_none(),
        }
    }

    /// The sequence number the next push will get.
    pub fn next_seq(&self) -> Result<u64> {
        Ok(self.state.read()?.next)
    }
}

impl<S: Store> std::fmt::Debug for Queue<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (closed, next) = match self.state.read() {
            Ok(state) => (state.db.is_none(), Some(state.next)),
            Err(_) => (true, None),
        };
        f.debug_struct("Queue")
            .field("closed", &closed)
            .field("next", &next)
            .finish()
    }
}
