//! The main error enum for the project lives here, and documents the various
//! conditions that can arise while interacting with the queue.

use thiserror::Error;

/// This is our error enum. It contains an entry for any part of the system in
/// which an expectation is not met or a problem occurs.
#[derive(Error, Debug)]
pub enum Error {
    /// The queue was closed. This is the benign one: producers and consumers get it
    /// during a coordinated shutdown and should simply stop using the queue.
    #[error("Queue is closed")]
    Closed,

    /// Bad configuration (missing fields, unparseable yaml, etc)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An entry key didn't have the shape of a queue key. Somebody built an
    /// [`Entry`][crate::entry::Entry] by hand or the store is corrupted.
    #[error("Invalid queue key: {0:x?}")]
    InvalidKey(Vec<u8>),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error locking queue state (a thread panicked while holding the lock)
    #[error("Error locking queue state: {0}")]
    LockError(String),

    /// We ran out of sequence numbers. Congratulations.
    #[error("Queue sequence numbers exhausted")]
    SequenceExhausted,

    /// Error serializing an object
    #[error("Error serializing")]
    Serde(#[from] bincode::Error),

    /// Error in storage layer
    #[error("Error in storage layer {0}")]
    Store(#[from] sled::Error),
}

impl Error {
    /// Returns true if this is the [`Error::Closed`] variant. Callers use this to
    /// tell a shutdown apart from an actual problem.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Wraps `std::result::Result` around our `Error` enum
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_is_closed() {
        assert!(Error::Closed.is_closed());
        assert!(!Error::SequenceExhausted.is_closed());
        assert!(!Error::InvalidKey(vec![1, 2, 3]).is_closed());
    }

    #[test]
    fn poison_converts() {
        let lock = std::sync::Arc::new(std::sync::Mutex::new(0));
        let lock2 = lock.clone();
        let _ = std::thread::spawn(move || {
            let _guard = lock2.lock().unwrap();
            panic!("poison it");
        }).join();
        let err: Error = lock.lock().unwrap_err().into();
        assert!(matches!(err, Error::LockError(_)));
    }
}
