//! A durable FIFO queue for a single process with lots of threads, for when losing a job is
//! not an option and you're willing to pay a disk sync on every push for it.
//!
//! Producers [`push`][Queue::push] opaque bytes. Consumers [`peek`][Queue::peek] the
//! oldest entry (blocking until there is one) and [`delete`][Queue::delete] it once it's
//! been handled. Everything pushed and not yet deleted survives crashes and restarts and
//! comes back out in the order it went in.
//!
//! Peeking does not reserve anything. Two consumers peeking at the same time can get the
//! same entry; it's up to the layer above to make sure that's ok (at-least-once).
//!
//! ```no_run
//! use sturdy_queue::Queue;
//!
//! let queue = Queue::open("/var/lib/my-queue")?;
//! queue.push(b"get a job")?;
//! let entry = queue.peek()?;
//! assert_eq!(entry.bytes(), b"get a job");
//! queue.delete(&entry)?;
//! queue.close()?;
//! # Ok::<(), sturdy_queue::error::Error>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod key;
pub mod queue;
pub mod signal;
pub mod store;
mod ser;

pub use config::{QueueConfig, QueueConfigBuilder, StoreMode};
pub use entry::Entry;
pub use error::{Error, Result};
pub use queue::Queue;
pub use sled;
