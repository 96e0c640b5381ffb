//! Signals for waking up blocked consumers.
//!
//! [`Signal`] is a single-slot channel: sends never block, and any number of sends before
//! somebody receives collapse into one pending wake-up. [`Shutdown`] is a one-shot
//! broadcast: dropping its sender disconnects the channel, which every current *and
//! future* receiver sees immediately.

use crossbeam_channel::{self, select, Receiver, Sender, TrySendError};
use std::sync::Mutex;
use tracing::trace;

/// What woke a waiter up.
#[derive(Debug, PartialEq)]
pub enum Wake {
    /// Something might be available. Might.
    Signaled,
    /// The shutdown was triggered.
    Shutdown,
}

/// A coalescing, non-blocking wake-up signal.
#[derive(Clone, Debug)]
pub struct Signal {
    sender: Sender<()>,
    receiver: Receiver<()>,
}

impl Signal {
    /// Create a new `Signal` with nothing pending.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        Self { sender, receiver }
    }

    /// Post a wake-up. If one is already pending this does nothing.
    pub fn notify(&self) {
        match self.sender.try_send(()) {
            Err(TrySendError::Full(_)) => trace!("Signal::notify() -- wake-up already pending"),
            // we hold both ends, so we can't be disconnected
            Err(TrySendError::Disconnected(_)) => {}
            Ok(_) => {}
        }
    }

    /// Consume a pending wake-up without blocking. Returns whether there was one.
    #[cfg(test)]
    fn try_take(&self) -> bool {
        self.receiver.try_recv().is_ok()
    }

    /// Block until either a wake-up arrives or `shutdown` fires.
    pub fn wait(&self, shutdown: &ShutdownListener) -> Wake {
        select! {
            recv(self.receiver) -> _ => Wake::Signaled,
            recv(shutdown.0) -> _ => Wake::Shutdown,
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-shot shutdown broadcast. Nothing is ever sent on the channel; triggering drops
/// the sender, and a disconnected receiver is always ready.
#[derive(Debug)]
pub struct Shutdown {
    sender: Mutex<Option<Sender<()>>>,
    receiver: Receiver<()>,
}

/// The receiving half of a [`Shutdown`], handed to waiters.
#[derive(Clone, Debug)]
pub struct ShutdownListener(Receiver<()>);

impl Shutdown {
    /// Create a new, untriggered `Shutdown`.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    /// Get a listener that can wait on this shutdown.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener(self.receiver.clone())
    }

    /// Fire the shutdown, releasing all listeners. Returns false if it already fired.
    pub fn trigger(&self) -> bool {
        // a poisoned lock still holds a valid Option, so just use it
        let mut guard = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.take().is_some()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// Whether the shutdown has fired.
    #[cfg(test)]
    fn is_triggered(&self) -> bool {
        matches!(self.0.try_recv(), Err(crossbeam_channel::TryRecvError::Disconnected))
    }
}
