//! Single-slot hand-off between the session task and the move producer.
//!
//! The producer calls [`MoveHandoff::deposit`] from any thread; the session
//! awaits [`MoveHandoff::take`]. A deposit made while nobody is waiting stays
//! in the slot and the next `take` returns it without suspending.
//! Producers that must not overwrite a pending value use
//! [`MoveHandoff::deposit_wait`], which parks the thread until the slot drains.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::common::SessionError;

struct Slot<T> {
    value: Option<T>,
    interrupted: bool,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    notify: Notify,
    drained: Condvar,
}

/// Blocking single-slot exchange. Clones share the same slot.
pub struct MoveHandoff<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for MoveHandoff<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for MoveHandoff<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MoveHandoff<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    value: None,
                    interrupted: false,
                }),
                notify: Notify::new(),
                drained: Condvar::new(),
            }),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot<T>> {
        // The slot holds plain data, so a poisoned lock is still consistent.
        self.shared.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` and wake the waiting consumer, if any.
    ///
    /// The newest value wins: `Ok(Some(older))` carries a value that was still
    /// pending and got replaced. Once the hand-off has been interrupted the
    /// value is refused and comes back as `Err(value)`.
    pub fn deposit(&self, value: T) -> Result<Option<T>, T> {
        let replaced = {
            let mut slot = self.slot();
            if slot.interrupted {
                return Err(value);
            }
            slot.value.replace(value)
        };
        self.shared.notify.notify_one();
        Ok(replaced)
    }

    /// Like [`deposit`](Self::deposit), but blocks the calling thread until the
    /// slot is empty so no earlier value is overwritten.
    ///
    /// Must not be called from an async task: it parks the thread.
    pub fn deposit_wait(&self, value: T) -> Result<(), T> {
        {
            let mut slot = self.slot();
            while slot.value.is_some() && !slot.interrupted {
                slot = self
                    .shared
                    .drained
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if slot.interrupted {
                return Err(value);
            }
            slot.value = Some(value);
        }
        self.shared.notify.notify_one();
        Ok(())
    }

    /// Wait until a value is deposited, then take it and empty the slot.
    ///
    /// Only one task may consume from a hand-off.
    pub async fn take(&self) -> Result<T, SessionError> {
        loop {
            {
                let mut slot = self.slot();
                if let Some(value) = slot.value.take() {
                    self.shared.drained.notify_all();
                    return Ok(value);
                }
                if slot.interrupted {
                    return Err(SessionError::InterruptedWait);
                }
            }
            // A notify_one issued before this point leaves a permit behind,
            // so the wake-up cannot be lost between the check and the wait.
            self.shared.notify.notified().await;
        }
    }

    /// Abort the current and all future waits with [`SessionError::InterruptedWait`].
    /// A value already pending is still handed out first.
    /// Producers blocked in `deposit_wait` get their value back.
    pub fn interrupt(&self) {
        self.slot().interrupted = true;
        self.shared.notify.notify_one();
        self.shared.drained.notify_all();
    }

    pub fn is_interrupted(&self) -> bool {
        self.slot().interrupted
    }

    /// Whether a deposited value is waiting to be taken.
    pub fn is_pending(&self) -> bool {
        self.slot().value.is_some()
    }
}
