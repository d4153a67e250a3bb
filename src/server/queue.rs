//! The dispatch queue between the accept loop and the workers.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Unbounded FIFO guarded by one mutex, with a condvar signalled on every
/// push.
///
/// [`DispatchQueue::pop`] blocks until an item is available or the queue is
/// closed. Items pushed before [`DispatchQueue::close`] are still handed
/// out, so closing drains rather than drops.
pub struct DispatchQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
}

impl<T> Default for DispatchQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DispatchQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends an item and wakes one waiting consumer.
    pub fn push(&self, item: T) {
        self.lock().items.push_back(item);
        self.available.notify_one();
    }

    /// Takes the front item, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue is closed and fully drained.
    pub fn pop(&self) -> Option<T> {
        let state = self.lock();
        let mut state = self
            .available
            .wait_while(state, |s| s.items.is_empty() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);

        state.items.pop_front()
    }

    /// Non-blocking variant of [`DispatchQueue::pop`].
    pub fn try_pop(&self) -> Option<T> {
        self.lock().items.pop_front()
    }

    /// Marks the queue closed and wakes every waiting consumer.
    pub fn close(&self) {
        self.lock().closed = true;
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    // Queue state is only mutated by single push/pop calls, so a panic while
    // the lock is held cannot leave it inconsistent.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
