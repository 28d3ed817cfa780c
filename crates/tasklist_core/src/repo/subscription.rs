//! Latest-snapshot subscriptions.
//!
//! Each subscription holds at most one unread snapshot. Publishing while one
//! is unread replaces it, so a receiver that never drains stays bounded.

use crate::model::task::Task;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Receiving end handed to the UI layer.
pub struct TaskListSubscription {
    updates: Receiver<Vec<Task>>,
    _alive: Arc<()>,
}

impl TaskListSubscription {
    /// Takes the newest unread snapshot, if any.
    pub fn try_latest(&self) -> Option<Vec<Task>> {
        self.updates.try_recv().ok()
    }

    /// Waits up to `timeout` for the next snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Vec<Task>> {
        match self.updates.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// Repository-side handle of one subscription.
pub(crate) struct Subscriber {
    sender: Sender<Vec<Task>>,
    unread: Receiver<Vec<Task>>,
    alive: Weak<()>,
}

impl Subscriber {
    pub(crate) fn pair() -> (Self, TaskListSubscription) {
        let (sender, updates) = bounded(1);
        let alive = Arc::new(());
        let subscriber = Self {
            sender,
            unread: updates.clone(),
            alive: Arc::downgrade(&alive),
        };
        let subscription = TaskListSubscription {
            updates,
            _alive: alive,
        };
        (subscriber, subscription)
    }

    /// Replaces any unread snapshot with `tasks`.
    ///
    /// Returns `false` once the subscription has been dropped.
    pub(crate) fn publish(&self, tasks: &[Task]) -> bool {
        if self.alive.strong_count() == 0 {
            return false;
        }
        // Only the repository sends, so after this the slot is free.
        let _ = self.unread.try_recv();
        let _ = self.sender.try_send(tasks.to_vec());
        true
    }
}
