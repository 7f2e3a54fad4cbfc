//! User-facing notifications ("toasts").
//!
//! Stores report what happened through a [`Notifier`] after each mutating
//! operation. Notifications are fire-and-forget: a notifier can never change
//! the outcome of the operation that produced it.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;

/// A short, human-readable message for transient display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
}

impl Notification {
    /// Create a notification with a description only.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: description.into(),
        }
    }
}

/// Receives notifications emitted by the stores.
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    fn notify(&self, notification: Notification);
}

/// Bounded in-memory queue of pending notifications.
///
/// Every notification is also emitted as a `tracing` event. Once the queue
/// holds `capacity` entries the oldest entry is dropped to make room.
#[derive(Debug)]
pub struct NotificationQueue {
    capacity: usize,
    pending: Mutex<VecDeque<Notification>>,
}

impl NotificationQueue {
    /// Default number of notifications kept before the oldest are dropped.
    pub const DEFAULT_CAPACITY: usize = 50;

    /// Create a queue holding at most `capacity` notifications.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Take every pending notification, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .map(|mut pending| pending.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().map(|pending| pending.len()).unwrap_or(0)
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            title = notification.title.as_deref(),
            description = %notification.description,
            "notification"
        );

        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if pending.len() >= self.capacity {
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}
