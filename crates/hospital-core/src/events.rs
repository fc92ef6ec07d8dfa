//! User-visible notifications.
//!
//! The store publishes a [`Notification`] whenever something happens that a
//! person looking at the records should hear about (a delete went through, a
//! bulk import was saved, a collection failed to load). Views subscribe to the
//! [`NotificationBroadcaster`] and render them however they like.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::broadcast;

/// Default buffer size for the broadcast channel.
/// Notifications beyond this limit are dropped for slow receivers.
const DEFAULT_BUFFER_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Broadcaster for notifications.
///
/// Cheap to clone; all clones share one channel.
///
/// # Example
///
/// ```
/// use hospital_core::events::NotificationBroadcaster;
///
/// let broadcaster = NotificationBroadcaster::new();
/// let mut receiver = broadcaster.subscribe();
///
/// broadcaster.success("Patient deleted");
///
/// // let notification = receiver.recv().await.unwrap();
/// # let _ = &mut receiver;
/// ```
#[derive(Clone)]
pub struct NotificationBroadcaster {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBroadcaster {
    /// Create a new broadcaster with default buffer size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new broadcaster with custom buffer size.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new broadcaster wrapped in an Arc for sharing.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Send a notification to all subscribers.
    ///
    /// Returns the number of subscribers that received it, 0 if nobody is
    /// listening.
    pub fn send(&self, notification: Notification) -> usize {
        tracing::debug!(
            level = %notification.level,
            message = %notification.message,
            "Publishing notification"
        );
        self.sender.send(notification).unwrap_or_default()
    }

    pub fn success(&self, message: impl Into<String>) -> usize {
        self.send(Notification::success(message))
    }

    pub fn error(&self, message: impl Into<String>) -> usize {
        self.send(Notification::error(message))
    }

    /// Subscribe to notifications.
    ///
    /// Notifications sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Default for NotificationBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBroadcaster")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
