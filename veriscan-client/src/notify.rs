//! User-facing notification stream.
//!
//! Producers (the scanner, history workflows) push entries; the rendering
//! layer subscribes and draws them however it likes. Transient entries
//! dismiss themselves after their TTL, modal entries wait for an explicit
//! dismissal.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::watch;

use crate::navigator::Surface;

/// Default lifetime of a transient notification.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

const ID_LEN: usize = 8;

/// Opaque notification handle.
///
/// Collision-resistant within a session; not cryptographic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    fn generate() -> Self {
        let tag: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .collect();
        Self(tag)
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Completed operation
    Success,
    /// Failed operation
    Error,
    /// Something needs attention but nothing failed
    Warning,
    /// Neutral notice
    Info,
}

/// Call-to-action attached to a modal notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    /// Button label
    pub label: String,
    /// Where the action takes the user
    pub surface: Surface,
}

/// A single entry in the notification stream.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique handle for dismissal
    pub id: NotificationId,
    /// Message shown to the user
    pub message: String,
    /// Visual weight
    pub severity: Severity,
    /// Auto-dismiss delay; `None` (or zero) means the entry persists
    pub ttl: Option<Duration>,
    /// Whether the entry blocks until explicitly dismissed
    pub modal: bool,
    /// Optional call-to-action
    pub action: Option<NotificationAction>,
}

/// Live list of notifications on a watch channel.
#[derive(Clone, Debug)]
pub struct NotificationCenter {
    sender: Arc<watch::Sender<Vec<Notification>>>,
    receiver: watch::Receiver<Vec<Notification>>,
}

impl NotificationCenter {
    /// Create an empty center.
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(Vec::new());
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Subscribe to list changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.receiver.clone()
    }

    /// Current list contents.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.receiver.borrow().clone()
    }

    /// Push a transient notification.
    ///
    /// With a nonzero `ttl` a timer task dismisses the entry once the TTL
    /// elapses; callers therefore need to be on a Tokio runtime.
    pub fn notify(
        &self,
        message: impl Into<String>,
        severity: Severity,
        ttl: Option<Duration>,
    ) -> NotificationId {
        let id = NotificationId::generate();
        self.push(Notification {
            id: id.clone(),
            message: message.into(),
            severity,
            ttl,
            modal: false,
            action: None,
        });

        if let Some(ttl) = ttl
            && !ttl.is_zero()
        {
            let center = self.clone();
            let expired = id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                center.dismiss(&expired);
            });
        }

        id
    }

    /// Push a modal notification with an optional call-to-action.
    ///
    /// Modal entries never time out; they wait for [`Self::dismiss`].
    pub fn show_modal(
        &self,
        message: impl Into<String>,
        severity: Severity,
        action: Option<NotificationAction>,
    ) -> NotificationId {
        let id = NotificationId::generate();
        self.push(Notification {
            id: id.clone(),
            message: message.into(),
            severity,
            ttl: None,
            modal: true,
            action,
        });
        id
    }

    /// Remove an entry by handle. Unknown handles are a no-op.
    pub fn dismiss(&self, id: &NotificationId) {
        self.sender
            .send_modify(|entries| entries.retain(|entry| &entry.id != id));
    }

    /// Transient success notice with the default TTL.
    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Success, Some(DEFAULT_TTL))
    }

    /// Transient error notice with the default TTL.
    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Error, Some(DEFAULT_TTL))
    }

    /// Transient warning notice with the default TTL.
    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Warning, Some(DEFAULT_TTL))
    }

    /// Transient informational notice with the default TTL.
    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Info, Some(DEFAULT_TTL))
    }

    fn push(&self, notification: Notification) {
        self.sender
            .send_modify(|entries| entries.push(notification));
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
