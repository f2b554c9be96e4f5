//! Transient UI notifications
//!
//! The console publishes short-lived notices (permission denials, failed
//! updates, confirmations) on a broadcast channel; a toast/snackbar view
//! subscribes and displays them. Publishing never fails: with no subscriber
//! the notice is simply dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Human-readable action label for permission denials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Notice {
    pub fn denied(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            level: NoticeLevel::Warning,
            message: format!("You do not have permission to {}", label),
            label: Some(label),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            label: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            label: None,
        }
    }
}

/// Broadcast channel of [`Notice`]s
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Bus buffering up to `capacity` notices per subscriber (at least one)
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to notices published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn publish(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            tracing::debug!("Notice dropped: no subscribers");
        }
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
