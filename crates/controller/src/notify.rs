//! Fire-and-forget user notifications (the toast channel).

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
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

/// A one-shot user-facing message. How it gets rendered (toast, console,
/// test buffer) is the subscriber's business.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Broadcast hub for notifications.
///
/// In-memory pub/sub: every subscriber gets a copy of each notification
/// published after it subscribed; dead subscribers are pruned on publish.
/// Publishing never blocks and never fails.
#[derive(Debug, Default)]
pub struct NotificationHub {
    subscribers: Mutex<Vec<mpsc::Sender<Notification>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            "notification ({}): {}",
            notification.level.as_str(),
            notification.message
        );
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(notification.clone()).is_ok());
        }
    }

    pub fn subscribe(&self) -> NotificationFeed {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        NotificationFeed { receiver: rx }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

/// One subscriber's view of the notification stream.
#[derive(Debug)]
pub struct NotificationFeed {
    receiver: mpsc::Receiver<Notification>,
}

impl NotificationFeed {
    /// Blocks until the next notification arrives.
    pub fn recv(&self) -> Result<Notification, mpsc::RecvError> {
        self.receiver.recv()
    }

    pub fn try_recv(&self) -> Result<Notification, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Notification, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fans_out_to_every_subscriber() {
        let hub = NotificationHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();

        hub.publish(Notification::success("done"));

        assert_eq!(first.try_recv().unwrap().message, "done");
        assert_eq!(second.try_recv().unwrap().message, "done");
    }

    #[test]
    fn prunes_dead_subscribers_on_publish() {
        let hub = NotificationHub::new();
        let live = hub.subscribe();
        let dead = hub.subscribe();
        drop(dead);
        assert_eq!(hub.subscriber_count(), 2);

        hub.publish(Notification::error("oops"));

        assert_eq!(hub.subscriber_count(), 1);
        let received = live.try_recv().unwrap();
        assert_eq!(received.level, NotificationLevel::Error);
        assert_eq!(received.message, "oops");
    }

    #[test]
    fn subscribers_only_see_notifications_after_subscribing() {
        let hub = NotificationHub::new();
        hub.publish(Notification::success("before"));

        let feed = hub.subscribe();
        hub.publish(Notification::success("after"));

        assert_eq!(feed.try_recv().unwrap().message, "after");
        assert!(feed.try_recv().is_err());
    }
}
