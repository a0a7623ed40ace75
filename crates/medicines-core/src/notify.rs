//! Transient user notifications.
//!
//! The page shows at most one notification. Showing a new one replaces the
//! current one; each expires on its own after a fixed time-to-live.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::render::escape_html;

/// Default lifetime of a notification.
pub const DEFAULT_NOTIFICATION_TTL_SECS: i64 = 5;

/// Notification style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "notification-info",
            NotificationKind::Success => "notification-success",
            NotificationKind::Warning => "notification-warning",
            NotificationKind::Error => "notification-error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single notification banner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"notification {}\"><span class=\"notification-message\">{}</span>\
             <button class=\"notification-close\">×</button></div>",
            self.kind.css_class(),
            escape_html(&self.message)
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Holds the currently visible notification.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_NOTIFICATION_TTL_SECS))
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Show a notification now, replacing any visible one.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        self.show_at(kind, message, Utc::now())
    }

    /// Show a notification created at `now`.
    pub fn show_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Uuid {
        let notification = Notification::new(kind, message, now);
        let id = notification.id;
        self.current = Some(notification);
        id
    }

    /// Close a notification by id. Returns false if it is no longer shown.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        match &self.current {
            Some(n) if n.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the current notification if its lifetime has passed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Option<Notification> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.ttl));
        if expired {
            self.current.take()
        } else {
            None
        }
    }

    /// The visible notification at `now`, after expiring stale ones.
    pub fn visible_at(&mut self, now: DateTime<Utc>) -> Option<&Notification> {
        self.expire(now);
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_existing() {
        let mut center = NotificationCenter::default();
        let first = center.show(NotificationKind::Info, "first");
        let second = center.show(NotificationKind::Error, "second");

        assert_ne!(first, second);
        assert!(!center.dismiss(first));
        assert_eq!(center.current().unwrap().message, "second");
    }

    #[test]
    fn test_auto_dismiss_after_ttl() {
        let mut center = NotificationCenter::default();
        let start = Utc::now();
        center.show_at(NotificationKind::Success, "saved", start);

        assert!(center.visible_at(start + Duration::seconds(4)).is_some());
        assert!(center.visible_at(start + Duration::seconds(5)).is_none());
        assert!(center.current().is_none());
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut center = NotificationCenter::default();
        let id = center.show(NotificationKind::Warning, "careful");
        assert!(center.dismiss(id));
        assert!(center.current().is_none());
    }

    #[test]
    fn test_html_escapes_message() {
        let n = Notification::new(NotificationKind::Error, "<oops>", Utc::now());
        let html = n.to_html();
        assert!(html.contains("notification notification-error"));
        assert!(html.contains("&lt;oops&gt;"));
    }
}
