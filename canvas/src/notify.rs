//! Transient status notifications shown after save, load, and note splits.
//!
//! Only one notification is visible at a time; showing a new one replaces the
//! current one and restarts its timer. Time is passed in by the caller as
//! milliseconds so the logic stays testable off the browser.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// Background color of the toast.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "#38a169",
            Self::Error => "#e53e3e",
            Self::Info => "#3182ce",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// Clock time the notification was raised.
    pub shown_at_ms: f64,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    ttl_ms: f64,
}

impl Notifier {
    #[must_use]
    pub fn new(ttl_ms: f64) -> Self {
        Self { current: None, ttl_ms }
    }

    /// Raise a notification, replacing whatever is showing.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now_ms: f64) {
        let message = message.into();
        info!("notify [{severity:?}] {message}");
        self.current = Some(Notification { message, severity, shown_at_ms: now_ms });
    }

    /// The notification to display at `now_ms`, if it hasn't expired.
    #[must_use]
    pub fn visible(&self, now_ms: f64) -> Option<&Notification> {
        self.current.as_ref().filter(|n| now_ms - n.shown_at_ms < self.ttl_ms)
    }

    /// Drop an expired notification. Returns `true` if one was cleared.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        if self.current.is_some() && self.visible(now_ms).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    /// Dismiss the current notification immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
