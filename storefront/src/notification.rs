//! Transient notifications shown by the presentation layer.
//!
//! There is a single notification slot. Every notification carries a sequence
//! number so that a dismiss timer only clears the notification it was
//! scheduled for.

use crate::config::StorefrontConfig;
use crate::totals::format_amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happened
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// Greeting shown shortly after the session starts
    Welcome,
    /// An offering got its own selection line
    Added {
        /// Offering name
        name: String,
    },
    /// A selection line was deleted
    Removed {
        /// Offering name
        name: String,
    },
    /// The simulated checkout finished
    CheckoutComplete {
        /// Grand total captured when checkout was initiated
        grand_total: f64,
    },
}

/// Visual tone of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Neutral information
    Info,
    /// Positive confirmation
    Success,
    /// Something was taken away
    Warning,
}

/// A notification occupying the slot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Monotonic sequence number within the session
    pub seq: u64,
    /// Kind and payload
    #[serde(flatten)]
    pub kind: NotificationKind,
    /// When it was emitted
    pub emitted_at: DateTime<Utc>,
}

impl Notification {
    /// Message a toast would display
    #[must_use]
    pub fn message(&self) -> String {
        match &self.kind {
            NotificationKind::Welcome => "Welcome to SkyServices! Explore premium airline services.".to_string(),
            NotificationKind::Added { name } => format!("\"{name}\" added to your selection!"),
            NotificationKind::Removed { name } => format!("\"{name}\" removed from selection"),
            NotificationKind::CheckoutComplete { grand_total } => {
                format!("Order confirmed! Total: {}", format_amount(*grand_total))
            },
        }
    }

    /// Tone used to style the toast
    #[must_use]
    pub const fn level(&self) -> Level {
        match self.kind {
            NotificationKind::Welcome => Level::Info,
            NotificationKind::Added { .. } | NotificationKind::CheckoutComplete { .. } => Level::Success,
            NotificationKind::Removed { .. } => Level::Warning,
        }
    }

    /// How long the notification stays before it is dismissed
    #[must_use]
    pub const fn lifetime(&self, config: &StorefrontConfig) -> Duration {
        match self.kind {
            NotificationKind::Welcome => config.welcome_notification_duration,
            NotificationKind::Added { .. } | NotificationKind::Removed { .. } => config.notification_duration,
            NotificationKind::CheckoutComplete { .. } => config.checkout_notification_duration,
        }
    }
}
