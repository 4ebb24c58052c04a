//! State and actions of a storefront session.

use crate::notification::Notification;
use crate::selection::Selection;
use crate::theme::Theme;
use crate::totals::Totals;
use serde::{Deserialize, Serialize};

/// Checkout state machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// No checkout in progress
    #[default]
    Idle,
    /// Waiting for the simulated confirmation
    Processing {
        /// Totals captured when checkout was initiated
        totals: Totals,
    },
}

impl CheckoutPhase {
    /// Returns true while a checkout is pending
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }
}

/// Everything a storefront session holds
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StorefrontState {
    /// Selected offerings
    pub selection: Selection,
    /// Checkout progress
    pub checkout: CheckoutPhase,
    /// Notification currently shown, if any
    pub notification: Option<Notification>,
    /// Presentation theme
    pub theme: Theme,
    /// Sequence number handed to the next notification
    #[serde(skip)]
    pub(crate) next_seq: u64,
}

impl StorefrontState {
    /// Creates the state of a fresh session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals of the current selection
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.selection.totals()
    }

    /// Returns true while a checkout is pending
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.checkout.is_processing()
    }
}

/// Actions handled by the storefront reducer
///
/// The first group are user intents; the second are produced by timers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorefrontAction {
    // User intents
    /// Add one unit of a catalog offering
    AddService {
        /// Catalog id
        offering_id: String,
    },
    /// Delete the selection line of an offering
    RemoveService {
        /// Catalog id
        offering_id: String,
    },
    /// Start the simulated checkout
    InitiateCheckout,
    /// Switch between light and dark
    ToggleTheme,
    /// The session was opened
    SessionStarted,
    /// Discard the session and start over
    ResetSession,

    // Timer-produced
    /// The processing delay elapsed
    CheckoutCompleted,
    /// The post-checkout delay elapsed
    ClearSelection,
    /// The welcome delay elapsed
    ShowWelcome,
    /// A notification's lifetime elapsed
    DismissNotification {
        /// Sequence number of the notification to dismiss
        seq: u64,
    },
}

impl StorefrontAction {
    /// Convenience constructor for [`StorefrontAction::AddService`]
    #[must_use]
    pub fn add(offering_id: impl Into<String>) -> Self {
        Self::AddService {
            offering_id: offering_id.into(),
        }
    }

    /// Convenience constructor for [`StorefrontAction::RemoveService`]
    #[must_use]
    pub fn remove(offering_id: impl Into<String>) -> Self {
        Self::RemoveService {
            offering_id: offering_id.into(),
        }
    }
}
