//! Storefront timing configuration.
//!
//! Loaded from environment variables with defaults matching the classic
//! storefront behavior. A variable that is set but cannot be parsed is an
//! error rather than being silently replaced by its default.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable is set but is not a whole number of milliseconds
    #[error("invalid value {value:?} for {key}: {source}")]
    InvalidMillis {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        source: std::num::ParseIntError,
    },
}

/// Delays and notification lifetimes used by the storefront reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Time spent in `Processing` before checkout completes (default: 1500ms)
    pub checkout_delay: Duration,
    /// Time between checkout completion and the selection clear (default: 2000ms)
    pub clear_delay: Duration,
    /// Time between session start and the welcome notification (default: 1000ms)
    pub welcome_delay: Duration,
    /// Lifetime of added/removed notifications (default: 3000ms)
    pub notification_duration: Duration,
    /// Lifetime of the checkout confirmation (default: 5000ms)
    pub checkout_notification_duration: Duration,
    /// Lifetime of the welcome notification (default: 5000ms)
    pub welcome_notification_duration: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            checkout_delay: Duration::from_millis(1500),
            clear_delay: Duration::from_millis(2000),
            welcome_delay: Duration::from_millis(1000),
            notification_duration: Duration::from_millis(3000),
            checkout_notification_duration: Duration::from_millis(5000),
            welcome_notification_duration: Duration::from_millis(5000),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the process environment
    ///
    /// Reads `SKYSERVICES_CHECKOUT_DELAY_MS`, `SKYSERVICES_CLEAR_DELAY_MS`,
    /// `SKYSERVICES_WELCOME_DELAY_MS`, `SKYSERVICES_NOTIFICATION_MS`,
    /// `SKYSERVICES_CHECKOUT_NOTIFICATION_MS` and
    /// `SKYSERVICES_WELCOME_NOTIFICATION_MS`. Unset variables keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMillis`] if a variable is set to something
    /// other than a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|source| ConfigError::InvalidMillis { key, value, source }),
            }
        };

        Ok(Self {
            checkout_delay: millis("SKYSERVICES_CHECKOUT_DELAY_MS", defaults.checkout_delay)?,
            clear_delay: millis("SKYSERVICES_CLEAR_DELAY_MS", defaults.clear_delay)?,
            welcome_delay: millis("SKYSERVICES_WELCOME_DELAY_MS", defaults.welcome_delay)?,
            notification_duration: millis("SKYSERVICES_NOTIFICATION_MS", defaults.notification_duration)?,
            checkout_notification_duration: millis(
                "SKYSERVICES_CHECKOUT_NOTIFICATION_MS",
                defaults.checkout_notification_duration,
            )?,
            welcome_notification_duration: millis(
                "SKYSERVICES_WELCOME_NOTIFICATION_MS",
                defaults.welcome_notification_duration,
            )?,
        })
    }
}
