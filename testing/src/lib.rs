//! # SkyServices Testing
//!
//! Testing utilities for reducers and stores:
//! - Deterministic [`Clock`] implementations
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Effect assertions (delays, cancellations, counts)
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use skyservices_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(StorefrontReducer::new())
//!     .with_env(test_environment())
//!     .given_state(StorefrontState::default())
//!     .when_action(StorefrontAction::InitiateCheckout)
//!     .then_effects(|effects| assertions::assert_no_effects(effects))
//!     .run();
//! ```

use chrono::{DateTime, Duration, Utc};
use skyservices_core::environment::Clock;

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Duration, Utc};
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time.
    ///
    /// # Example
    ///
    /// ```
    /// use skyservices_testing::mocks::FixedClock;
    /// use skyservices_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    ///
    /// Useful when a test needs distinct but predictable timestamps.
    #[derive(Debug)]
    pub struct ManualClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a manual clock starting at `start`
        #[must_use]
        pub const fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Mutex::new(start),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: Duration) {
            let mut time = self.time.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    /// The instant every test clock starts at: 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(epoch())
    }
}

/// Test helpers
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs the
    /// subscriber. Honors `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedClock, ManualClock, test_clock};
