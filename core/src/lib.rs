//! # SkyServices Core
//!
//! Reducer, effect, and environment abstractions the storefront is built on.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by a store (the selection, checkout phase, ...)
//! - **Action**: Every input a reducer handles, whether a user intent or a timer firing
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of a side effect (a delay, an async computation); never executed here
//! - **Environment**: Injected dependencies such as the [`environment::Clock`]
//!
//! ## Example
//!
//! ```
//! use skyservices_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default)]
//! struct LampState {
//!     on: bool,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum LampAction {
//!     Switch,
//!     AutoOff,
//! }
//!
//! struct LampReducer;
//!
//! impl Reducer for LampReducer {
//!     type State = LampState;
//!     type Action = LampAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut LampState,
//!         action: LampAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<LampAction>; 4]> {
//!         match action {
//!             LampAction::Switch => {
//!                 state.on = true;
//!                 smallvec![Effect::Delay {
//!                     duration: Duration::from_secs(60),
//!                     action: Box::new(LampAction::AutoOff),
//!                 }]
//!             },
//!             LampAction::AutoOff => {
//!                 state.on = false;
//!                 smallvec![Effect::None]
//!             },
//!         }
//!     }
//! }
//!
//! let mut state = LampState::default();
//! let effects = LampReducer.reduce(&mut state, LampAction::Switch, &());
//! assert!(state.on);
//! assert!(matches!(effects[0], Effect::Delay { .. }));
//! ```

pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Reducer composition (`combine`, `scope_reducer`)
pub mod composition;

mod effect_macros;

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed by the runtime
        ///
        /// Effects are returned in the order the runtime must start them.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values returned by reducers. The runtime decides how and when
/// to run them, which keeps reducers synchronous and trivially testable.
pub mod effect {
    use std::borrow::Cow;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier grouping cancellable effects
    ///
    /// Every task started under a [`Effect::Cancellable`] with a given id can be
    /// aborted later with [`Effect::Cancel`] carrying the same id.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct EffectId(Cow<'static, str>);

    impl EffectId {
        /// Create an id from a static name
        #[must_use]
        pub const fn from_static(name: &'static str) -> Self {
            Self(Cow::Borrowed(name))
        }

        /// Create an id from an owned name
        #[must_use]
        pub fn new(name: impl Into<String>) -> Self {
            Self(Cow::Owned(name.into()))
        }

        /// The id as a string slice
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should
    /// happen, returned from reducers and executed by the store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially, each one waiting for the previous to finish
        Sequential(Vec<Effect<Action>>),

        /// Dispatch an action after a delay
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Run the inner effect so that it can later be aborted by id
        Cancellable {
            /// Group the spawned tasks are registered under
            id: EffectId,
            /// The effect to run
            effect: Box<Effect<Action>>,
        },

        /// Abort every pending task registered under the id
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Make this effect abortable under `id`
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// The action a delay effect dispatches, looking through cancellation wrappers
        #[must_use]
        pub fn delayed_action(&self) -> Option<(&Duration, &Action)> {
            match self {
                Effect::Delay { duration, action } => Some((duration, action)),
                Effect::Cancellable { effect, .. } => effect.delayed_action(),
                _ => None,
            }
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via the
/// Environment parameter of a reducer.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    /// Clock trait - abstracts time for testability
    ///
    /// Only wall-clock timestamps go through the clock. Delays are described
    /// as effects and scheduled by the runtime.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    impl<C: Clock + ?Sized> Clock for Arc<C> {
        fn now(&self) -> DateTime<Utc> {
            (**self).now()
        }
    }
}
