//! Reducer composition utilities
//!
//! - **[`combine`]**: Run two reducers on the same state and action, concatenating effects
//! - **[`scope_reducer`]**: Focus a reducer on one field of a larger state
//!
//! Together they let an application reducer be assembled from small,
//! independently tested parts:
//!
//! ```
//! use skyservices_core::composition::{combine, scope_reducer};
//! use skyservices_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq)]
//! enum Mode {
//!     #[default]
//!     Day,
//!     Night,
//! }
//!
//! #[derive(Debug, Default)]
//! struct AppState {
//!     count: u32,
//!     mode: Mode,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Increment,
//!     FlipMode,
//! }
//!
//! #[derive(Clone)]
//! struct CountReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = AppState;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if matches!(action, AppAction::Increment) {
//!             state.count += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct ModeReducer;
//!
//! impl Reducer for ModeReducer {
//!     type State = Mode;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, mode: &mut Mode, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if matches!(action, AppAction::FlipMode) {
//!             *mode = if *mode == Mode::Day { Mode::Night } else { Mode::Day };
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! fn mode_of(state: &mut AppState) -> &mut Mode {
//!     &mut state.mode
//! }
//!
//! let app = combine(CountReducer, scope_reducer(ModeReducer, mode_of));
//!
//! let mut state = AppState::default();
//! app.reduce(&mut state, AppAction::Increment, &());
//! app.reduce(&mut state, AppAction::FlipMode, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(state.mode, Mode::Night);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines two reducers operating on the same state, action, and environment.
///
/// `first` runs before `second`; both see the action and the effects of both
/// are returned in that order. Nest calls to combine more than two reducers.
#[must_use]
pub const fn combine<R1, R2>(first: R1, second: R2) -> CombinedReducer<R1, R2>
where
    R1: Reducer,
    R2: Reducer<State = R1::State, Action = R1::Action, Environment = R1::Environment>,
    R1::Action: Clone,
{
    CombinedReducer { first, second }
}

/// Two reducers run in sequence.
///
/// Created by [`combine`].
#[derive(Debug, Clone, Copy)]
pub struct CombinedReducer<R1, R2> {
    first: R1,
    second: R2,
}

impl<R1, R2> Reducer for CombinedReducer<R1, R2>
where
    R1: Reducer,
    R2: Reducer<State = R1::State, Action = R1::Action, Environment = R1::Environment>,
    R1::Action: Clone,
{
    type State = R1::State;
    type Action = R1::Action;
    type Environment = R1::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = self.first.reduce(state, action.clone(), env);
        effects.extend(self.second.reduce(state, action, env));
        effects
    }
}

/// Scopes a reducer to operate on a field of a larger state.
///
/// `focus` projects the parent state onto the child state the reducer owns.
/// The action and environment types are shared with the parent.
#[must_use]
pub const fn scope_reducer<S, R>(reducer: R, focus: fn(&mut S) -> &mut R::State) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer { reducer, focus }
}

/// A reducer focused on part of a parent state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    reducer: R,
    focus: fn(&mut S) -> &mut R::State,
}

impl<S, R> Clone for ScopedReducer<S, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            focus: self.focus,
        }
    }
}

impl<S, R> std::fmt::Debug for ScopedReducer<S, R>
where
    R: Reducer + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    R: Reducer,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.focus)(state), action, env)
    }
}
