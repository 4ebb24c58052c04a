//! Ergonomic testing utilities for reducers
//!
//! A fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use skyservices_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several `when_action` calls may be chained; they are reduced in order and
/// effect assertions see the effects of the last action only.
///
/// # Example
///
/// ```ignore
/// ReducerTest::new(StorefrontReducer::new())
///     .with_env(test_environment())
///     .given_state(StorefrontState::default())
///     .when_action(StorefrontAction::AddService { offering_id: "1".into() })
///     .then_state(|state| assert_eq!(state.selection.len(), 1))
///     .then_effects(|effects| assert!(!effects.is_empty()))
///     .run();
/// ```
pub struct ReducerTest<R>
where
    R: Reducer,
{
    reducer: R,
    environment: Option<R::Environment>,
    initial_state: Option<R::State>,
    actions: Vec<R::Action>,
    state_assertions: Vec<StateAssertion<R::State>>,
    effect_assertions: Vec<EffectAssertion<R::Action>>,
}

impl<R> ReducerTest<R>
where
    R: Reducer,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<R::Action>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(!self.actions.is_empty(), "Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use skyservices_core::effect::{Effect, EffectId};
    use std::time::Duration;

    /// Flatten parallel groups and cancellation wrappers into leaf effects
    fn leaves<A>(effects: &[Effect<A>]) -> Vec<&Effect<A>> {
        let mut out = Vec::new();
        for effect in effects {
            match effect {
                Effect::Parallel(inner) | Effect::Sequential(inner) => out.extend(leaves(inner)),
                Effect::Cancellable { effect, .. } => out.extend(leaves(std::slice::from_ref(effect.as_ref()))),
                other => out.push(other),
            }
        }
        out
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Find the delayed action matching `predicate`, returning its duration
    #[must_use]
    pub fn find_delay<A, F>(effects: &[Effect<A>], predicate: F) -> Option<Duration>
    where
        F: Fn(&A) -> bool,
    {
        leaves(effects).into_iter().find_map(|effect| match effect {
            Effect::Delay { duration, action } if predicate(action) => Some(*duration),
            _ => None,
        })
    }

    /// Assert that an action matching `predicate` is scheduled after `expected`
    ///
    /// # Panics
    ///
    /// Panics if no such delay exists or its duration differs.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_schedules<A, F>(effects: &[Effect<A>], expected: Duration, predicate: F)
    where
        A: std::fmt::Debug,
        F: Fn(&A) -> bool,
    {
        match find_delay(effects, predicate) {
            Some(duration) => assert_eq!(
                duration, expected,
                "Delayed action scheduled after {duration:?}, expected {expected:?}"
            ),
            None => panic!("Expected a matching delayed action, found {effects:?}"),
        }
    }

    /// Assert that no delayed action matches `predicate`
    ///
    /// # Panics
    ///
    /// Panics if a matching delay exists.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_not_scheduled<A, F>(effects: &[Effect<A>], predicate: F)
    where
        A: std::fmt::Debug,
        F: Fn(&A) -> bool,
    {
        assert!(
            find_delay(effects, predicate).is_none(),
            "Expected no matching delayed action, found {effects:?}"
        );
    }

    /// Assert that the effects cancel everything registered under `id`
    ///
    /// # Panics
    ///
    /// Panics if no `Effect::Cancel(id)` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_cancels<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        assert!(
            leaves(effects)
                .into_iter()
                .any(|effect| matches!(effect, Effect::Cancel(cancelled) if cancelled == id)),
            "Expected Effect::Cancel({id}), found {effects:?}"
        );
    }

    /// Assert that some effect is registered for cancellation under `id`
    ///
    /// # Panics
    ///
    /// Panics if no `Effect::Cancellable` with that id is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_cancellable_under<A: std::fmt::Debug>(effects: &[Effect<A>], id: &EffectId) {
        fn any_under<A>(effects: &[Effect<A>], id: &EffectId) -> bool {
            effects.iter().any(|effect| match effect {
                Effect::Cancellable { id: scope, .. } => scope == id,
                Effect::Parallel(inner) | Effect::Sequential(inner) => any_under(inner, id),
                _ => false,
            })
        }

        assert!(any_under(effects, id), "Expected an effect cancellable under {id}, found {effects:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyservices_core::effect::{Effect, EffectId};
    use skyservices_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        IncrementLater,
        Reset,
    }

    struct TestReducer;

    struct TestEnv;

    const LATER: EffectId = EffectId::from_static("later");

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec![Effect::None]
                },
                TestAction::IncrementLater => smallvec![
                    Effect::Cancel(LATER),
                    Effect::Delay {
                        duration: Duration::from_secs(2),
                        action: Box::new(TestAction::Increment),
                    }
                    .cancellable(LATER),
                ],
                TestAction::Reset => {
                    state.count = 0;
                    SmallVec::new()
                },
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_chained_actions() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Increment)
            .when_action(TestAction::Reset)
            .then_state(|state| {
                assert_eq!(state.count, 0);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 0);
            })
            .run();
    }

    #[test]
    fn test_delay_and_cancel_assertions() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::IncrementLater)
            .then_state(|state| assert_eq!(state.count, 0))
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &LATER);
                assertions::assert_cancellable_under(effects, &LATER);
                assertions::assert_schedules(effects, Duration::from_secs(2), |a| *a == TestAction::Increment);
                assertions::assert_not_scheduled(effects, |a| *a == TestAction::Reset);
            })
            .run();
    }
}
