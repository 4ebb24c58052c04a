//! Reducer logic for a storefront session.
//!
//! [`StorefrontReducer`] is assembled from two parts: the session reducer,
//! which owns the selection, checkout, and notifications, and the
//! [`ThemeReducer`] scoped onto the theme field.

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::notification::{Notification, NotificationKind};
use crate::selection::AddOutcome;
use crate::theme::{Theme, ThemeReducer};
use crate::types::{CheckoutPhase, StorefrontAction, StorefrontState};
use skyservices_core::composition::{CombinedReducer, ScopedReducer, combine, scope_reducer};
use skyservices_core::effect::Effect;
use skyservices_core::environment::{Clock, SystemClock};
use skyservices_core::reducer::Reducer;
use skyservices_core::{SmallVec, delay, smallvec};
use std::sync::Arc;

/// Cancellation ids of the timers the storefront schedules
pub mod timers {
    use skyservices_core::effect::EffectId;

    /// Checkout completion and the post-checkout clear
    pub const CHECKOUT: EffectId = EffectId::from_static("storefront.checkout");
    /// Auto-dismiss of the current notification
    pub const DISMISS: EffectId = EffectId::from_static("storefront.notification");
    /// Welcome notification after session start
    pub const WELCOME: EffectId = EffectId::from_static("storefront.welcome");

    /// Every storefront timer
    pub const ALL: [EffectId; 3] = [CHECKOUT, DISMISS, WELCOME];
}

/// Environment dependencies for the storefront reducer
#[derive(Clone)]
pub struct StorefrontEnvironment {
    /// Offerings that may be added
    pub catalog: Arc<Catalog>,
    /// Clock stamping notifications
    pub clock: Arc<dyn Clock>,
    /// Delays and notification lifetimes
    pub config: StorefrontConfig,
}

impl StorefrontEnvironment {
    /// Creates a new `StorefrontEnvironment`
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>, config: StorefrontConfig) -> Self {
        Self { catalog, clock, config }
    }
}

impl Default for StorefrontEnvironment {
    fn default() -> Self {
        Self::new(
            Arc::new(Catalog::skyservices()),
            Arc::new(SystemClock),
            StorefrontConfig::default(),
        )
    }
}

impl std::fmt::Debug for StorefrontEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontEnvironment")
            .field("offerings", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

type Effects = SmallVec<[Effect<StorefrontAction>; 4]>;

/// Selection, checkout, notification, and session handling
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Puts `kind` in the notification slot and schedules its dismissal
    ///
    /// The pending dismiss of the previous notification is cancelled first.
    fn notify(state: &mut StorefrontState, kind: NotificationKind, env: &StorefrontEnvironment) -> Effects {
        let seq = state.next_seq;
        state.next_seq += 1;

        let notification = Notification {
            seq,
            kind,
            emitted_at: env.clock.now(),
        };
        let lifetime = notification.lifetime(&env.config);
        tracing::debug!(seq, message = %notification.message(), "Notification emitted");
        state.notification = Some(notification);

        smallvec![
            Effect::Cancel(timers::DISMISS),
            delay! {
                duration: lifetime,
                action: StorefrontAction::DismissNotification { seq },
                cancel_id: timers::DISMISS
            },
        ]
    }

    fn add_service(state: &mut StorefrontState, offering_id: &str, env: &StorefrontEnvironment) -> Effects {
        let Some(offering) = env.catalog.get(offering_id) else {
            tracing::warn!(offering_id, "Ignoring unknown offering");
            return SmallVec::new();
        };

        match state.selection.add(offering) {
            AddOutcome::Added => {
                tracing::debug!(offering_id, "Added offering to selection");
                Self::notify(
                    state,
                    NotificationKind::Added {
                        name: offering.name.clone(),
                    },
                    env,
                )
            },
            AddOutcome::Incremented { quantity } => {
                tracing::debug!(offering_id, quantity, "Incremented selection line");
                SmallVec::new()
            },
        }
    }

    fn remove_service(state: &mut StorefrontState, offering_id: &str, env: &StorefrontEnvironment) -> Effects {
        match state.selection.remove(offering_id) {
            Some(line) => {
                tracing::debug!(offering_id, quantity = line.quantity, "Removed selection line");
                Self::notify(
                    state,
                    NotificationKind::Removed {
                        name: line.offering.name,
                    },
                    env,
                )
            },
            None => {
                tracing::debug!(offering_id, "Nothing to remove");
                SmallVec::new()
            },
        }
    }

    fn initiate_checkout(state: &mut StorefrontState, env: &StorefrontEnvironment) -> Effects {
        if state.checkout.is_processing() {
            tracing::warn!("Checkout already in progress");
            return SmallVec::new();
        }
        if state.selection.is_empty() {
            tracing::warn!("Ignoring checkout of an empty selection");
            return SmallVec::new();
        }

        let totals = state.selection.totals();
        tracing::info!(
            item_count = totals.item_count,
            grand_total = totals.grand_total,
            "Checkout started"
        );
        state.checkout = CheckoutPhase::Processing { totals };

        smallvec![delay! {
            duration: env.config.checkout_delay,
            action: StorefrontAction::CheckoutCompleted,
            cancel_id: timers::CHECKOUT
        }]
    }

    fn complete_checkout(state: &mut StorefrontState, env: &StorefrontEnvironment) -> Effects {
        let CheckoutPhase::Processing { totals } = std::mem::take(&mut state.checkout) else {
            tracing::warn!("Checkout completion without a pending checkout");
            return SmallVec::new();
        };

        tracing::info!(grand_total = totals.grand_total, "Checkout completed");

        let mut effects = Self::notify(
            state,
            NotificationKind::CheckoutComplete {
                grand_total: totals.grand_total,
            },
            env,
        );
        effects.push(delay! {
            duration: env.config.clear_delay,
            action: StorefrontAction::ClearSelection,
            cancel_id: timers::CHECKOUT
        });
        effects
    }

    fn reset(state: &mut StorefrontState) -> Effects {
        let next_seq = state.next_seq;
        *state = StorefrontState {
            next_seq,
            ..StorefrontState::default()
        };
        tracing::info!("Session reset");

        timers::ALL.into_iter().map(Effect::Cancel).collect()
    }
}

impl Reducer for SessionReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== User intents ==========
            StorefrontAction::AddService { offering_id } => Self::add_service(state, &offering_id, env),

            StorefrontAction::RemoveService { offering_id } => Self::remove_service(state, &offering_id, env),

            StorefrontAction::InitiateCheckout => Self::initiate_checkout(state, env),

            StorefrontAction::SessionStarted => {
                tracing::info!("Session started");
                smallvec![
                    Effect::Cancel(timers::WELCOME),
                    delay! {
                        duration: env.config.welcome_delay,
                        action: StorefrontAction::ShowWelcome,
                        cancel_id: timers::WELCOME
                    },
                ]
            },

            StorefrontAction::ResetSession => Self::reset(state),

            // ========== Timers ==========
            StorefrontAction::CheckoutCompleted => Self::complete_checkout(state, env),

            StorefrontAction::ClearSelection => {
                // Clears lines added while processing too
                tracing::debug!(lines = state.selection.len(), "Clearing selection after checkout");
                state.selection.clear();
                SmallVec::new()
            },

            StorefrontAction::ShowWelcome => Self::notify(state, NotificationKind::Welcome, env),

            StorefrontAction::DismissNotification { seq } => {
                if state.notification.as_ref().is_some_and(|n| n.seq == seq) {
                    tracing::debug!(seq, "Notification dismissed");
                    state.notification = None;
                }
                SmallVec::new()
            },

            // Handled by the theme reducer
            StorefrontAction::ToggleTheme => SmallVec::new(),
        }
    }
}

fn theme_of(state: &mut StorefrontState) -> &mut Theme {
    &mut state.theme
}

/// Reducer for a whole storefront session
#[derive(Clone, Debug)]
pub struct StorefrontReducer {
    inner: CombinedReducer<SessionReducer, ScopedReducer<StorefrontState, ThemeReducer>>,
}

impl StorefrontReducer {
    /// Creates a new `StorefrontReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: combine(SessionReducer, scope_reducer(ThemeReducer, theme_of)),
        }
    }
}

impl Default for StorefrontReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for StorefrontReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::Totals;
    use skyservices_testing::{ManualClock, ReducerTest, assertions, mocks, test_clock};
    use std::time::Duration;

    fn test_env() -> StorefrontEnvironment {
        StorefrontEnvironment::new(
            Arc::new(Catalog::skyservices()),
            Arc::new(test_clock()),
            StorefrontConfig::default(),
        )
    }

    fn state_with(ids: &[&str]) -> StorefrontState {
        let env = test_env();
        let mut state = StorefrontState::new();
        for id in ids {
            StorefrontReducer::new().reduce(&mut state, StorefrontAction::add(*id), &env);
        }
        state
    }

    fn is_dismiss(action: &StorefrontAction) -> bool {
        matches!(action, StorefrontAction::DismissNotification { .. })
    }

    #[test]
    fn first_add_notifies_and_schedules_dismiss() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(StorefrontAction::add("2"))
            .then_state(|state| {
                assert_eq!(state.selection.quantity_of("2"), 1);
                let notification = state.notification.as_ref().unwrap_or_else(|| unreachable!());
                assert_eq!(
                    notification.kind,
                    NotificationKind::Added {
                        name: "Extra Baggage".to_string()
                    }
                );
                assert_eq!(notification.emitted_at, test_clock().now());
            })
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &timers::DISMISS);
                assertions::assert_schedules(effects, Duration::from_secs(3), |a| {
                    *a == StorefrontAction::DismissNotification { seq: 0 }
                });
            })
            .run();
    }

    #[test]
    fn repeat_add_increments_silently() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1"]))
            .when_action(StorefrontAction::add("1"))
            .then_state(|state| {
                assert_eq!(state.selection.quantity_of("1"), 2);
                assert_eq!(state.notification.as_ref().map(|n| n.seq), Some(0));
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn unknown_offering_is_ignored() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(StorefrontAction::add("does-not-exist"))
            .then_state(|state| {
                assert!(state.selection.is_empty());
                assert!(state.notification.is_none());
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn remove_notifies_with_line_name() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1", "1"]))
            .when_action(StorefrontAction::remove("1"))
            .then_state(|state| {
                assert!(state.selection.is_empty());
                assert_eq!(
                    state.notification.as_ref().map(|n| n.message()),
                    Some("\"Priority Boarding\" removed from selection".to_string())
                );
            })
            .then_effects(|effects| {
                assertions::assert_schedules(effects, Duration::from_secs(3), is_dismiss);
            })
            .run();
    }

    #[test]
    fn removing_missing_line_is_silent() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(StorefrontAction::remove("1"))
            .then_state(|state| assert!(state.notification.is_none()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn checkout_captures_totals_and_schedules_completion() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1", "2"]))
            .when_action(StorefrontAction::InitiateCheckout)
            .then_state(|state| match state.checkout {
                CheckoutPhase::Processing { totals } => {
                    assert_eq!(totals.item_count, 2);
                    assert!((totals.grand_total - 147.4).abs() < 1e-9);
                },
                CheckoutPhase::Idle => unreachable!("checkout should be processing"),
            })
            .then_effects(|effects| {
                assertions::assert_cancellable_under(effects, &timers::CHECKOUT);
                assertions::assert_schedules(effects, Duration::from_millis(1500), |a| {
                    *a == StorefrontAction::CheckoutCompleted
                });
            })
            .run();
    }

    #[test]
    fn empty_checkout_is_a_noop() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(StorefrontAction::InitiateCheckout)
            .then_state(|state| assert_eq!(*state, StorefrontState::new()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn second_checkout_while_processing_is_a_noop() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1"]))
            .when_action(StorefrontAction::InitiateCheckout)
            .when_action(StorefrontAction::InitiateCheckout)
            .then_state(|state| assert!(state.is_processing()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn completion_uses_captured_total_and_schedules_clear() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1", "2"]))
            .when_action(StorefrontAction::InitiateCheckout)
            .when_action(StorefrontAction::add("9"))
            .when_action(StorefrontAction::CheckoutCompleted)
            .then_state(|state| {
                assert_eq!(state.checkout, CheckoutPhase::Idle);
                assert_eq!(state.selection.len(), 3);
                match state.notification.as_ref().map(|n| &n.kind) {
                    Some(NotificationKind::CheckoutComplete { grand_total }) => {
                        assert!((grand_total - 147.4).abs() < 1e-9);
                    },
                    other => unreachable!("unexpected notification {other:?}"),
                }
            })
            .then_effects(|effects| {
                assertions::assert_schedules(effects, Duration::from_secs(2), |a| {
                    *a == StorefrontAction::ClearSelection
                });
                assertions::assert_schedules(effects, Duration::from_secs(5), is_dismiss);
            })
            .run();
    }

    #[test]
    fn stray_completion_is_ignored() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1"]))
            .when_action(StorefrontAction::CheckoutCompleted)
            .then_state(|state| {
                assert_eq!(state.selection.len(), 1);
                assert_eq!(state.notification.as_ref().map(|n| n.seq), Some(0));
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn clear_wipes_everything_selected() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1", "4", "12"]))
            .when_action(StorefrontAction::ClearSelection)
            .then_state(|state| {
                assert!(state.selection.is_empty());
                assert_eq!(state.totals(), Totals::default());
            })
            .run();
    }

    #[test]
    fn stale_dismiss_keeps_newer_notification() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1", "2"]))
            .when_action(StorefrontAction::DismissNotification { seq: 0 })
            .then_state(|state| assert_eq!(state.notification.as_ref().map(|n| n.seq), Some(1)))
            .run();

        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["1", "2"]))
            .when_action(StorefrontAction::DismissNotification { seq: 1 })
            .then_state(|state| assert!(state.notification.is_none()))
            .run();
    }

    #[test]
    fn session_start_schedules_welcome() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(StorefrontAction::SessionStarted)
            .then_state(|state| assert!(state.notification.is_none()))
            .then_effects(|effects| {
                assertions::assert_schedules(effects, Duration::from_secs(1), |a| {
                    *a == StorefrontAction::ShowWelcome
                });
            })
            .run();

        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(StorefrontState::new())
            .when_action(StorefrontAction::ShowWelcome)
            .then_state(|state| {
                assert_eq!(state.notification.as_ref().map(|n| &n.kind), Some(&NotificationKind::Welcome));
            })
            .then_effects(|effects| assertions::assert_schedules(effects, Duration::from_secs(5), is_dismiss))
            .run();
    }

    #[test]
    fn reset_cancels_timers_and_restores_initial_state() {
        let mut processing = state_with(&["1", "2"]);
        let env = test_env();
        let reducer = StorefrontReducer::new();
        reducer.reduce(&mut processing, StorefrontAction::InitiateCheckout, &env);
        reducer.reduce(&mut processing, StorefrontAction::ToggleTheme, &env);

        ReducerTest::new(reducer)
            .with_env(env)
            .given_state(processing)
            .when_action(StorefrontAction::ResetSession)
            .then_state(|state| {
                assert!(state.selection.is_empty());
                assert_eq!(state.checkout, CheckoutPhase::Idle);
                assert!(state.notification.is_none());
                assert_eq!(state.theme, Theme::Light);
                assert_eq!(state.next_seq, 2);
            })
            .then_effects(|effects| {
                for id in &timers::ALL {
                    assertions::assert_cancels(effects, id);
                }
            })
            .run();
    }

    #[test]
    fn notifications_are_stamped_by_the_clock() {
        let clock = Arc::new(ManualClock::new(mocks::epoch()));
        let env = StorefrontEnvironment::new(
            Arc::new(Catalog::skyservices()),
            Arc::clone(&clock) as Arc<dyn Clock>,
            StorefrontConfig::default(),
        );
        let reducer = StorefrontReducer::new();
        let mut state = StorefrontState::new();

        reducer.reduce(&mut state, StorefrontAction::add("1"), &env);
        let first = state.notification.clone().unwrap_or_else(|| unreachable!());

        clock.advance(chrono::Duration::seconds(2));
        reducer.reduce(&mut state, StorefrontAction::add("2"), &env);
        let second = state.notification.clone().unwrap_or_else(|| unreachable!());

        assert_eq!(second.seq, first.seq + 1);
        assert_eq!(second.emitted_at - first.emitted_at, chrono::Duration::seconds(2));
    }

    #[test]
    fn theme_toggle_leaves_selection_alone() {
        ReducerTest::new(StorefrontReducer::new())
            .with_env(test_env())
            .given_state(state_with(&["5"]))
            .when_action(StorefrontAction::ToggleTheme)
            .then_state(|state| {
                assert_eq!(state.theme, Theme::Dark);
                assert_eq!(state.selection.quantity_of("5"), 1);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }
}
