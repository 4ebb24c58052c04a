//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```
/// use skyservices_core::{async_effect, effect::Effect};
///
/// #[derive(Debug)]
/// enum Action {
///     Loaded(u32),
/// }
///
/// let effect: Effect<Action> = async_effect! {
///     Some(Action::Loaded(42))
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// An optional `cancel_id` wraps the delay in `Effect::Cancellable`.
///
/// # Example
///
/// ```
/// use skyservices_core::{delay, effect::{Effect, EffectId}};
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// enum Action {
///     Expired,
/// }
///
/// let plain: Effect<Action> = delay! {
///     duration: Duration::from_secs(2),
///     action: Action::Expired
/// };
/// assert!(matches!(plain, Effect::Delay { .. }));
///
/// let abortable: Effect<Action> = delay! {
///     duration: Duration::from_secs(2),
///     action: Action::Expired,
///     cancel_id: EffectId::from_static("expiry")
/// };
/// assert!(matches!(abortable, Effect::Cancellable { .. }));
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
    (
        duration: $duration:expr,
        action: $action:expr,
        cancel_id: $id:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($crate::delay! {
                duration: $duration,
                action: $action
            }),
        }
    };
}
