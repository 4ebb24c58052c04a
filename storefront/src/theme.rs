//! Light/dark theme switch.

use crate::reducer::StorefrontEnvironment;
use crate::types::StorefrontAction;
use serde::{Deserialize, Serialize};
use skyservices_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Presentation theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light tokens
    #[default]
    Light,
    /// Dark tokens
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Reducer owning the theme field of the storefront state
///
/// Only reacts to `ToggleTheme`; every other action leaves the theme alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThemeReducer;

impl Reducer for ThemeReducer {
    type State = Theme;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        theme: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if matches!(action, StorefrontAction::ToggleTheme) {
            *theme = theme.toggle();
            tracing::debug!(theme = ?*theme, "Theme toggled");
        }
        SmallVec::new()
    }
}
