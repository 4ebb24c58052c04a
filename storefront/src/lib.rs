//! SkyServices storefront core.
//!
//! Business logic of an airline ancillary-services storefront:
//!
//! - A static [`Catalog`] of offerings grouped into presentation sections
//! - A [`Selection`] with one line per offering and derived [`Totals`] (10% tax)
//! - A simulated checkout (`Idle` → `Processing` → `Idle`) driven by timers
//! - Self-dismissing notifications and a light/dark theme switch
//!
//! Everything runs as a reducer inside a [`Store`](skyservices_runtime::Store).
//!
//! # Quick Start
//!
//! ```no_run
//! use skyservices::{StorefrontAction, StorefrontEnvironment, StorefrontReducer, StorefrontState};
//! use skyservices_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(
//!     StorefrontState::new(),
//!     StorefrontReducer::new(),
//!     StorefrontEnvironment::default(),
//! );
//!
//! store.send(StorefrontAction::add("1")).await?;
//! store.send(StorefrontAction::add("2")).await?;
//!
//! let totals = store.state(StorefrontState::totals).await;
//! println!("{totals}");
//!
//! let mut checkout = store.send(StorefrontAction::InitiateCheckout).await?;
//! checkout.wait().await;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod notification;
pub mod reducer;
pub mod selection;
pub mod theme;
pub mod totals;
pub mod types;

pub use catalog::{Catalog, CatalogError, Offering, Section};
pub use config::{ConfigError, StorefrontConfig};
pub use notification::{Level, Notification, NotificationKind};
pub use reducer::{SessionReducer, StorefrontEnvironment, StorefrontReducer, timers};
pub use selection::{AddOutcome, Selection, SelectionLine};
pub use theme::{Theme, ThemeReducer};
pub use totals::{TAX_RATE, Totals, compute_totals, format_amount};
pub use types::{CheckoutPhase, StorefrontAction, StorefrontState};
