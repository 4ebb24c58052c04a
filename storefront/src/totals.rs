//! Derived selection totals.
//!
//! Totals are recomputed from the selection whenever they are needed and are
//! never stored. Arithmetic keeps full `f64` precision; amounts are rounded to
//! cents only when formatted.

use crate::selection::SelectionLine;
use serde::{Deserialize, Serialize};

/// Fixed tax rate applied to every subtotal
pub const TAX_RATE: f64 = 0.10;

/// Item count and monetary totals of a selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of quantities
    pub item_count: u32,
    /// Sum of `price * quantity`
    pub subtotal: f64,
    /// `subtotal * TAX_RATE`
    pub tax: f64,
    /// `subtotal + tax`
    pub grand_total: f64,
}

impl Totals {
    /// Returns true when nothing is selected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

impl std::fmt::Display for Totals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} item(s): subtotal {}, tax {}, total {}",
            self.item_count,
            format_amount(self.subtotal),
            format_amount(self.tax),
            format_amount(self.grand_total)
        )
    }
}

/// Computes the totals of `lines`
#[must_use]
pub fn compute_totals(lines: &[SelectionLine]) -> Totals {
    let item_count = lines.iter().map(|line| line.quantity).fold(0u32, u32::saturating_add);
    let subtotal: f64 = lines.iter().map(SelectionLine::line_total).sum();
    let tax = subtotal * TAX_RATE;

    Totals {
        item_count,
        subtotal,
        tax,
        grand_total: subtotal + tax,
    }
}

/// Formats an amount in dollars, rounded to cents
///
/// ```
/// assert_eq!(skyservices::totals::format_amount(134.0 * 1.1), "$147.40");
/// ```
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}
