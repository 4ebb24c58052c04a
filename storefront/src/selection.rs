//! The selection ("cart").
//!
//! Holds at most one line per offering id, in first-added order. Adding an
//! offering again bumps its quantity in place; removing deletes the whole line.

use crate::catalog::Offering;
use crate::totals::{Totals, compute_totals};
use serde::{Deserialize, Serialize};

/// An offering in the selection together with how many were added
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionLine {
    /// The selected offering
    #[serde(flatten)]
    pub offering: Offering,
    /// Number of times the offering was added, at least 1
    pub quantity: u32,
}

impl SelectionLine {
    /// Offering id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.offering.id
    }

    /// Offering name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.offering.name
    }

    /// `price * quantity`
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.offering.price * f64::from(self.quantity)
    }
}

/// Result of [`Selection::add`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1
    Added,
    /// An existing line's quantity was bumped
    Incremented {
        /// Quantity after the increment
        quantity: u32,
    },
}

/// Ordered selection lines, unique by offering id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    lines: Vec<SelectionLine>,
}

impl Selection {
    /// Creates an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds one unit of `offering`
    pub fn add(&mut self, offering: &Offering) -> AddOutcome {
        if let Some(line) = self.lines.iter_mut().find(|l| l.offering.id == offering.id) {
            line.quantity = line.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: line.quantity,
            };
        }

        self.lines.push(SelectionLine {
            offering: offering.clone(),
            quantity: 1,
        });
        AddOutcome::Added
    }

    /// Removes the line for `id`, returning it if it existed
    pub fn remove(&mut self, id: &str) -> Option<SelectionLine> {
        let index = self.lines.iter().position(|l| l.offering.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Removes every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in presentation order
    #[must_use]
    pub fn lines(&self) -> &[SelectionLine] {
        &self.lines
    }

    /// Returns true if `id` has a line
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.lines.iter().any(|l| l.offering.id == id)
    }

    /// Quantity selected for `id`, 0 when absent
    #[must_use]
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.offering.id == id)
            .map_or(0, |l| l.quantity)
    }

    /// Number of distinct lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Current totals
    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.lines)
    }
}
