//! The offering catalog.
//!
//! A catalog is an ordered, immutable list of offerings with unique ids. It is
//! built once at startup and shared read-only through the environment.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A purchasable ancillary service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    /// Unique, stable identifier
    pub id: String,
    /// Display label
    pub name: String,
    /// Display description
    pub description: String,
    /// Unit price, non-negative and finite
    pub price: f64,
    /// Free-form category used for grouping
    pub category: String,
}

impl Offering {
    /// Creates a new offering
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
        }
    }
}

/// Errors raised while building a catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two offerings share an id
    #[error("duplicate offering id: {0}")]
    DuplicateId(String),

    /// Price is negative, NaN, or infinite
    #[error("offering {id} has invalid price {price}")]
    InvalidPrice {
        /// Offending offering
        id: String,
        /// Rejected price
        price: f64,
    },
}

/// Presentation section an offering is listed under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// The `Premium` category
    Premium,
    /// The `Comfort` category
    Comfort,
    /// Every other category
    Additional,
}

impl Section {
    /// All sections in display order
    pub const ALL: [Self; 3] = [Self::Premium, Self::Comfort, Self::Additional];

    /// Section a category belongs to
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        match category {
            "Premium" => Self::Premium,
            "Comfort" => Self::Comfort,
            _ => Self::Additional,
        }
    }

    /// Heading shown above the section
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Premium => "Premium Services",
            Self::Comfort => "Comfort & Convenience",
            Self::Additional => "Additional Services",
        }
    }
}

/// Ordered collection of offerings with unique ids
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    offerings: Vec<Offering>,
}

impl Catalog {
    /// Builds a catalog, preserving the given order
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateId`] if two offerings share an id
    /// - [`CatalogError::InvalidPrice`] if a price is negative or not finite
    pub fn new(offerings: Vec<Offering>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(offerings.len());

        for offering in &offerings {
            if !offering.price.is_finite() || offering.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: offering.id.clone(),
                    price: offering.price,
                });
            }
            if !seen.insert(offering.id.as_str()) {
                return Err(CatalogError::DuplicateId(offering.id.clone()));
            }
        }

        Ok(Self { offerings })
    }

    /// The built-in SkyServices catalog
    #[must_use]
    pub fn skyservices() -> Self {
        let offerings = vec![
            Offering::new("1", "Priority Boarding", "Be among the first to board with exclusive priority lane access", 45.0, "Premium"),
            Offering::new("2", "Extra Baggage", "Additional 23kg checked baggage allowance for your journey", 89.0, "Comfort"),
            Offering::new("3", "Premium Seat Selection", "Choose premium seats with extra legroom and quick exit", 65.0, "Premium"),
            Offering::new("4", "SkyLounge Access", "Relax in our premium airport lounge with gourmet dining", 125.0, "Premium"),
            Offering::new("5", "Travel Insurance Plus", "Comprehensive travel coverage including flight delays and medical", 39.0, "Comfort"),
            Offering::new("6", "High-Speed Wi-Fi", "Unlimited high-speed internet for the entire flight duration", 29.0, "Comfort"),
            Offering::new("7", "In-Flight Dining Upgrade", "Gourmet meal selection with premium beverages", 55.0, "Premium"),
            Offering::new("8", "Fast Track Security", "Expedited security screening at select airports", 35.0, "Time-Saving"),
            Offering::new("9", "Chauffeur Service", "Luxury airport transfer to and from your destination", 199.0, "Premium"),
            Offering::new("10", "Flexible Ticket", "Change your flight date without change fees", 75.0, "Comfort"),
            Offering::new("11", "Extra Comfort Kit", "Premium amenity kit with luxury skincare products", 25.0, "Comfort"),
            Offering::new("12", "Pet Travel Service", "Specialized pet travel accommodation and care", 150.0, "Special"),
        ];
        Self { offerings }
    }

    /// Looks up an offering by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.id == id)
    }

    /// All offerings in catalog order
    #[must_use]
    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    /// Number of offerings
    #[must_use]
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Returns true if the catalog has no offerings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Offerings listed under `section`, in catalog order
    pub fn section(&self, section: Section) -> impl Iterator<Item = &Offering> {
        self.offerings
            .iter()
            .filter(move |o| Section::for_category(&o.category) == section)
    }

    /// Non-empty sections with their offerings, in display order
    #[must_use]
    pub fn sections(&self) -> Vec<(Section, Vec<&Offering>)> {
        Section::ALL
            .into_iter()
            .map(|section| (section, self.section(section).collect::<Vec<_>>()))
            .filter(|(_, offerings)| !offerings.is_empty())
            .collect()
    }

    /// Distinct categories in order of first appearance
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for offering in &self.offerings {
            if !categories.contains(&offering.category.as_str()) {
                categories.push(&offering.category);
            }
        }
        categories
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::skyservices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::skyservices();
        let rebuilt = Catalog::new(builtin.offerings().to_vec());

        assert_eq!(rebuilt, Ok(builtin.clone()));
        assert_eq!(builtin.len(), 12);
        assert_eq!(builtin.get("1").map(|o| o.price), Some(45.0));
        assert_eq!(builtin.get("2").map(|o| o.name.as_str()), Some("Extra Baggage"));
        assert!(builtin.get("13").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Offering::new("a", "One", "", 1.0, "Premium"),
            Offering::new("a", "Two", "", 2.0, "Comfort"),
        ]);

        assert_eq!(result, Err(CatalogError::DuplicateId("a".to_string())));
    }

    #[test]
    fn rejects_invalid_prices() {
        for price in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Catalog::new(vec![Offering::new("a", "One", "", price, "Premium")]);
            assert!(matches!(result, Err(CatalogError::InvalidPrice { ref id, .. }) if id == "a"));
        }
    }

    #[test]
    fn free_offerings_are_allowed() {
        let catalog = Catalog::new(vec![Offering::new("free", "Free", "", 0.0, "Special")]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn sections_group_by_category() {
        let catalog = Catalog::skyservices();
        let ids = |section| catalog.section(section).map(|o| o.id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids(Section::Premium), ["1", "3", "4", "7", "9"]);
        assert_eq!(ids(Section::Comfort), ["2", "5", "6", "10", "11"]);
        assert_eq!(ids(Section::Additional), ["8", "12"]);

        let titles: Vec<_> = catalog.sections().iter().map(|(s, _)| s.title()).collect();
        assert_eq!(titles, ["Premium Services", "Comfort & Convenience", "Additional Services"]);
    }

    #[test]
    fn empty_sections_are_skipped() {
        let catalog = Catalog::new(vec![Offering::new("x", "X", "", 5.0, "Comfort")]).unwrap_or_else(|_| unreachable!());
        let sections = catalog.sections();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, Section::Comfort);
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(
            Catalog::skyservices().categories(),
            ["Premium", "Comfort", "Time-Saving", "Special"]
        );
    }
}
