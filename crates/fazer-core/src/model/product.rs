use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

use super::options::Category;

/// Stable product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One labelled row of a product's technical sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub label: String,
    pub value: String,
}

impl ProductSpec {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_name: String,
    /// Whole stars, 0 through 5.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Whole currency units.
    pub price: u64,
    pub category: Category,
    pub image: String,
    pub description: String,
    pub long_description: String,
    /// Average rating, 0.0 through 5.0.
    pub rating: f64,
    pub review_count: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub specs: Vec<ProductSpec>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Case-insensitive substring match against name and short description.
    ///
    /// An empty needle matches every product.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// Mean of the attached review ratings, or `None` without reviews.
    #[must_use]
    pub fn review_average(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        let count = u32::try_from(self.reviews.len()).unwrap_or(u32::MAX);
        Some(f64::from(sum) / f64::from(count))
    }

    /// Number of filled rating pips out of five.
    #[must_use]
    pub fn filled_pips(&self) -> usize {
        // Ratings are validated to 0..=5 at catalog load.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pips = self.rating.clamp(0.0, 5.0).floor() as usize;
        pips
    }
}

/// A product in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}
