//! Per-session selection state: cart, wishlist, compare set and shop filters.
//!
//! All mutators are synchronous and infallible. Policy rejections (a fourth
//! compare entry, removing an absent line) leave the state untouched and are
//! reported through typed outcomes instead of errors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{CartLine, CategoryFilter, Product, ProductId, SortOption};

/// Maximum number of products in the compare set.
pub const COMPARE_LIMIT: usize = 3;

/// Floor and removal behaviour for cart decrements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPolicy {
    /// Lowest quantity a decrement may leave on a line. Values below 1 act as 1.
    /// Lines already at or under the floor are never raised to it.
    pub min_quantity: u32,
    /// Remove the line instead of clamping when a decrement would cross the floor.
    pub remove_below_floor: bool,
}

impl Default for CartPolicy {
    fn default() -> Self {
        Self {
            min_quantity: 1,
            remove_below_floor: true,
        }
    }
}

impl CartPolicy {
    fn floor(self) -> u32 {
        self.min_quantity.max(1)
    }
}

/// Result of a quantity decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this quantity.
    Updated(u32),
    /// The decrement would have crossed the floor; the line stays at this quantity.
    Clamped(u32),
    /// The line was removed from the cart.
    Removed,
    /// No line with that id exists.
    Absent,
}

/// Result of toggling compare membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareToggle {
    Added,
    Removed,
    /// The set was already full; nothing changed.
    Rejected,
}

/// Mutable selection state owned by a storefront session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    cart: Vec<CartLine>,
    wishlist: BTreeSet<ProductId>,
    compare: Vec<ProductId>,
    active_category: CategoryFilter,
    search_query: String,
    sort_option: SortOption,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given shop defaults.
    #[must_use]
    pub fn with_defaults(category: CategoryFilter, sort: SortOption) -> Self {
        Self {
            active_category: category,
            sort_option: sort,
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Cart
    // -----------------------------------------------------------------------

    /// Add one unit of `product`, merging into an existing line.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.add_to_cart_n(product, 1);
    }

    /// Add `units` of `product`, merging into an existing line. Zero is a no-op.
    pub fn add_to_cart_n(&mut self, product: &Product, units: u32) {
        if units == 0 {
            return;
        }
        if let Some(line) = self.line_mut(product.id.as_str()) {
            line.quantity = line.quantity.saturating_add(units);
        } else {
            self.cart.push(CartLine {
                product: product.clone(),
                quantity: units,
            });
        }
    }

    /// Add one unit to an existing line. Returns the new quantity.
    pub fn increment_quantity(&mut self, id: &str) -> Option<u32> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_add(1);
        Some(line.quantity)
    }

    /// Remove one unit from an existing line, honouring `policy`.
    pub fn decrement_quantity(&mut self, id: &str, policy: CartPolicy) -> QuantityChange {
        let Some(index) = self.cart.iter().position(|l| l.id().as_str() == id) else {
            return QuantityChange::Absent;
        };
        let floor = policy.floor();
        let line = &mut self.cart[index];
        if line.quantity > floor {
            line.quantity -= 1;
            return QuantityChange::Updated(line.quantity);
        }
        if policy.remove_below_floor {
            self.cart.remove(index);
            QuantityChange::Removed
        } else {
            QuantityChange::Clamped(line.quantity)
        }
    }

    /// Delete the line for `id`. Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, id: &str) -> bool {
        let before = self.cart.len();
        self.cart.retain(|l| l.id().as_str() != id);
        self.cart.len() != before
    }

    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    #[must_use]
    pub fn cart_line(&self, id: &str) -> Option<&CartLine> {
        self.cart.iter().find(|l| l.id().as_str() == id)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price times quantity across all lines, saturating at `u64::MAX`.
    #[must_use]
    pub fn cart_total(&self) -> u64 {
        self.cart
            .iter()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.cart.iter_mut().find(|l| l.id().as_str() == id)
    }

    // -----------------------------------------------------------------------
    // Wishlist and compare
    // -----------------------------------------------------------------------

    /// Flip wishlist membership. Returns true if `id` is now wishlisted.
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> bool {
        if self.wishlist.remove(id.as_str()) {
            false
        } else {
            self.wishlist.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn in_wishlist(&self, id: &str) -> bool {
        self.wishlist.contains(id)
    }

    #[must_use]
    pub fn wishlist(&self) -> &BTreeSet<ProductId> {
        &self.wishlist
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    /// Flip compare membership, refusing additions once [`COMPARE_LIMIT`] is reached.
    pub fn toggle_compare(&mut self, id: &ProductId) -> CompareToggle {
        if let Some(index) = self.compare.iter().position(|c| c == id) {
            self.compare.remove(index);
            return CompareToggle::Removed;
        }
        if self.compare.len() >= COMPARE_LIMIT {
            return CompareToggle::Rejected;
        }
        self.compare.push(id.clone());
        CompareToggle::Added
    }

    #[must_use]
    pub fn in_compare(&self, id: &str) -> bool {
        self.compare.iter().any(|c| c.as_str() == id)
    }

    /// Compare set in insertion order.
    #[must_use]
    pub fn compare(&self) -> &[ProductId] {
        &self.compare
    }

    #[must_use]
    pub fn compare_count(&self) -> usize {
        self.compare.len()
    }

    // -----------------------------------------------------------------------
    // Shop filters
    // -----------------------------------------------------------------------

    pub fn set_active_category(&mut self, category: CategoryFilter) {
        self.active_category = category;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.sort_option = sort;
    }

    /// Back to every category and no search text. Sort is kept.
    pub fn reset_filters(&mut self) {
        self.active_category = CategoryFilter::All;
        self.search_query.clear();
    }

    #[must_use]
    pub const fn active_category(&self) -> CategoryFilter {
        self.active_category
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        self.sort_option
    }
}
