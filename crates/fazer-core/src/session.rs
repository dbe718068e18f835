//! The storefront session: one explicitly-owned container for the catalog,
//! the selection state, the router and the query cache.
//!
//! Every user gesture is expressed as an [`Action`] and applied through
//! [`Storefront::apply`]. Renderers only ever receive `&Storefront`.

use std::cell::RefCell;

use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogProvider};
use crate::config::EffectiveConfig;
use crate::error::StoreError;
use crate::model::{CategoryFilter, Product, ProductId, SortOption};
use crate::query::{QueryCache, QueryKey};
use crate::router::{Page, Router};
use crate::state::{CartPolicy, CompareToggle, QuantityChange, SelectionState};

/// A user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart(ProductId),
    AddUnits(ProductId, u32),
    IncrementQuantity(ProductId),
    DecrementQuantity(ProductId),
    RemoveFromCart(ProductId),
    ToggleWishlist(ProductId),
    ToggleCompare(ProductId),
    SetCategory(CategoryFilter),
    SetSearch(String),
    SetSort(SortOption),
    ResetFilters,
    Navigate(Page),
    OpenProduct(ProductId),
}

/// What an applied action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed as requested.
    Applied,
    /// Nothing to do (for example, removing a line that is not in the cart).
    Unchanged,
    Wishlist { added: bool },
    Compare(CompareToggle),
    Quantity(QuantityChange),
    /// Navigation was refused; the detail page needs a selected product.
    NavigationRefused,
}

#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    selection: SelectionState,
    router: Router,
    cart_policy: CartPolicy,
    query_cache: RefCell<QueryCache>,
}

impl Storefront {
    /// A session over `catalog` with default filters and cart policy.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: SelectionState::new(),
            router: Router::new(),
            cart_policy: CartPolicy::default(),
            query_cache: RefCell::new(QueryCache::new()),
        }
    }

    /// Build a session from a provider and resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] if the provider fails.
    pub fn from_config(config: &EffectiveConfig) -> Result<Self, StoreError> {
        let provider = config.catalog_provider();
        let mut store = Self::load(provider.as_ref())?;
        let shop = &config.project.shop;
        store.selection = SelectionState::with_defaults(shop.default_category, shop.default_sort);
        store.cart_policy = config.project.cart.policy();
        Ok(store)
    }

    /// Build a session from a catalog provider with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Catalog`] if the provider fails.
    pub fn load(provider: &dyn CatalogProvider) -> Result<Self, StoreError> {
        let catalog = provider.load()?;
        info!(
            source = %provider.describe(),
            products = catalog.len(),
            "storefront session started"
        );
        Ok(Self::new(catalog))
    }

    #[must_use]
    pub fn with_cart_policy(mut self, policy: CartPolicy) -> Self {
        self.cart_policy = policy;
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub const fn cart_policy(&self) -> CartPolicy {
        self.cart_policy
    }

    #[must_use]
    pub const fn current_page(&self) -> Page {
        self.router.current()
    }

    /// The product shown by the detail page.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.router
            .selected()
            .and_then(|id| self.catalog.get(id.as_str()))
    }

    /// The selected product, or [`StoreError::NoProductSelected`].
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected or the selection is stale.
    pub fn require_selected(&self) -> Result<&Product, StoreError> {
        let id = self.router.selected().ok_or(StoreError::NoProductSelected)?;
        self.product(id.as_str())
    }

    /// Look up a product, failing with [`StoreError::UnknownProduct`].
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the catalog.
    pub fn product(&self, id: &str) -> Result<&Product, StoreError> {
        self.catalog
            .get(id)
            .ok_or_else(|| StoreError::UnknownProduct(ProductId::new(id)))
    }

    /// Shop results for the current filters.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        let key = QueryKey::from_state(&self.selection);
        self.query_cache.borrow_mut().get(&self.catalog, &key)
    }

    /// Wishlisted products in catalog order.
    #[must_use]
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.catalog
            .products()
            .iter()
            .filter(|p| self.selection.in_wishlist(p.id.as_str()))
            .collect()
    }

    /// Compared products in catalog order.
    #[must_use]
    pub fn compare_products(&self) -> Vec<&Product> {
        self.catalog
            .products()
            .iter()
            .filter(|p| self.selection.in_compare(p.id.as_str()))
            .collect()
    }

    /// Apply one gesture.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownProduct`] when an action that needs a
    /// catalog product names an id the catalog does not contain. Cart edits on
    /// ids that are simply not in the cart are no-ops, not errors.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, StoreError> {
        debug!(?action, page = %self.router.current(), "apply action");
        let outcome = match action {
            Action::AddToCart(id) => {
                let product = self.product(id.as_str())?.clone();
                self.selection.add_to_cart(&product);
                Outcome::Applied
            }
            Action::AddUnits(id, units) => {
                let product = self.product(id.as_str())?.clone();
                if units == 0 {
                    Outcome::Unchanged
                } else {
                    self.selection.add_to_cart_n(&product, units);
                    Outcome::Applied
                }
            }
            Action::IncrementQuantity(id) => match self.selection.increment_quantity(id.as_str()) {
                Some(quantity) => Outcome::Quantity(QuantityChange::Updated(quantity)),
                None => Outcome::Quantity(QuantityChange::Absent),
            },
            Action::DecrementQuantity(id) => Outcome::Quantity(
                self.selection
                    .decrement_quantity(id.as_str(), self.cart_policy),
            ),
            Action::RemoveFromCart(id) => {
                if self.selection.remove_from_cart(id.as_str()) {
                    Outcome::Applied
                } else {
                    Outcome::Unchanged
                }
            }
            Action::ToggleWishlist(id) => {
                self.product(id.as_str())?;
                Outcome::Wishlist {
                    added: self.selection.toggle_wishlist(&id),
                }
            }
            Action::ToggleCompare(id) => {
                self.product(id.as_str())?;
                let toggle = self.selection.toggle_compare(&id);
                if toggle == CompareToggle::Rejected {
                    debug!(%id, "compare set full; addition ignored");
                }
                Outcome::Compare(toggle)
            }
            Action::SetCategory(category) => {
                self.selection.set_active_category(category);
                Outcome::Applied
            }
            Action::SetSearch(query) => {
                self.selection.set_search_query(query);
                Outcome::Applied
            }
            Action::SetSort(sort) => {
                self.selection.set_sort_option(sort);
                Outcome::Applied
            }
            Action::ResetFilters => {
                self.selection.reset_filters();
                Outcome::Applied
            }
            Action::Navigate(page) => {
                if self.router.navigate(page) {
                    Outcome::Applied
                } else {
                    Outcome::NavigationRefused
                }
            }
            Action::OpenProduct(id) => {
                self.product(id.as_str())?;
                self.router.open_product(id);
                Outcome::Applied
            }
        };
        Ok(outcome)
    }
}
