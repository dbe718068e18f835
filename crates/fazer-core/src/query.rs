//! Query pipeline: derive the visible product list from the catalog and the
//! shop filters.
//!
//! [`run_query`] is a pure function of `(catalog, key)`. [`QueryCache`] wraps it
//! with a single-entry memo keyed by the full [`QueryKey`], so repeated redraws
//! with unchanged filters reuse the previous ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::Catalog;
use crate::model::{CategoryFilter, Product, SortOption};
use crate::state::SelectionState;

/// Everything the pipeline depends on besides the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryKey {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortOption,
}

impl QueryKey {
    pub fn new(category: CategoryFilter, search: impl Into<String>, sort: SortOption) -> Self {
        Self {
            category,
            search: search.into(),
            sort,
        }
    }

    /// Snapshot the filter fields of a selection state.
    #[must_use]
    pub fn from_state(state: &SelectionState) -> Self {
        Self::new(
            state.active_category(),
            state.search_query(),
            state.sort_option(),
        )
    }

    /// Returns true if `product` passes the category and text filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.admits(product.category) && product.matches_text(&self.search)
    }
}

fn compare(sort: SortOption, a: &Product, b: &Product) -> Ordering {
    match sort {
        SortOption::PriceAsc => a.price.cmp(&b.price),
        SortOption::PriceDesc => b.price.cmp(&a.price),
        SortOption::RatingDesc => b.rating.total_cmp(&a.rating),
    }
}

/// Catalog indices of the matching products, in display order.
fn query_indices(catalog: &Catalog, key: &QueryKey) -> Vec<usize> {
    let products = catalog.products();
    let mut indices: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| key.matches(p))
        .map(|(i, _)| i)
        .collect();
    // Stable: equal keys keep catalog order.
    indices.sort_by(|&a, &b| compare(key.sort, &products[a], &products[b]));
    indices
}

/// Filter and sort the catalog for `key`.
#[must_use]
pub fn run_query<'a>(catalog: &'a Catalog, key: &QueryKey) -> Vec<&'a Product> {
    let products = catalog.products();
    query_indices(catalog, key)
        .into_iter()
        .map(|i| &products[i])
        .collect()
}

/// Single-entry memo over [`run_query`].
///
/// The cache stores catalog indices, so it must only be used with the catalog
/// it was filled from.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entry: Option<(QueryKey, Vec<usize>)>,
    hits: u64,
    misses: u64,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for `key`, recomputing only when the key changed.
    pub fn get<'a>(&mut self, catalog: &'a Catalog, key: &QueryKey) -> Vec<&'a Product> {
        let products = catalog.products();
        let fresh = match &self.entry {
            Some((cached, _)) if cached == key => {
                self.hits += 1;
                false
            }
            _ => {
                self.misses += 1;
                true
            }
        };
        if fresh {
            trace!(?key, "query cache miss");
            self.entry = Some((key.clone(), query_indices(catalog, key)));
        }
        self.entry
            .as_ref()
            .map(|(_, indices)| indices.iter().map(|&i| &products[i]).collect())
            .unwrap_or_default()
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}
