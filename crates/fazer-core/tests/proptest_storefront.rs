use std::collections::HashSet;

use fazer_core::catalog::Catalog;
use fazer_core::query::{QueryCache, QueryKey, run_query};
use fazer_core::router::Page;
use fazer_core::session::{Action, Storefront};
use fazer_core::state::COMPARE_LIMIT;
use proptest::prelude::*;

use generators::*;

fn ids(products: &[&fazer_core::model::Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn cache_agrees_with_uncached_query(
        keys in prop::collection::vec((arb_category(), arb_search(), arb_sort()), 1..12)
    ) {
        let catalog = Catalog::seed();
        let mut cache = QueryCache::new();
        for (category, search, sort) in keys {
            let key = QueryKey::new(category, search, sort);
            prop_assert_eq!(ids(&cache.get(&catalog, &key)), ids(&run_query(&catalog, &key)));
        }
    }

    #[test]
    fn query_results_satisfy_filters_and_order(
        category in arb_category(),
        search in arb_search(),
        sort in arb_sort(),
    ) {
        let catalog = Catalog::seed();
        let key = QueryKey::new(category, search, sort);
        let result = run_query(&catalog, &key);
        for p in &result {
            prop_assert!(category.admits(p.category));
            prop_assert!(p.matches_text(&key.search));
        }
        let expected = catalog.products().iter().filter(|p| key.matches(p)).count();
        prop_assert_eq!(result.len(), expected);
    }

    #[test]
    fn invariants_hold_after_any_action_sequence(
        actions in prop::collection::vec(arb_action(), 0..40)
    ) {
        let mut store = Storefront::new(Catalog::seed());
        for action in actions {
            let _ = store.apply(action);

            let selection = store.selection();
            prop_assert!(selection.compare_count() <= COMPARE_LIMIT);

            let mut seen = HashSet::new();
            for line in selection.cart() {
                prop_assert!(line.quantity >= 1);
                prop_assert!(seen.insert(line.id().to_string()));
                prop_assert!(store.catalog().contains(line.id().as_str()));
            }
            let count: u64 = selection.cart().iter().map(|l| u64::from(l.quantity)).sum();
            let total: u64 = selection.cart().iter().map(|l| l.line_total()).sum();
            prop_assert_eq!(selection.cart_count(), count);
            prop_assert_eq!(selection.cart_total(), total);

            for id in selection.wishlist() {
                prop_assert!(store.catalog().contains(id.as_str()));
            }
            if store.current_page() == Page::Product {
                prop_assert!(store.selected_product().is_some());
            }
        }
    }

    #[test]
    fn double_wishlist_toggle_is_identity(id in arb_id(), seed in prop::collection::vec(arb_id(), 0..5)) {
        let mut store = Storefront::new(Catalog::seed());
        for s in seed {
            let _ = store.apply(Action::ToggleWishlist(s.as_str().into()));
        }
        let before = store.selection().wishlist().clone();
        let _ = store.apply(Action::ToggleWishlist(id.as_str().into()));
        let _ = store.apply(Action::ToggleWishlist(id.as_str().into()));
        prop_assert_eq!(store.selection().wishlist(), &before);
    }
}
