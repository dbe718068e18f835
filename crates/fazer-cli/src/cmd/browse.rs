//! `fz browse`: the interactive storefront (the default command).

use anyhow::Result;
use clap::Args;
use fazer_core::config::{EffectiveConfig, LayoutMode};
use fazer_core::error::StoreError;
use fazer_core::model::ProductId;
use fazer_core::router::Page;
use fazer_core::session::{Action, Outcome, Storefront};
use tracing::{info, warn};

use crate::output::OutputMode;
use crate::tui;

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// `web` for top navigation, `mobile` for the narrow layout with a bottom bar.
    #[arg(long)]
    pub layout: Option<LayoutMode>,

    /// Page to open first (`home`, `shop`, `cart`, ...).
    #[arg(long, conflicts_with = "product")]
    pub page: Option<Page>,

    /// Open this product's detail page first.
    #[arg(long, value_name = "ID")]
    pub product: Option<String>,
}

/// Apply the starting page or product to a fresh session.
///
/// # Errors
///
/// Returns a store error if `--product` names an unknown id.
pub fn apply_start(store: &mut Storefront, args: &BrowseArgs) -> Result<(), StoreError> {
    if let Some(id) = &args.product {
        store.apply(Action::OpenProduct(ProductId::new(id.trim())))?;
    } else if let Some(page) = args.page
        && store.apply(Action::Navigate(page))? == Outcome::NavigationRefused
    {
        warn!(%page, "start page needs a selected product; staying on home");
    }
    Ok(())
}

/// Execute `fz browse`.
///
/// # Errors
///
/// Returns an error if the catalog fails to load, the start product is
/// unknown, or the terminal cannot be driven.
pub fn run_browse(args: &BrowseArgs, config: &EffectiveConfig) -> Result<()> {
    let output = OutputMode::Pretty;
    let mut store = super::open_store(config, output)?;
    apply_start(&mut store, args).map_err(|err| super::report(output, err))?;

    let layout = config.user.layout;
    info!(%layout, page = %store.current_page(), "opening storefront");
    tui::run_storefront(store, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fazer_core::catalog::Catalog;

    #[test]
    fn start_product_opens_detail() {
        let mut store = Storefront::new(Catalog::seed());
        let args = BrowseArgs {
            product: Some("4".into()),
            ..BrowseArgs::default()
        };
        apply_start(&mut store, &args).unwrap();
        assert_eq!(store.current_page(), Page::Product);
        assert_eq!(store.selected_product().map(|p| p.id.as_str()), Some("4"));
    }

    #[test]
    fn start_on_product_page_without_id_stays_home() {
        let mut store = Storefront::new(Catalog::seed());
        let args = BrowseArgs {
            page: Some(Page::Product),
            ..BrowseArgs::default()
        };
        apply_start(&mut store, &args).unwrap();
        assert_eq!(store.current_page(), Page::Home);
    }

    #[test]
    fn unknown_start_product_fails() {
        let mut store = Storefront::new(Catalog::seed());
        let args = BrowseArgs {
            product: Some("nope".into()),
            ..BrowseArgs::default()
        };
        assert!(apply_start(&mut store, &args).is_err());
    }
}
