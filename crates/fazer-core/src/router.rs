//! Page router: which view is showing and which product the detail page
//! renders.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::model::{ParseEnumError, ProductId};

/// Every page the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Shop,
    Product,
    Cart,
    Wishlist,
    Compare,
    Checkout,
    Profile,
}

impl Page {
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::Shop,
        Self::Product,
        Self::Cart,
        Self::Wishlist,
        Self::Compare,
        Self::Checkout,
        Self::Profile,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Shop => "shop",
            Self::Product => "product",
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::Compare => "compare",
            Self::Checkout => "checkout",
            Self::Profile => "profile",
        }
    }

    /// Heading used by the layout shell.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Shop => "The_Armory",
            Self::Product => "Module_Detail",
            Self::Cart => "Cargo_Queue",
            Self::Wishlist => "Saved_Transmissions",
            Self::Compare => "Telemetry_Compare",
            Self::Checkout => "Secure_Deploy",
            Self::Profile => "Operator_Profile",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "page",
                got: s.to_string(),
            })
    }
}

/// Current page plus the product selected for the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    current: Page,
    selected: Option<ProductId>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Page {
        self.current
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&ProductId> {
        self.selected.as_ref()
    }

    /// Move to `page`.
    ///
    /// The detail page needs a selected product; without one the router stays
    /// put and returns false. The selection itself is never cleared here.
    pub fn navigate(&mut self, page: Page) -> bool {
        if page == Page::Product && self.selected.is_none() {
            return false;
        }
        self.current = page;
        true
    }

    /// Select `id` and show the detail page in one step.
    ///
    /// Callers are responsible for checking that `id` exists in the catalog.
    pub fn open_product(&mut self, id: ProductId) {
        self.selected = Some(id);
        self.current = Page::Product;
    }
}
