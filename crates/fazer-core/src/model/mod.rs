//! Storefront data model: products, reviews, cart lines, and the closed option
//! enumerations used by filters, sorting and the detail view.

pub mod options;
pub mod product;

pub use options::{Category, CategoryFilter, DetailTab, ParseEnumError, SortOption};
pub use product::{CartLine, Product, ProductId, ProductSpec, Review};
