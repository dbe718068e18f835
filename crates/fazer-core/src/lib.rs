//! fazer-core library.
//!
//! In-memory storefront engine: a static catalog, the per-session selection
//! state (cart, wishlist, compare set, filters), the query pipeline that
//! derives the visible product list, and the page router.
//!
//! # Conventions
//!
//! - **Errors**: library errors are `thiserror` enums ([`error::StoreError`],
//!   [`catalog::CatalogError`]); config loading returns `anyhow::Result`.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **Ownership**: all mutable state lives in one [`session::Storefront`]
//!   that callers own and pass by reference.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod router;
pub mod session;
pub mod state;

pub use catalog::{Catalog, CatalogProvider};
pub use session::{Action, Outcome, Storefront};
