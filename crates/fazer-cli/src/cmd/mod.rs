//! One module per `fz` subcommand.

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod completions;
pub mod compare;
pub mod config;
pub mod show;

use fazer_core::config::EffectiveConfig;
use fazer_core::error::StoreError;
use fazer_core::session::Storefront;

use crate::output::{CliError, OutputMode, render_error};

/// Open a storefront session for the configured catalog.
///
/// Failures are rendered through the output layer before being returned.
pub fn open_store(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<Storefront> {
    Storefront::from_config(config).map_err(|err| report(output, err))
}

/// Render a store error for the user and convert it into the command's error.
pub fn report(output: OutputMode, err: StoreError) -> anyhow::Error {
    if let Err(render_err) = render_error(output, &CliError::from(&err)) {
        return render_err.context(err.to_string());
    }
    anyhow::Error::new(err)
}
