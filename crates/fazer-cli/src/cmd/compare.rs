//! `fz compare`: side-by-side telemetry for up to three products.

use clap::Args;
use fazer_core::config::EffectiveConfig;
use fazer_core::error::StoreError;
use fazer_core::model::ProductId;
use fazer_core::session::{Action, Outcome, Storefront};
use fazer_core::state::{COMPARE_LIMIT, CompareToggle};
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{OutputMode, format_price, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Product ids to toggle into the compare set, in order. Naming an id
    /// twice toggles it back out.
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareColumn {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub rating: f64,
    pub review_count: u32,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub products: Vec<CompareColumn>,
    /// Ids that could not be added because the set was full.
    pub rejected: Vec<String>,
    pub limit: usize,
}

/// Toggle every id and collect the resulting compare set.
///
/// # Errors
///
/// Returns [`StoreError::UnknownProduct`] for an id outside the catalog.
pub fn build_report(store: &mut Storefront, ids: &[String]) -> Result<CompareReport, StoreError> {
    let mut rejected = Vec::new();
    for id in ids {
        let id = ProductId::new(id.trim());
        if store.apply(Action::ToggleCompare(id.clone()))? == Outcome::Compare(CompareToggle::Rejected)
        {
            rejected.push(id.to_string());
        }
    }
    let products = store
        .compare_products()
        .into_iter()
        .map(|p| CompareColumn {
            id: p.id.to_string(),
            name: p.name.clone(),
            price: p.price,
            category: p.category.to_string(),
            rating: p.rating,
            review_count: p.review_count,
            description: p.description.clone(),
        })
        .collect();
    Ok(CompareReport {
        products,
        rejected,
        limit: COMPARE_LIMIT,
    })
}

fn render_text(report: &CompareReport, w: &mut dyn Write) -> io::Result<()> {
    for p in &report.products {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{:.1}",
            p.id, p.name, p.price, p.category, p.rating
        )?;
    }
    for id in &report.rejected {
        writeln!(w, "rejected\t{id}")?;
    }
    Ok(())
}

fn render_pretty(report: &CompareReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Telemetry_Compare")?;
    if report.products.is_empty() {
        writeln!(w, "No Modules Assigned for Telemetry")?;
    }
    for p in &report.products {
        writeln!(w, "{} [{}]", p.name, p.id)?;
        pretty_kv(w, "Valuation", format_price(p.price))?;
        pretty_kv(w, "Layer_Class", &p.category)?;
        pretty_kv(w, "Metrics", format!("{:.1} / 5.0 ({} reports)", p.rating, p.review_count))?;
        pretty_kv(w, "Brief", &p.description)?;
        writeln!(w)?;
    }
    for id in &report.rejected {
        writeln!(w, "note: {id} not added; compare holds at most {} modules", report.limit)?;
    }
    Ok(())
}

/// Execute `fz compare <ids...>`.
///
/// # Errors
///
/// Returns an error if the catalog fails to load, an id is unknown, or output
/// fails.
pub fn run_compare(
    args: &CompareArgs,
    config: &EffectiveConfig,
    output: OutputMode,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut store = super::open_store(config, output)?;
    let mut report = build_report(&mut store, &args.ids).map_err(|err| super::report(output, err))?;
    if quiet && !output.is_json() {
        report.rejected.clear();
    }
    render_mode(output, &report, render_text, render_pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fazer_core::catalog::Catalog;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn fourth_product_is_rejected() {
        let mut store = Storefront::new(Catalog::seed());
        let report = build_report(&mut store, &ids(&["1", "2", "3", "4"])).unwrap();
        let got: Vec<&str> = report.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, ["1", "2", "3"]);
        assert_eq!(report.rejected, ["4"]);
    }

    #[test]
    fn repeated_id_toggles_out() {
        let mut store = Storefront::new(Catalog::seed());
        let report = build_report(&mut store, &ids(&["4", "1", "4"])).unwrap();
        let got: Vec<&str> = report.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, ["1"]);
    }

    #[test]
    fn columns_follow_catalog_order() {
        let mut store = Storefront::new(Catalog::seed());
        let report = build_report(&mut store, &ids(&["5", "2"])).unwrap();
        let got: Vec<&str> = report.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, ["2", "5"]);
    }

    #[test]
    fn unknown_id_fails() {
        let mut store = Storefront::new(Catalog::seed());
        assert!(build_report(&mut store, &ids(&["1", "x"])).is_err());
    }
}
