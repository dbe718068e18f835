//! `fz catalog`: list products through the shop's filter and sort pipeline.

use anyhow::Context;
use clap::{Args, ValueEnum};
use fazer_core::config::EffectiveConfig;
use fazer_core::error::StoreError;
use fazer_core::model::{CategoryFilter, Product, SortOption};
use fazer_core::session::{Action, Storefront};
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{
    OutputMode, Renderable, format_price, pretty_rule, pretty_section, render_list,
    render_list_to,
};

#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    /// Only products in this category (`all`, `audio`, `optics`, ...).
    #[arg(long)]
    pub category: Option<CategoryFilter>,

    /// Case-insensitive text matched against name and short description.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// `rating` (highest first), `price-asc` or `price-desc`.
    #[arg(long)]
    pub sort: Option<SortOption>,

    /// Print the whole active catalog as a loadable file instead of a listing.
    #[arg(long, value_enum, conflicts_with_all = ["category", "search", "sort"])]
    pub export: Option<ExportFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Toml,
    Json,
}

/// One product in the listing.
#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub rating: f64,
    pub review_count: u32,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub description: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            price: p.price,
            category: p.category.to_string(),
            rating: p.rating,
            review_count: p.review_count,
            is_new: p.is_new,
            is_bestseller: p.is_bestseller,
            description: p.description.clone(),
        }
    }
}

impl ProductRow {
    fn badges(&self) -> String {
        let mut badges = Vec::new();
        if self.is_new {
            badges.push("NEW_ITER");
        }
        if self.is_bestseller {
            badges.push("STANDARD_META");
        }
        badges.join(" ")
    }
}

impl Renderable for ProductRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "[{}] {:<22} {:>8}  {:<12} {:.1}★ ({} reports) {}",
            self.id,
            self.name,
            format_price(self.price),
            self.category,
            self.rating,
            self.review_count,
            self.badges()
        )?;
        writeln!(w, "     {}", self.description)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{:.1}",
            self.id, self.name, self.price, self.category, self.rating
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "NAME", "PRICE", "CATEGORY", "RATING"]
    }
}

/// Apply the requested filters on top of the configured shop defaults.
pub fn apply_filters(store: &mut Storefront, args: &CatalogArgs) -> Result<(), StoreError> {
    if let Some(category) = args.category {
        store.apply(Action::SetCategory(category))?;
    }
    if let Some(search) = &args.search {
        store.apply(Action::SetSearch(search.clone()))?;
    }
    if let Some(sort) = args.sort {
        store.apply(Action::SetSort(sort))?;
    }
    Ok(())
}

/// Execute `fz catalog`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn run_catalog(
    args: &CatalogArgs,
    config: &EffectiveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let mut store = super::open_store(config, output)?;

    if let Some(format) = args.export {
        return export(&store, format);
    }

    apply_filters(&mut store, args).map_err(|err| super::report(output, err))?;
    let rows: Vec<ProductRow> = store
        .visible_products()
        .into_iter()
        .map(ProductRow::from)
        .collect();

    if output == OutputMode::Pretty {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let selection = store.selection();
        pretty_section(
            &mut out,
            &format!(
                "The_Armory  category={} sort={} search={:?}",
                selection.active_category(),
                selection.sort_option().label(),
                selection.search_query()
            ),
        )?;
        if rows.is_empty() {
            writeln!(out, "No Registry Data")?;
            writeln!(out, "Try `fz catalog` without filters.")?;
            return Ok(());
        }
        render_list_to(&mut out, &rows, output)?;
        pretty_rule(&mut out)?;
        writeln!(out, "{} module(s)", rows.len())?;
        return Ok(());
    }

    render_list(&rows, output)?;
    Ok(())
}

fn export(store: &Storefront, format: ExportFormat) -> anyhow::Result<()> {
    let file = store.catalog().to_file();
    let text = match format {
        ExportFormat::Toml => toml::to_string_pretty(&file).context("serialize catalog as TOML")?,
        ExportFormat::Json => {
            serde_json::to_string_pretty(&file).context("serialize catalog as JSON")?
        }
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{text}")?;
    Ok(())
}
