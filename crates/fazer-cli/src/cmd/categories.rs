//! `fz categories`: the shop's category chips with product counts.

use fazer_core::config::EffectiveConfig;
use fazer_core::model::SortOption;
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    pub products: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryReport {
    pub categories: Vec<CategoryEntry>,
    pub sort_options: Vec<&'static str>,
}

fn render_text(report: &CategoryReport, w: &mut dyn Write) -> io::Result<()> {
    for entry in &report.categories {
        writeln!(w, "{}\t{}", entry.name, entry.products)?;
    }
    Ok(())
}

fn render_pretty(report: &CategoryReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Categories")?;
    for entry in &report.categories {
        writeln!(w, "{:<14} {:>3} module(s)", entry.name, entry.products)?;
    }
    writeln!(w)?;
    writeln!(w, "Protocol_Order: {}", report.sort_options.join(" | "))
}

/// Execute `fz categories`.
///
/// # Errors
///
/// Returns an error if the catalog fails to load or output fails.
pub fn run_categories(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(config, output)?;
    let catalog = store.catalog();
    let categories = catalog
        .categories()
        .iter()
        .map(|filter| CategoryEntry {
            name: filter.to_string(),
            products: catalog
                .products()
                .iter()
                .filter(|p| filter.admits(p.category))
                .count(),
        })
        .collect();
    let report = CategoryReport {
        categories,
        sort_options: SortOption::ALL.iter().map(|s| s.as_str()).collect(),
    };
    render_mode(output, &report, render_text, render_pretty)
}
