//! `fz show`: display full details of a single product.

use chrono::NaiveDate;
use clap::Args;
use fazer_core::config::EffectiveConfig;
use fazer_core::model::Product;
use fazer_core::session::Storefront;
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{OutputMode, format_price, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Related modules listed under a product.
pub const RELATED_LIMIT: usize = 4;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Product id, as listed by `fz catalog`.
    pub id: String,
}

/// Full product detail as returned in JSON output.
#[derive(Debug, Serialize)]
pub struct ShowProduct {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub rating: f64,
    pub review_count: u32,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub description: String,
    pub long_description: String,
    pub specs: Vec<ShowSpec>,
    pub reviews: Vec<ShowReview>,
    /// Average of the listed review ratings; absent when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_average: Option<f64>,
    pub related: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ShowSpec {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ShowReview {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

impl ShowProduct {
    pub fn build(store: &Storefront, product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.to_string(),
            rating: product.rating,
            review_count: product.review_count,
            is_new: product.is_new,
            is_bestseller: product.is_bestseller,
            description: product.description.clone(),
            long_description: product.long_description.clone(),
            specs: product
                .specs
                .iter()
                .map(|s| ShowSpec {
                    label: s.label.clone(),
                    value: s.value.clone(),
                })
                .collect(),
            reviews: product
                .reviews
                .iter()
                .map(|r| ShowReview {
                    user_name: r.user_name.clone(),
                    rating: r.rating,
                    comment: r.comment.clone(),
                    date: r.date,
                })
                .collect(),
            review_average: product.review_average(),
            related: store
                .catalog()
                .related(product.id.as_str(), RELATED_LIMIT)
                .iter()
                .map(|p| p.id.to_string())
                .collect(),
        }
    }
}

fn render_text(item: &ShowProduct, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\t{}", item.id)?;
    writeln!(w, "name\t{}", item.name)?;
    writeln!(w, "price\t{}", item.price)?;
    writeln!(w, "category\t{}", item.category)?;
    writeln!(w, "rating\t{:.1}", item.rating)?;
    for spec in &item.specs {
        writeln!(w, "spec\t{}\t{}", spec.label, spec.value)?;
    }
    writeln!(w, "related\t{}", item.related.join(","))
}

fn render_pretty(item: &ShowProduct, w: &mut dyn Write) -> io::Result<()> {
    let mut badges = vec![item.category.to_uppercase()];
    if item.is_bestseller {
        badges.push("STANDARD_META".to_string());
    }
    if item.is_new {
        badges.push("NEW_ITER".to_string());
    }
    writeln!(w, "{}", badges.join(" // "))?;
    pretty_section(w, &item.name)?;
    pretty_kv(w, "Price", format_price(item.price))?;
    pretty_kv(
        w,
        "Rating",
        format!("{:.1} ({} field reports)", item.rating, item.review_count),
    )?;
    writeln!(w)?;
    writeln!(w, "{}", item.long_description)?;
    writeln!(w)?;

    pretty_section(w, "Specs")?;
    for spec in &item.specs {
        pretty_kv(w, &spec.label, &spec.value)?;
    }
    writeln!(w)?;

    match item.review_average {
        Some(avg) => pretty_section(w, &format!("Reviews  Telemetry_Average {avg:.1}"))?,
        None => pretty_section(w, "Reviews")?,
    }
    for review in &item.reviews {
        writeln!(
            w,
            "{} {}  {}",
            "★".repeat(usize::from(review.rating)),
            review.user_name,
            review.date.format("%Y-%m-%d")
        )?;
        writeln!(w, "  {}", review.comment)?;
    }
    writeln!(w)?;
    pretty_rule(w)?;
    writeln!(w, "Compatible_Loadout_Modules: {}", item.related.join(", "))
}

/// Execute `fz show <id>`.
///
/// # Errors
///
/// Returns an error if the catalog fails to load, the id is unknown, or
/// output rendering fails.
pub fn run_show(args: &ShowArgs, config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<()> {
    let store = super::open_store(config, output)?;
    let product = store
        .product(args.id.trim())
        .map_err(|err| super::report(output, err))?;
    let item = ShowProduct::build(&store, product);
    render_mode(output, &item, render_text, render_pretty)
}
