//! `fz cart`: run cart edits against a fresh session and print the result.
//!
//! Edits are applied in a fixed order: every `--add`, then `--increment`,
//! then `--decrement`, then `--remove`. Within one flag, ids are applied in
//! the order given.

use clap::Args;
use fazer_core::config::EffectiveConfig;
use fazer_core::error::StoreError;
use fazer_core::model::{CartLine, ProductId};
use fazer_core::session::{Action, Outcome, Storefront};
use fazer_core::state::QuantityChange;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

use crate::output::{OutputMode, format_price, pretty_rule, pretty_section, render_mode};

#[derive(Args, Debug, Default)]
pub struct CartArgs {
    /// Add one unit of a product (repeatable).
    #[arg(long, value_name = "ID")]
    pub add: Vec<String>,

    /// Raise the quantity of a cart line by one (repeatable).
    #[arg(long, value_name = "ID")]
    pub increment: Vec<String>,

    /// Lower the quantity of a cart line by one (repeatable).
    #[arg(long, value_name = "ID")]
    pub decrement: Vec<String>,

    /// Remove a cart line entirely (repeatable).
    #[arg(long, value_name = "ID")]
    pub remove: Vec<String>,

}

impl CartArgs {
    /// Every edit as an action, in application order.
    pub fn actions(&self) -> Vec<Action> {
        fn ids(list: &[String], make: fn(ProductId) -> Action) -> Vec<Action> {
            list.iter().map(|id| make(ProductId::new(id.trim()))).collect()
        }
        let mut actions = ids(&self.add, Action::AddToCart);
        actions.extend(ids(&self.increment, Action::IncrementQuantity));
        actions.extend(ids(&self.decrement, Action::DecrementQuantity));
        actions.extend(ids(&self.remove, Action::RemoveFromCart));
        actions
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.product.name.clone(),
            price: line.product.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartReport {
    pub lines: Vec<CartLineView>,
    pub count: u64,
    pub total: u64,
    /// Edits that did nothing, such as removing a line that is not in the cart.
    pub notes: Vec<String>,
}

fn note_for(action: &Action, outcome: Outcome) -> Option<String> {
    let id = match action {
        Action::IncrementQuantity(id)
        | Action::DecrementQuantity(id)
        | Action::RemoveFromCart(id) => id,
        _ => return None,
    };
    match outcome {
        Outcome::Unchanged | Outcome::Quantity(QuantityChange::Absent) => {
            Some(format!("{id}: not in cart"))
        }
        Outcome::Quantity(QuantityChange::Clamped(q)) => {
            Some(format!("{id}: held at minimum quantity {q}"))
        }
        _ => None,
    }
}

/// Apply the edits and summarize the resulting cart.
///
/// # Errors
///
/// Returns the first [`StoreError`], which
/// only happens for an `--add` of an unknown id.
pub fn build_report(
    store: &mut Storefront,
    args: &CartArgs,
) -> Result<CartReport, StoreError> {
    let mut notes = Vec::new();
    for action in args.actions() {
        let outcome = store.apply(action.clone())?;
        debug!(?action, ?outcome, "cart edit");
        notes.extend(note_for(&action, outcome));
    }
    let selection = store.selection();
    Ok(CartReport {
        lines: selection.cart().iter().map(CartLineView::from).collect(),
        count: selection.cart_count(),
        total: selection.cart_total(),
        notes,
    })
}

fn render_text(report: &CartReport, w: &mut dyn Write) -> io::Result<()> {
    for line in &report.lines {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            line.id, line.name, line.price, line.quantity, line.line_total
        )?;
    }
    writeln!(w, "count\t{}", report.count)?;
    writeln!(w, "total\t{}", report.total)
}

fn render_pretty(report: &CartReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Cargo_Queue")?;
    if report.lines.is_empty() {
        writeln!(w, "Queue Is Depleted")?;
    }
    for line in &report.lines {
        writeln!(
            w,
            "[{}] {:<22} {:>8} x{:<3} {:>10}",
            line.id,
            line.name,
            format_price(line.price),
            line.quantity,
            format_price(line.line_total)
        )?;
    }
    pretty_rule(w)?;
    writeln!(
        w,
        "Aggregate_Market_Value: {} ({} unit(s))",
        format_price(report.total),
        report.count
    )?;
    for note in &report.notes {
        writeln!(w, "note: {note}")?;
    }
    Ok(())
}

/// Execute `fz cart`.
///
/// # Errors
///
/// Returns an error if the catalog fails to load, an added id is unknown, or
/// output fails.
pub fn run_cart(
    args: &CartArgs,
    config: &EffectiveConfig,
    output: OutputMode,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut store = super::open_store(config, output)?;
    let mut report = build_report(&mut store, args).map_err(|err| super::report(output, err))?;
    if quiet {
        report.notes.clear();
    }
    render_mode(output, &report, render_text, render_pretty)
}
