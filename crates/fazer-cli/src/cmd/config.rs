use anyhow::Result;
use fazer_core::config::EffectiveConfig;
use std::io::Write;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

fn render_text(config: &EffectiveConfig, w: &mut dyn Write) -> std::io::Result<()> {
    let catalog = config
        .catalog_path
        .as_ref()
        .map_or_else(|| "seed".to_string(), |p| p.display().to_string());
    writeln!(w, "catalog.path\t{catalog}")?;
    writeln!(w, "shop.default_sort\t{}", config.project.shop.default_sort)?;
    writeln!(w, "shop.default_category\t{}", config.project.shop.default_category)?;
    writeln!(w, "cart.min_quantity\t{}", config.project.cart.min_quantity)?;
    writeln!(w, "cart.remove_below_floor\t{}", config.project.cart.remove_below_floor)?;
    writeln!(w, "user.layout\t{}", config.user.layout)?;
    writeln!(w, "output\t{}", config.resolved_output)
}

fn render_pretty(config: &EffectiveConfig, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Effective configuration")?;
    let catalog = config
        .catalog_path
        .as_ref()
        .map_or_else(|| "built-in seed".to_string(), |p| p.display().to_string());
    pretty_kv(w, "Catalog", catalog)?;
    pretty_kv(w, "Sort", config.project.shop.default_sort.label())?;
    pretty_kv(w, "Category", config.project.shop.default_category.as_str())?;
    pretty_kv(
        w,
        "Cart floor",
        format!(
            "{} ({})",
            config.project.cart.min_quantity,
            if config.project.cart.remove_below_floor {
                "remove below"
            } else {
                "clamp"
            }
        ),
    )?;
    pretty_kv(w, "Layout", config.user.layout.as_str())?;
    pretty_kv(w, "Output", &config.resolved_output)
}

/// Execute `fz config`.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_config(config: &EffectiveConfig, output: OutputMode) -> Result<()> {
    render_mode(output, config, render_text, render_pretty)
}
