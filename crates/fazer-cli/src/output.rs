//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for scripts, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Steps 1 (`--json`), 2, 3 and 4 are folded into
//! [`EffectiveConfig::resolved_output`](fazer_core::config::EffectiveConfig)
//! by the core config layer; [`resolve_output_mode`] only layers `--format`
//! on top.

use clap::ValueEnum;
use fazer_core::error::{ErrorCode, StoreError};
use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// Whole currency units with thousands separators: `2499` → `$2,499`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (tables, sections, visual framing).
    Pretty,
    /// Plain tab-separated text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    fn from_resolved(raw: &str) -> Self {
        match raw {
            "json" => Self::Json,
            "text" => Self::Text,
            _ => Self::Pretty,
        }
    }
}

/// Layer an explicit `--format` over the config-resolved output string.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, resolved: &str) -> OutputMode {
    format_flag.unwrap_or_else(|| OutputMode::from_resolved(resolved))
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
///
/// The [`render_item`] and [`render_list`] free functions dispatch to the
/// appropriate method based on [`OutputMode`].
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON object.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row, in the column order of [`table_headers`].
    ///
    /// [`table_headers`]: Renderable::table_headers
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode. Default: no header.
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Render a single [`Renderable`] item into `out`.
pub fn render_item_to<R: Renderable>(
    out: &mut dyn Write,
    item: &R,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(out),
        OutputMode::Text => item.render_table(out),
        OutputMode::Json => {
            item.render_json(out)?;
            writeln!(out)
        }
    }
}

/// Render a single [`Renderable`] item to stdout.
pub fn render_item<R: Renderable>(item: &R, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_item_to(&mut out, item, mode)
}

/// Render a list of [`Renderable`] items into `out`.
///
/// - In JSON mode, wraps items in a JSON array.
/// - In text mode, prints the header row once, then one row per item.
pub fn render_list_to<R: Renderable>(
    out: &mut dyn Write,
    items: &[R],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(out)?;
            }
        }
        OutputMode::Text => {
            if !items.is_empty() && !R::table_headers().is_empty() {
                writeln!(out, "{}", R::table_headers().join("\t"))?;
            }
            for item in items {
                item.render_table(out)?;
            }
        }
        OutputMode::Json => {
            write!(out, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(out, ",")?;
                }
                writeln!(out)?;
                let mut buf = Vec::new();
                item.render_json(&mut buf)?;
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                out.write_all(&buf)?;
            }
            writeln!(out, "\n]")?;
        }
    }
    Ok(())
}

/// Render a list of [`Renderable`] items to stdout.
pub fn render_list<R: Renderable>(items: &[R], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_list_to(&mut out, items, mode)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable code such as `E2001`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// A failure to load or merge configuration files.
    pub fn config(err: &anyhow::Error) -> Self {
        let code = ErrorCode::ConfigLoadFailed;
        Self {
            message: format!("{err:#}"),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

impl From<&StoreError> for CliError {
    fn from(err: &StoreError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: err.suggestion().map(str::to_string),
            error_code: Some(err.error_code().code().to_string()),
        }
    }
}

/// Render an error into `out` in the requested format.
pub fn render_error_to(
    out: &mut dyn Write,
    mode: OutputMode,
    error: &CliError,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    render_error_to(&mut out, mode, error)
}
