#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use fazer_core::config::{ConfigOverrides, EffectiveConfig, LayoutMode, resolve_config};
use output::OutputMode;
use std::env;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fazer: terminal storefront for the Fazer hardware catalog",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for one-shot commands.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Load products from a TOML or JSON catalog instead of the built-in seed.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Read project settings from this file instead of `.fazer/config.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Whether this run takes over the terminal with the storefront.
    const fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Browse(_)))
    }

    fn overrides(&self, layout: Option<LayoutMode>) -> ConfigOverrides<'_> {
        ConfigOverrides {
            config_file: self.config.as_deref(),
            catalog: self.catalog.as_deref(),
            json: self.json,
            layout,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Browse",
        about = "Open the interactive storefront",
        long_about = "Open the full-screen terminal storefront. This is the default when no command is given.",
        after_help = "EXAMPLES:\n    # Start on the home page\n    fz\n\n    # Jump straight into a product in the narrow layout\n    fz browse --product 4 --layout mobile"
    )]
    Browse(cmd::browse::BrowseArgs),

    #[command(
        next_help_heading = "Read",
        about = "List catalog products",
        long_about = "List products after category, search and sort filters, exactly as the shop view shows them.",
        after_help = "EXAMPLES:\n    # Cheapest first\n    fz catalog --sort price-asc\n\n    # Audio gear only, as JSON\n    fz catalog --category audio --json\n\n    # Export the active catalog as TOML\n    fz catalog --export toml"
    )]
    Catalog(cmd::catalog::CatalogArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one product",
        long_about = "Show full details for a single product: specs, reviews and related modules.",
        after_help = "EXAMPLES:\n    # Show a product\n    fz show 1\n\n    # Emit machine-readable output\n    fz show 1 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Session",
        about = "Build a cart and print its totals",
        long_about = "Apply cart edits in order against a fresh session and print the resulting lines, unit count and total.",
        after_help = "EXAMPLES:\n    # Two units of one product, one of another\n    fz cart --add 3 --add 3 --add 1\n\n    # Add then decrement back out\n    fz cart --add 4 --decrement 4 --json"
    )]
    Cart(cmd::cart::CartArgs),

    #[command(
        next_help_heading = "Session",
        about = "Compare up to three products",
        long_about = "Toggle products into the compare set (at most three) and print them side by side.",
        after_help = "EXAMPLES:\n    # Compare two products\n    fz compare 1 4\n\n    # A fourth id is rejected\n    fz compare 1 2 3 4 --json"
    )]
    Compare(cmd::compare::CompareArgs),

    #[command(
        next_help_heading = "Read",
        about = "List shop categories",
        long_about = "List the category filters the shop offers, with product counts.",
        after_help = "EXAMPLES:\n    fz categories\n    fz categories --json"
    )]
    Categories,

    #[command(
        next_help_heading = "Setup",
        about = "Show the effective configuration",
        long_about = "Show configuration after merging defaults, user config, project config and flags.",
        after_help = "EXAMPLES:\n    fz config\n    fz config --json"
    )]
    Config,

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    fz completions bash > ~/.local/share/bash-completion/completions/fz"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Log destination. The storefront draws on the terminal, so while it runs
/// logs go to `FAZER_LOG_FILE` when set and are discarded otherwise.
fn log_writer(interactive: bool, log_file: Option<OsString>) -> BoxMakeWriter {
    if !interactive {
        return BoxMakeWriter::new(std::io::stderr);
    }
    let Some(path) = log_file else {
        return BoxMakeWriter::new(std::io::sink);
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(err) => {
            eprintln!("fz: cannot open log file {}: {err}", PathBuf::from(path).display());
            BoxMakeWriter::new(std::io::sink)
        }
    }
}

fn init_tracing(interactive: bool) {
    let filter = EnvFilter::try_from_env("FAZER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "fazer=debug,info"
        } else {
            "fazer=info,warn"
        })
    });

    let format = env::var("FAZER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let writer = log_writer(interactive, env::var_os("FAZER_LOG_FILE"));

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(writer))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_ansi(!interactive).with_writer(writer))
                .init();
        }
    }
}

/// Render a configuration failure as `E1001`. Config is not resolved yet, so
/// only `--json`, `--format` and `FORMAT` pick the error format.
fn report_config_error(cli: &Cli, err: anyhow::Error) -> anyhow::Error {
    let fallback = if cli.json {
        "json".to_string()
    } else {
        env::var("FORMAT").unwrap_or_default().to_ascii_lowercase()
    };
    let mode = output::resolve_output_mode(cli.format, &fallback);
    if let Err(render_err) = output::render_error(mode, &output::CliError::config(&err)) {
        return render_err.context(format!("{err:#}"));
    }
    err
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.is_interactive());
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir().context("resolve current directory")?;
    let layout = match &cli.command {
        Some(Commands::Browse(args)) => args.layout,
        _ => None,
    };
    let config: EffectiveConfig = resolve_config(&project_root, &cli.overrides(layout))
        .map_err(|err| report_config_error(&cli, err))?;
    let output = output::resolve_output_mode(cli.format, &config.resolved_output);
    debug!(?output, catalog = ?config.catalog_path, "configuration resolved");

    match cli.command {
        None => cmd::browse::run_browse(&cmd::browse::BrowseArgs::default(), &config),
        Some(Commands::Browse(ref args)) => cmd::browse::run_browse(args, &config),
        Some(Commands::Catalog(ref args)) => cmd::catalog::run_catalog(args, &config, output),
        Some(Commands::Show(ref args)) => cmd::show::run_show(args, &config, output),
        Some(Commands::Cart(ref args)) => cmd::cart::run_cart(args, &config, output, cli.quiet),
        Some(Commands::Compare(ref args)) => {
            cmd::compare::run_compare(args, &config, output, cli.quiet)
        }
        Some(Commands::Categories) => cmd::categories::run_categories(&config, output),
        Some(Commands::Config) => cmd::config::run_config(&config, output),
        Some(Commands::Completions(ref args)) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
