//! Terminal user interface (TUI) for the storefront.
//!
//! One [`app::App`] owns the [`Storefront`] session; every frame is drawn by
//! [`shell::render`] from `&App`, and every key press becomes at most one
//! session [`Action`](fazer_core::session::Action).
//!
//! ## Entry points
//!
//! - [`run_storefront`]: take over the terminal until the user quits.

pub mod app;
pub mod shell;
pub mod views;
pub mod widgets;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fazer_core::config::LayoutMode;
use fazer_core::session::Storefront;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

use app::App;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the interactive storefront until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into raw mode, drawn to, or
/// restored.
pub fn run_storefront(store: Storefront, layout: LayoutMode) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, layout);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor()?;

    let selection = app.store().selection();
    info!(
        cart_units = selection.cart_count(),
        wishlist = selection.wishlist_count(),
        "storefront closed"
    );
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut last_tick = Instant::now();
    while !app.should_quit() {
        terminal.draw(|frame| shell::render(frame, app))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }
    }
    Ok(())
}
