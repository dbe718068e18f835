//! Layout shell: top bar, page content, bottom navigation on narrow layouts,
//! footer, and the help overlay.

use fazer_core::router::Page;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};

use super::app::{App, InputMode};
use super::views;
use super::widgets::{ACCENT, centered_rect, dim_style, heading_style, hint_line, key_style};

/// Bottom navigation entries: (hotkey, label, page).
const BOTTOM_NAV: [(&str, &str, Page); 6] = [
    ("1", "Home", Page::Home),
    ("2", "Shop", Page::Shop),
    ("3", "Compare", Page::Compare),
    ("4", "Saved", Page::Wishlist),
    ("5", "Cargo", Page::Cart),
    ("6", "Profile", Page::Profile),
];

/// Draw one full frame.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let compact = app.is_compact(area.width);
    let nav_height = if compact { 3 } else { 0 };

    let [top, content, bottom, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(nav_height),
        Constraint::Length(1),
    ])
    .areas(area);

    render_top_bar(frame, app, top, compact);
    views::render_page(frame, app, content);
    if compact {
        render_bottom_nav(frame, app, bottom);
    }
    render_footer(frame, app, footer);

    if app.input_mode() == InputMode::Help {
        render_help_overlay(frame, area);
    }
}

fn render_top_bar(frame: &mut Frame<'_>, app: &App, area: Rect, compact: bool) {
    let store = app.store();
    let selection = store.selection();
    let page = store.current_page();

    let mut spans = vec![
        Span::styled(
            "FAZER",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    if !compact {
        for (label, target) in [("Home", Page::Home), ("Shop", Page::Shop), ("Compare", Page::Compare)] {
            let style = if page == target {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                dim_style()
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw("  "));
        }
    }

    let query = if app.input_mode() == InputMode::Search {
        format!("{}_", app.search_buf())
    } else {
        selection.search_query().to_string()
    };
    spans.push(Span::styled("/ ", key_style()));
    if query.is_empty() {
        spans.push(Span::styled("Scan_Registry", dim_style()));
    } else {
        spans.push(Span::styled(query, Style::default().fg(Color::White)));
    }
    spans.push(Span::raw("  "));

    spans.push(Span::styled(
        format!("Saved:{}", selection.wishlist_count()),
        badge_style(selection.wishlist_count() > 0),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("Cargo:{}", selection.cart_count()),
        badge_style(selection.cart_count() > 0),
    ));
    if !compact {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("Operator", dim_style()));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(dim_style());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn badge_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        dim_style()
    }
}

fn render_bottom_nav(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let page = match app.store().current_page() {
        Page::Product => Page::Shop,
        Page::Checkout => Page::Cart,
        other => other,
    };
    let selected = BOTTOM_NAV
        .iter()
        .position(|(_, _, target)| *target == page)
        .unwrap_or(0);
    let titles: Vec<Line<'static>> = BOTTOM_NAV
        .iter()
        .map(|(key, label, _)| {
            Line::from(vec![
                Span::styled(*key, key_style()),
                Span::raw(" "),
                Span::raw(*label),
            ])
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(dim_style()),
        );
    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let line = if app.input_mode() == InputMode::Search {
        hint_line(&[("Enter", "apply"), ("Esc", "cancel"), ("Backspace", "delete")])
    } else if let Some(msg) = app.status() {
        Line::from(Span::styled(
            msg.to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        hint_line(page_hints(app.store().current_page()))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn page_hints(page: Page) -> &'static [(&'static str, &'static str)] {
    match page {
        Page::Home => &[("s", "shop"), ("Enter", "open"), ("a", "add"), ("?", "help"), ("q", "quit")],
        Page::Shop => &[
            ("/", "search"),
            ("c", "category"),
            ("o", "order"),
            ("r", "reset"),
            ("Enter", "open"),
            ("?", "help"),
        ],
        Page::Product => &[
            ("a", "add"),
            ("f", "save"),
            ("x", "compare"),
            ("Tab", "section"),
            ("Esc", "back"),
        ],
        Page::Cart => &[
            ("+/-", "quantity"),
            ("d", "remove"),
            ("Enter", "deploy"),
            ("Esc", "home"),
        ],
        Page::Wishlist => &[("a", "add"), ("f", "unsave"), ("Enter", "open"), ("Esc", "home")],
        Page::Compare => &[("d", "eject"), ("a", "equip"), ("Enter", "open"), ("Esc", "home")],
        Page::Checkout => &[("Enter", "execute"), ("Esc", "cargo")],
        Page::Profile => &[("Enter", "bioauth"), ("Esc", "home")],
    }
}

fn help_hotkeys() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("1-6", "global", "home/shop/compare/saved/cargo/profile"),
        ("j/k", "global", "move focus"),
        ("Enter", "global", "open focused module"),
        ("a", "global", "add to cargo queue"),
        ("f", "global", "toggle saved transmission"),
        ("x", "global", "toggle telemetry compare"),
        ("/", "global", "search the armory"),
        ("m", "global", "toggle web/mobile layout"),
        ("Esc", "global", "back"),
        ("?", "global", "open help overlay"),
        ("q", "global", "quit"),
        ("c/C", "shop", "next/previous category"),
        ("o", "shop", "cycle sort order"),
        ("r", "shop", "reset registry filters"),
        ("Tab", "detail", "next section"),
        ("+/-", "cargo", "change quantity"),
        ("d", "cargo", "remove line"),
        ("Enter", "cargo", "begin deployment"),
        ("d", "compare", "eject module"),
        ("Enter", "deploy", "execute command"),
    ]
}

fn render_help_overlay(frame: &mut Frame<'_>, area: Rect) {
    let hotkeys = help_hotkeys();
    let height = u16::try_from(hotkeys.len()).unwrap_or(u16::MAX).saturating_add(4);
    let popup = centered_rect(area, 64, height);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(" Hotkeys ")
        .title_style(heading_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line<'static>> = hotkeys
        .into_iter()
        .map(|(key, ctx, desc)| {
            Line::from(vec![
                Span::styled(format!("{key:8}"), key_style()),
                Span::styled(format!("{ctx:9}"), key_style()),
                Span::styled(desc, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(hint_line(&[("Esc", "close")]));
    frame.render_widget(Paragraph::new(lines), inner);
}
