use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::tui::app::{App, FEATURED_LIMIT};
use crate::tui::widgets::{ACCENT, dim_style, glass_block, heading_style, render_product_list};

const INFO_CARDS: [(&str, &str); 3] = [
    (
        "Profile Sync",
        "Connect your neural mesh for seamless biometric data transfer and instant hardware calibration.",
    ),
    (
        "Armory Loadout",
        "Select mission-critical gear. Utilize AR-reticle projection to verify spatial compatibility.",
    ),
    (
        "Quantum Ops",
        "Secure deployment via distributed ledger. Global logistics arrival within 24 standard cycles.",
    ),
];

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let store = app.store();
    let featured: Vec<_> = store.catalog().featured(FEATURED_LIMIT).iter().collect();
    let grid_height = u16::try_from(featured.len() * 2).unwrap_or(u16::MAX).saturating_add(2);

    let [hero, grid, cards, banner] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(grid_height),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(area);

    let hero_text = vec![
        Line::from(Span::styled("System_Protocol: Operational", Style::default().fg(Color::Green))),
        Line::from(vec![
            Span::styled("EYE ON THE ", heading_style()),
            Span::styled(
                "FUTURE.",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Catalog Registry  //  Manifesto   (s: enter the armory)",
            dim_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(hero_text), hero);

    render_product_list(
        frame,
        grid,
        "Current Meta // Standard Gear for Early Adopters",
        &featured,
        app.focus(),
    );

    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(cards);
    for ((title, body), column) in INFO_CARDS.iter().zip(columns.iter()) {
        frame.render_widget(
            Paragraph::new(Span::styled(*body, dim_style()))
                .wrap(Wrap { trim: true })
                .block(glass_block(title)),
            *column,
        );
    }

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("FAZER ", heading_style()),
                Span::styled("LABS ", Style::default().fg(ACCENT)),
                Span::styled("0.2_PROT", dim_style()),
            ]),
            Line::from(Span::styled(
                "Advanced research in collaborative bio-digital architecture. Join the feedback loop.",
                dim_style(),
            )),
        ]),
        banner,
    );
}

#[cfg(test)]
mod tests {
    use crate::tui::testing::{render_to_string, seed_app};

    #[test]
    fn home_shows_hero_featured_cards_and_banner() {
        let app = seed_app();
        let screen = render_to_string(&app, 120, 40);
        assert!(screen.contains("System_Protocol: Operational"));
        assert!(screen.contains("EYE ON THE FUTURE."));
        assert!(screen.contains("Current Meta"));
        assert!(screen.contains("Neural Link X1"));
        assert!(screen.contains("Pulse Audio Buds"));
        assert!(!screen.contains("Aero Glass Pro"));
        assert!(screen.contains("Profile Sync"));
        assert!(screen.contains("Armory Loadout"));
        assert!(screen.contains("Quantum Ops"));
        assert!(screen.contains("FAZER LABS 0.2_PROT"));
    }
}
