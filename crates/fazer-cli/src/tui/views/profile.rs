use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::tui::app::App;
use crate::tui::widgets::{centered_rect, dim_style, glass_block, heading_style, key_style};

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selection = app.store().selection();
    let card = centered_rect(area, 64, 13);
    let lines = vec![
        Line::from(Span::styled("Operator: 9214", heading_style())),
        Line::from(Span::styled(
            "Class_4_Clearance_Validated",
            Style::default().fg(Color::Green),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Encrypted transaction logs and neural history access requires active \
             physical sync via the Fazer Link mesh hardware.",
            dim_style(),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "Cargo:{}  Saved:{}  Telemetry:{}",
                selection.cart_count(),
                selection.wishlist_count(),
                selection.compare_count()
            ),
            dim_style(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Enter ", key_style()),
            Span::styled("Request_BioAuth_Key", heading_style()),
        ]),
        Line::from(Span::styled("RECV_FEED_ACTIVE", dim_style())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(glass_block("Registry_Access")),
        card,
    );
}

#[cfg(test)]
mod tests {
    use crate::tui::testing::{press, render_to_string, seed_app};
    use crossterm::event::KeyCode;

    #[test]
    fn profile_card() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('6'));
        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Operator: 9214"));
        assert!(screen.contains("Class_4_Clearance_Validated"));
        assert!(screen.contains("Request_BioAuth_Key"));
    }
}
