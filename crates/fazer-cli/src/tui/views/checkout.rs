use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::output::format_price;
use crate::tui::app::App;
use crate::tui::widgets::{dim_style, glass_block, heading_style, key_style, price_span};

/// Decorative form fields; nothing typed here is stored.
const DROP_ZONE_FIELDS: [&str; 4] = ["Operator_Name", "Sector_Address", "Grid_City", "Sync_Code"];

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selection = app.store().selection();

    let [form, manifest] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
    let [zone, payment] =
        Layout::vertical([Constraint::Length(7), Constraint::Min(5)]).areas(form);

    let zone_lines: Vec<Line<'static>> = DROP_ZONE_FIELDS
        .iter()
        .map(|field| {
            Line::from(vec![
                Span::styled(format!("{field:<16}"), dim_style()),
                Span::styled("[ ________________ ]", Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(zone_lines).block(glass_block("Secure_Deploy // Target_Drop_Zone")),
        zone,
    );

    let payment_lines = vec![
        Line::from(Span::styled("Transfer_Protocol", dim_style())),
        Line::from(vec![
            Span::styled("(*) ", key_style()),
            Span::styled("FAZER_PAY // QUANTUM_LNK", heading_style()),
        ]),
        Line::from(vec![
            Span::styled("( ) ", dim_style()),
            Span::styled("CRYPTO_MESH_AUTH", dim_style()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(payment_lines).block(glass_block("Transfer_Protocol")),
        payment,
    );

    let mut lines: Vec<Line<'static>> = selection
        .cart()
        .iter()
        .map(|line| {
            Line::from(vec![
                Span::raw(format!("{} x{}", line.product.name, line.quantity)),
                Span::styled(format!("  {}", format_price(line.line_total())), dim_style()),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("Queue Is Depleted", dim_style())));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Logistics_Deployment  ", dim_style()),
        Span::styled("FREE_SYNC", Style::default().fg(Color::Green)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Total  ", dim_style()),
        price_span(selection.cart_total()),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Enter ", key_style()),
        Span::styled("Execute_Command", heading_style()),
    ]));
    lines.push(Line::from(Span::styled(
        "Auth implies acceptance of Fazer Protocol V_7.2",
        dim_style(),
    )));
    frame.render_widget(
        Paragraph::new(lines).block(glass_block("Cargo_Manifest")),
        manifest,
    );
}

#[cfg(test)]
mod tests {
    use crate::tui::testing::{press, render_to_string, seed_app};
    use crossterm::event::KeyCode;

    #[test]
    fn checkout_shows_form_and_manifest() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);
        let screen = render_to_string(&app, 140, 30);
        assert!(screen.contains("Target_Drop_Zone"));
        assert!(screen.contains("FAZER_PAY // QUANTUM_LNK"));
        assert!(screen.contains("Cargo_Manifest"));
        assert!(screen.contains("Neural Link X1 x1"));
        assert!(screen.contains("FREE_SYNC"));
        assert!(screen.contains("Execute_Command"));
        assert!(screen.contains("Auth implies acceptance of Fazer Protocol V_7.2"));
    }
}
