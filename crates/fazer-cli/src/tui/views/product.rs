use fazer_core::model::{DetailTab, Product};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
};

use crate::cmd::show::RELATED_LIMIT;
use crate::tui::app::App;
use crate::tui::widgets::{
    ACCENT, HIGHLIGHT, dim_style, empty_state, glass_block, heading_style, key_style, price_span,
    rating_pips, render_product_list,
};

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let store = app.store();
    let Ok(product) = store.require_selected() else {
        empty_state(
            frame,
            area,
            "Module_Detail",
            "No module selected",
            "2: open The_Armory and press Enter on a module",
        );
        return;
    };
    let related = store.catalog().related(product.id.as_str(), RELATED_LIMIT);
    let related_height = u16::try_from(related.len() * 2).unwrap_or(u16::MAX).saturating_add(2);

    let [summary, tabs, section, modules] = Layout::vertical([
        Constraint::Length(12),
        Constraint::Length(1),
        Constraint::Min(4),
        Constraint::Length(related_height),
    ])
    .areas(area);

    render_summary(frame, app, product, summary);

    let titles: Vec<Line<'static>> = DetailTab::ALL
        .iter()
        .map(|tab| Line::from(tab.as_str().to_uppercase()))
        .collect();
    let selected = DetailTab::ALL
        .iter()
        .position(|tab| *tab == app.detail_tab())
        .unwrap_or(0);
    frame.render_widget(
        Tabs::new(titles)
            .select(selected)
            .style(dim_style())
            .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        tabs,
    );

    let body = match app.detail_tab() {
        DetailTab::Overview => overview_lines(product),
        DetailTab::Specs => spec_lines(product),
        DetailTab::Reviews => review_lines(product),
    };
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(glass_block("Mission_Critical_Spec")),
        section,
    );

    render_product_list(
        frame,
        modules,
        "Compatible_Loadout_Modules",
        &related,
        app.focus(),
    );
}

fn render_summary(frame: &mut Frame<'_>, app: &App, product: &Product, area: Rect) {
    let selection = app.store().selection();

    let mut badge_line = vec![Span::styled(
        product.category.as_str().to_uppercase(),
        key_style(),
    )];
    if product.is_bestseller {
        badge_line.push(Span::styled(" // ", dim_style()));
        badge_line.push(Span::styled("STANDARD_META", Style::default().fg(HIGHLIGHT)));
    }
    if product.is_new {
        badge_line.push(Span::styled(" // ", dim_style()));
        badge_line.push(Span::styled("NEW_ITER", Style::default().fg(ACCENT)));
    }

    let saved = if selection.in_wishlist(product.id.as_str()) {
        "Saved"
    } else {
        "Save"
    };
    let compared = if selection.in_compare(product.id.as_str()) {
        "Comparing"
    } else {
        "Compare"
    };

    let lines = vec![
        Line::from(badge_line),
        Line::from(Span::styled(product.name.clone(), heading_style())),
        Line::from(vec![
            price_span(product.price),
            Span::raw("   "),
            rating_pips(product),
            Span::styled(
                format!(" {:.1} ({} field reports)", product.rating, product.review_count),
                dim_style(),
            ),
        ]),
        Line::default(),
        Line::from(Span::raw(product.long_description.clone())),
        Line::default(),
        Line::from(vec![
            Span::styled("a ", key_style()),
            Span::styled("Add_To_Loadout", heading_style()),
            Span::raw("   "),
            Span::styled("f ", key_style()),
            Span::raw(saved),
            Span::raw("   "),
            Span::styled("x ", key_style()),
            Span::raw(compared),
        ]),
        Line::from(vec![
            Span::styled("Availability_Status: ", dim_style()),
            Span::styled("IMMEDIATE_DEPLOYMENT_ACTIVE", Style::default().fg(Color::Green)),
            Span::styled("   Secure_Protocol: ", dim_style()),
            Span::raw("QUANTUM_AES_PROTECTION_V3"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn overview_lines(product: &Product) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::raw(product.description.clone())),
        Line::default(),
        Line::from(Span::styled("+ Neural_Sync_Ready (99% Stability)", dim_style())),
        Line::from(Span::styled("+ Biometric_Adaptation_Enabled", dim_style())),
        Line::from(Span::styled("+ Streaming_Live_Calib_Feed...", dim_style())),
    ]
}

fn spec_lines(product: &Product) -> Vec<Line<'static>> {
    product
        .specs
        .iter()
        .map(|spec| {
            Line::from(vec![
                Span::styled(format!("{:<20}", spec.label), dim_style()),
                Span::styled(spec.value.clone(), Style::default().fg(Color::White)),
            ])
        })
        .collect()
}

fn review_lines(product: &Product) -> Vec<Line<'static>> {
    let mut lines = vec![match product.review_average() {
        Some(avg) => Line::from(vec![
            Span::styled("Telemetry_Average ", dim_style()),
            Span::styled(format!("{avg:.1}"), heading_style()),
        ]),
        None => Line::from(Span::styled("No field reports yet", dim_style())),
    }];
    for review in &product.reviews {
        let stars = usize::from(review.rating.min(5));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}{}", "*".repeat(stars), ".".repeat(5 - stars)),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" "),
            Span::styled(review.user_name.clone(), heading_style()),
            Span::styled(format!("  {}", review.date.format("%Y-%m-%d")), dim_style()),
        ]));
        lines.push(Line::from(Span::raw(review.comment.clone())));
    }
    lines
}

#[cfg(test)]
mod tests {
    use crate::tui::testing::{press, render_to_string, seed_app};
    use crossterm::event::KeyCode;

    fn open_first() -> crate::tui::app::App {
        let mut app = seed_app();
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn detail_shows_summary_and_related() {
        let app = open_first();
        let screen = render_to_string(&app, 120, 50);
        assert!(screen.contains("WEARABLES // STANDARD_META // NEW_ITER"));
        assert!(screen.contains("Neural Link X1"));
        assert!(screen.contains("$2,499"));
        assert!(screen.contains("(1240 field reports)"));
        assert!(screen.contains("Add_To_Loadout"));
        assert!(screen.contains("IMMEDIATE_DEPLOYMENT_ACTIVE"));
        assert!(screen.contains("Compatible_Loadout_Modules"));
        assert!(screen.contains("Titanium Shell V3"));
    }

    #[test]
    fn specs_tab_lists_specs() {
        let mut app = open_first();
        press(&mut app, KeyCode::Tab);
        let screen = render_to_string(&app, 120, 50);
        assert!(screen.contains("Bandwidth"));
        assert!(screen.contains("Liquid Titanium"));
    }

    #[test]
    fn reviews_tab_shows_average_and_reviews() {
        let mut app = open_first();
        press(&mut app, KeyCode::BackTab);
        let screen = render_to_string(&app, 120, 50);
        assert!(screen.contains("Telemetry_Average 4.5"));
        assert!(screen.contains("Alex Chen"));
        assert!(screen.contains("2024-03-10"));
    }

    #[test]
    fn save_label_tracks_wishlist() {
        let mut app = open_first();
        press(&mut app, KeyCode::Char('f'));
        let screen = render_to_string(&app, 120, 50);
        assert!(screen.contains("f Saved"));
    }
}
