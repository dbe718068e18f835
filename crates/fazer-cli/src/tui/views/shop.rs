use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, InputMode};
use crate::tui::widgets::{ACCENT, dim_style, empty_state, key_style, render_product_list};

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let store = app.store();
    let selection = store.selection();
    let active = selection.active_category();

    let [chips, controls, list] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(area);

    let mut chip_spans = vec![Span::styled("c ", key_style())];
    for category in store.catalog().categories() {
        let style = if *category == active {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            dim_style()
        };
        chip_spans.push(Span::styled(format!(" {} ", category.as_str()), style));
        chip_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(chip_spans)), chips);

    let search = if app.input_mode() == InputMode::Search {
        format!("{}_", app.search_buf())
    } else {
        selection.search_query().to_string()
    };
    let controls_line = Line::from(vec![
        Span::styled("o ", key_style()),
        Span::styled("Protocol_Order: ", dim_style()),
        Span::styled(
            selection.sort_option().label(),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled("/ ", key_style()),
        Span::styled("Search: ", dim_style()),
        Span::styled(search, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(controls_line), controls);

    let products = store.visible_products();
    if products.is_empty() {
        empty_state(
            frame,
            list,
            "The_Armory",
            "No Registry Data",
            "r: Reset_Registry_Filter",
        );
        return;
    }
    let title = format!("The_Armory // {} module(s)", products.len());
    render_product_list(frame, list, &title, &products, app.focus());
}

#[cfg(test)]
mod tests {
    use crate::tui::testing::{press, render_to_string, seed_app, type_str};
    use crossterm::event::KeyCode;

    #[test]
    fn shop_lists_chips_sort_and_products() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('2'));
        let screen = render_to_string(&app, 120, 40);
        assert!(screen.contains("The_Armory // 5 module(s)"));
        assert!(screen.contains(" All "));
        assert!(screen.contains(" Accessories "));
        assert!(screen.contains("Protocol_Order: Rating_Desc"));
        assert!(screen.contains("Titanium Shell V3"));
    }

    #[test]
    fn protection_chip_is_not_offered() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('2'));
        let screen = render_to_string(&app, 120, 40);
        let chip_row = screen.lines().nth(3).unwrap();
        assert!(chip_row.contains("Wearables"));
        assert!(!chip_row.contains("Protection"));
    }

    #[test]
    fn empty_results_show_reset_hint() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Enter);
        let screen = render_to_string(&app, 120, 40);
        assert!(screen.contains("No Registry Data"));
        assert!(screen.contains("Reset_Registry_Filter"));

        press(&mut app, KeyCode::Char('r'));
        let screen = render_to_string(&app, 120, 40);
        assert!(!screen.contains("No Registry Data"));
    }
}
