use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::output::format_price;
use crate::tui::app::App;
use crate::tui::widgets::{dim_style, empty_state, glass_block, heading_style, key_style, price_span};

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selection = app.store().selection();
    let lines = selection.cart();
    if lines.is_empty() {
        empty_state(
            frame,
            area,
            "Cargo_Queue",
            "Queue Is Depleted",
            "Enter: Registry_Access",
        );
        return;
    }

    let [table_area, summary] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(4)]).areas(area);

    let header = Row::new(["Module", "Unit", "Qty", "Line_Total"]).style(dim_style());
    let rows: Vec<Row<'static>> = lines
        .iter()
        .map(|line| {
            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled(line.product.name.clone(), heading_style()),
                    Span::styled(
                        format!("  {}", line.product.category.as_str().to_uppercase()),
                        dim_style(),
                    ),
                ])),
                Cell::from(format_price(line.product.price)),
                Cell::from(Line::from(vec![
                    Span::styled("- ", key_style()),
                    Span::raw(line.quantity.to_string()),
                    Span::styled(" +", key_style()),
                ])),
                Cell::from(format_price(line.line_total())),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(30),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(glass_block("Cargo_Queue"))
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");
    let mut state = TableState::default();
    state.select(Some(app.focus().min(lines.len() - 1)));
    frame.render_stateful_widget(table, table_area, &mut state);

    let totals = vec![
        Line::from(vec![
            Span::styled("Aggregate_Market_Value  ", dim_style()),
            price_span(selection.cart_total()),
            Span::styled(format!("  ({} unit(s))", selection.cart_count()), dim_style()),
        ]),
        Line::from(vec![
            Span::styled("Enter ", key_style()),
            Span::styled("Begin_Deployment", heading_style()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(totals).block(glass_block("Summary")),
        summary,
    );
}
