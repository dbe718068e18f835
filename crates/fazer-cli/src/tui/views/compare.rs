use fazer_core::state::COMPARE_LIMIT;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Row, Table},
};

use crate::output::format_price;
use crate::tui::app::App;
use crate::tui::widgets::{dim_style, empty_state, glass_block, heading_style, key_style};

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let products = app.store().compare_products();
    if products.is_empty() {
        empty_state(
            frame,
            area,
            "Telemetry_Compare",
            "No Modules Assigned for Telemetry",
            "x on any module: Registry_Access",
        );
        return;
    }

    let focus = app.focus().min(products.len() - 1);
    let focused = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut header = vec![Cell::from("")];
    header.extend(products.iter().enumerate().map(|(i, p)| {
        let style = if i == focus { focused } else { heading_style() };
        Cell::from(Span::styled(p.name.clone(), style))
    }));

    let label = |text: &'static str| Cell::from(Span::styled(text, dim_style()));
    let mut rows = vec![
        Row::new(
            std::iter::once(label("Valuation_Index"))
                .chain(products.iter().map(|p| Cell::from(format_price(p.price)))),
        ),
        Row::new(
            std::iter::once(label("Layer_Class"))
                .chain(products.iter().map(|p| Cell::from(p.category.as_str()))),
        ),
        Row::new(std::iter::once(label("Report_Metrics")).chain(products.iter().map(|p| {
            Cell::from(format!("{:.1} / {} reports", p.rating, p.review_count))
        }))),
        Row::new(
            std::iter::once(label("Protocol_Brief"))
                .chain(products.iter().map(|p| Cell::from(p.description.clone()))),
        )
        .height(2),
    ];
    rows.push(Row::new(std::iter::once(Cell::from("")).chain(products.iter().map(|_| {
        Cell::from(Line::from(vec![
            Span::styled("d ", key_style()),
            Span::raw("Eject_Module  "),
            Span::styled("a ", key_style()),
            Span::raw("Equip_Mod"),
        ]))
    }))));

    let mut widths = vec![Constraint::Length(16)];
    widths.extend(std::iter::repeat_n(Constraint::Fill(1), products.len()));

    let title = format!("Telemetry_Compare // {}/{COMPARE_LIMIT}", products.len());
    let table = Table::new(rows, widths)
        .header(Row::new(header).bottom_margin(1))
        .column_spacing(2)
        .block(glass_block(&title));
    frame.render_widget(table, area);
}
