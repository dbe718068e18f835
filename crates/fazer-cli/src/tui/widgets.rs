//! Shared building blocks for the storefront views.

use fazer_core::model::Product;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::output::format_price;

pub const ACCENT: Color = Color::Cyan;
pub const HIGHLIGHT: Color = Color::Magenta;

pub fn key_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn heading_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Rounded panel with a title.
pub fn glass_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(dim_style())
        .title(format!(" {title} "))
        .title_style(heading_style())
}

/// Five rating pips, filled up to the whole-number rating.
pub fn rating_pips(product: &Product) -> Span<'static> {
    let filled = product.filled_pips().min(5);
    let pips = format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled));
    Span::styled(pips, Style::default().fg(Color::Yellow))
}

pub fn price_span(price: u64) -> Span<'static> {
    Span::styled(
        format_price(price),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )
}

/// Badges shown next to a product name.
pub fn badges(product: &Product) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if product.is_new {
        spans.push(Span::styled(
            " NEW_ITER ",
            Style::default().fg(Color::Black).bg(ACCENT),
        ));
        spans.push(Span::raw(" "));
    }
    if product.is_bestseller {
        spans.push(Span::styled(
            " STANDARD_META ",
            Style::default().fg(Color::Black).bg(HIGHLIGHT),
        ));
    }
    spans
}

/// One product as a two-line list entry.
pub fn product_item(product: &Product) -> ListItem<'static> {
    let mut title = vec![
        Span::styled(format!("{:<20}", product.name), heading_style()),
        Span::raw(" "),
        price_span(product.price),
        Span::raw("  "),
        rating_pips(product),
        Span::styled(format!(" {:.1}", product.rating), dim_style()),
        Span::raw("  "),
    ];
    title.extend(badges(product));
    let detail = Line::from(vec![
        Span::styled(
            format!("  {} // ", product.category.as_str().to_uppercase()),
            key_style(),
        ),
        Span::styled(product.description.clone(), dim_style()),
    ]);
    ListItem::new(vec![Line::from(title), detail])
}

/// Product list with the focus cursor on `focus`.
pub fn render_product_list(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    products: &[&Product],
    focus: usize,
) {
    let items: Vec<ListItem<'static>> = products.iter().map(|p| product_item(p)).collect();
    let list = List::new(items)
        .block(glass_block(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !products.is_empty() {
        state.select(Some(focus.min(products.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Centered message for pages with nothing to show.
pub fn empty_state(frame: &mut Frame<'_>, area: Rect, title: &str, message: &str, hint: &str) {
    let block = glass_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [middle] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::Center)
        .areas(inner);
    let text = vec![
        Line::from(Span::styled(message.to_string(), heading_style())),
        Line::default(),
        Line::from(Span::styled(hint.to_string(), dim_style())),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

/// A `width` x `height` rectangle centered inside `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Key/description pairs for hint lines.
pub fn hint_line(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, desc) in pairs {
        spans.push(Span::styled((*key).to_string(), key_style()));
        spans.push(Span::styled(format!(" {desc}  "), dim_style()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fazer_core::catalog::Catalog;

    #[test]
    fn pips_follow_whole_rating() {
        let catalog = Catalog::seed();
        let pips = rating_pips(catalog.get("5").unwrap());
        assert_eq!(pips.content, "****.");
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(area, 40, 40), area);
    }

    #[test]
    fn badges_for_new_bestseller() {
        let catalog = Catalog::seed();
        let text: String = badges(catalog.get("1").unwrap())
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(text.contains("NEW_ITER"));
        assert!(text.contains("STANDARD_META"));
        assert!(badges(catalog.get("4").unwrap()).is_empty());
    }
}
