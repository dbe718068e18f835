use ratatui::{Frame, layout::Rect};

use crate::tui::app::App;
use crate::tui::widgets::{empty_state, render_product_list};

pub fn render(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let products = app.store().wishlist_products();
    if products.is_empty() {
        empty_state(
            frame,
            area,
            "Saved_Transmissions",
            "Wishlist Registry Is Offline...",
            "f on any module saves it here",
        );
        return;
    }
    render_product_list(frame, area, "Saved_Transmissions", &products, app.focus());
}

#[cfg(test)]
mod tests {
    use crate::tui::testing::{press, render_to_string, seed_app};
    use crossterm::event::KeyCode;

    #[test]
    fn empty_wishlist_is_offline() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('4'));
        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Wishlist Registry Is Offline..."));
    }

    #[test]
    fn saved_products_are_listed() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('4'));
        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Saved_Transmissions"));
        assert!(screen.contains("Quantum Watch"));
        assert!(!screen.contains("Neural Link X1"));
    }
}
