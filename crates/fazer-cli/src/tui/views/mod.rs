//! One renderer per page. Each draws from `&App` into the content area.

mod cart;
mod checkout;
mod compare;
mod home;
mod product;
mod profile;
mod shop;
mod wishlist;

use fazer_core::router::Page;
use ratatui::{Frame, layout::Rect};

use super::app::App;

pub fn render_page(frame: &mut Frame<'_>, app: &App, area: Rect) {
    match app.store().current_page() {
        Page::Home => home::render(frame, app, area),
        Page::Shop => shop::render(frame, app, area),
        Page::Product => product::render(frame, app, area),
        Page::Cart => cart::render(frame, app, area),
        Page::Wishlist => wishlist::render(frame, app, area),
        Page::Compare => compare::render(frame, app, area),
        Page::Checkout => checkout::render(frame, app, area),
        Page::Profile => profile::render(frame, app, area),
    }
}
