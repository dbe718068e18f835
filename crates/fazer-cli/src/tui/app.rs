//! TUI application state: the owned session plus view-local UI state
//! (focus, detail tab, search buffer, status line).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fazer_core::config::LayoutMode;
use fazer_core::model::{DetailTab, ProductId};
use fazer_core::router::Page;
use fazer_core::session::{Action, Outcome, Storefront};
use fazer_core::state::{COMPARE_LIMIT, CompareToggle, QuantityChange};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cmd::show::RELATED_LIMIT;

/// Products in the home page's "Current Meta" grid.
pub const FEATURED_LIMIT: usize = 3;

/// Terminals narrower than this get the mobile chrome.
pub const COMPACT_WIDTH: u16 = 80;

const STATUS_TTL: Duration = Duration::from_secs(3);

/// Checkout is a preview; executing it only reports this.
pub const CHECKOUT_OFFLINE: &str = "Execute_Command offline: preview protocol, nothing deployed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search field; every keystroke refilters the shop.
    Search,
    Help,
}

pub struct App {
    store: Storefront,
    layout: LayoutMode,
    input_mode: InputMode,
    focus: usize,
    detail_tab: DetailTab,
    search_buf: String,
    search_prev_query: String,
    status_msg: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    pub fn new(store: Storefront, layout: LayoutMode) -> Self {
        let search_buf = store.selection().search_query().to_string();
        Self {
            store,
            layout,
            input_mode: InputMode::Normal,
            focus: 0,
            detail_tab: DetailTab::default(),
            search_prev_query: search_buf.clone(),
            search_buf,
            status_msg: None,
            should_quit: false,
        }
    }

    pub const fn store(&self) -> &Storefront {
        &self.store
    }

    pub const fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub const fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub const fn focus(&self) -> usize {
        self.focus
    }

    pub const fn detail_tab(&self) -> DetailTab {
        self.detail_tab
    }

    pub fn search_buf(&self) -> &str {
        &self.search_buf
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Bottom navigation instead of top links.
    pub fn is_compact(&self, width: u16) -> bool {
        self.layout == LayoutMode::Mobile || width < COMPACT_WIDTH
    }

    /// The status message, while it is still fresh.
    pub fn status(&self) -> Option<&str> {
        self.status_msg
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_msg = Some((msg.into(), Instant::now()));
    }

    /// Ids of the products the focus cursor moves over on the current page.
    pub fn focus_ids(&self) -> Vec<ProductId> {
        let store = &self.store;
        match store.current_page() {
            Page::Home => store
                .catalog()
                .featured(FEATURED_LIMIT)
                .iter()
                .map(|p| p.id.clone())
                .collect(),
            Page::Shop => store.visible_products().iter().map(|p| p.id.clone()).collect(),
            Page::Product => store
                .selected_product()
                .map(|selected| {
                    store
                        .catalog()
                        .related(selected.id.as_str(), RELATED_LIMIT)
                        .iter()
                        .map(|p| p.id.clone())
                        .collect()
                })
                .unwrap_or_default(),
            Page::Cart | Page::Checkout => store
                .selection()
                .cart()
                .iter()
                .map(|line| line.id().clone())
                .collect(),
            Page::Wishlist => store.wishlist_products().iter().map(|p| p.id.clone()).collect(),
            Page::Compare => store.compare_products().iter().map(|p| p.id.clone()).collect(),
            Page::Profile => Vec::new(),
        }
    }

    pub fn focused_id(&self) -> Option<ProductId> {
        let ids = self.focus_ids();
        let last = ids.len().checked_sub(1)?;
        ids.into_iter().nth(self.focus.min(last))
    }

    /// The product that add, wishlist and compare keys act on.
    fn target_id(&self) -> Option<ProductId> {
        if self.store.current_page() == Page::Product {
            self.store.router().selected().cloned()
        } else {
            self.focused_id()
        }
    }

    fn product_name(&self, id: &ProductId) -> String {
        self.store
            .catalog()
            .get(id.as_str())
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Help => self.handle_help_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
        self.clamp_focus();
    }

    fn clamp_focus(&mut self) {
        let len = self.focus_ids().len();
        self.focus = self.focus.min(len.saturating_sub(1));
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = self.store.current_page();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('?') => self.input_mode = InputMode::Help,
            KeyCode::Char('m') => {
                self.layout = self.layout.toggled();
                self.set_status(format!("Layout: {}", self.layout));
            }

            KeyCode::Char('1') => self.go(Page::Home),
            KeyCode::Char('2') => self.go(Page::Shop),
            KeyCode::Char('3') => self.go(Page::Compare),
            KeyCode::Char('4') => self.go(Page::Wishlist),
            KeyCode::Char('5') => self.go(Page::Cart),
            KeyCode::Char('6') => self.go(Page::Profile),

            KeyCode::Char('j') | KeyCode::Down => self.focus = self.focus.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.focus = self.focus.saturating_sub(1),

            KeyCode::Char('/') => self.start_search(),
            KeyCode::Esc => self.go_back(page),
            KeyCode::Enter => self.activate(page),

            KeyCode::Char('a') => self.add_to_cart(),
            KeyCode::Char('f') => self.toggle_wishlist(),
            KeyCode::Char('x') => self.toggle_compare(),

            _ => self.handle_page_key(page, key.code),
        }
    }

    fn handle_page_key(&mut self, page: Page, code: KeyCode) {
        match (page, code) {
            (Page::Home, KeyCode::Char('s')) => self.go(Page::Shop),

            (Page::Shop, KeyCode::Char('c')) => self.cycle_category(true),
            (Page::Shop, KeyCode::Char('C')) => self.cycle_category(false),
            (Page::Shop, KeyCode::Char('o')) => {
                let sort = self.store.selection().sort_option().next();
                self.dispatch(Action::SetSort(sort));
                self.set_status(format!("Protocol_Order: {}", sort.label()));
            }
            (Page::Shop, KeyCode::Char('r')) => {
                self.dispatch(Action::ResetFilters);
                self.search_buf.clear();
                self.set_status("Registry filters reset");
            }

            (Page::Product, KeyCode::Tab | KeyCode::Right | KeyCode::Char('l')) => {
                self.detail_tab = self.detail_tab.next();
            }
            (Page::Product, KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h')) => {
                self.detail_tab = self.detail_tab.prev();
            }

            (Page::Cart, KeyCode::Char('+' | '=')) => self.change_quantity(true),
            (Page::Cart, KeyCode::Char('-')) => self.change_quantity(false),
            (Page::Cart, KeyCode::Char('d') | KeyCode::Delete) => self.remove_line(),

            (Page::Compare, KeyCode::Char('d')) => self.toggle_compare(),

            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::Enter
        ) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn start_search(&mut self) {
        if self.store.current_page() != Page::Shop {
            self.go(Page::Shop);
        }
        self.search_prev_query = self.store.selection().search_query().to_string();
        self.search_buf.clone_from(&self.search_prev_query);
        self.input_mode = InputMode::Search;
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_buf.clone_from(&self.search_prev_query);
                self.dispatch(Action::SetSearch(self.search_prev_query.clone()));
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.focus = 0;
            }
            KeyCode::Backspace => {
                self.search_buf.pop();
                self.dispatch(Action::SetSearch(self.search_buf.clone()));
            }
            KeyCode::Char(c) => {
                self.search_buf.push(c);
                self.dispatch(Action::SetSearch(self.search_buf.clone()));
            }
            _ => {}
        }
    }

    /// Apply an action, turning failures into a status message.
    fn dispatch(&mut self, action: Action) -> Option<Outcome> {
        match self.store.apply(action) {
            Ok(outcome) => {
                debug!(?outcome, "tui action applied");
                Some(outcome)
            }
            Err(err) => {
                debug!(error = %err, "tui action failed");
                self.set_status(format!("{}: {err}", err.error_code().code()));
                None
            }
        }
    }

    fn go(&mut self, page: Page) {
        if self.dispatch(Action::Navigate(page)) == Some(Outcome::NavigationRefused) {
            self.set_status("Select a module first");
            return;
        }
        self.focus = 0;
    }

    fn go_back(&mut self, page: Page) {
        match page {
            Page::Home => {}
            Page::Product => self.go(Page::Shop),
            Page::Checkout => self.go(Page::Cart),
            _ => self.go(Page::Home),
        }
    }

    fn activate(&mut self, page: Page) {
        match page {
            Page::Cart => {
                if self.store.selection().cart().is_empty() {
                    self.go(Page::Shop);
                } else {
                    self.go(Page::Checkout);
                }
            }
            Page::Checkout => self.set_status(CHECKOUT_OFFLINE),
            Page::Profile => self.set_status("BioAuth key requested"),
            _ => {
                if let Some(id) = self.focused_id()
                    && self.dispatch(Action::OpenProduct(id)).is_some()
                {
                    self.focus = 0;
                    self.detail_tab = DetailTab::default();
                }
            }
        }
    }

    fn add_to_cart(&mut self) {
        let Some(id) = self.target_id() else { return };
        let name = self.product_name(&id);
        if self.dispatch(Action::AddToCart(id)).is_some() {
            self.set_status(format!("{name} added to Cargo_Queue"));
        }
    }

    fn toggle_wishlist(&mut self) {
        let Some(id) = self.target_id() else { return };
        let name = self.product_name(&id);
        match self.dispatch(Action::ToggleWishlist(id)) {
            Some(Outcome::Wishlist { added: true }) => {
                self.set_status(format!("{name} saved to Saved_Transmissions"));
            }
            Some(_) => self.set_status(format!("{name} removed from Saved_Transmissions")),
            None => {}
        }
    }

    fn toggle_compare(&mut self) {
        let Some(id) = self.target_id() else { return };
        let name = self.product_name(&id);
        match self.dispatch(Action::ToggleCompare(id)) {
            Some(Outcome::Compare(CompareToggle::Added)) => {
                self.set_status(format!("{name} queued for telemetry"));
            }
            Some(Outcome::Compare(CompareToggle::Removed)) => {
                self.set_status(format!("{name} ejected from telemetry"));
            }
            Some(Outcome::Compare(CompareToggle::Rejected)) => {
                self.set_status(format!("Telemetry slots full ({COMPARE_LIMIT} max)"));
            }
            _ => {}
        }
    }

    fn change_quantity(&mut self, up: bool) {
        let Some(id) = self.focused_id() else { return };
        let name = self.product_name(&id);
        let action = if up {
            Action::IncrementQuantity(id)
        } else {
            Action::DecrementQuantity(id)
        };
        match self.dispatch(action) {
            Some(Outcome::Quantity(QuantityChange::Clamped(q))) => {
                self.set_status(format!("{name} held at minimum quantity {q}"));
            }
            Some(Outcome::Quantity(QuantityChange::Removed)) => {
                self.set_status(format!("{name} removed from Cargo_Queue"));
            }
            _ => {}
        }
    }

    fn remove_line(&mut self) {
        let Some(id) = self.focused_id() else { return };
        let name = self.product_name(&id);
        if self.dispatch(Action::RemoveFromCart(id)) == Some(Outcome::Applied) {
            self.set_status(format!("{name} removed from Cargo_Queue"));
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let categories = self.store.catalog().categories();
        if categories.is_empty() {
            return;
        }
        let current = self.store.selection().active_category();
        let len = categories.len();
        let next = match categories.iter().position(|c| *c == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        let category = categories[next];
        self.dispatch(Action::SetCategory(category));
        self.focus = 0;
        self.set_status(format!("Category: {}", category.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{press, seed_app, type_str};

    fn ids(app: &App) -> Vec<String> {
        app.focus_ids().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn quit_keys() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = seed_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn number_keys_navigate() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.store().current_page(), Page::Shop);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.store().current_page(), Page::Cart);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store().current_page(), Page::Home);
    }

    #[test]
    fn home_focus_covers_featured_grid() {
        let app = seed_app();
        assert_eq!(ids(&app), ["1", "2", "3"]);
    }

    #[test]
    fn enter_opens_focused_shop_product() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('2'));
        // Rating order: 1 (4.9), 4 (4.8), 2 (4.7), ...
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().current_page(), Page::Product);
        assert_eq!(
            app.store().selected_product().map(|p| p.id.as_str()),
            Some("4")
        );
        assert_eq!(ids(&app), ["1", "2", "3", "5"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store().current_page(), Page::Shop);
    }

    #[test]
    fn focus_is_clamped_to_list() {
        let mut app = seed_app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.focus(), 2);
        assert_eq!(app.focused_id().map(|id| id.to_string()), Some("3".into()));
    }

    #[test]
    fn add_on_detail_page_targets_selected_product() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('a'));
        let cart = app.store().selection().cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].id().as_str(), "1");
        assert_eq!(cart[0].quantity, 2);
        assert_eq!(app.status(), Some("Neural Link X1 added to Cargo_Queue"));
    }

    #[test]
    fn fourth_compare_shows_status() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('2'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('x'));
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.store().selection().compare_count(), COMPARE_LIMIT);
        assert_eq!(app.status(), Some("Telemetry slots full (3 max)"));
    }

    #[test]
    fn wishlist_toggle_from_home() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('f'));
        assert!(app.store().selection().in_wishlist("1"));
        press(&mut app, KeyCode::Char('f'));
        assert!(!app.store().selection().in_wishlist("1"));
        assert_eq!(
            app.status(),
            Some("Neural Link X1 removed from Saved_Transmissions")
        );
    }

    #[test]
    fn live_search_and_cancel() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode(), InputMode::Search);
        assert_eq!(app.store().current_page(), Page::Shop);

        type_str(&mut app, "aero");
        assert_eq!(ids(&app), ["4"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.store().selection().search_query(), "");
        assert_eq!(app.focus_ids().len(), 5);
    }

    #[test]
    fn committed_search_persists() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "NEURALx");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().selection().search_query(), "NEURAL");
        assert_eq!(ids(&app), ["1"]);
    }

    #[test]
    fn shop_category_sort_and_reset() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(ids(&app), ["1"]);
        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.store().selection().active_category().as_str(), "Accessories");

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(ids(&app), ["5", "3", "2", "4", "1"]);
    }

    #[test]
    fn cart_quantity_keys() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.store().selection().cart_count(), 2);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert!(app.store().selection().cart().is_empty());
        assert_eq!(app.status(), Some("Neural Link X1 removed from Cargo_Queue"));
    }

    #[test]
    fn checkout_execute_only_reports_status() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().current_page(), Page::Checkout);
        let before = app.store().selection().clone();

        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store().current_page(), Page::Checkout);
        assert_eq!(app.store().selection(), &before);
        assert_eq!(app.store().selection().cart_total(), 3398);
        assert_eq!(app.status(), Some(CHECKOUT_OFFLINE));
    }

    #[test]
    fn empty_cart_enter_goes_to_shop() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().current_page(), Page::Shop);
    }

    #[test]
    fn detail_tabs_cycle() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.detail_tab(), DetailTab::Overview);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.detail_tab(), DetailTab::Specs);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.detail_tab(), DetailTab::Reviews);
    }

    #[test]
    fn compare_eject_key() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(ids(&app), ["1"]);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store().selection().compare_count(), 0);
    }

    #[test]
    fn help_and_layout_toggle() {
        let mut app = seed_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode(), InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(!app.should_quit());

        assert!(!app.is_compact(120));
        assert!(app.is_compact(60));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.layout(), LayoutMode::Mobile);
        assert!(app.is_compact(120));
    }
}
