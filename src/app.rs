use crate::catalog::Catalog;
use crate::locator::Locator;
use crate::omnibar::{BarOutcome, ItemPress, Omnibar, Submission};
use crate::rank;
use crate::router::{Route, Router};
use crate::store::history::{self, HistoryEntry, VisitKind};
use crate::suggest::{self, Suggestion};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

pub enum Action {
    Continue,
    Quit,
}

pub struct App {
    pub omnibar: Omnibar,
    pub router: Router,
    pub catalog: Catalog,
    pub history: Vec<HistoryEntry>,

    /// Rows shown in the suggestion panel while the bar is focused.
    /// Rebuilt on every settled-query delivery.
    pub suggestions: Vec<Suggestion>,
    /// Last settled query the bar delivered.
    pub search_query: String,

    // List state for the current route (home or search results)
    pub list_indices: Vec<usize>,
    pub list_selected: usize,
    pub list_scroll: usize,

    // Locators already visited, for list markers
    visited: HashSet<String>,

    // Layout
    visible_height: usize,
}

impl App {
    pub fn new(catalog: Catalog, history: Vec<HistoryEntry>, initial_query: Option<&str>) -> Self {
        let visited = visited_set(&history);
        let list_indices = rank::order_entries(catalog.entries(), &history, "");

        App {
            omnibar: Omnibar::new(initial_query),
            router: Router::new(),
            catalog,
            history,
            suggestions: Vec::new(),
            search_query: String::new(),
            list_indices,
            list_selected: 0,
            list_scroll: 0,
            visited,
            visible_height: 20,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.omnibar.handle_key(key, self.suggestions.len(), now) {
            BarOutcome::Consumed => Action::Continue,
            BarOutcome::Submit(submission) => {
                self.dispatch(submission);
                Action::Continue
            }
            BarOutcome::Suggestion(index) => {
                if let Some(item) = self.suggestions.get(index).cloned() {
                    match self.omnibar.press_item(&item) {
                        ItemPress::Search(query) => {
                            // The press already settled the query; forward it
                            // before taking the search path.
                            self.update_search_query(query.clone());
                            self.open_search(query);
                        }
                        ItemPress::Content(locator) => self.open_content(locator),
                    }
                }
                Action::Continue
            }
            BarOutcome::Ignored => self.handle_screen_key(key),
        }
    }

    /// The terminal lost focus: the platform took the input away, so the
    /// bar must not keep showing suggestions.
    pub fn on_focus_lost(&mut self) {
        self.omnibar.blur();
    }

    /// Delivers a settled query if its quiet period elapsed. Returns true
    /// when something changed and a redraw is worthwhile.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        match self.omnibar.poll(now) {
            Some(text) => {
                self.update_search_query(text);
                true
            }
            None => false,
        }
    }

    /// Earliest instant the event loop should wake at without input.
    pub fn timer_deadline(&self) -> Option<Instant> {
        self.omnibar.timer_deadline()
    }

    fn handle_screen_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => {
                if self.go_back() {
                    Action::Continue
                } else {
                    Action::Quit
                }
            }
            KeyCode::Backspace => {
                self.go_back();
                Action::Continue
            }
            KeyCode::Up => {
                self.move_selection(-1);
                Action::Continue
            }
            KeyCode::Down => {
                self.move_selection(1);
                Action::Continue
            }
            KeyCode::Enter => {
                if let Some(locator) = self.selected_locator() {
                    self.open_content(locator);
                }
                Action::Continue
            }
            _ => Action::Continue,
        }
    }

    fn dispatch(&mut self, submission: Submission) {
        match submission {
            Submission::Content(locator) => self.open_content(locator),
            Submission::Search(query) => self.open_search(query),
        }
    }

    fn open_content(&mut self, locator: Locator) {
        history::record_visit(&mut self.history, &locator.to_string(), VisitKind::Content);
        self.visited.insert(locator.to_string());
        self.router.open_content(locator);
        self.refresh_list();
    }

    /// The search path. The router replaces the query in place when a
    /// results page is already current, so re-searching never stacks.
    fn open_search(&mut self, query: String) {
        history::record_visit(&mut self.history, &query, VisitKind::Search);
        self.router.open_search(query);
        self.refresh_list();
    }

    fn go_back(&mut self) -> bool {
        let moved = self.router.back();
        if moved {
            self.refresh_list();
        }
        moved
    }

    fn update_search_query(&mut self, text: String) {
        self.suggestions = suggest::build_suggestions(&text, &self.catalog, &self.history);
        self.search_query = text;
    }

    fn refresh_list(&mut self) {
        self.list_indices = match self.router.current() {
            Route::Home => rank::order_entries(self.catalog.entries(), &self.history, ""),
            Route::Search { query } => {
                rank::order_entries(self.catalog.entries(), &self.history, query)
            }
            Route::Content { .. } => Vec::new(),
        };
        self.list_selected = 0;
        self.list_scroll = 0;
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.list_indices.len();
        if len == 0 {
            return;
        }
        self.list_selected = wrap_index(self.list_selected, delta, len);
        ensure_scroll(
            &mut self.list_scroll,
            self.list_selected,
            self.visible_height,
        );
    }

    fn selected_locator(&self) -> Option<Locator> {
        let entry_idx = *self.list_indices.get(self.list_selected)?;
        let entry = self.catalog.entries().get(entry_idx)?;
        Some(entry.locator.clone())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1), // header bar
            Constraint::Length(1), // omnibar
            Constraint::Min(1),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(area);

        // Track actual visible height for scroll calculations
        self.visible_height = chunks[2].height as usize;

        crate::ui::header_bar::render_header_bar(
            frame,
            chunks[0],
            &self.catalog.name,
            &self.catalog.path.to_string_lossy(),
            self.catalog.len(),
        );

        crate::ui::omnibar::render_omnibar(frame, chunks[1], &self.omnibar);

        match self.router.current() {
            Route::Home => {
                crate::ui::entry_list::render_entry_list(
                    frame,
                    chunks[2],
                    self.catalog.entries(),
                    &self.list_indices,
                    self.list_selected,
                    self.list_scroll,
                    &self.visited,
                    "Library is empty",
                );
            }
            Route::Search { query } => {
                let empty_note = format!("No results for \"{query}\"");
                crate::ui::entry_list::render_entry_list(
                    frame,
                    chunks[2],
                    self.catalog.entries(),
                    &self.list_indices,
                    self.list_selected,
                    self.list_scroll,
                    &self.visited,
                    &empty_note,
                );
            }
            Route::Content { locator } => {
                crate::ui::content_page::render_content_page(
                    frame,
                    chunks[2],
                    locator,
                    self.catalog.get(locator),
                );
            }
        }

        crate::ui::status_bar::render_status_bar(
            frame,
            chunks[3],
            self.omnibar.is_focused(),
            self.router.depth() > 1,
        );

        // Suggestion panel overlays the content area while the bar is
        // focused; an empty list renders nothing.
        if self.omnibar.is_focused() && !self.suggestions.is_empty() && chunks[2].height > 0 {
            let panel = suggestion_panel_area(chunks[2], self.suggestions.len());
            crate::ui::omnibar::render_suggestions(
                frame,
                panel,
                &self.suggestions,
                self.omnibar.selected_suggestion(),
            );
        }
    }
}

/// The suggestion panel sits flush under the bar, at most half the
/// content area tall.
fn suggestion_panel_area(content: Rect, rows: usize) -> Rect {
    let height = (rows as u16)
        .min(content.height / 2)
        .clamp(1, content.height.max(1));
    Rect {
        x: content.x,
        y: content.y,
        width: content.width,
        height,
    }
}

/// Wrap index with delta, cycling around `len`.
fn wrap_index(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let new = current as i32 + delta;
    if new < 0 {
        len - 1
    } else if new >= len as i32 {
        0
    } else {
        new as usize
    }
}

/// Adjust scroll_offset so that `selected` stays visible within the given height.
fn ensure_scroll(scroll_offset: &mut usize, selected: usize, visible_height: usize) {
    if selected < *scroll_offset {
        *scroll_offset = selected;
    }
    let height = visible_height.max(1);
    if selected >= *scroll_offset + height {
        *scroll_offset = selected.saturating_sub(height - 1);
    }
}

fn visited_set(history: &[HistoryEntry]) -> HashSet<String> {
    history
        .iter()
        .filter(|e| e.kind == VisitKind::Content)
        .map(|e| e.term.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, EntryKind};

    fn entry(locator: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            locator: locator.parse().unwrap(),
            title: title.to_string(),
            description: String::new(),
            tags: Vec::new(),
            kind: EntryKind::File,
        }
    }

    fn test_app() -> App {
        let catalog = Catalog::from_entries(
            "test",
            vec![
                entry("rove://alpha", "Alpha"),
                entry("rove://beta", "Beta"),
                entry("rove://gamma", "Gamma"),
            ],
        );
        App::new(catalog, Vec::new(), None)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_starts_on_home_with_full_list() {
        let app = test_app();
        assert_eq!(*app.router.current(), Route::Home);
        assert_eq!(app.list_indices.len(), 3);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            app.handle_key(ctrl_c, Instant::now()),
            Action::Quit
        ));

        let mut focused = test_app();
        focused.omnibar.focus();
        assert!(matches!(
            focused.handle_key(ctrl_c, Instant::now()),
            Action::Quit
        ));
        // And the bar did not swallow the 'c'.
        assert_eq!(focused.omnibar.value(), "");
    }

    #[test]
    fn test_esc_quits_from_home() {
        let mut app = test_app();
        assert!(matches!(
            app.handle_key(key(KeyCode::Esc), Instant::now()),
            Action::Quit
        ));
    }

    #[test]
    fn test_esc_goes_back_before_quitting() {
        let mut app = test_app();
        app.open_search("cats".to_string());

        assert!(matches!(
            app.handle_key(key(KeyCode::Esc), Instant::now()),
            Action::Continue
        ));
        assert_eq!(*app.router.current(), Route::Home);
    }

    #[test]
    fn test_arrow_selection_wraps() {
        let mut app = test_app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Up), now);
        assert_eq!(app.list_selected, 2);
        app.handle_key(key(KeyCode::Down), now);
        assert_eq!(app.list_selected, 0);
    }

    #[test]
    fn test_enter_opens_selected_entry() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter), Instant::now());

        match app.router.current() {
            Route::Content { locator } => assert_eq!(locator.to_string(), "rove://alpha"),
            other => panic!("expected content route, got {other:?}"),
        }
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].kind, VisitKind::Content);
    }

    #[test]
    fn test_typed_text_reaches_the_bar() {
        let mut app = test_app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('c')), now);
        app.handle_key(key(KeyCode::Char('a')), now);

        assert!(app.omnibar.is_focused());
        assert_eq!(app.omnibar.value(), "ca");
    }

    #[test]
    fn test_settled_query_builds_suggestions() {
        let mut app = test_app();
        let start = Instant::now();
        app.handle_key(key(KeyCode::Char('a')), start);

        assert!(app.suggestions.is_empty());
        assert!(app.poll_timers(start + crate::omnibar::INPUT_DEBOUNCE));
        assert_eq!(app.search_query, "a");
        assert!(!app.suggestions.is_empty());
    }

    #[test]
    fn test_wrap_index_cycles() {
        assert_eq!(wrap_index(0, 1, 3), 1);
        assert_eq!(wrap_index(2, 1, 3), 0);
        assert_eq!(wrap_index(0, -1, 3), 2);
        assert_eq!(wrap_index(0, 1, 0), 0);
    }

    #[test]
    fn test_ensure_scroll_keeps_selection_visible() {
        let mut offset = 5;
        ensure_scroll(&mut offset, 3, 10);
        assert_eq!(offset, 3);

        let mut offset = 0;
        ensure_scroll(&mut offset, 15, 10);
        assert_eq!(offset, 6);
    }
}
