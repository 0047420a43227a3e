//! Integration tests for omnibar typing, debounce and submission scenarios

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rove::{App, Catalog, CatalogEntry, EntryKind, Route, SuggestionKind, INPUT_DEBOUNCE};
use std::time::{Duration, Instant};

// Helper functions for creating key events
fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
}

fn key_enter() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::empty())
}

fn key_down() -> KeyEvent {
    KeyEvent::new(KeyCode::Down, KeyModifiers::empty())
}

fn entry(locator: &str, title: &str, kind: EntryKind) -> CatalogEntry {
    CatalogEntry {
        locator: locator.parse().unwrap(),
        title: title.to_string(),
        description: String::new(),
        tags: Vec::new(),
        kind,
    }
}

// Helper to create a test app with a small library
fn create_test_app() -> App {
    let catalog = Catalog::from_entries(
        "test",
        vec![
            entry("rove://openfile", "Open File Demo", EntryKind::File),
            entry("rove://@nature", "Nature", EntryKind::Channel),
            entry("rove://waterfall", "Waterfall timelapse", EntryKind::File),
        ],
    );
    App::new(catalog, Vec::new(), None)
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        app.handle_key(key_char(c), now);
    }
}

#[test]
fn test_only_last_keystroke_in_window_settles_the_query() {
    let mut app = create_test_app();
    let start = Instant::now();

    // Three keystrokes, each inside the previous quiet window.
    app.handle_key(key_char('c'), start);
    app.handle_key(key_char('a'), start + Duration::from_millis(200));
    app.handle_key(key_char('t'), start + Duration::from_millis(400));

    // The first two deadlines pass without a delivery.
    assert!(!app.poll_timers(start + Duration::from_millis(501)));
    assert!(!app.poll_timers(start + Duration::from_millis(701)));
    assert_eq!(app.search_query, "");

    // The last one fires with the full text.
    assert!(app.poll_timers(start + Duration::from_millis(901)));
    assert_eq!(app.search_query, "cat");

    // And only once.
    assert!(!app.poll_timers(start + Duration::from_secs(5)));
}

#[test]
fn test_settled_query_never_arrives_early() {
    let mut app = create_test_app();
    let start = Instant::now();
    type_text(&mut app, "cats", start);

    assert!(!app.poll_timers(start + Duration::from_millis(499)));
    assert_eq!(app.search_query, "");
}

#[test]
fn test_valid_locator_submission_opens_content() {
    let mut app = create_test_app();
    let now = Instant::now();
    type_text(&mut app, "rove://openfile", now);
    app.handle_key(key_enter(), now);

    match app.router.current() {
        Route::Content { locator } => assert_eq!(locator.to_string(), "rove://openfile"),
        other => panic!("expected content route, got {other:?}"),
    }
    assert!(!app.omnibar.is_focused());
}

#[test]
fn test_locator_submission_is_normalized() {
    let mut app = create_test_app();
    let now = Instant::now();
    type_text(&mut app, "rove://@Nature/WaterFall", now);
    app.handle_key(key_enter(), now);

    match app.router.current() {
        Route::Content { locator } => {
            assert_eq!(locator.to_string(), "rove://@nature/waterfall")
        }
        other => panic!("expected content route, got {other:?}"),
    }
}

#[test]
fn test_plain_text_submission_opens_search_with_exact_text() {
    let mut app = create_test_app();
    let now = Instant::now();
    type_text(&mut app, "cats", now);
    app.handle_key(key_enter(), now);

    assert_eq!(
        *app.router.current(),
        Route::Search {
            query: "cats".to_string()
        }
    );
}

#[test]
fn test_malformed_locator_falls_back_to_search() {
    let mut app = create_test_app();
    let now = Instant::now();
    type_text(&mut app, "rove://two words", now);
    app.handle_key(key_enter(), now);

    assert_eq!(
        *app.router.current(),
        Route::Search {
            query: "rove://two words".to_string()
        }
    );
}

#[test]
fn test_search_submission_from_results_page_replaces_in_place() {
    let mut app = create_test_app();
    let now = Instant::now();

    type_text(&mut app, "cats", now);
    app.handle_key(key_enter(), now);
    let depth_after_first = app.router.depth();

    type_text(&mut app, "dogs", now);
    app.handle_key(key_enter(), now);

    assert_eq!(app.router.depth(), depth_after_first);
    assert_eq!(
        *app.router.current(),
        Route::Search {
            query: "dogs".to_string()
        }
    );
}

#[test]
fn test_empty_submission_does_nothing() {
    let mut app = create_test_app();
    app.omnibar.focus();
    app.handle_key(key_enter(), Instant::now());

    assert_eq!(*app.router.current(), Route::Home);
}

#[test]
fn test_pressing_search_suggestion_settles_query_and_routes() {
    let mut app = create_test_app();
    let start = Instant::now();
    type_text(&mut app, "water", start);

    // Let the query settle so suggestions exist.
    let settled = start + INPUT_DEBOUNCE;
    assert!(app.poll_timers(settled));
    assert_eq!(app.suggestions[0].kind, SuggestionKind::Search);

    // Highlight the search row and press it.
    app.handle_key(key_down(), settled);
    app.handle_key(key_enter(), settled);

    assert_eq!(app.search_query, "water");
    assert_eq!(app.omnibar.value(), "water");
    assert!(!app.omnibar.is_focused());
    assert_eq!(
        *app.router.current(),
        Route::Search {
            query: "water".to_string()
        }
    );
}

#[test]
fn test_pressing_content_suggestion_bypasses_query_update() {
    let mut app = create_test_app();
    let start = Instant::now();
    type_text(&mut app, "water", start);

    let settled = start + INPUT_DEBOUNCE;
    assert!(app.poll_timers(settled));
    let content_row = app
        .suggestions
        .iter()
        .position(|s| !s.kind.is_search())
        .expect("catalog match should be suggested");

    for _ in 0..=content_row {
        app.handle_key(key_down(), settled);
    }
    app.handle_key(key_enter(), settled);

    match app.router.current() {
        Route::Content { locator } => assert_eq!(locator.to_string(), "rove://waterfall"),
        other => panic!("expected content route, got {other:?}"),
    }
    // The settled query is exactly what the debounce delivered earlier.
    assert_eq!(app.search_query, "water");
    assert!(!app.omnibar.is_focused());
}

#[test]
fn test_pressing_search_suggestion_cancels_pending_task() {
    let mut app = create_test_app();
    let start = Instant::now();
    type_text(&mut app, "water", start);
    let settled = start + INPUT_DEBOUNCE;
    assert!(app.poll_timers(settled));

    // Type more (arms a new task), then press the search row before it fires.
    app.handle_key(key_char('f'), settled);
    app.handle_key(key_down(), settled);
    app.handle_key(key_enter(), settled);
    let value_at_press = app.search_query.clone();

    // The cancelled task for "waterf" must never overwrite the press.
    assert!(!app.poll_timers(settled + INPUT_DEBOUNCE * 2));
    assert_eq!(app.search_query, value_at_press);
}

#[test]
fn test_terminal_focus_loss_blurs_the_bar() {
    let mut app = create_test_app();
    app.handle_key(key_char('c'), Instant::now());
    assert!(app.omnibar.is_focused());

    app.on_focus_lost();
    assert!(!app.omnibar.is_focused());
    assert_eq!(app.omnibar.cursor(), 0);
}

#[test]
fn test_seeded_query_is_submittable_without_typing() {
    let catalog = Catalog::from_entries(
        "test",
        vec![entry("rove://openfile", "Open File Demo", EntryKind::File)],
    );
    let mut app = App::new(catalog, Vec::new(), Some("rove://openfile"));
    assert_eq!(app.omnibar.value(), "rove://openfile");

    app.omnibar.focus();
    app.handle_key(key_enter(), Instant::now());
    assert!(matches!(app.router.current(), Route::Content { .. }));
}
