//! # rove - TUI content browser with a combined address/search bar
//!
//! This library exposes internal components for testing purposes.
//! The public API is primarily intended for integration tests and is not
//! guaranteed to be stable.

pub mod app;
pub mod catalog;
pub mod fuzzy;
pub mod locator;
pub mod omnibar;
pub mod rank;
pub mod router;
pub mod store;
pub mod suggest;
pub mod ui;

// Re-export commonly used types for testing
pub use app::{Action, App};
pub use catalog::{Catalog, CatalogEntry, EntryKind};
pub use locator::Locator;
pub use omnibar::{Omnibar, Submission, INPUT_DEBOUNCE};
pub use router::Route;
pub use suggest::{Suggestion, SuggestionKind};
