use crate::catalog::{Catalog, EntryKind};
use crate::fuzzy;
use crate::locator;
use crate::store::history::{HistoryEntry, VisitKind};
use indexmap::IndexMap;

/// How many rows the suggestion panel shows at most.
pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    Search,
    File,
    Channel,
}

impl SuggestionKind {
    /// A search-kind suggestion takes the search path on press; everything
    /// else is direct content.
    pub fn is_search(self) -> bool {
        self == SuggestionKind::Search
    }
}

impl From<EntryKind> for SuggestionKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => SuggestionKind::File,
            EntryKind::Channel => SuggestionKind::Channel,
        }
    }
}

/// One row of the suggestion panel: a search term or a content locator.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub value: String,
}

impl Suggestion {
    fn search(value: impl Into<String>) -> Self {
        Suggestion {
            kind: SuggestionKind::Search,
            value: value.into(),
        }
    }
}

/// Assembles the suggestion list for a settled query.
///
/// Order: the typed locator (when it parses), the raw text as a search,
/// matching past searches, then matching catalog entries. Duplicate values
/// keep their first position; the list is capped at [`MAX_SUGGESTIONS`].
pub fn build_suggestions(
    query: &str,
    catalog: &Catalog,
    history: &[HistoryEntry],
) -> Vec<Suggestion> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    // IndexMap keyed by value: first writer wins, order preserved.
    let mut rows: IndexMap<String, Suggestion> = IndexMap::new();

    if locator::is_locator_like(query) {
        if let Ok(loc) = locator::normalize(query) {
            let kind = match catalog.get(&loc) {
                Some(entry) => SuggestionKind::from(entry.kind),
                None if loc.name().is_empty() => SuggestionKind::Channel,
                None => SuggestionKind::File,
            };
            let value = loc.to_string();
            rows.entry(value.clone()).or_insert(Suggestion { kind, value });
        }
    }

    rows.entry(query.to_string())
        .or_insert_with(|| Suggestion::search(query));

    let past_searches: Vec<&HistoryEntry> = history
        .iter()
        .filter(|e| e.kind == VisitKind::Search)
        .collect();
    for m in fuzzy::rank(&past_searches, query, MAX_SUGGESTIONS, |e| &e.term) {
        let term = &past_searches[m.index].term;
        rows.entry(term.clone())
            .or_insert_with(|| Suggestion::search(term.clone()));
    }

    for m in fuzzy::rank(catalog.entries(), query, MAX_SUGGESTIONS, |e| &e.title) {
        let entry = &catalog.entries()[m.index];
        let value = entry.locator.to_string();
        rows.entry(value.clone()).or_insert(Suggestion {
            kind: SuggestionKind::from(entry.kind),
            value,
        });
    }

    rows.truncate(MAX_SUGGESTIONS);
    rows.into_values().collect()
}
