use crate::catalog::CatalogEntry;
use crate::fuzzy;
use crate::store::history::{self, HistoryEntry, VisitKind};
use std::collections::HashMap;

/// Returns indices into `entries`, in display order.
///
/// Without a query, frequently and recently visited entries float to the
/// top, then the rest alphabetically by title. With a query, fuzzy match
/// relevance comes first and frecency only breaks ties.
pub fn order_entries(
    entries: &[CatalogEntry],
    visits: &[HistoryEntry],
    query: &str,
) -> Vec<usize> {
    let scores = visit_scores(visits);

    if query.is_empty() {
        let mut indices: Vec<usize> = (0..entries.len()).collect();
        indices.sort_by(|&a, &b| {
            let score_a = frecency_of(&entries[a], &scores);
            let score_b = frecency_of(&entries[b], &scores);
            score_b
                .partial_cmp(&score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| entries[a].title.cmp(&entries[b].title))
        });
        return indices;
    }

    let mut matches = fuzzy::rank(entries, query, entries.len(), |e| &e.title);
    matches.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| {
            let score_a = frecency_of(&entries[a.index], &scores);
            let score_b = frecency_of(&entries[b.index], &scores);
            score_b
                .partial_cmp(&score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| entries[a.index].title.cmp(&entries[b.index].title))
        })
    });
    matches.into_iter().map(|m| m.index).collect()
}

/// Frecency score per visited locator, keyed by canonical form.
fn visit_scores(visits: &[HistoryEntry]) -> HashMap<String, f64> {
    let now = history::now_ms();
    visits
        .iter()
        .filter(|e| e.kind == VisitKind::Content)
        .map(|e| {
            (
                e.term.clone(),
                history::frecency_score(e.count, e.last_visit, now),
            )
        })
        .collect()
}

fn frecency_of(entry: &CatalogEntry, scores: &HashMap<String, f64>) -> f64 {
    scores
        .get(&entry.locator.to_string())
        .copied()
        .unwrap_or(0.0)
}
