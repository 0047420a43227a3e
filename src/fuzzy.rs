use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// A fuzzy match against one item of the ranked slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub index: usize,
    pub score: u32,
}

/// Ranks `items` against `query`, best match first, capped at `limit`.
///
/// An empty query matches everything with a zero score, in original order.
/// Ties are broken by original position so ordering stays stable.
pub fn rank<T, F>(items: &[T], query: &str, limit: usize, text_of: F) -> Vec<Match>
where
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return (0..items.len().min(limit))
            .map(|index| Match { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let mut buf = Vec::new();

    let mut scored: Vec<Match> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let haystack = Utf32Str::new(text_of(item), &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| Match { index, score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
    scored.truncate(limit);
    scored
}
