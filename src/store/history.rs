use serde::{Deserialize, Serialize};
use std::path::Path;

/// What kind of submission a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitKind {
    Search,
    Content,
}

/// One submitted search term or opened locator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub term: String,
    pub kind: VisitKind,
    pub last_visit: u64, // Unix timestamp (milliseconds)
    pub count: u32,
}

/// Maximum number of history entries to keep
const MAX_HISTORY: usize = 200;

/// Loads visit history from the per-catalog store directory.
/// Returns an empty Vec if the file doesn't exist or is corrupted.
pub fn load_history(store_dir: &Path) -> Vec<HistoryEntry> {
    let path = store_dir.join("history.json");

    if !path.exists() {
        return Vec::new();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            serde_json::from_str::<Vec<HistoryEntry>>(&contents).unwrap_or_else(|_| Vec::new())
        }
        Err(_) => Vec::new(),
    }
}

/// Saves visit history to the per-catalog store directory.
pub fn save_history(store_dir: &Path, history: &[HistoryEntry]) {
    let path = store_dir.join("history.json");
    let json = serde_json::to_string_pretty(&history).unwrap_or_else(|_| "[]".to_string());
    std::fs::write(&path, json).ok();
}

/// Records a visit, updating an existing entry or creating a new one.
/// Evicts the lowest-frecency entry if the list exceeds MAX_HISTORY.
pub fn record_visit(history: &mut Vec<HistoryEntry>, term: &str, kind: VisitKind) {
    let now = now_ms();

    if let Some(entry) = history
        .iter_mut()
        .find(|e| e.term == term && e.kind == kind)
    {
        entry.count += 1;
        entry.last_visit = now;
    } else {
        history.push(HistoryEntry {
            term: term.to_string(),
            kind,
            last_visit: now,
            count: 1,
        });
    }

    if history.len() > MAX_HISTORY {
        if let Some((min_idx, _)) = history.iter().enumerate().min_by(|(_, a), (_, b)| {
            let score_a = frecency_score(a.count, a.last_visit, now);
            let score_b = frecency_score(b.count, b.last_visit, now);
            score_a
                .partial_cmp(&score_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            history.remove(min_idx);
        }
    }
}

/// Calculates a frecency (frequency + recency) score for a history entry.
/// Higher scores indicate more frequently and recently visited terms.
pub fn frecency_score(count: u32, last_visit_ms: u64, now_ms: u64) -> f64 {
    let age_in_days =
        (now_ms.saturating_sub(last_visit_ms)) as f64 / (1000.0 * 60.0 * 60.0 * 24.0);
    let halflife = 14.0;
    let frequency_score = ((count + 1) as f64).log2() + 1.0;
    frequency_score * (0.5_f64).powf(age_in_days / halflife)
}

/// Returns the current time in milliseconds since UNIX epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
