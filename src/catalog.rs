use crate::locator::Locator;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What a catalog entry points at. Mirrors the suggestion kinds the
/// omnibar distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    File,
    Channel,
}

/// One browsable piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub locator: Locator,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub kind: EntryKind,
}

/// Raw on-disk shape of an entry, keyed by locator in the catalog file.
///
/// Only fields the application uses are included; unknown fields are
/// silently ignored by serde.
#[derive(Debug, Deserialize)]
struct RawEntry {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    kind: EntryKind,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    name: Option<String>,
    entries: IndexMap<String, RawEntry>,
}

/// Errors while loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The browsable corpus: an ordered list of entries with locator lookup.
#[derive(Debug, Default)]
pub struct Catalog {
    pub name: String,
    pub path: PathBuf,
    entries: Vec<CatalogEntry>,
    by_locator: HashMap<Locator, usize>,
}

impl Catalog {
    /// An empty catalog; the browser still navigates and searches.
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Builds a catalog directly from entries, for callers that do not go
    /// through a file (mainly tests).
    pub fn from_entries(name: impl Into<String>, entries: Vec<CatalogEntry>) -> Self {
        let mut by_locator = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            by_locator.entry(entry.locator.clone()).or_insert(i);
        }
        Catalog {
            name: name.into(),
            path: PathBuf::new(),
            entries,
            by_locator,
        }
    }

    /// Load a catalog from a JSON file.
    ///
    /// Entries whose key does not parse as a locator are skipped rather
    /// than failing the whole load. File order is preserved.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&contents)?;

        let mut entries = Vec::with_capacity(file.entries.len());
        let mut by_locator = HashMap::new();
        for (key, raw) in file.entries {
            let Ok(locator) = key.parse::<Locator>() else {
                continue;
            };
            by_locator.entry(locator.clone()).or_insert(entries.len());
            entries.push(CatalogEntry {
                locator,
                title: raw.title,
                description: raw.description,
                tags: raw.tags,
                kind: raw.kind,
            });
        }

        let name = file.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "catalog".to_string())
        });

        Ok(Catalog {
            name,
            path: path.to_path_buf(),
            entries,
            by_locator,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, locator: &Locator) -> Option<&CatalogEntry> {
        self.by_locator.get(locator).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_preserves_file_order() {
        let file = write_catalog(
            r#"{
                "name": "demo",
                "entries": {
                    "rove://zebra": { "title": "Zebra" },
                    "rove://aardvark": { "title": "Aardvark" }
                }
            }"#,
        );

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.name, "demo");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].title, "Zebra");
        assert_eq!(catalog.entries()[1].title, "Aardvark");
    }

    #[test]
    fn test_invalid_locator_keys_are_skipped() {
        let file = write_catalog(
            r#"{
                "entries": {
                    "not a locator": { "title": "Bad" },
                    "rove://good": { "title": "Good" }
                }
            }"#,
        );

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].title, "Good");
    }

    #[test]
    fn test_lookup_by_normalized_locator() {
        let file = write_catalog(
            r#"{ "entries": { "rove://@nature/waterfall": { "title": "Waterfall", "kind": "file" } } }"#,
        );

        let catalog = Catalog::load(file.path()).unwrap();
        let loc = "rove://@Nature/Waterfall".parse().unwrap();
        let entry = catalog.get(&loc).unwrap();
        assert_eq!(entry.title, "Waterfall");
        assert_eq!(entry.kind, EntryKind::File);
    }

    #[test]
    fn test_missing_fields_default() {
        let file = write_catalog(r#"{ "entries": { "rove://thing": { "title": "Thing" } } }"#);

        let catalog = Catalog::load(file.path()).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.description, "");
        assert!(entry.tags.is_empty());
        assert_eq!(entry.kind, EntryKind::File);
    }

    #[test]
    fn test_name_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{ "entries": {} }"#).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.name, "library");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let file = write_catalog("not json");
        assert!(matches!(
            Catalog::load(file.path()),
            Err(CatalogError::Parse(_))
        ));
    }
}
