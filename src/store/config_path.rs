use std::path::PathBuf;

/// Returns the config directory path for rove.
/// Checks `$XDG_CONFIG_HOME` first (cross-platform), then falls back to
/// platform-native config via `dirs::config_dir()`, then `~/.config`.
pub fn get_config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("rove")
}

/// Default location of the catalog file when none is given on the command line.
pub fn default_catalog_path() -> PathBuf {
    get_config_dir().join("catalog.json")
}

/// Returns the store directory for one catalog.
/// History is isolated per catalog under `~/.config/rove/catalogs/{catalog_id}/`.
pub fn get_catalog_dir(catalog_id: &str) -> PathBuf {
    get_config_dir().join("catalogs").join(catalog_id)
}

/// Ensures the per-catalog store directory exists, creating it if necessary.
/// Returns the directory path.
pub fn ensure_catalog_dir(catalog_id: &str) -> PathBuf {
    let dir = get_catalog_dir(catalog_id);
    std::fs::create_dir_all(&dir).ok();
    dir
}
