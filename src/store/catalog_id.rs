use sha2::{Digest, Sha256};
use std::path::Path;

/// Derives a stable identifier for a catalog from its path, so each
/// catalog keeps its own history. First 8 hex characters of SHA-256.
pub fn catalog_id(catalog_path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(catalog_path.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        digest[0], digest[1], digest[2], digest[3]
    )
}
