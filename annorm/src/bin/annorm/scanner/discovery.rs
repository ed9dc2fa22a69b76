//! File discovery for finding Rust files containing Entity derives.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovered entity file with basic metadata
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to project root
    pub relative_path: String,
}

/// Discover all Rust files that might contain Entity derives.
///
/// Walks the given directories and finds .rs files that mention `Entity`.
pub fn discover_entities(project_root: &Path, search_dirs: &[PathBuf]) -> Result<Vec<DiscoveredFile>> {
    let mut discovered = Vec::new();

    for search_path in search_dirs {
        if !search_path.exists() {
            log::debug!("skipping missing scan directory {}", search_path.display());
            continue;
        }

        for entry in WalkDir::new(search_path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            // Skip non-Rust files
            if path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }

            // Skip hidden files and build output
            let relative = path.strip_prefix(project_root).unwrap_or(path);
            if relative.components().any(|c| {
                let part = c.as_os_str().to_string_lossy();
                part.starts_with('.') || part == "target"
            }) {
                continue;
            }

            if file_mentions_entity(path)? {
                discovered.push(DiscoveredFile {
                    path: path.to_path_buf(),
                    relative_path: relative.to_string_lossy().to_string(),
                });
            }
        }
    }

    // Sort by relative path for consistent ordering
    discovered.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    discovered.dedup_by(|a, b| a.relative_path == b.relative_path);

    Ok(discovered)
}

/// Quick text check before doing full parsing.
fn file_mentions_entity(path: &Path) -> Result<bool> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(content.contains("Entity"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_rust_files_mentioning_entity() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(src.join("models")).unwrap();
        std::fs::create_dir_all(src.join(".hidden")).unwrap();
        std::fs::write(src.join("models").join("guestbook.rs"), "#[derive(Entity)] struct A {}").unwrap();
        std::fs::write(src.join("lib.rs"), "pub mod models;").unwrap();
        std::fs::write(src.join("notes.txt"), "Entity").unwrap();
        std::fs::write(src.join(".hidden").join("x.rs"), "#[derive(Entity)] struct B {}").unwrap();

        let found = discover_entities(dir.path(), &[src, dir.path().join("missing")]).unwrap();
        let paths: Vec<_> = found.iter().map(|f| f.relative_path.replace('\\', "/")).collect();
        assert_eq!(paths, vec!["src/models/guestbook.rs"]);
    }
}
