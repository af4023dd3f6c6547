use crate::{RebrandError, Result};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "json", "md"];

pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".expo",
    "android",
    "ios",
    "build",
    "dist",
    ".next",
    "coverage",
    "__pycache__",
];

/// Finds the text files of a template tree that are eligible for rewriting
/// and scanning.
///
/// Excluded directories are pruned during the walk, so large dependency
/// caches are never descended into.
#[derive(Debug, Clone)]
pub struct FileEnumerator {
    extensions: HashSet<String>,
    excluded_dirs: HashSet<String>,
}

impl FileEnumerator {
    pub fn new() -> Self {
        Self::with_filters(DEFAULT_EXTENSIONS, DEFAULT_EXCLUDED_DIRS)
    }

    /// Build an enumerator from extension and directory lists.
    ///
    /// Extensions may be given with or without the leading dot and are
    /// compared case-insensitively.
    pub fn with_filters<E, D>(extensions: &[E], excluded_dirs: &[D]) -> Self
    where
        E: AsRef<str>,
        D: AsRef<str>,
    {
        Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            excluded_dirs: excluded_dirs.iter().map(|d| d.as_ref().to_string()).collect(),
        }
    }

    /// Root-relative paths of all allowed files under `root`, sorted
    pub fn find_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(RebrandError::NotFound(format!("Root directory {}", root.display())));
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() || !entry.path().is_file() {
                continue;
            }

            if !self.has_allowed_extension(entry.path()) {
                continue;
            }

            match entry.path().strip_prefix(root) {
                Ok(relative) => files.push(relative.to_path_buf()),
                Err(_) => warn!("Entry {} is outside {}", entry.path().display(), root.display()),
            }
        }

        // Sort for consistent ordering across platforms
        files.sort();
        debug!(root = %root.display(), count = files.len(), "Enumerated files");
        Ok(files)
    }

    pub fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .map(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        // The root itself is never pruned, whatever its name
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.excluded_dirs.contains(name))
                .unwrap_or(false)
    }
}

impl Default for FileEnumerator {
    fn default() -> Self {
        Self::new()
    }
}
