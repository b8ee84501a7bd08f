//! Sorted index of every path in the repository, used for glob expansion
//!
//! The tree is walked once per probe instance; every glob pattern is then
//! matched against the index. `.git/` is never indexed.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
struct IndexEntry {
    /// Forward-slash path relative to the repository root
    rel: String,
    is_dir: bool,
}

#[derive(Debug, Default)]
pub(super) struct FileIndex {
    entries: Vec<IndexEntry>,
}

impl FileIndex {
    pub(super) fn build(root: &Path) -> Self {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git");

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            entries.push(IndexEntry {
                rel,
                is_dir: entry.file_type().is_dir(),
            });
        }
        entries.sort_by(|a, b| a.rel.cmp(&b.rel));

        debug!("Indexed {} paths under {}", entries.len(), root.display());
        Self { entries }
    }

    /// Relative paths matching `pattern`, in sorted order.
    ///
    /// `*` never crosses a `/`; `**` spans any number of directories. A
    /// pattern ending in `/**` also matches the directory it names.
    pub(super) fn matches(&self, pattern: &str) -> Vec<String> {
        let Some(matcher) = compile(pattern) else {
            return Vec::new();
        };
        let dir_matcher = pattern.strip_suffix("/**").and_then(compile);

        self.entries
            .iter()
            .filter(|e| {
                matcher.is_match(&e.rel)
                    || (e.is_dir && dir_matcher.as_ref().is_some_and(|m| m.is_match(&e.rel)))
            })
            .map(|e| e.rel.clone())
            .collect()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn compile(pattern: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(pattern).literal_separator(true).build() {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            debug!("Invalid glob pattern '{}': {}", pattern, e);
            None
        }
    }
}
