use globset::{Glob, GlobSet, GlobSetBuilder};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::report_config::IngestOptions;

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat)?);
    }
    b.build()
}

/// Log files found under a log directory, split by format.
///
/// Both lists are sorted by path so every run folds files in the same order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveredLogs {
    pub json: Vec<PathBuf>,
    pub legacy: Vec<PathBuf>,
}

impl DiscoveredLogs {
    pub fn len(&self) -> usize {
        self.json.len() + self.legacy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.json.is_empty() && self.legacy.is_empty()
    }
}

/// Walks `root` and classifies every file against the ingest globs.
///
/// Globs are matched against the path relative to `root`, with `/` as the
/// separator. Exclusions win, then legacy patterns, then JSON patterns.
pub fn discover_logs(root: &Path, opts: &IngestOptions) -> Result<DiscoveredLogs, String> {
    if !root.is_dir() {
        return Err(format!("Log directory {root:?} does not exist"));
    }

    let json_set = build_globset(&opts.json_patterns)
        .map_err(|e| format!("Invalid json pattern: {e}"))?;
    let legacy_set = build_globset(&opts.legacy_patterns)
        .map_err(|e| format!("Invalid legacy pattern: {e}"))?;
    let exclude_set = build_globset(&opts.exclude_patterns)
        .map_err(|e| format!("Invalid exclude pattern: {e}"))?;

    let mut found = DiscoveredLogs::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative_slash_path(root, entry.path());
        if exclude_set.is_match(&rel) {
            tracing::debug!(path = %rel, "Excluded by pattern");
            continue;
        }
        if legacy_set.is_match(&rel) {
            found.legacy.push(entry.into_path());
        } else if json_set.is_match(&rel) {
            found.json.push(entry.into_path());
        }
    }

    found.json.sort();
    found.legacy.sort();
    Ok(found)
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
