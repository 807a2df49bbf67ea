//! Source discovery for the usage audit
//!
//! Resolves the scan root and walks it recursively, collecting files with
//! the configured source extensions. Unreadable directories and entries
//! are logged and skipped; discovery itself never fails the audit.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Resolve the directory the audit scans
///
/// Prefers `root/<source_dir>` when that is a directory, otherwise falls
/// back to `root` itself. No deeper candidates are probed.
pub fn resolve_scan_root(root: &Path, source_dir: &str) -> PathBuf {
    let preferred = root.join(source_dir);
    if preferred.is_dir() {
        preferred
    } else {
        root.to_path_buf()
    }
}

/// Collect source files under `root`, recursively
///
/// Only files whose extension appears in `extensions` are kept. The result
/// is sorted so audits visit files in a deterministic order.
pub fn collect_source_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, extensions, &mut files);
    files.sort();
    files
}

fn walk(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("failed to read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("failed to read entry under {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            walk(&path, extensions, files);
        } else if path.is_file() {
            if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
                if extensions.iter().any(|wanted| wanted == ext) {
                    files.push(path);
                }
            }
        }
    }
}
