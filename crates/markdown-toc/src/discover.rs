use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use log::debug;
use walkdir::WalkDir;

use crate::error::{TocError, TocResult};

/// Order discovered files by their path string.
pub fn default_sort_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Recursively collect files under `root` matching `pattern` at any depth,
/// ordered by `sort_key`.
///
/// The pattern is anchored to the end of the path relative to `root`: `a*.md`
/// matches `api.md` and `docs/api.md`, `docs/*.md` matches any `docs`
/// directory's direct children. `*` never crosses a separator.
pub fn discover_sources<F, K>(root: &Path, pattern: &str, sort_key: F) -> TocResult<Vec<PathBuf>>
where
    F: Fn(&Path) -> K,
    K: Ord,
{
    let anchored = if pattern.starts_with("**/") {
        pattern.to_string()
    } else {
        format!("**/{pattern}")
    };
    let matcher = GlobBuilder::new(&anchored)
        .literal_separator(true)
        .build()
        .map_err(|err| TocError::Discovery {
            root: root.to_path_buf(),
            message: format!("invalid pattern '{pattern}': {err}"),
        })?
        .compile_matcher();

    let mut sources = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|err| TocError::Discovery {
            root: root.to_path_buf(),
            message: err.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if matcher.is_match(relative) {
            debug!("discovered {}", entry.path().display());
            sources.push(entry.into_path());
        }
    }

    sources.sort_by_cached_key(|path| sort_key(path));
    Ok(sources)
}
