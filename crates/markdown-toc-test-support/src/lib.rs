//! Shared test harness utilities for markdown-toc crates.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use markdown_toc_config::TocConfig;

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    let mut file = fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    path
}

/// Baseline rendering options for tests.
pub fn test_config() -> TocConfig {
    TocConfig::default()
}
