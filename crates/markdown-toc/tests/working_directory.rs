// Kept in its own test binary: it changes the process working directory.
#![cfg(target_os = "linux")]

use std::env;

use markdown_toc::{default_sort_key, ExitCode, TableOfContents, TocError};
use markdown_toc_test_support::{test_config, write_file};
use tempfile::TempDir;

#[test]
fn vanished_working_directory_is_an_error() {
    let sources = TempDir::new().expect("tempdir");
    let a = write_file(sources.path(), "a.md", "# A\n");
    let b = write_file(sources.path(), "b.md", "# B\n");

    let doomed = TempDir::new().expect("tempdir");
    let restore = TempDir::new().expect("tempdir");
    env::set_current_dir(doomed.path()).expect("enter doomed dir");
    let doomed_path = doomed.path().to_path_buf();
    drop(doomed);

    let discovered = TableOfContents::from_cwd("*.md", test_config(), default_sort_key);
    let rendered = TableOfContents::new(vec![a.clone(), b.clone()], test_config()).render();
    let with_base = TableOfContents::new(vec![a, b], test_config())
        .with_base(sources.path())
        .render();

    env::set_current_dir(restore.path()).expect("leave doomed dir");
    assert!(!doomed_path.exists());

    let err = discovered.expect_err("discovery without a working directory");
    assert!(matches!(err, TocError::WorkingDirectory { .. }));
    assert_eq!(err.exit_code(), ExitCode::Discovery);

    let err = rendered.expect_err("links need a working directory");
    assert!(matches!(err, TocError::WorkingDirectory { .. }));

    assert_eq!(
        with_base.expect("explicit base needs no working directory"),
        "## Table of contents\n- [A](./a.md#a)\n- [B](./b.md#b)\n"
    );
}
