use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use markdown_toc_config::{Config, ConfigError, ConfigSourceKind, LoadOptions};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    let mut file = fs::File::create(path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.toc.title, "Table of contents");
    assert_eq!(config.toc.max_depth, 3);
    assert_eq!(config.toc.indent_width, 4);
    assert_eq!(config.discovery.pattern.original(), "*.md");
    assert_eq!(config.discovery.output, None);
    assert_eq!(config.sources.working_directory, working_dir);
    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn applies_precedence_and_merges_fields() {
    let temp = TempDir::new().expect("tempdir");
    let git_root = canonical(temp.path());
    fs::create_dir(git_root.join(".git")).expect("create .git");

    write_file(
        git_root.join(".markdown-toc.toml"),
        r#"
        [toc]
        title = "Root contents"
        max_depth = 5

        [discovery]
        pattern = "**/*.markdown"
        "#,
    );

    let workspace = git_root.join("workspace");
    fs::create_dir(&workspace).expect("create workspace");

    write_file(
        workspace.join(".markdown-toc.toml"),
        r#"
        [toc]
        title = "Workspace contents"
        indent_width = 2

        [discovery]
        output = "TOC.md"
        "#,
    );

    let override_path = workspace.join("override.toml");
    write_file(
        &override_path,
        r#"
        [toc]
        max_depth = 2
        "#,
    );

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&workspace)
            .with_override_path(&override_path),
    )
    .expect("load config with precedence");

    assert_eq!(config.toc.title, "Workspace contents");
    assert_eq!(config.toc.max_depth, 2);
    assert_eq!(config.toc.indent_width, 2);
    assert_eq!(config.discovery.pattern.original(), "**/*.markdown");
    assert_eq!(
        config.discovery.output,
        Some(canonical(&workspace).join("TOC.md"))
    );

    let kinds: Vec<_> = config.sources.layers.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local,
            ConfigSourceKind::Override,
        ]
    );
}

#[test]
fn missing_override_is_reported() {
    let temp = TempDir::new().expect("tempdir");

    let err = Config::load(
        LoadOptions::default()
            .with_working_dir(temp.path())
            .with_override_path("nope.toml"),
    )
    .expect_err("override must exist");

    assert!(matches!(err, ConfigError::OverrideNotFound { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir");
    write_file(temp.path().join(".markdown-toc.toml"), "[toc\ntitle = 1");

    let err = Config::load(LoadOptions::default().with_working_dir(temp.path()))
        .expect_err("parse failure");

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn validation_reports_every_problem_with_provenance() {
    let temp = TempDir::new().expect("tempdir");
    write_file(
        temp.path().join(".markdown-toc.toml"),
        r#"
        [toc]
        max_depth = 0
        indent_width = -1
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(temp.path()))
        .expect_err("validation failure");

    let errors = match err {
        ConfigError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    let rendered = errors.to_string();
    assert_eq!(errors.iter().count(), 2);
    assert!(rendered.contains("toc.max_depth must be at least 1 (received 0)"));
    assert!(rendered.contains("toc.indent_width must be at least 1 (received -1)"));
    assert!(rendered.contains("local config at"));
}
