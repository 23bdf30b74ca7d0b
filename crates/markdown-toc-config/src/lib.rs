//! Configuration primitives and loader for markdown-toc.
//!
//! Settings are resolved by layering, lowest precedence first:
//! built-in defaults → git root → working directory → override file.
//! Every key merges independently, so a local file that only sets `title`
//! still inherits `max_depth` from the layers below it.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::Glob;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".markdown-toc.toml";

/// Title written above the generated list.
pub const DEFAULT_TITLE: &str = "Table of contents";
/// Deepest heading level included in the table.
pub const DEFAULT_MAX_DEPTH: usize = 3;
/// Spaces of indentation per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;
/// Filename glob used when sources are discovered rather than listed.
pub const DEFAULT_PATTERN: &str = "*.md";

/// Rendering options for a table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocConfig {
    pub title: String,
    pub max_depth: usize,
    pub indent_width: usize,
}

impl TocConfig {
    pub fn new(title: impl Into<String>, max_depth: usize) -> Self {
        TocConfig {
            title: title.into(),
            max_depth,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        TocConfig::new(DEFAULT_TITLE, DEFAULT_MAX_DEPTH)
    }
}

/// Settings used when sources are discovered from a directory.
#[derive(Clone, Debug)]
pub struct DiscoverySettings {
    pub pattern: Pattern,
    pub output: Option<PathBuf>,
}

/// Glob pattern plus its original text.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    glob: Glob,
}

impl Pattern {
    /// Compile `value` as a glob.
    pub fn parse(value: impl Into<String>) -> Result<Self, globset::Error> {
        let original = value.into();
        let glob = Glob::new(&original)?;
        Ok(Pattern { original, glob })
    }

    fn located(source: ConfigSource, value: String) -> Result<Self, ConfigValidationError> {
        Pattern::parse(value.clone()).map_err(|err| {
            ConfigValidationError::new(
                Some(source),
                format!("invalid glob pattern '{value}': {err}"),
            )
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn glob(&self) -> &Glob {
        &self.glob
    }
}

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub toc: TocConfig,
    pub discovery: DiscoverySettings,
    pub sources: ConfigSources,
}

impl Default for Config {
    /// Built-in defaults only; nothing is read from disk.
    fn default() -> Self {
        let working_directory = PathBuf::from(".");
        let glob = Glob::new(DEFAULT_PATTERN).unwrap_or_else(|err| {
            panic!("built-in pattern {DEFAULT_PATTERN} must compile: {err}");
        });
        Config {
            toc: TocConfig::default(),
            discovery: DiscoverySettings {
                pattern: Pattern {
                    original: DEFAULT_PATTERN.to_string(),
                    glob,
                },
                output: None,
            },
            sources: ConfigSources {
                layers: vec![ConfigSource::default(working_directory.clone())],
                working_directory,
            },
        }
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let (toc, discovery) = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            toc,
            discovery,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    PartialConfig {
        title: Some(Located::new(DEFAULT_TITLE.into(), source.clone())),
        max_depth: Some(Located::new(DEFAULT_MAX_DEPTH as i64, source.clone())),
        indent_width: Some(Located::new(DEFAULT_INDENT_WIDTH as i64, source.clone())),
        pattern: Some(Located::new(DEFAULT_PATTERN.into(), source)),
        output: None,
    }
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    title: Option<Located<String>>,
    max_depth: Option<Located<i64>>,
    indent_width: Option<Located<i64>>,
    pattern: Option<Located<String>>,
    output: Option<Located<PathBuf>>,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.indent_width.is_some() {
            self.indent_width = other.indent_width;
        }
        if other.pattern.is_some() {
            self.pattern = other.pattern;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
    }

    fn finalize(self) -> Result<(TocConfig, DiscoverySettings), ConfigValidationErrors> {
        let mut errors = Vec::new();
        let fallback = || ConfigSource::default(PathBuf::from("."));

        let title = self
            .title
            .map(|located| located.value)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let max_depth = positive(
            self.max_depth
                .unwrap_or_else(|| Located::new(DEFAULT_MAX_DEPTH as i64, fallback())),
            "toc.max_depth",
            &mut errors,
        );
        let indent_width = positive(
            self.indent_width
                .unwrap_or_else(|| Located::new(DEFAULT_INDENT_WIDTH as i64, fallback())),
            "toc.indent_width",
            &mut errors,
        );

        let pattern_loc = self
            .pattern
            .unwrap_or_else(|| Located::new(DEFAULT_PATTERN.into(), fallback()));
        let pattern = match Pattern::located(pattern_loc.source, pattern_loc.value) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                errors.push(err.with_context("discovery.pattern"));
                None
            }
        };

        let output = self.output.as_ref().map(resolve_path);

        match pattern {
            Some(pattern) if errors.is_empty() => Ok((
                TocConfig {
                    title,
                    max_depth,
                    indent_width,
                },
                DiscoverySettings { pattern, output },
            )),
            _ => Err(ConfigValidationErrors(errors)),
        }
    }
}

fn positive(located: Located<i64>, key: &str, errors: &mut Vec<ConfigValidationError>) -> usize {
    if located.value < 1 {
        errors.push(ConfigValidationError::new(
            Some(located.source),
            format!("{key} must be at least 1 (received {})", located.value),
        ));
        return 0;
    }
    located.value as usize
}

fn resolve_path(located: &Located<PathBuf>) -> PathBuf {
    let path = &located.value;
    if path.is_absolute() {
        path.clone()
    } else {
        located.source.base_dir.join(path)
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    toc: Option<RawToc>,
    #[serde(default)]
    discovery: Option<RawDiscovery>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        let mut partial = PartialConfig::default();
        if let Some(toc) = self.toc {
            partial.title = toc.title.map(|value| Located::new(value, source.clone()));
            partial.max_depth = toc
                .max_depth
                .map(|value| Located::new(value, source.clone()));
            partial.indent_width = toc
                .indent_width
                .map(|value| Located::new(value, source.clone()));
        }
        if let Some(discovery) = self.discovery {
            partial.pattern = discovery
                .pattern
                .map(|value| Located::new(value, source.clone()));
            partial.output = discovery
                .output
                .map(|value| Located::new(value, source.clone()));
        }
        partial
    }
}

#[derive(Debug, Deserialize)]
struct RawToc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    max_depth: Option<i64>,
    #[serde(default)]
    indent_width: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawDiscovery {
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.toc.title, DEFAULT_TITLE);
        assert_eq!(config.toc.max_depth, 3);
        assert_eq!(config.toc.indent_width, 4);
        assert_eq!(config.discovery.pattern.original(), "*.md");
        assert!(config.discovery.output.is_none());
    }

    #[test]
    fn rejects_zero_depth_and_bad_glob_together() {
        let source = ConfigSource::default(PathBuf::from("."));
        let mut merged = defaults_layer(source.clone());
        merged.merge(PartialConfig {
            max_depth: Some(Located::new(0, source.clone())),
            pattern: Some(Located::new("[".into(), source)),
            ..PartialConfig::default()
        });

        let errors = merged.finalize().expect_err("validation must fail");
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(messages.len(), 2, "{messages:?}");
        assert!(messages[0].contains("toc.max_depth must be at least 1"));
        assert!(messages[1].starts_with("discovery.pattern: invalid glob pattern '['"));
    }
}
