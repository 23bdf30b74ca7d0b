use std::env;
use std::path::{Path, PathBuf};

use log::{debug, info};
use markdown_toc_config::TocConfig;
use serde::Serialize;

use crate::anchors::slugify;
use crate::discover::discover_sources;
use crate::error::{TocError, TocResult};
use crate::fs::write_output;
use crate::heading::{headings_from_path, HeadingLine};
use crate::paths::relative_link;

/// One rendered list item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub depth: usize,
    pub text: String,
    pub anchor: String,
    pub link: String,
    pub source: PathBuf,
}

impl TocEntry {
    fn new(heading: HeadingLine, source: &Path, file_link: Option<&str>) -> Self {
        let anchor = slugify(&heading.text);
        let link = match file_link {
            Some(file) => format!("./{file}#{anchor}"),
            None => format!("#{anchor}"),
        };
        TocEntry {
            depth: heading.depth,
            text: heading.text,
            anchor,
            link,
            source: source.to_path_buf(),
        }
    }

    /// Render as `"{indent}- [text](link)\n"`.
    pub fn render(&self, indent_width: usize) -> String {
        let indent = " ".repeat(indent_width * (self.depth - 1));
        format!("{indent}- [{}]({})\n", self.text, self.link)
    }
}

/// A table of contents over an ordered list of markdown sources.
///
/// Nothing is read until [`TableOfContents::render`] runs, and every render
/// rescans the sources.
#[derive(Clone, Debug)]
pub struct TableOfContents {
    sources: Vec<PathBuf>,
    config: TocConfig,
    base: Option<PathBuf>,
}

impl TableOfContents {
    /// Build a table over `sources` in the given order. Cross-file links are
    /// relative to the working directory at render time unless
    /// [`with_base`] is used.
    ///
    /// [`with_base`]: TableOfContents::with_base
    pub fn new(sources: Vec<PathBuf>, config: TocConfig) -> Self {
        TableOfContents {
            sources,
            config,
            base: None,
        }
    }

    /// Table for a single document; links are bare `#anchor` fragments.
    pub fn from_path(path: impl Into<PathBuf>, config: TocConfig) -> Self {
        Self::new(vec![path.into()], config)
    }

    /// Collect every file under `root` matching `pattern`, ordered by
    /// `sort_key`. Links are made relative to `root`.
    pub fn discover<F, K>(
        root: impl Into<PathBuf>,
        pattern: &str,
        config: TocConfig,
        sort_key: F,
    ) -> TocResult<Self>
    where
        F: Fn(&Path) -> K,
        K: Ord,
    {
        let root = root.into();
        let sources = discover_sources(&root, pattern, sort_key)?;
        debug!(
            "discovered {} source(s) under {} matching '{pattern}'",
            sources.len(),
            root.display()
        );
        Ok(Self::new(sources, config).with_base(root))
    }

    /// [`TableOfContents::discover`] rooted at the current working directory.
    pub fn from_cwd<F, K>(pattern: &str, config: TocConfig, sort_key: F) -> TocResult<Self>
    where
        F: Fn(&Path) -> K,
        K: Ord,
    {
        let root = working_directory()?;
        Self::discover(root, pattern, config, sort_key)
    }

    /// Resolve relative sources and cross-file links against `base`.
    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    pub fn has_multiple_sources(&self) -> bool {
        self.sources.len() > 1
    }

    /// Extract every entry in (source, line) order.
    pub fn entries(&self) -> TocResult<Vec<TocEntry>> {
        let link_base = if self.has_multiple_sources() {
            Some(match &self.base {
                Some(base) => base.clone(),
                None => working_directory()?,
            })
        } else {
            None
        };
        let mut entries = Vec::new();

        for source in &self.sources {
            let headings = match &self.base {
                Some(base) => headings_from_path(&base.join(source), self.config.max_depth)?,
                None => headings_from_path(source, self.config.max_depth)?,
            };
            let file_link = link_base
                .as_deref()
                .map(|base| relative_link(base, source));
            entries.extend(
                headings
                    .into_iter()
                    .map(|heading| TocEntry::new(heading, source, file_link.as_deref())),
            );
        }

        Ok(entries)
    }

    /// Render the title line followed by one list item per heading.
    pub fn render(&self) -> TocResult<String> {
        let mut content = format!("## {}\n", self.config.title);
        for entry in self.entries()? {
            content.push_str(&entry.render(self.config.indent_width));
        }
        Ok(content)
    }

    /// Alias for [`TableOfContents::render`].
    pub fn markdown(&self) -> TocResult<String> {
        self.render()
    }

    /// Render and write the result to `destination`, replacing its contents.
    pub fn save_to(&self, destination: impl AsRef<Path>) -> TocResult<()> {
        let destination = destination.as_ref();
        let markdown = self.render()?;
        write_output(destination, &markdown)?;
        info!("wrote table of contents to {}", destination.display());
        Ok(())
    }
}

fn working_directory() -> TocResult<PathBuf> {
    env::current_dir().map_err(|source| TocError::WorkingDirectory { source })
}
