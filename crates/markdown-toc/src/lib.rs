//! Generate a linked table of contents from the headings of one or more
//! markdown files.
//!
//! ```no_run
//! use markdown_toc::{TableOfContents, TocConfig};
//!
//! let toc = TableOfContents::from_path("README.md", TocConfig::default());
//! print!("{}", toc.render()?);
//! # Ok::<(), markdown_toc::TocError>(())
//! ```

mod anchors;
mod discover;
mod error;
mod fs;
mod heading;
mod line;
mod paths;
mod toc;

pub use anchors::slugify;
pub use discover::{default_sort_key, discover_sources};
pub use error::{ExitCode, TocError, TocResult};
pub use fs::write_output;
pub use heading::{detect_heading, headings_from_path, headings_from_reader, HeadingLine};
pub use markdown_toc_config::{
    TocConfig, DEFAULT_INDENT_WIDTH, DEFAULT_MAX_DEPTH, DEFAULT_PATTERN, DEFAULT_TITLE,
};
pub use paths::{encode_link_path, relative_link};
pub use toc::{TableOfContents, TocEntry};
