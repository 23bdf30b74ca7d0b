use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{TocError, TocResult};
use crate::line::read_lines;

pub const HEADING_MARKER: char = '#';

/// A source line recognised as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    /// Number of marker characters in the line, always within `1..=max_depth`.
    pub depth: usize,
    /// Line text with every marker removed and surrounding whitespace trimmed.
    pub text: String,
}

impl HeadingLine {
    /// Indentation level of the heading: zero for top-level headings.
    pub fn nesting(&self) -> usize {
        self.depth - 1
    }
}

/// Classify a single line.
///
/// The depth gate counts every `#` in the line, not only the leading run, so
/// `"# C# tips"` is a depth-2 heading with the text `"C tips"`.
pub fn detect_heading(line: &str, max_depth: usize) -> Option<HeadingLine> {
    if !line.starts_with(HEADING_MARKER) {
        return None;
    }

    let depth = line.matches(HEADING_MARKER).count();
    if depth > max_depth {
        return None;
    }

    let text = line.replace(HEADING_MARKER, "").trim().to_string();
    Some(HeadingLine { depth, text })
}

/// Collect headings from an already-open reader, in source order.
pub fn headings_from_reader<R: BufRead>(
    reader: &mut R,
    max_depth: usize,
) -> std::io::Result<Vec<HeadingLine>> {
    let lines = read_lines(reader)?;
    Ok(lines
        .iter()
        .filter_map(|line| detect_heading(line, max_depth))
        .collect())
}

/// Open `path`, scan it to the end and return its headings.
///
/// Every call reads the file afresh; the handle is released before returning.
pub fn headings_from_path(path: &Path, max_depth: usize) -> TocResult<Vec<HeadingLine>> {
    let unreadable = |source| TocError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let mut reader = BufReader::new(file);
    let headings = headings_from_reader(&mut reader, max_depth).map_err(unreadable)?;
    debug!(
        "found {} heading(s) in {}",
        headings.len(),
        path.display()
    );
    Ok(headings)
}
