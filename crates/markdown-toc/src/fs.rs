use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::Builder;

use crate::error::{TocError, TocResult};

/// Replace the contents of `path` with `contents`.
///
/// The text is staged in a temporary file beside the destination and renamed
/// into place, so readers never observe a partially written table. The parent
/// directory must already exist. An existing destination keeps its mode.
pub fn write_output(path: &Path, contents: &str) -> TocResult<()> {
    let unwritable = |source| TocError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let mut staged = Builder::new()
        .prefix(".markdown-toc")
        .suffix(".tmp")
        .tempfile_in(staging_dir(path))
        .map_err(unwritable)?;
    staged.write_all(contents.as_bytes()).map_err(unwritable)?;
    staged.as_file().sync_all().map_err(unwritable)?;

    carry_permissions(path, staged.path());

    staged
        .persist(path)
        .map(|_| ())
        .map_err(|err| unwritable(err.error))
}

fn staging_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn carry_permissions(destination: &Path, staged: &Path) {
    if let Ok(metadata) = fs::metadata(destination) {
        if let Err(err) = fs::set_permissions(staged, metadata.permissions()) {
            debug!(
                "keeping default permissions for {}: {err}",
                destination.display()
            );
        }
    }
}

#[cfg(not(unix))]
fn carry_permissions(_destination: &Path, _staged: &Path) {}
