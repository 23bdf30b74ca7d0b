use std::path::{Component, Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left untouched inside a link path segment.
const LINK_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Build the `./relative/path` part of a cross-file link.
///
/// `source` is resolved against `base` when relative; each path segment is
/// percent-encoded and segments are joined with `/` regardless of platform.
pub fn relative_link(base: &Path, source: &Path) -> String {
    let absolute = normalize_path(base.join(source));
    let base = normalize_path(base.to_path_buf());
    let relative = relative_path(&base, &absolute).unwrap_or(absolute);
    encode_link_path(&relative)
}

/// Percent-encode a relative path for use in a markdown link target.
pub fn encode_link_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::ParentDir => Some("..".to_string()),
            other => Some(
                utf8_percent_encode(&other.as_os_str().to_string_lossy(), LINK_SEGMENT)
                    .to_string(),
            ),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonicalise `.` and `..` path segments without touching the filesystem.
///
/// A `..` with no named segment before it is kept, so relative paths that
/// climb above their starting point stay correct. `..` at a root is dropped.
pub fn normalize_path(path: PathBuf) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Compute a relative path from `from` to `to`. Returns `None` when the paths
/// reside on different filesystem roots (e.g., different Windows drives).
pub fn relative_path(from: &Path, to: &Path) -> Option<PathBuf> {
    let from_components: Vec<_> = from.components().collect();
    let to_components: Vec<_> = to.components().collect();

    if has_mismatched_prefix(&from_components, &to_components) {
        return None;
    }

    let mut common = 0usize;
    while common < from_components.len()
        && common < to_components.len()
        && components_equal(from_components[common], to_components[common])
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for component in from_components.iter().skip(common) {
        match component {
            Component::RootDir | Component::Prefix(_) => {}
            Component::CurDir => {}
            _ => result.push(".."),
        }
    }

    for component in to_components.iter().skip(common) {
        match component {
            Component::CurDir => {}
            _ => result.push(component.as_os_str()),
        }
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }

    Some(result)
}

fn has_mismatched_prefix(from: &[Component<'_>], to: &[Component<'_>]) -> bool {
    match (from.first(), to.first()) {
        (Some(Component::Prefix(fp)), Some(Component::Prefix(tp))) => fp.kind() != tp.kind(),
        (Some(Component::Prefix(_)), _) | (_, Some(Component::Prefix(_))) => true,
        _ => false,
    }
}

fn components_equal(a: Component<'_>, b: Component<'_>) -> bool {
    match (a, b) {
        (Component::Prefix(pa), Component::Prefix(pb)) => pa.kind() == pb.kind(),
        (Component::RootDir, Component::RootDir) => true,
        (Component::CurDir, Component::CurDir) => true,
        (Component::ParentDir, Component::ParentDir) => true,
        _ => a.as_os_str() == b.as_os_str(),
    }
}
