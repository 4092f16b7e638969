use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use crate::config::schema::TreeRules;

/// Replace every occurrence of `token` in one path segment.
pub fn substitute_token(segment: &str, token: &str, value: &str) -> String {
    if token.is_empty() {
        return segment.to_string();
    }
    segment.replace(token, value)
}

/// Whether a file name carries the template marker.
///
/// A file named exactly like the suffix (e.g. `.hbs`) is a dotfile, not a template.
/// Works on the raw name so non-UTF-8 names are classified like any other.
pub fn is_template_marked(file_name: &OsStr, suffix: &str) -> bool {
    let name = file_name.as_encoded_bytes();
    !suffix.is_empty() && name.len() > suffix.len() && name.ends_with(suffix.as_bytes())
}

fn strip_marker_suffix<'a>(file_name: &'a OsStr, suffix: &str) -> &'a OsStr {
    if !is_template_marked(file_name, suffix) {
        return file_name;
    }
    let name = file_name.as_encoded_bytes();
    let stem = &name[..name.len() - suffix.len()];
    // SAFETY: `stem` is `file_name` split immediately before a valid UTF-8 substring.
    unsafe { OsStr::from_encoded_bytes_unchecked(stem) }
}

/// Compute the output path for a template entry relative to the destination root.
///
/// The token is replaced in every segment; when `strip_marker` is set, the marker
/// suffix is removed from the final segment. Token replacement skips segments
/// that are not valid UTF-8.
pub fn destination_path(
    relative: &Path,
    rules: &TreeRules,
    project_name: &str,
    strip_marker: bool,
) -> PathBuf {
    let segments: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    let last = segments.len().saturating_sub(1);

    let mut rendered = PathBuf::new();
    for (i, part) in segments.into_iter().enumerate() {
        let part = if strip_marker && i == last {
            strip_marker_suffix(part, &rules.marker_suffix)
        } else {
            part
        };

        match part.to_str() {
            Some(name) => rendered.push(substitute_token(name, &rules.token, project_name)),
            None => rendered.push(OsString::from(part)),
        }
    }
    rendered
}
