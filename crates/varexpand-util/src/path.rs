//! Separator-agnostic path helpers.
//!
//! Template values routinely carry paths written for a different host than the one doing the
//! expansion (a Windows toolchain path inside a Linux build, for example), so every helper here
//! treats both `/` and `\` as separators instead of going through [`std::path::Path`].

use std::borrow::Cow;
use std::path::MAIN_SEPARATOR;

fn is_separator(c: char) -> bool {
    matches!(c, '/' | '\\')
}

/// Split `path` at its last separator, returning `(directory, file)`.
///
/// # Example
///
/// ```
/// use varexpand_util::path::split_last_component;
/// assert_eq!(split_last_component("src/foo/bar.c"), (Some("src/foo"), "bar.c"));
/// assert_eq!(split_last_component("C:\\sdk\\gcc.exe"), (Some("C:\\sdk"), "gcc.exe"));
/// assert_eq!(split_last_component("bar.c"), (None, "bar.c"));
/// ```
pub fn split_last_component(path: &str) -> (Option<&str>, &str) {
    match path.rfind(is_separator) {
        // The separator is one byte wide either way
        Some(i) => (Some(&path[..i]), &path[i + 1..]),
        None => (None, path),
    }
}

/// The final component of `path`, extension included.
pub fn filename(path: &str) -> &str {
    split_last_component(path).1
}

/// The final component of `path` with its extension removed.
///
/// A leading dot does not start an extension, so `.profile` stays `.profile`.
pub fn basename(path: &str) -> &str {
    let file = filename(path);
    match file.rfind('.') {
        Some(0) | None => file,
        Some(i) => &file[..i],
    }
}

/// Everything before the final component of `path`.
///
/// Returns `"."` when there is no directory part, and the separator itself when the only
/// directory is the root.
pub fn dirname(path: &str) -> &str {
    match split_last_component(path) {
        (None, _) => ".",
        (Some(""), _) => &path[..1],
        (Some(dir), _) => dir,
    }
}

fn convert_separators(path: &str, to: char) -> Cow<'_, str> {
    if path.contains(|c: char| is_separator(c) && c != to) {
        Cow::Owned(
            path.chars()
                .map(|c| if is_separator(c) { to } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(path)
    }
}

pub fn to_forward_slashes(path: &str) -> Cow<'_, str> {
    convert_separators(path, '/')
}

pub fn to_backslashes(path: &str) -> Cow<'_, str> {
    convert_separators(path, '\\')
}

/// Convert every separator to the one used by the host running the expansion.
pub fn to_native(path: &str) -> Cow<'_, str> {
    convert_separators(path, MAIN_SEPARATOR)
}
