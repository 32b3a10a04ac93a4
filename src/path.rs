//! Path segments and their normalization.

use std::fmt;

use crate::constants::PATH_DELIMITER;
use crate::encoding::{self, PATH_SEGMENT, SCHEMELESS_SEGMENT};

/// The path of a URI as a list of decoded segments.
///
/// "No path was ever set" and "the root path" are distinct states: `http://host`
/// has an [`Unset`](Path::Unset) path while `http://host/` has an
/// [`Empty`](Path::Empty) one.
///
/// A [`Segments`](Path::Segments) list is never empty and never consists of a
/// single empty segment (that is the root path). An empty final segment
/// represents a trailing slash.
///
/// # Examples
///
/// ```
/// use mutable_uri::Path;
///
/// let path = mutable_uri::normalize_root_path(vec![
///     String::new(),
///     "docs".to_string(),
///     String::new(),
/// ]);
/// assert_eq!(path.segments(), ["docs", ""]);
/// assert_eq!(path.to_string(), "/docs/");
///
/// assert_eq!(mutable_uri::normalize_root_path(vec![String::new(); 2]), Path::Empty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Path {
    /// No path was set
    #[default]
    Unset,
    /// The root path `/`
    Empty,
    /// One or more decoded segments
    Segments(Vec<String>),
}

/// How a path is written, which depends on the rest of the URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathForm {
    /// After an authority: every segment is preceded by `/`.
    Hierarchical,
    /// After `scheme:`: segments are joined without a leading `/`.
    Opaque,
    /// No scheme: like `Hierarchical` but `:` is escaped.
    Schemeless,
}

impl Path {
    /// Builds a path from segments, collapsing `[]` and `[""]` to the root path.
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        if segments.is_empty() || (segments.len() == 1 && segments[0].is_empty()) {
            Self::Empty
        } else {
            Self::Segments(segments)
        }
    }

    /// Returns the decoded segments; empty for [`Unset`](Path::Unset) and
    /// [`Empty`](Path::Empty).
    #[must_use]
    pub fn segments(&self) -> &[String] {
        match self {
            Self::Segments(segments) => segments,
            Self::Unset | Self::Empty => &[],
        }
    }

    /// Returns true if no path was set.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Appends segments verbatim. A trailing slash is replaced by the first
    /// appended segment, so `a/` + `b` yields `a/b`.
    pub(crate) fn append<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut segments = segments.into_iter().peekable();
        if segments.peek().is_none() {
            return;
        }

        let mut current = match std::mem::take(self) {
            Self::Segments(current) => current,
            Self::Unset | Self::Empty => Vec::new(),
        };
        if current.last().is_some_and(String::is_empty) {
            current.pop();
        }
        current.extend(segments);
        *self = Self::from_segments(current);
    }

    pub(crate) fn write_to<W: fmt::Write>(&self, out: &mut W, form: PathForm) -> fmt::Result {
        let segments = match self {
            Self::Unset => return Ok(()),
            Self::Empty => return out.write_char(PATH_DELIMITER),
            Self::Segments(segments) => segments,
        };

        let set = match form {
            PathForm::Schemeless => SCHEMELESS_SEGMENT,
            PathForm::Hierarchical | PathForm::Opaque => PATH_SEGMENT,
        };
        // An opaque path never starts with `/`; `scheme://` reads as an authority.
        let segments = match form {
            PathForm::Opaque => {
                let start = segments.iter().take_while(|s| s.is_empty()).count();
                &segments[start..]
            }
            PathForm::Hierarchical | PathForm::Schemeless => segments.as_slice(),
        };
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 || form != PathForm::Opaque {
                out.write_char(PATH_DELIMITER)?;
            }
            write!(out, "{}", encoding::encode(segment, set))?;
        }
        Ok(())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, PathForm::Hierarchical)
    }
}

/// Splits a raw, percent-encoded path on `/` and decodes every segment.
pub(crate) fn split_decoded(raw: &str) -> Vec<String> {
    raw.split(PATH_DELIMITER).map(encoding::decode).collect()
}

/// Drops the leading empty segment produced by a leading `/`.
///
/// A path of just `/` normalizes to [`Path::Empty`].
///
/// # Examples
///
/// ```
/// use mutable_uri::{normalize_root_path, Path};
///
/// let segments = vec![String::new(), "a".to_string(), "b".to_string()];
/// assert_eq!(normalize_root_path(segments).segments(), ["a", "b"]);
///
/// let relative = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(normalize_root_path(relative).segments(), ["a", "b"]);
/// ```
#[must_use]
pub fn normalize_root_path(mut segments: Vec<String>) -> Path {
    if segments.first().is_some_and(String::is_empty) {
        segments.remove(0);
    }
    Path::from_segments(segments)
}

/// Resolves `.` and `..` segments left to right.
///
/// `.` is dropped; `..` removes the previously retained segment, or is dropped
/// itself when nothing precedes it. The result contains neither, so applying
/// this function twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use mutable_uri::normalize_rels;
///
/// assert_eq!(normalize_rels(&["a", ".", "b", "..", "c"]), ["a", "c"]);
/// assert_eq!(normalize_rels(&["..", "a"]), ["a"]);
/// ```
#[must_use]
pub fn normalize_rels<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    let mut resolved: Vec<String> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment.as_ref() {
            "." => {}
            ".." => {
                resolved.pop();
            }
            other => resolved.push(other.to_string()),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(segments: &[&str]) -> Vec<String> {
        segments.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn root_path_drops_leading_empty_segment() {
        let path = normalize_root_path(strings(&["", "a", "b"]));
        assert_eq!(path, Path::Segments(strings(&["a", "b"])));
    }

    #[test]
    fn root_path_alone_is_empty() {
        assert_eq!(normalize_root_path(strings(&["", ""])), Path::Empty);
        assert_eq!(normalize_root_path(strings(&[""])), Path::Empty);
        assert_eq!(normalize_root_path(Vec::new()), Path::Empty);
    }

    #[test]
    fn root_path_keeps_trailing_slash() {
        let path = normalize_root_path(strings(&["", "a", ""]));
        assert_eq!(path.segments(), ["a", ""]);
    }

    #[test]
    fn rels_resolve_dots() {
        assert_eq!(normalize_rels(&["a", ".", "b", "..", "c"]), ["a", "c"]);
    }

    #[test]
    fn rels_drop_leading_parent() {
        assert_eq!(normalize_rels(&["..", "a"]), ["a"]);
        assert_eq!(normalize_rels(&["..", "..", ".."]), Vec::<String>::new());
    }

    #[test]
    fn rels_are_idempotent() {
        let once = normalize_rels(&["x", "..", "..", "y", ".", "z", ".."]);
        assert_eq!(normalize_rels(&once), once);
    }

    #[test]
    fn split_decodes_each_segment() {
        assert_eq!(split_decoded("a%2Fb/c%20d"), ["a/b", "c d"]);
        assert_eq!(split_decoded("/x"), ["", "x"]);
    }

    #[test]
    fn append_to_unset_creates_segments() {
        let mut path = Path::Unset;
        path.append(strings(&["a"]));
        assert_eq!(path.segments(), ["a"]);
    }

    #[test]
    fn append_replaces_trailing_slash() {
        let mut path = Path::Segments(strings(&["a", ""]));
        path.append(strings(&["b"]));
        assert_eq!(path.segments(), ["a", "b"]);
    }

    #[test]
    fn append_nothing_keeps_unset() {
        let mut path = Path::Unset;
        path.append(Vec::new());
        assert!(path.is_unset());
    }

    #[test]
    fn append_single_empty_segment_is_root() {
        let mut path = Path::Unset;
        path.append(strings(&[""]));
        assert_eq!(path, Path::Empty);
    }

    #[test]
    fn write_hierarchical() {
        let path = Path::Segments(strings(&["a b", "c/d", ""]));
        assert_eq!(path.to_string(), "/a%20b/c%2Fd/");
        assert_eq!(Path::Empty.to_string(), "/");
        assert_eq!(Path::Unset.to_string(), "");
    }

    #[test]
    fn write_opaque_has_no_leading_slash() {
        let path = Path::Segments(strings(&["+1-816-555-1212"]));
        let mut out = String::new();
        path.write_to(&mut out, PathForm::Opaque).unwrap();
        assert_eq!(out, "+1-816-555-1212");
    }

    #[test]
    fn write_opaque_skips_leading_empty_segments() {
        let path = Path::Segments(strings(&["", "", "x", "", "y"]));
        let mut out = String::new();
        path.write_to(&mut out, PathForm::Opaque).unwrap();
        assert_eq!(out, "x//y");
    }

    #[test]
    fn write_schemeless_escapes_colon() {
        let path = Path::Segments(strings(&["c:", "temp"]));
        let mut out = String::new();
        path.write_to(&mut out, PathForm::Schemeless).unwrap();
        assert_eq!(out, "/c%3A/temp");
    }
}
