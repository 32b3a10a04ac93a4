//! Immutable URI value.

use std::fmt;
use std::str::FromStr;

use crate::builder::MutableUri;
use crate::components::Components;
use crate::error::ParseError;
use crate::path::Path;
use crate::query::QueryParams;

/// A URI whose components can no longer change.
///
/// Components are stored decoded; the serialized, percent-encoded form is
/// computed once on construction. Create one by parsing, or by freezing a
/// [`MutableUri`] with [`MutableUri::immutable`].
///
/// # Structure
///
/// ```text
/// scheme://[userinfo@]host[:port][/path][?query][#fragment]
/// scheme:opaque-path[?query][#fragment]
/// path[?query][#fragment]
/// ```
///
/// # Examples
///
/// ```
/// use mutable_uri::Uri;
///
/// let uri = Uri::parse("https://user@host:8080/path?x=1&x=2#frag").unwrap();
/// assert_eq!(uri.scheme(), Some("https"));
/// assert!(uri.has_authority());
/// assert_eq!(uri.user_info(), Some("user"));
/// assert_eq!(uri.host(), Some("host"));
/// assert_eq!(uri.port(), Some(8080));
/// assert_eq!(uri.path_segments(), ["path"]);
/// assert_eq!(uri.query_first("x"), Some("1"));
/// assert_eq!(uri.fragment(), Some("frag"));
///
/// // Opaque form
/// let uri = Uri::parse("tel:+1-816-555-1212").unwrap();
/// assert!(!uri.has_authority());
/// assert_eq!(uri.path_segments(), ["+1-816-555-1212"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    parts: Components,
    /// Serialized string representation
    serialized: String,
}

impl Uri {
    /// Parses a URI string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` under the same conditions as [`MutableUri::parse`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        MutableUri::parse(input).map(Self::from)
    }

    pub(crate) fn from_parts(parts: Components) -> Self {
        let serialized = parts.to_string();
        Self { parts, serialized }
    }

    /// Returns a builder initialized with a copy of these components.
    #[must_use]
    pub fn mutable(&self) -> MutableUri {
        MutableUri::from_parts(self.parts.clone())
    }

    /// Converts into a builder without copying.
    #[must_use]
    pub fn into_mutable(self) -> MutableUri {
        MutableUri::from_parts(self.parts)
    }

    /// Returns the scheme, without `:` or `://`.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.parts.scheme.as_deref()
    }

    /// Returns true if the URI was written with `//`, even when the authority
    /// itself is empty (`file:///etc/hosts`).
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.parts.has_authority
    }

    /// Returns the decoded userinfo.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.parts.user_info.as_deref()
    }

    /// Returns the host. IP literals keep their brackets.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.parts.host.as_deref()
    }

    /// Returns the port. It is never derived from the scheme.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.parts.port
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the decoded path segments.
    #[must_use]
    pub fn path_segments(&self) -> &[String] {
        self.parts.path.segments()
    }

    /// Returns the path as written in the URI.
    #[must_use]
    pub fn path_str(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.parts.path.write_to(&mut out, self.parts.path_form());
        out
    }

    /// Returns the query parameters, if a query is present.
    #[must_use]
    pub const fn query(&self) -> Option<&QueryParams> {
        self.parts.query.as_ref()
    }

    /// Returns the query as written in the URI, without `?`.
    #[must_use]
    pub fn query_str(&self) -> Option<String> {
        self.parts.query.as_ref().map(ToString::to_string)
    }

    /// Returns every value of query key `name`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mutable_uri::Uri;
    ///
    /// let uri = Uri::parse("/search?tag=a&flag&tag=b").unwrap();
    /// assert_eq!(
    ///     uri.query_all("tag"),
    ///     Some(&[Some("a".to_string()), Some("b".to_string())][..])
    /// );
    /// assert_eq!(uri.query_all("flag"), Some(&[None][..]));
    /// assert_eq!(uri.query_all("missing"), None);
    /// ```
    #[must_use]
    pub fn query_all(&self, name: &str) -> Option<&[Option<String>]> {
        self.parts.query.as_ref()?.get_all(name)
    }

    /// Returns the first value of query key `name`.
    #[must_use]
    pub fn query_first(&self, name: &str) -> Option<&str> {
        self.parts.query.as_ref()?.get_first(name)
    }

    /// Projects the query to its first value per key, keeping key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mutable_uri::Uri;
    ///
    /// let uri = Uri::parse("http://h/?z=1&a=2&z=3").unwrap();
    /// assert_eq!(uri.query_first_map(), [("z", "1"), ("a", "2")]);
    /// ```
    #[must_use]
    pub fn query_first_map(&self) -> Vec<(&str, &str)> {
        self.parts
            .query
            .as_ref()
            .map(QueryParams::first_map)
            .unwrap_or_default()
    }

    /// Returns the decoded fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.parts.fragment.as_deref()
    }

    /// Returns the serialized URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }
}

impl From<MutableUri> for Uri {
    fn from(builder: MutableUri) -> Self {
        Self::from_parts(builder.into_parts())
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.serialized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_as_string() {
        let uri = Uri::parse("http://h/a%20b?x=1").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, r#""http://h/a%20b?x=1""#);
    }

    #[test]
    fn deserializes_from_string() {
        let uri: Uri = serde_json::from_str(r#""tel:+1-816-555-1212""#).unwrap();
        assert_eq!(uri.scheme(), Some("tel"));

        let builder: MutableUri = serde_json::from_str(r#""/a/b""#).unwrap();
        assert_eq!(builder.get_path().segments(), ["a", "b"]);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let result: Result<Uri, _> = serde_json::from_str(r#""http://h:port/""#);
        assert!(result.is_err());
    }
}
