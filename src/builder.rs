//! Mutable builder and parser for [`Uri`] values.

use std::fmt;
use std::str::FromStr;

use crate::components::Components;
use crate::constants::PATH_DELIMITER;
use crate::error::{ArgumentError, ParseError};
use crate::log;
use crate::parser;
use crate::path::{self, Path};
use crate::query::{IntoQueryValues, QueryParams};
use crate::uri::Uri;

/// A URI under construction.
///
/// `MutableUri` holds the same decoded components as [`Uri`] and can be
/// changed freely through `&mut self` setters that chain. Call
/// [`immutable`](Self::immutable) to take a snapshot; later changes to the
/// builder do not affect snapshots already taken.
///
/// Setters use the component name; getters are prefixed with `get_`.
///
/// # Examples
///
/// Building from scratch:
///
/// ```
/// use mutable_uri::MutableUri;
///
/// let mut builder = MutableUri::new();
/// builder
///     .scheme("https")
///     .host("example.com")
///     .path("/api/v1")
///     .rel("users/42")
///     .query("expand", "groups")
///     .query("expand", "roles");
///
/// assert_eq!(
///     builder.to_string(),
///     "https://example.com/api/v1/users%2F42?expand=groups&expand=roles"
/// );
/// ```
///
/// Editing a parsed URI:
///
/// ```
/// use mutable_uri::MutableUri;
///
/// let mut builder = MutableUri::parse("http://localhost:8080/a/b?page=1").unwrap();
/// builder.port(9090).path("../c").normalize().set_query("page", "2");
///
/// let uri = builder.immutable();
/// assert_eq!(uri.as_str(), "http://localhost:9090/a/c?page=2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutableUri {
    parts: Components,
}

impl MutableUri {
    /// Creates an empty builder. It serializes to the empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URI string.
    ///
    /// The scanner recognizes `scheme://authority`, `scheme:opaque` and
    /// schemeless forms, then an optional path, `?query` and `#fragment`.
    /// All components are percent-decoded.
    ///
    /// Neither `://` nor a bare `:` is looked for past the first `?` or `#`,
    /// so `/search?next=http://h` is a schemeless path with a query.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The port is not a base-10 number in range
    /// - An IP literal host has no closing `]`, or is followed by anything
    ///   other than `:port`
    /// - A query pair contains more than one `=`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match parser::parse(input) {
            Ok(parts) => {
                log::trace!("parsed URI {input:?} into {parts:?}");
                Ok(Self { parts })
            }
            Err(kind) => {
                log::debug!("rejected URI {input:?}: {kind}");
                Err(ParseError::new(input, kind))
            }
        }
    }

    pub(crate) const fn from_parts(parts: Components) -> Self {
        Self { parts }
    }

    pub(crate) fn into_parts(self) -> Components {
        self.parts
    }

    /// Returns a snapshot of the current components.
    #[must_use]
    pub fn immutable(&self) -> Uri {
        Uri::from_parts(self.parts.clone())
    }

    /// Returns a snapshot, rejecting components that cannot be written as a
    /// URI that parses back to them.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::AuthorityWithoutScheme` if userinfo, host or
    /// port is set but no scheme is.
    ///
    /// # Examples
    ///
    /// ```
    /// use mutable_uri::{ArgumentError, MutableUri};
    ///
    /// let mut builder = MutableUri::new();
    /// builder.host("example.com");
    /// assert!(matches!(
    ///     builder.try_immutable(),
    ///     Err(ArgumentError::AuthorityWithoutScheme { .. })
    /// ));
    ///
    /// builder.scheme("https");
    /// assert_eq!(builder.try_immutable().unwrap().as_str(), "https://example.com");
    /// ```
    pub fn try_immutable(&self) -> Result<Uri, ArgumentError> {
        if self.parts.has_authority && self.parts.scheme.is_none() {
            return Err(ArgumentError::AuthorityWithoutScheme {
                authority: self.parts.authority_string(),
            });
        }
        Ok(self.immutable())
    }

    /// Alias of [`immutable`](Self::immutable).
    #[must_use]
    pub fn to_uri(&self) -> Uri {
        self.immutable()
    }

    /// Returns the scheme.
    #[must_use]
    pub fn get_scheme(&self) -> Option<&str> {
        self.parts.scheme.as_deref()
    }

    /// Returns true if the URI is written with `//` and an authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.parts.has_authority
    }

    /// Returns the decoded userinfo.
    #[must_use]
    pub fn get_user_info(&self) -> Option<&str> {
        self.parts.user_info.as_deref()
    }

    /// Returns the host.
    #[must_use]
    pub fn get_host(&self) -> Option<&str> {
        self.parts.host.as_deref()
    }

    /// Returns the port.
    #[must_use]
    pub const fn get_port(&self) -> Option<u16> {
        self.parts.port
    }

    /// Returns the path.
    #[must_use]
    pub const fn get_path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query parameters, if a query is present.
    #[must_use]
    pub const fn get_query(&self) -> Option<&QueryParams> {
        self.parts.query.as_ref()
    }

    /// Returns every value of query key `name`.
    #[must_use]
    pub fn get_query_all(&self, name: &str) -> Option<&[Option<String>]> {
        self.parts.query.as_ref()?.get_all(name)
    }

    /// Returns the first value of query key `name`.
    #[must_use]
    pub fn get_query_first(&self, name: &str) -> Option<&str> {
        self.parts.query.as_ref()?.get_first(name)
    }

    /// Returns the decoded fragment.
    #[must_use]
    pub fn get_fragment(&self) -> Option<&str> {
        self.parts.fragment.as_deref()
    }

    /// Sets the scheme, stored verbatim.
    pub fn scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.parts.scheme = Some(scheme.into());
        self
    }

    /// Sets the scheme after checking that it can be read back.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidScheme`] if the scheme is empty or
    /// contains `:`, `/`, `?` or `#`.
    pub fn try_scheme(&mut self, scheme: &str) -> Result<&mut Self, ArgumentError> {
        if scheme.is_empty() {
            return Err(ArgumentError::InvalidScheme {
                scheme: scheme.to_string(),
                reason: "scheme cannot be empty",
            });
        }
        if scheme.contains([':', '/', '?', '#']) {
            return Err(ArgumentError::InvalidScheme {
                scheme: scheme.to_string(),
                reason: "scheme cannot contain ':', '/', '?' or '#'",
            });
        }
        Ok(self.scheme(scheme))
    }

    /// Removes the scheme.
    pub fn clear_scheme(&mut self) -> &mut Self {
        self.parts.scheme = None;
        self
    }

    /// Switches between the `scheme://authority` and `scheme:opaque` forms.
    ///
    /// Turning the authority off also clears userinfo, host and port.
    pub fn set_has_authority(&mut self, has_authority: bool) -> &mut Self {
        self.parts.has_authority = has_authority;
        if !has_authority {
            self.parts.user_info = None;
            self.parts.host = None;
            self.parts.port = None;
        }
        self
    }

    /// Sets the decoded userinfo and enables the authority.
    pub fn user_info(&mut self, user_info: impl Into<String>) -> &mut Self {
        self.parts.user_info = Some(user_info.into());
        self.parts.has_authority = true;
        self
    }

    /// Removes the userinfo.
    pub fn clear_user_info(&mut self) -> &mut Self {
        self.parts.user_info = None;
        self
    }

    /// Sets the host and enables the authority.
    ///
    /// A host wrapped in `[` and `]` is written verbatim; any other host is
    /// percent-encoded.
    pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
        self.parts.host = Some(host.into());
        self.parts.has_authority = true;
        self
    }

    /// Removes the host.
    pub fn clear_host(&mut self) -> &mut Self {
        self.parts.host = None;
        self
    }

    /// Sets the port and enables the authority.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.parts.port = Some(port);
        self.parts.has_authority = true;
        self
    }

    /// Parses and sets the port.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidPort`] if `port` is not a base-10
    /// number between 0 and 65535.
    pub fn try_port(&mut self, port: &str) -> Result<&mut Self, ArgumentError> {
        let value = port
            .parse::<u16>()
            .ok()
            .filter(|_| port.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| ArgumentError::InvalidPort {
                value: port.to_string(),
                reason: "port must be a base-10 number between 0 and 65535",
            })?;
        Ok(self.port(value))
    }

    /// Removes the port.
    pub fn clear_port(&mut self) -> &mut Self {
        self.parts.port = None;
        self
    }

    /// Sets or extends the path from raw, percent-encoded text.
    ///
    /// A path starting with `/` replaces the current path. Any other path is
    /// split on `/`, decoded and appended to the current one.
    ///
    /// ```
    /// use mutable_uri::MutableUri;
    ///
    /// let mut builder = MutableUri::parse("http://h/a/b").unwrap();
    /// builder.path("c%20d/e");
    /// assert_eq!(builder.get_path().segments(), ["a", "b", "c d", "e"]);
    ///
    /// builder.path("/x");
    /// assert_eq!(builder.get_path().segments(), ["x"]);
    /// ```
    pub fn path(&mut self, raw: &str) -> &mut Self {
        if raw.starts_with(PATH_DELIMITER) {
            self.parts.path = path::normalize_root_path(path::split_decoded(raw));
        } else if !raw.is_empty() {
            self.parts.path.append(path::split_decoded(raw));
        }
        self
    }

    /// Appends one literal segment.
    ///
    /// The segment is neither split nor decoded, so `/` and `%` inside it are
    /// escaped on serialization.
    pub fn rel(&mut self, segment: impl Into<String>) -> &mut Self {
        self.parts.path.append([segment.into()]);
        self
    }

    /// Appends several literal segments.
    pub fn rels<I, S>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts.path.append(segments.into_iter().map(Into::into));
        self
    }

    /// Removes the path.
    pub fn clear_path(&mut self) -> &mut Self {
        self.parts.path = Path::Unset;
        self
    }

    /// Resolves `.` and `..` segments in the current path.
    pub fn normalize(&mut self) -> &mut Self {
        if let Path::Segments(segments) = &self.parts.path {
            self.parts.path = Path::from_segments(path::normalize_rels(segments));
        }
        self
    }

    /// Adds a value under `name`, keeping existing values.
    pub fn query(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query_mut().append(name, Some(value.into()));
        self
    }

    /// Adds `name` without a value (`?name`).
    pub fn query_key(&mut self, name: impl Into<String>) -> &mut Self {
        self.query_mut().append(name, None);
        self
    }

    /// Replaces every value of `name` with `value`.
    pub fn set_query(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query_mut().set(name, vec![Some(value.into())]);
        self
    }

    /// Adds every entry; collection values add one occurrence per element.
    pub fn query_map<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoQueryValues,
    {
        let query = self.query_mut();
        for (name, value) in entries {
            let name = name.into();
            for value in value.into_query_values() {
                query.append(name.clone(), value);
            }
        }
        self
    }

    /// Replaces the values of every key in `entries`.
    pub fn set_query_map<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoQueryValues,
    {
        let query = self.query_mut();
        for (name, value) in entries {
            query.set(name, value.into_query_values());
        }
        self
    }

    /// Removes every value of `name`.
    pub fn remove_query(&mut self, name: &str) -> &mut Self {
        if let Some(query) = &mut self.parts.query {
            query.remove(name);
        }
        self
    }

    /// Removes the whole query, including the `?`.
    pub fn clear_query(&mut self) -> &mut Self {
        self.parts.query = None;
        self
    }

    /// Sets the decoded fragment.
    pub fn fragment(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.parts.fragment = Some(fragment.into());
        self
    }

    /// Removes the fragment, including the `#`.
    pub fn clear_fragment(&mut self) -> &mut Self {
        self.parts.fragment = None;
        self
    }

    fn query_mut(&mut self) -> &mut QueryParams {
        self.parts.query.get_or_insert_with(QueryParams::new)
    }
}

impl fmt::Display for MutableUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.parts, f)
    }
}

impl FromStr for MutableUri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MutableUri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Uri> for MutableUri {
    fn from(uri: Uri) -> Self {
        uri.into_mutable()
    }
}

impl From<&Uri> for MutableUri {
    fn from(uri: &Uri) -> Self {
        uri.mutable()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MutableUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MutableUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_empty_builder() {
        let builder = MutableUri::new();
        assert_eq!(builder.get_scheme(), None);
        assert!(!builder.has_authority());
        assert!(builder.get_path().is_unset());
        assert_eq!(builder.get_query(), None);
        assert_eq!(builder.to_string(), "");
    }

    #[test]
    fn build_from_scratch() {
        let mut builder = MutableUri::new();
        builder
            .scheme("https")
            .user_info("user")
            .host("host")
            .port(8080)
            .path("/path")
            .query("x", "1")
            .fragment("frag");
        assert_eq!(builder.to_string(), "https://user@host:8080/path?x=1#frag");
    }

    #[test]
    fn host_enables_authority() {
        let mut builder = MutableUri::new();
        builder.scheme("http").host("example.com");
        assert!(builder.has_authority());
        assert_eq!(builder.to_string(), "http://example.com");
    }

    #[test]
    fn dropping_authority_clears_it() {
        let mut builder = MutableUri::parse("http://user@host:1/x").unwrap();
        builder.set_has_authority(false);
        assert_eq!(builder.get_host(), None);
        assert_eq!(builder.get_user_info(), None);
        assert_eq!(builder.get_port(), None);
        assert_eq!(builder.to_string(), "http:x");
    }

    #[test]
    fn absolute_path_replaces() {
        let mut builder = MutableUri::parse("http://h/a/b").unwrap();
        builder.path("/c/");
        assert_eq!(builder.get_path().segments(), ["c", ""]);
        builder.path("/");
        assert_eq!(builder.get_path(), &Path::Empty);
        assert_eq!(builder.to_string(), "http://h/");
    }

    #[test]
    fn relative_path_appends_after_trailing_slash() {
        let mut builder = MutableUri::parse("http://h/a/").unwrap();
        builder.path("b/c");
        assert_eq!(builder.to_string(), "http://h/a/b/c");
    }

    #[test]
    fn rel_is_not_split_or_decoded() {
        let mut builder = MutableUri::parse("http://h").unwrap();
        builder.rel("a/b").rel("100%");
        assert_eq!(builder.get_path().segments(), ["a/b", "100%"]);
        assert_eq!(builder.to_string(), "http://h/a%2Fb/100%25");
    }

    #[test]
    fn rels_append_in_order() {
        let mut builder = MutableUri::new();
        builder.scheme("s").host("h").rels(["x", "y"]).rels(vec![String::from("z")]);
        assert_eq!(builder.to_string(), "s://h/x/y/z");
    }

    #[test]
    fn normalize_resolves_dots() {
        let mut builder = MutableUri::parse("http://h/a/./b/../c").unwrap();
        builder.normalize();
        assert_eq!(builder.get_path().segments(), ["a", "c"]);
    }

    #[test]
    fn normalize_to_nothing_is_root() {
        let mut builder = MutableUri::parse("http://h/a/..").unwrap();
        builder.normalize();
        assert_eq!(builder.get_path(), &Path::Empty);
    }

    #[test]
    fn query_appends_and_set_query_replaces() {
        let mut builder = MutableUri::parse("http://h?a=1&b=2").unwrap();
        builder.query("a", "3");
        assert_eq!(
            builder.get_query_all("a"),
            Some(&[Some("1".to_string()), Some("3".to_string())][..])
        );
        builder.set_query("a", "9");
        assert_eq!(builder.get_query_all("a"), Some(&[Some("9".to_string())][..]));
        assert_eq!(builder.to_string(), "http://h?a=9&b=2");
    }

    #[test]
    fn query_key_has_no_value() {
        let mut builder = MutableUri::new();
        builder.query_key("debug");
        assert_eq!(builder.get_query_first("debug"), None);
        assert_eq!(builder.to_string(), "?debug");
    }

    #[test]
    fn query_map_fans_out_lists() {
        let mut builder = MutableUri::parse("http://h").unwrap();
        builder.query_map([("id", vec![1, 2, 3])]);
        assert_eq!(builder.to_string(), "http://h?id=1&id=2&id=3");
    }

    #[test]
    fn set_query_map_replaces_listed_keys_only() {
        let mut builder = MutableUri::parse("http://h?a=1&b=2&a=3").unwrap();
        builder.set_query_map([("a", vec!["x", "y"])]);
        assert_eq!(builder.to_string(), "http://h?a=x&a=y&b=2");
    }

    #[test]
    fn remove_and_clear_query() {
        let mut builder = MutableUri::parse("http://h?a=1&b=2").unwrap();
        builder.remove_query("a");
        assert_eq!(builder.to_string(), "http://h?b=2");
        builder.clear_query();
        assert_eq!(builder.to_string(), "http://h");
    }

    #[test]
    fn try_scheme_rejects_delimiters() {
        let mut builder = MutableUri::new();
        assert!(matches!(
            builder.try_scheme("ht/tp"),
            Err(ArgumentError::InvalidScheme { .. })
        ));
        assert!(matches!(builder.try_scheme(""), Err(ArgumentError::InvalidScheme { .. })));
        builder.try_scheme("https").unwrap();
        assert_eq!(builder.get_scheme(), Some("https"));
    }

    #[test]
    fn try_port_validates() {
        let mut builder = MutableUri::new();
        assert!(matches!(builder.try_port("abc"), Err(ArgumentError::InvalidPort { .. })));
        assert!(matches!(builder.try_port("+80"), Err(ArgumentError::InvalidPort { .. })));
        assert!(matches!(builder.try_port("65536"), Err(ArgumentError::InvalidPort { .. })));
        builder.try_port("443").unwrap();
        assert_eq!(builder.get_port(), Some(443));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut builder = MutableUri::parse("http://h/a?x=1").unwrap();
        let before = builder.immutable();
        builder.rel("b").query("x", "2").fragment("f");

        assert_eq!(before.as_str(), "http://h/a?x=1");
        assert_eq!(before.path_segments(), ["a"]);
        assert_eq!(before.query_all("x").map(<[_]>::len), Some(1));
        assert_eq!(builder.to_uri().as_str(), "http://h/a/b?x=1&x=2#f");
    }

    #[test]
    fn clear_setters_remove_components() {
        let mut builder = MutableUri::parse("http://u@h:1/p?q#f").unwrap();
        builder
            .clear_user_info()
            .clear_port()
            .clear_path()
            .clear_query()
            .clear_fragment();
        assert_eq!(builder.to_string(), "http://h");
        builder.clear_host().clear_scheme();
        assert_eq!(builder.to_string(), "//");
    }

    #[test]
    fn try_immutable_rejects_authority_without_scheme() {
        let mut builder = MutableUri::parse("http://u@h:1/p").unwrap();
        builder.clear_scheme();
        assert_eq!(
            builder.try_immutable(),
            Err(ArgumentError::AuthorityWithoutScheme {
                authority: "u@h:1".to_string()
            })
        );

        builder.set_has_authority(false);
        assert_eq!(builder.try_immutable().unwrap().as_str(), "/p");
    }

    #[test]
    fn try_immutable_accepts_parsed_uris() {
        for input in ["http://h/a", "tel:+1", "/a?b#c", "file:///etc/hosts"] {
            let builder = MutableUri::parse(input).unwrap();
            assert_eq!(builder.try_immutable().unwrap().as_str(), input);
        }
    }

    #[test]
    fn parse_error_keeps_full_input() {
        let err = MutableUri::parse("http://host/a?b=1=2").unwrap_err();
        assert_eq!(err.input, "http://host/a?b=1=2");
    }

    #[test]
    fn from_str_and_try_from() {
        let a: MutableUri = "tel:+1".parse().unwrap();
        let b = MutableUri::try_from("tel:+1").unwrap();
        assert_eq!(a, b);
    }
}
