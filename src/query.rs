//! Ordered multi-valued query parameters.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::constants::{QUERY_PAIR_DELIMITER, QUERY_VALUE_DELIMITER};
use crate::encoding::{self, QUERY_PART};
use crate::error::{ParseError, ParseErrorKind};

/// Query parameters of a URI.
///
/// Keys keep the order in which they were first added and every key maps to
/// the ordered list of its values, so `a=1&b=2&a=3` stores `a → [1, 3]` and
/// `b → [2]`. A value is absent when the pair had no `=` (`?flag`).
///
/// Keys and values are stored decoded and encoded again by [`Display`](fmt::Display).
///
/// # Examples
///
/// ```
/// use mutable_uri::QueryParams;
///
/// let query = QueryParams::parse("a=1&b=2&a=3").unwrap();
/// assert_eq!(query.get_first("a"), Some("1"));
/// assert_eq!(query.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(query.to_string(), "a=1&a=3&b=2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryParams {
    params: Vec<(String, Vec<Option<String>>)>,
}

impl QueryParams {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// Empty pairs are skipped; keys and values are percent-decoded.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if a pair contains more than one `=`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_raw(input).map_err(|kind| ParseError::new(input, kind))
    }

    pub(crate) fn parse_raw(input: &str) -> Result<Self, ParseErrorKind> {
        let mut query = Self::new();

        for pair in input.split(QUERY_PAIR_DELIMITER) {
            if pair.is_empty() {
                continue;
            }

            let mut parts = pair.splitn(3, QUERY_VALUE_DELIMITER);
            let name = parts.next().unwrap_or_default();
            let value = parts.next();
            if parts.next().is_some() {
                return Err(ParseErrorKind::AmbiguousQueryPair {
                    pair: pair.to_string(),
                });
            }

            query.append(encoding::decode(name), value.map(encoding::decode));
        }

        Ok(query)
    }

    /// Returns every value of `name` in insertion order, or `None` if the key
    /// is not present.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Option<&[Option<String>]> {
        self.position(name).map(|i| self.params[i].1.as_slice())
    }

    /// Returns the first value of `name`.
    ///
    /// Returns `None` if the key is missing or its first occurrence has no value.
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.get_all(name)?.first()?.as_deref()
    }

    /// Projects the query to one `(key, first value)` pair per key, in key
    /// order.
    ///
    /// Absent values project to an empty string.
    #[must_use]
    pub fn first_map(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .filter_map(|(name, values)| {
                let first = values.first()?;
                Some((name.as_str(), first.as_deref().unwrap_or_default()))
            })
            .collect()
    }

    /// Returns true if `name` has at least one occurrence.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Adds a value under `name`, after any values it already has.
    pub fn append(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.params[i].1.push(value),
            None => self.params.push((name, vec![value])),
        }
    }

    /// Replaces every value of `name` with `values`.
    ///
    /// An existing key keeps its position. An empty `values` removes the key.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<Option<String>>) {
        let name = name.into();
        if values.is_empty() {
            self.remove(&name);
            return;
        }
        match self.position(&name) {
            Some(i) => self.params[i].1 = values,
            None => self.params.push((name, values)),
        }
    }

    /// Removes `name` and returns its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Option<String>>> {
        let i = self.position(name)?;
        Some(self.params.remove(i).1)
    }

    /// Returns true if the query has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    /// Returns every `(key, value)` occurrence, grouped by key in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.params.iter().flat_map(|(k, values)| {
            values.iter().map(move |v| (k.as_str(), v.as_deref()))
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|(k, _)| k == name)
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{QUERY_PAIR_DELIMITER}")?;
            }
            write!(f, "{}", encoding::encode(name, QUERY_PART))?;
            if let Some(value) = value {
                write!(f, "{QUERY_VALUE_DELIMITER}{}", encoding::encode(value, QUERY_PART))?;
            }
        }
        Ok(())
    }
}

impl FromStr for QueryParams {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: IntoQueryValues> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (name, value) in iter {
            let name = name.into();
            for value in value.into_query_values() {
                query.append(name.clone(), value);
            }
        }
        query
    }
}

/// Values accepted by the map-style query setters.
///
/// Scalars produce one value, `Option::None` produces one absent value
/// (`?key`), and collections fan out into one occurrence per element.
///
/// # Examples
///
/// ```
/// use mutable_uri::MutableUri;
///
/// let mut uri = MutableUri::new();
/// uri.query_map([("tag", vec!["a", "b"])]);
/// uri.query_map([("page", 2)]);
/// assert_eq!(uri.to_string(), "?tag=a&tag=b&page=2");
/// ```
pub trait IntoQueryValues {
    /// Converts `self` into the values to add, in order.
    fn into_query_values(self) -> Vec<Option<String>>;
}

impl IntoQueryValues for String {
    fn into_query_values(self) -> Vec<Option<String>> {
        vec![Some(self)]
    }
}

impl IntoQueryValues for &str {
    fn into_query_values(self) -> Vec<Option<String>> {
        vec![Some(self.to_string())]
    }
}

impl IntoQueryValues for &String {
    fn into_query_values(self) -> Vec<Option<String>> {
        vec![Some(self.clone())]
    }
}

impl IntoQueryValues for Cow<'_, str> {
    fn into_query_values(self) -> Vec<Option<String>> {
        vec![Some(self.into_owned())]
    }
}

impl<T: IntoQueryValues> IntoQueryValues for Option<T> {
    fn into_query_values(self) -> Vec<Option<String>> {
        match self {
            Some(value) => value.into_query_values(),
            None => vec![None],
        }
    }
}

impl<T: IntoQueryValues> IntoQueryValues for Vec<T> {
    fn into_query_values(self) -> Vec<Option<String>> {
        self.into_iter()
            .flat_map(IntoQueryValues::into_query_values)
            .collect()
    }
}

impl<T: IntoQueryValues, const N: usize> IntoQueryValues for [T; N] {
    fn into_query_values(self) -> Vec<Option<String>> {
        self.into_iter()
            .flat_map(IntoQueryValues::into_query_values)
            .collect()
    }
}

impl<T: IntoQueryValues + Clone> IntoQueryValues for &[T] {
    fn into_query_values(self) -> Vec<Option<String>> {
        self.iter()
            .cloned()
            .flat_map(IntoQueryValues::into_query_values)
            .collect()
    }
}

macro_rules! display_query_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoQueryValues for $ty {
                fn into_query_values(self) -> Vec<Option<String>> {
                    vec![Some(self.to_string())]
                }
            }
        )*
    };
}

display_query_values!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty() {
        let query = QueryParams::parse("").unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn parse_repeated_keys_accumulate() {
        let query = QueryParams::parse("a=1&b=2&a=3").unwrap();
        assert_eq!(
            query.get_all("a"),
            Some(&[Some("1".to_string()), Some("3".to_string())][..])
        );
        assert_eq!(query.get_all("b"), Some(&[Some("2".to_string())][..]));
        assert_eq!(query.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn first_map_takes_first_values() {
        let query = QueryParams::parse("a=1&b=2&a=3").unwrap();
        let map = query.first_map();
        assert_eq!(map, [("a", "1"), ("b", "2")]);
    }

    #[test]
    fn first_map_keeps_key_order() {
        let query = QueryParams::parse("z=1&a=2&m&z=3").unwrap();
        assert_eq!(query.first_map(), [("z", "1"), ("a", "2"), ("m", "")]);
    }

    #[test]
    fn parse_param_without_value() {
        let query = QueryParams::parse("flag&x=").unwrap();
        assert_eq!(query.get_all("flag"), Some(&[None][..]));
        assert_eq!(query.get_first("flag"), None);
        assert!(query.contains("flag"));
        assert_eq!(query.get_first("x"), Some(""));
        assert_eq!(query.first_map()[0], ("flag", ""));
    }

    #[test]
    fn parse_skips_empty_pairs() {
        let query = QueryParams::parse("&a=1&&b=2&").unwrap();
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn parse_percent_encoded() {
        let query = QueryParams::parse("na%20me=%41%42%43&q=a%26b%3Dc").unwrap();
        assert_eq!(query.get_first("na me"), Some("ABC"));
        assert_eq!(query.get_first("q"), Some("a&b=c"));
    }

    #[test]
    fn parse_keeps_plus_literal() {
        let query = QueryParams::parse("q=a+b").unwrap();
        assert_eq!(query.get_first("q"), Some("a+b"));
    }

    #[test]
    fn parse_ambiguous_pair_fails() {
        let err = QueryParams::parse("b=1=2").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::AmbiguousQueryPair {
                pair: "b=1=2".to_string()
            }
        );
    }

    #[test]
    fn missing_key_returns_none() {
        let query = QueryParams::parse("a=1").unwrap();
        assert_eq!(query.get_all("z"), None);
        assert_eq!(query.get_first("z"), None);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut query = QueryParams::parse("a=1&b=2&a=3").unwrap();
        query.set("a", vec![Some("9".to_string())]);
        assert_eq!(query.to_string(), "a=9&b=2");
    }

    #[test]
    fn set_with_no_values_removes() {
        let mut query = QueryParams::parse("a=1&b=2").unwrap();
        query.set("a", Vec::new());
        assert_eq!(query.to_string(), "b=2");
    }

    #[test]
    fn remove_returns_values() {
        let mut query = QueryParams::parse("a=1&a").unwrap();
        assert_eq!(query.remove("a"), Some(vec![Some("1".to_string()), None]));
        assert!(query.is_empty());
        assert_eq!(query.remove("a"), None);
    }

    #[test]
    fn display_encodes_delimiters() {
        let mut query = QueryParams::new();
        query.append("k&=", Some("v+ #".to_string()));
        query.append("flag", None);
        assert_eq!(query.to_string(), "k%26%3D=v%2B%20%23&flag");
    }

    #[test]
    fn iter_yields_occurrences_grouped_by_key() {
        let query = QueryParams::parse("a=1&b&a=3").unwrap();
        let items: Vec<_> = query.iter().collect();
        assert_eq!(items, vec![("a", Some("1")), ("a", Some("3")), ("b", None)]);
    }

    #[test]
    fn collect_fans_out_collections() {
        let query: QueryParams = vec![("id", vec![1, 2]), ("n", vec![3])].into_iter().collect();
        assert_eq!(query.to_string(), "id=1&id=2&n=3");
    }

    #[test]
    fn option_none_is_absent_value() {
        assert_eq!(None::<&str>.into_query_values(), vec![None]);
        assert_eq!(Some("x").into_query_values(), vec![Some("x".to_string())]);
    }

    #[test]
    fn slices_and_arrays_fan_out() {
        let values: &[&str] = &["a", "b"];
        assert_eq!(values.into_query_values().len(), 2);
        assert_eq!([true, false].into_query_values(), vec![
            Some("true".to_string()),
            Some("false".to_string())
        ]);
    }
}
