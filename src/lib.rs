//! A lenient URI value type with a mutable builder and a single-pass parser.
//!
//! # Overview
//!
//! Two types cover the whole lifecycle of a URI:
//!
//! - [`MutableUri`] parses strings and changes components in place:
//!   scheme, userinfo, host, port, path segments, query parameters and
//!   fragment.
//! - [`Uri`] is the frozen snapshot produced by [`MutableUri::immutable`].
//!
//! All components are stored decoded. Percent-encoding is applied when a URI
//! is serialized and reversed when it is parsed, so callers never deal with
//! escapes directly.
//!
//! # Quick Start
//!
//! ```rust
//! use mutable_uri::{MutableUri, Uri};
//!
//! // Parse and inspect
//! let uri = Uri::parse("https://user@example.com:8443/docs/?tag=a&tag=b#intro").unwrap();
//! assert_eq!(uri.host(), Some("example.com"));
//! assert_eq!(uri.port(), Some(8443));
//! assert_eq!(uri.path_segments(), ["docs", ""]);
//! assert_eq!(uri.query_all("tag").map(<[_]>::len), Some(2));
//!
//! // Build a request URL from structured data
//! let mut builder = MutableUri::parse("https://api.example.com/v1").unwrap();
//! builder
//!     .rel("search results")
//!     .query_map([("id", vec![7, 9])])
//!     .set_query("lang", "en");
//! assert_eq!(
//!     builder.immutable().as_str(),
//!     "https://api.example.com/v1/search%20results?id=7&id=9&lang=en"
//! );
//! ```
//!
//! # Accepted Shapes
//!
//! | Form | Example |
//! |------|---------|
//! | Authority | `scheme://[userinfo@]host[:port][/path][?query][#fragment]` |
//! | Opaque | `tel:+1-816-555-1212` |
//! | Schemeless | `/path?query#fragment` |
//!
//! The parser is lexical and lenient: `://` marks an authority, otherwise the
//! first `:` before any `?` or `#` ends a scheme. Inputs are rejected only for
//! a port that is not a number in range, a malformed `[` IP literal or a query
//! pair with two `=`.
//!
//! # Features
//!
//! - `serde`: serialize [`Uri`] and [`MutableUri`] as strings
//! - `log`: trace parse results and log rejected inputs through the `log` crate

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod components;
mod constants;
mod encoding;
mod error;
#[cfg(kani)]
mod kani_impls;
mod log;
mod parser;
mod path;
pub mod prelude;
mod query;
mod uri;

pub use builder::MutableUri;
pub use constants::{
    AUTHORITY_SEPARATOR, FRAGMENT_DELIMITER, PATH_DELIMITER, PORT_DELIMITER, QUERY_DELIMITER,
    QUERY_PAIR_DELIMITER, QUERY_VALUE_DELIMITER, SCHEME_SEPARATOR, USER_INFO_DELIMITER,
};
pub use error::{ArgumentError, ParseError, ParseErrorKind};
pub use path::{Path, normalize_rels, normalize_root_path};
pub use query::{IntoQueryValues, QueryParams};
pub use uri::Uri;
