//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use mutable_uri::prelude::*;
//!
//! let uri = Uri::parse("https://example.com/a?b=c").unwrap();
//! let mut builder: MutableUri = uri.mutable();
//! builder.rel("d");
//! ```

pub use crate::{
    // Core types
    IntoQueryValues, MutableUri, Path, QueryParams, Uri,
    // Normalization
    normalize_rels, normalize_root_path,
    // Errors
    ArgumentError, ParseError, ParseErrorKind,
};
