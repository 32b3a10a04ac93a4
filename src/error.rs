//! Error types for URI parsing and building.

use std::fmt;

/// Errors that can occur when parsing a URI string.
///
/// The full original input is retained for context; the [`ParseErrorKind`]
/// carries the offending substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Port is not a base-10 number in range
    InvalidPort {
        /// The invalid port text
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// An IP literal host starts with `[` but has no matching `]`
    UnclosedIpLiteral {
        /// The host text starting at `[`
        value: String,
    },
    /// Something other than `:port` follows the closing `]` of an IP literal
    UnexpectedAfterIpLiteral {
        /// The text after `]`
        value: String,
    },
    /// A query pair contains more than one `=`
    AmbiguousQueryPair {
        /// The raw pair
        pair: String,
    },
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': {}", self.input, self.kind)
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { value, reason } => {
                write!(f, "invalid port '{value}': {reason}")
            }
            Self::UnclosedIpLiteral { value } => {
                write!(f, "IP literal '{value}' is missing its closing ']'")
            }
            Self::UnexpectedAfterIpLiteral { value } => {
                write!(f, "unexpected '{value}' after IP literal; expected ':' and a port")
            }
            Self::AmbiguousQueryPair { pair } => {
                write!(f, "query pair '{pair}' contains more than one '='")
            }
        }
    }
}

/// Errors for invalid arguments passed to [`MutableUri`](crate::MutableUri)
/// setters, and for builders that cannot be snapshotted faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Scheme is empty or contains a delimiter
    InvalidScheme {
        /// The rejected scheme
        scheme: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Port text is not a number in range
    InvalidPort {
        /// The rejected port text
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Userinfo, host or port is set without a scheme
    AuthorityWithoutScheme {
        /// The encoded authority
        authority: String,
    },
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScheme { scheme, reason } => {
                write!(f, "invalid scheme '{scheme}': {reason}")
            }
            Self::InvalidPort { value, reason } => {
                write!(f, "invalid port '{value}': {reason}")
            }
            Self::AuthorityWithoutScheme { authority } => {
                write!(f, "authority '{authority}' requires a scheme")
            }
        }
    }
}

impl std::error::Error for ArgumentError {}
