//! Single-pass URI scanner.
//!
//! The input is consumed left to right in five sections: scheme, authority,
//! path, query and fragment. Each section's end is found once and the cursor
//! never moves backwards, so parsing is linear in the input length.

use crate::components::Components;
use crate::constants::{
    AUTHORITY_SEPARATOR, FRAGMENT_DELIMITER, PATH_DELIMITER, PORT_DELIMITER, QUERY_DELIMITER,
    SCHEME_SEPARATOR, USER_INFO_DELIMITER,
};
use crate::encoding;
use crate::error::ParseErrorKind;
use crate::path::{normalize_root_path, split_decoded};
use crate::query::QueryParams;

/// Read position over the input.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn skip(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.input.len());
    }

    /// Consumes and returns the text up to the first of `delimiters`, leaving
    /// the cursor on that delimiter (or at the end).
    fn advance_to(&mut self, delimiters: &[char]) -> &'a str {
        let rest = &self.input[self.pos..];
        let end = rest.find(delimiters).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Consumes `delimiter` if it is the next character.
    fn eat(&mut self, delimiter: char) -> bool {
        if self.input[self.pos..].starts_with(delimiter) {
            self.pos += delimiter.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_rest(&mut self) -> &'a str {
        let rest = &self.input[self.pos..];
        self.pos = self.input.len();
        rest
    }
}

pub(crate) fn parse(input: &str) -> Result<Components, ParseErrorKind> {
    let mut cursor = Cursor::new(input);
    let mut parts = Components::default();

    parse_scheme(&mut cursor, &mut parts);

    if parts.has_authority {
        let authority = cursor.advance_to(&[PATH_DELIMITER, QUERY_DELIMITER, FRAGMENT_DELIMITER]);
        parse_authority(authority, &mut parts)?;
    }

    let path = cursor.advance_to(&[QUERY_DELIMITER, FRAGMENT_DELIMITER]);
    if !path.is_empty() {
        parts.path = normalize_root_path(split_decoded(path));
    }

    if cursor.eat(QUERY_DELIMITER) {
        let query = cursor.advance_to(&[FRAGMENT_DELIMITER]);
        parts.query = Some(QueryParams::parse_raw(query)?);
    }

    if cursor.eat(FRAGMENT_DELIMITER) {
        parts.fragment = Some(encoding::decode(cursor.take_rest()));
    }

    Ok(parts)
}

/// `scheme://` wins over `scheme:`; neither is looked for past the first `?`
/// or `#`.
fn parse_scheme(cursor: &mut Cursor<'_>, parts: &mut Components) {
    let input = cursor.input;
    let head_end = input
        .find([QUERY_DELIMITER, FRAGMENT_DELIMITER])
        .unwrap_or(input.len());
    let head = &input[..head_end];

    if let Some(end) = head.find(AUTHORITY_SEPARATOR) {
        parts.scheme = Some(input[..end].to_string());
        parts.has_authority = true;
        cursor.skip(end + AUTHORITY_SEPARATOR.len());
    } else if let Some(end) = head.find(SCHEME_SEPARATOR) {
        parts.scheme = Some(input[..end].to_string());
        cursor.skip(end + SCHEME_SEPARATOR.len_utf8());
    }
}

fn parse_authority(authority: &str, parts: &mut Components) -> Result<(), ParseErrorKind> {
    let host_port = match authority.split_once(USER_INFO_DELIMITER) {
        Some((user_info, rest)) => {
            parts.user_info = Some(encoding::decode(user_info));
            rest
        }
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        split_ip_literal(host_port)?
    } else {
        match host_port.split_once(PORT_DELIMITER) {
            Some((host, port)) => (encoding::decode(host), Some(port)),
            None => (encoding::decode(host_port), None),
        }
    };

    parts.host = (!host.is_empty()).then_some(host);
    parts.port = match port {
        Some(port) => parse_port(port)?,
        None => None,
    };
    Ok(())
}

/// Splits `[literal][:port]`, keeping the brackets and not decoding the literal.
fn split_ip_literal(host_port: &str) -> Result<(String, Option<&str>), ParseErrorKind> {
    let close = host_port
        .find(']')
        .ok_or_else(|| ParseErrorKind::UnclosedIpLiteral {
            value: host_port.to_string(),
        })?;
    let (literal, after) = host_port.split_at(close + 1);

    let port = if after.is_empty() {
        None
    } else if let Some(port) = after.strip_prefix(PORT_DELIMITER) {
        Some(port)
    } else {
        return Err(ParseErrorKind::UnexpectedAfterIpLiteral {
            value: after.to_string(),
        });
    };

    Ok((literal.to_string(), port))
}

/// An empty port (`host:`) means no port.
fn parse_port(port: &str) -> Result<Option<u16>, ParseErrorKind> {
    if port.is_empty() {
        return Ok(None);
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidPort {
            value: port.to_string(),
            reason: "port must be a base-10 number",
        });
    }
    port.parse::<u16>()
        .map(Some)
        .map_err(|_| ParseErrorKind::InvalidPort {
            value: port.to_string(),
            reason: "port must be between 0 and 65535",
        })
}
