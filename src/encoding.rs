//! Percent-encoding sets for each URI component.
//!
//! Every component stores decoded text; these sets decide which bytes are
//! escaped again when a URI is serialized. `%` is always escaped so that a
//! decoded literal percent sign survives a round trip.

use percent_encoding::{AsciiSet, CONTROLS, PercentEncode, percent_decode_str, utf8_percent_encode};

/// Characters outside RFC 3986 `pchar`, plus `/` which delimits segments.
pub(crate) const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Segments of a URI without scheme: a bare `:` would be read back as one.
pub(crate) const SCHEMELESS_SEGMENT: &AsciiSet = &PATH_SEGMENT.add(b':');

/// `user:password` keeps its colon, `@` would end the userinfo early.
pub(crate) const USER_INFO: &AsciiSet = &PATH_SEGMENT.add(b'@');

/// Registered names; `:` would start a port.
pub(crate) const HOST: &AsciiSet = &USER_INFO.add(b':');

/// Query keys and values. `/` and `?` are allowed, pair delimiters are not.
/// `+` is escaped so form decoders never read it as a space.
pub(crate) const QUERY_PART: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) fn encode<'a>(input: &'a str, set: &'static AsciiSet) -> PercentEncode<'a> {
    utf8_percent_encode(input, set)
}

/// Decodes `%XX` escapes. Malformed escapes are kept literally and invalid
/// UTF-8 is replaced, matching the lenient parser.
pub(crate) fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Characters that may appear between the brackets of an IP literal written
/// verbatim: RFC 3986 unreserved, sub-delims, `:` and `%` for zone ids.
const IP_LITERAL_CHARS: &[u8] = b"-._~!$&'()*+,;=:%";

/// Host text is written verbatim only when it is a bracketed literal whose
/// inside cannot end the authority or reopen a bracket.
pub(crate) fn is_ip_literal(host: &str) -> bool {
    host.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|inside| {
            !inside.is_empty()
                && inside
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || IP_LITERAL_CHARS.contains(&b))
        })
}
