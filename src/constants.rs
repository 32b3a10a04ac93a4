//! Delimiters recognized by the URI scanner.

/// Separator between a scheme and an authority.
pub const AUTHORITY_SEPARATOR: &str = "://";

/// Separator between a scheme and an opaque path.
pub const SCHEME_SEPARATOR: char = ':';

/// Path segment delimiter.
pub const PATH_DELIMITER: char = '/';

/// Introduces the query component.
pub const QUERY_DELIMITER: char = '?';

/// Introduces the fragment component.
pub const FRAGMENT_DELIMITER: char = '#';

/// Separates query pairs.
pub const QUERY_PAIR_DELIMITER: char = '&';

/// Separates a query key from its value.
pub const QUERY_VALUE_DELIMITER: char = '=';

/// Terminates the userinfo inside an authority.
pub const USER_INFO_DELIMITER: char = '@';

/// Separates host and port inside an authority.
pub const PORT_DELIMITER: char = ':';
