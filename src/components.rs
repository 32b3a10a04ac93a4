//! Field set shared by [`Uri`](crate::Uri) and [`MutableUri`](crate::MutableUri),
//! and its serialization.

use std::fmt::{self, Write};

use crate::constants::{
    AUTHORITY_SEPARATOR, FRAGMENT_DELIMITER, PORT_DELIMITER, QUERY_DELIMITER, SCHEME_SEPARATOR,
    USER_INFO_DELIMITER,
};
use crate::encoding::{self, FRAGMENT, HOST, USER_INFO};
use crate::path::{Path, PathForm};
use crate::query::QueryParams;

/// Decoded URI components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub(crate) struct Components {
    pub(crate) scheme: Option<String>,
    pub(crate) has_authority: bool,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Path,
    pub(crate) query: Option<QueryParams>,
    pub(crate) fragment: Option<String>,
}

impl Components {
    pub(crate) fn path_form(&self) -> PathForm {
        if self.has_authority {
            PathForm::Hierarchical
        } else if self.scheme.is_some() {
            PathForm::Opaque
        } else {
            PathForm::Schemeless
        }
    }

    /// The encoded `userinfo@host:port` text.
    pub(crate) fn authority_string(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_authority(&mut out);
        out
    }

    fn write_authority<W: Write>(&self, out: &mut W) -> fmt::Result {
        if let Some(user_info) = &self.user_info {
            write!(out, "{}{USER_INFO_DELIMITER}", encoding::encode(user_info, USER_INFO))?;
        }
        if let Some(host) = &self.host {
            if encoding::is_ip_literal(host) {
                out.write_str(host)?;
            } else {
                write!(out, "{}", encoding::encode(host, HOST))?;
            }
        }
        if let Some(port) = self.port {
            write!(out, "{PORT_DELIMITER}{port}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            f.write_str(scheme)?;
            if !self.has_authority {
                f.write_char(SCHEME_SEPARATOR)?;
            }
        }
        if self.has_authority {
            // A schemeless authority is written as a network-path reference,
            // which the parser reads back as a path. `try_immutable` rejects it.
            let separator = if self.scheme.is_some() {
                AUTHORITY_SEPARATOR
            } else {
                &AUTHORITY_SEPARATOR[1..]
            };
            f.write_str(separator)?;
            self.write_authority(f)?;
        }

        self.path.write_to(f, self.path_form())?;

        if let Some(query) = &self.query {
            write!(f, "{QUERY_DELIMITER}{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "{FRAGMENT_DELIMITER}{}", encoding::encode(fragment, FRAGMENT))?;
        }
        Ok(())
    }
}
