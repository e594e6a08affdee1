//! SIP and SIPS URIs (RFC 3261 §19.1) plus the generic form used for all other schemes.
//!
//! The host component is kept as the literal on-the-wire string (IPv6 literals retain their
//! surrounding brackets) rather than parsed into a structured IP/domain enum: the parser never
//! needs to route on it, only to round-trip it, and doing otherwise would throw away the exact
//! bracket/case form the far end sent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::uri::parse_uri;
use crate::types::param::ParamBag;

/// The URI scheme. `Sip`/`Sips` get dedicated host-parsing treatment (§4.2); everything else,
/// including `tel`, is still fully represented but does not imply a particular host shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    Sip,
    Sips,
    Tel,
    /// Any other scheme token, preserved verbatim (lowercased is not assumed).
    Other(String),
}

impl Scheme {
    pub fn as_str(&self) -> &str {
        match self {
            Scheme::Sip => "sip",
            Scheme::Sips => "sips",
            Scheme::Tel => "tel",
            Scheme::Other(s) => s,
        }
    }

    /// Whether this scheme implies the `encrypted` flag (`sips` only).
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Scheme::Sips)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::invalid_uri("empty scheme"));
        }
        match s.to_ascii_lowercase().as_str() {
            "sip" => Ok(Scheme::Sip),
            "sips" => Ok(Scheme::Sips),
            "tel" => Ok(Scheme::Tel),
            _ => Ok(Scheme::Other(s.to_string())),
        }
    }
}

/// A full SIP/SIPS/tel/other-scheme URI (RFC 3261 §19.1).
///
/// `wildcard` is set for the Contact-only `*` form; when set, every other field holds its
/// default value and [`Uri::to_string`] emits only `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uri {
    pub scheme: Scheme,
    /// Whether the source had `scheme://` rather than `scheme:` — preserved for round-tripping,
    /// carries no parsing semantics of its own.
    pub hierarchical_slashes: bool,
    pub user: Option<String>,
    /// Deprecated by RFC 3261 but still parsed and round-tripped when present.
    pub password: Option<String>,
    /// The host as it appeared on the wire. IPv6 literals keep their `[...]` brackets.
    pub host: String,
    /// `0` means absent (matches RFC 3261's `port = 1*DIGIT`, which has no "absent" token of
    /// its own — the wire form simply omits `:port`).
    pub port: u16,
    pub uri_params: ParamBag,
    pub headers: ParamBag,
    /// The Contact-only `*` wildcard form.
    pub wildcard: bool,
}

impl Uri {
    /// A minimal `sip:` URI with only scheme and host set.
    pub fn new(scheme: Scheme, host: impl Into<String>) -> Self {
        Uri {
            scheme,
            hierarchical_slashes: false,
            user: None,
            password: None,
            host: host.into(),
            port: 0,
            uri_params: ParamBag::new(),
            headers: ParamBag::new(),
            wildcard: false,
        }
    }

    pub fn sip(host: impl Into<String>) -> Self {
        Self::new(Scheme::Sip, host)
    }

    pub fn sips(host: impl Into<String>) -> Self {
        Self::new(Scheme::Sips, host)
    }

    pub fn tel(number: impl Into<String>) -> Self {
        Self::new(Scheme::Tel, number)
    }

    /// The Contact-only wildcard URI (`Contact: *`). Every other field is left at its default.
    pub fn wildcard() -> Self {
        Uri { wildcard: true, ..Self::new(Scheme::Sip, String::new()) }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.uri_params.add(name, value);
        self
    }

    /// `true` if `sips` — `sip=sips` equivalence per RFC 3261 §19.1 rule 4.
    pub fn is_encrypted(&self) -> bool {
        self.scheme.is_encrypted()
    }

    pub fn transport(&self) -> Option<&str> {
        self.uri_params.get("transport")
    }

    pub fn is_phone_number(&self) -> bool {
        self.uri_params.get("user") == Some("phone")
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wildcard {
            return f.write_str("*");
        }

        write!(f, "{}:", self.scheme)?;
        if self.hierarchical_slashes {
            write!(f, "//")?;
        }

        if let Some(ref user) = self.user {
            write!(f, "{}", user)?;
            if let Some(ref password) = self.password {
                write!(f, ":{}", password)?;
            }
            write!(f, "@")?;
        }

        write!(f, "{}", self.host)?;

        if self.port != 0 {
            write!(f, ":{}", self.port)?;
        }

        let mut params_str = String::new();
        self.uri_params.write(';', &mut params_str);
        f.write_str(&params_str)?;

        if !self.headers.is_empty() {
            let mut headers_str = String::new();
            self.headers.write('&', &mut headers_str);
            // ParamBag::write always prefixes each entry with `separator`; the URI headers
            // component wants `?` before the first pair and `&` between the rest.
            headers_str.replace_range(0..1, "?");
            f.write_str(&headers_str)?;
        }

        Ok(())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (rest, uri) = parse_uri(s.as_bytes())?;
        if !rest.is_empty() {
            return Err(Error::invalid_uri("trailing data after URI"));
        }
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_case_insensitive_but_other_preserves_case() {
        assert_eq!(Scheme::from_str("SIP").unwrap(), Scheme::Sip);
        assert_eq!(Scheme::from_str("sIpS").unwrap(), Scheme::Sips);
        assert_eq!(Scheme::from_str("X-Custom").unwrap(), Scheme::Other("X-Custom".to_string()));
    }

    #[test]
    fn display_round_trips_basic_uri() {
        let uri = Uri::sip("example.com").with_user("alice").with_port(5060);
        assert_eq!(uri.to_string(), "sip:alice@example.com:5060");
    }

    #[test]
    fn display_preserves_ipv6_brackets() {
        let uri = Uri::sip("[2001:db8::1]").with_port(5060);
        assert_eq!(uri.to_string(), "sip:[2001:db8::1]:5060");
    }

    #[test]
    fn display_emits_hierarchical_slashes_when_set() {
        let mut uri = Uri::sip("example.com");
        uri.hierarchical_slashes = true;
        assert_eq!(uri.to_string(), "sip://example.com");
    }

    #[test]
    fn wildcard_uri_display_is_star_only() {
        assert_eq!(Uri::wildcard().to_string(), "*");
    }

    #[test]
    fn uri_params_round_trip_in_insertion_order() {
        let uri = Uri::sip("example.com")
            .with_param("transport", Some("tcp".to_string()))
            .with_param("lr", None);
        assert_eq!(uri.to_string(), "sip:example.com;transport=tcp;lr");
    }

    #[test]
    fn sips_is_encrypted() {
        assert!(Uri::sips("example.com").is_encrypted());
        assert!(!Uri::sip("example.com").is_encrypted());
    }
}
