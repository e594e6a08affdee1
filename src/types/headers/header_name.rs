//! Header names and RFC 3261 §7.3.3 compact-form aliases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The 11 first-class header kinds plus a generic bucket for everything else (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderName {
    Via,
    From,
    To,
    Contact,
    ReferredBy,
    ReferTo,
    Route,
    RecordRoute,
    CallId,
    CSeq,
    ContentLength,
    ContentType,
    MaxForwards,
    Expires,
    /// Any other header name, canonicalized to lowercase for lookup but displayed as given.
    Other(String),
}

impl HeaderName {
    /// The canonical (non-compact) wire form, e.g. for serialization when compact mode is off.
    pub fn canonical_str(&self) -> &str {
        match self {
            HeaderName::Via => "Via",
            HeaderName::From => "From",
            HeaderName::To => "To",
            HeaderName::Contact => "Contact",
            HeaderName::ReferredBy => "Referred-By",
            HeaderName::ReferTo => "Refer-To",
            HeaderName::Route => "Route",
            HeaderName::RecordRoute => "Record-Route",
            HeaderName::CallId => "Call-ID",
            HeaderName::CSeq => "CSeq",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::ContentType => "Content-Type",
            HeaderName::MaxForwards => "Max-Forwards",
            HeaderName::Expires => "Expires",
            HeaderName::Other(s) => s,
        }
    }

    /// The single-letter compact alias (RFC 3261 §20), if one is registered for this name.
    pub fn compact_str(&self) -> Option<&'static str> {
        match self {
            HeaderName::Via => Some("v"),
            HeaderName::From => Some("f"),
            HeaderName::To => Some("t"),
            HeaderName::Contact => Some("m"),
            HeaderName::CallId => Some("i"),
            HeaderName::ContentLength => Some("l"),
            HeaderName::ContentType => Some("c"),
            HeaderName::Expires => Some("e"),
            HeaderName::ReferTo => Some("r"),
            HeaderName::ReferredBy => Some("b"),
            // k (Supported), o (Event), s (Subject), u (Allow-Events), a (Accept-Contact) are
            // registered compact aliases but have no first-class representation in this crate;
            // they fall through the generic fallback, which preserves whatever alias arrived.
            _ => None,
        }
    }

    /// Parses a header name as it appeared on the wire (before the `:`), recognizing both the
    /// canonical form and the compact alias, case-insensitively.
    pub fn parse(raw: &str) -> HeaderName {
        let lower = raw.to_ascii_lowercase();
        match lower.as_str() {
            "via" | "v" => HeaderName::Via,
            "from" | "f" => HeaderName::From,
            "to" | "t" => HeaderName::To,
            "contact" | "m" => HeaderName::Contact,
            "referred-by" | "b" => HeaderName::ReferredBy,
            "refer-to" | "r" => HeaderName::ReferTo,
            "route" => HeaderName::Route,
            "record-route" => HeaderName::RecordRoute,
            "call-id" | "i" => HeaderName::CallId,
            "cseq" => HeaderName::CSeq,
            "content-length" | "l" => HeaderName::ContentLength,
            "content-type" | "c" => HeaderName::ContentType,
            "max-forwards" => HeaderName::MaxForwards,
            "expires" => HeaderName::Expires,
            _ => HeaderName::Other(raw.to_string()),
        }
    }

    /// Whether repeated occurrences on separate comma-joined lines fold into one logical
    /// message element each (Via, Contact, Route, Record-Route — spec §4.5).
    pub fn is_comma_splittable(&self) -> bool {
        matches!(self, HeaderName::Via | HeaderName::Contact | HeaderName::Route | HeaderName::RecordRoute)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}
