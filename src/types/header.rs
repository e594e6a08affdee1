//! The polymorphic header value (spec §3 "Header"): a tagged union of the 11 first-class
//! header kinds plus a generic `(name, raw-value)` fallback for everything else.
//!
//! Kept as an enum rather than a trait object (design note §9): the 11 fast-reference slots in
//! [`crate::types::headers::list::HeaderList`] need O(1) variant inspection, which `match` gives
//! for free and a `dyn Trait` vtable would not.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::address::AddressValue;
use crate::types::headers::header_name::HeaderName;
use crate::types::method::Method;
use crate::types::via::ViaHeader;

/// `CSeq: <seq> <method>` (spec §3, §4.5). `seq` is range-checked to `0..=2^31-1` by its parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CSeqValue {
    pub seq: u32,
    pub method: Method,
}

impl fmt::Display for CSeqValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seq, self.method)
    }
}

/// The fallback representation for any header name this crate does not model as a first-class
/// variant: the raw, already-unfolded value string, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericHeader {
    pub name: String,
    pub value: String,
}

/// One parsed header. See the module doc for why this is an enum rather than a trait object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Header {
    Via(ViaHeader),
    From(AddressValue),
    To(AddressValue),
    Contact(AddressValue),
    ReferredBy(AddressValue),
    ReferTo(AddressValue),
    Route(AddressValue),
    RecordRoute(AddressValue),
    CallId(String),
    CSeq(CSeqValue),
    ContentLength(u32),
    ContentType(String),
    MaxForwards(u32),
    Expires(u32),
    Generic(GenericHeader),
}

impl Header {
    /// The header's name. For `Generic`, the name as it appeared on the wire (not lowercased).
    pub fn name(&self) -> HeaderName {
        match self {
            Header::Via(_) => HeaderName::Via,
            Header::From(_) => HeaderName::From,
            Header::To(_) => HeaderName::To,
            Header::Contact(_) => HeaderName::Contact,
            Header::ReferredBy(_) => HeaderName::ReferredBy,
            Header::ReferTo(_) => HeaderName::ReferTo,
            Header::Route(_) => HeaderName::Route,
            Header::RecordRoute(_) => HeaderName::RecordRoute,
            Header::CallId(_) => HeaderName::CallId,
            Header::CSeq(_) => HeaderName::CSeq,
            Header::ContentLength(_) => HeaderName::ContentLength,
            Header::ContentType(_) => HeaderName::ContentType,
            Header::MaxForwards(_) => HeaderName::MaxForwards,
            Header::Expires(_) => HeaderName::Expires,
            Header::Generic(g) => HeaderName::Other(g.name.clone()),
        }
    }

    /// The header's value, formatted as it would appear after `Name: `.
    pub fn value(&self) -> String {
        let mut out = String::new();
        self.write_value(&mut out);
        out
    }

    /// Appends just the value portion (no name, no trailing CRLF) to `out`.
    pub fn write_value(&self, out: &mut String) {
        use std::fmt::Write;
        match self {
            Header::Via(v) => { let _ = write!(out, "{v}"); }
            Header::From(a) | Header::To(a) | Header::Contact(a) | Header::ReferredBy(a) => {
                let _ = write!(out, "{a}");
            }
            Header::ReferTo(a) | Header::Route(a) | Header::RecordRoute(a) => {
                let _ = write!(out, "{a}");
            }
            Header::CallId(id) => out.push_str(id),
            Header::CSeq(c) => { let _ = write!(out, "{c}"); }
            Header::ContentLength(n) => { let _ = write!(out, "{n}"); }
            Header::ContentType(ct) => out.push_str(ct),
            Header::MaxForwards(n) => { let _ = write!(out, "{n}"); }
            Header::Expires(n) => { let _ = write!(out, "{n}"); }
            Header::Generic(g) => out.push_str(&g.value),
        }
    }

    /// Appends the full wire line `Name: value\r\n` to `out`. `compact` selects the single-letter
    /// alias for the 15 registered compact header names (spec §4.8) when one exists.
    pub fn write_full(&self, compact: bool, out: &mut String) {
        let name = self.name();
        let written_name = if compact { name.compact_str() } else { None };
        out.push_str(written_name.unwrap_or(name.canonical_str()));
        out.push_str(": ");
        self.write_value(out);
        out.push_str("\r\n");
    }

    /// For Via/Contact/Route/Record-Route: max-forwards-style decrement support is limited to
    /// `MaxForwards` (spec §3 "mutable — supports decrement"); other variants are no-ops.
    pub fn decrement_max_forwards(&mut self) -> Option<u32> {
        if let Header::MaxForwards(n) = self {
            if *n > 0 {
                *n -= 1;
            }
            Some(*n)
        } else {
            None
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        self.write_full(false, &mut s);
        // write_full includes the trailing CRLF; Display for a single header is more useful
        // without it (callers concatenating a message add their own separators).
        f.write_str(s.trim_end_matches("\r\n"))
    }
}
