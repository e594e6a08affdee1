//! The shared address-value shape behind From, To, Contact, Referred-By, Refer-To, Route, and
//! Record-Route (spec §4.3): `[ display-name ] ( "<" URI ">" | URI ) *( ";" generic-param )`.
//!
//! Refer-To/Route/Record-Route are URI-only per spec §3, but they are still represented as
//! `AddressValue` with `display_name: None` — the address parser handles all seven headers and
//! per-header validation (e.g. rejecting a display name, or rejecting the wildcard) happens one
//! layer up in the dedicated header parsers, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::param::ParamBag;
use crate::types::uri::Uri;

/// A parsed `(name-addr | addr-spec) *(SEMI generic-param)` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressValue {
    pub display_name: Option<String>,
    pub uri: Uri,
    /// Header parameters (`;tag=...`), not the URI's own parameters — those live on `uri`.
    pub params: ParamBag,
}

impl AddressValue {
    pub fn new(uri: Uri) -> Self {
        AddressValue { display_name: None, uri, params: ParamBag::new() }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.params.get("tag")
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.params.remove("tag");
        self.params.add("tag", Some(tag.into()));
    }

    pub fn is_wildcard(&self) -> bool {
        self.uri.wildcard
    }
}

impl fmt::Display for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.uri.wildcard {
            f.write_str("*")?;
        } else {
            if let Some(ref name) = self.display_name {
                if name.bytes().any(|b| !(b.is_ascii_alphanumeric() || b"-.!%*_+`'~ ".contains(&b))) {
                    write!(f, "\"{}\" ", name.replace('\\', "\\\\").replace('"', "\\\""))?;
                } else {
                    write!(f, "{name} ")?;
                }
            }
            write!(f, "<{}>", self.uri)?;
        }
        let mut params_str = String::new();
        self.params.write(';', &mut params_str);
        f.write_str(&params_str)
    }
}
