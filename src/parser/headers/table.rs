//! `HeaderParsers` (spec §6): a lowercase-name → parser-function map, replaceable wholesale by a
//! caller who wants to add parsers for headers this crate treats as generic, or to swap out a
//! first-class one. Looked up once per header line by [`super::parse_header_value`].

use std::collections::HashMap;

use crate::error::Result;
use crate::types::header::Header;

use super::{call_id_parser, content_length_parser, content_type_parser, contact_parser, cseq_parser, expires_parser,
    from_parser, max_forwards_parser, record_route_parser, refer_to_parser, referred_by_parser, route_parser,
    to_parser, via_parser};

/// A header-value parser: the already-unfolded value bytes in, one or more [`Header`]s out.
pub type HeaderParserFn = fn(&[u8]) -> Result<Vec<Header>>;

/// The lowercase-canonical-name → parser registry (spec §6 `HeaderParsers`).
///
/// Replacing or removing an entry changes how that header name is parsed; a name with no entry
/// falls back to [`Header::Generic`] (spec §6 "replacing this disables unknown-header fast
/// paths" — the fast path *is* having an entry).
#[derive(Clone, Debug)]
pub struct HeaderParserTable(HashMap<String, HeaderParserFn>);

impl HeaderParserTable {
    /// An empty table: every header becomes generic.
    pub fn empty() -> Self {
        HeaderParserTable(HashMap::new())
    }

    /// Registers or replaces the parser for `name` (matched case-insensitively by lowercasing).
    pub fn insert(&mut self, name: impl Into<String>, parser: HeaderParserFn) {
        self.0.insert(name.into().to_ascii_lowercase(), parser);
    }

    pub fn remove(&mut self, name: &str) -> Option<HeaderParserFn> {
        self.0.remove(&name.to_ascii_lowercase())
    }

    pub fn get(&self, name: &str) -> Option<HeaderParserFn> {
        self.0.get(&name.to_ascii_lowercase()).copied()
    }
}

impl Default for HeaderParserTable {
    /// The built-in registry covering the 14 first-class header kinds (spec §4.5).
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("via", via_parser);
        table.insert("from", from_parser);
        table.insert("to", to_parser);
        table.insert("contact", contact_parser);
        table.insert("referred-by", referred_by_parser);
        table.insert("refer-to", refer_to_parser);
        table.insert("route", route_parser);
        table.insert("record-route", record_route_parser);
        table.insert("call-id", call_id_parser);
        table.insert("cseq", cseq_parser);
        table.insert("content-length", content_length_parser);
        table.insert("content-type", content_type_parser);
        table.insert("max-forwards", max_forwards_parser);
        table.insert("expires", expires_parser);
        table
    }
}
