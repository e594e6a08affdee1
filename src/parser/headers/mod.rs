//! The header registry (spec §4.5/§6 `HeaderParsers`): dispatches a lowercased (and
//! compact-alias-resolved) header name to its dedicated parser, returning one or more [`Header`]
//! values (comma-split list headers return more than one — spec §4.5's `CommaDetected`
//! sentinel is modeled here as an ordinary loop rather than a parser-combinator signal, since
//! every comma-splittable value already stops cleanly at the top-level `,`).

mod cseq;
mod simple;
mod table;
mod uint;
mod via;

use crate::error::{Error, Result};
use crate::parser::address::parse_address;
use crate::types::address::AddressValue;
use crate::types::header::{GenericHeader, Header};
use crate::types::headers::HeaderName;

pub use table::{HeaderParserFn, HeaderParserTable};

/// Parses one header line's value (already unfolded to a single logical line, with the name and
/// its separating `:` already stripped) into the [`Header`] value(s) it represents.
///
/// Dispatch goes through `table` rather than a hardcoded match (spec §6 `HeaderParsers`): a name
/// with no registered parser — whether because it was never one of the 14 first-class kinds, or
/// because a caller removed it — becomes [`Header::Generic`].
pub fn parse_header_value(table: &HeaderParserTable, name: &HeaderName, raw_name: &str, value: &[u8]) -> Result<Vec<Header>> {
    match table.get(name.canonical_str()) {
        Some(parser) => parser(value),
        None => {
            let value = std::str::from_utf8(value).map_err(|_| Error::invalid_header(raw_name, "non-UTF8 value"))?;
            Ok(vec![Header::Generic(GenericHeader { name: raw_name.to_string(), value: value.trim().to_string() })])
        }
    }
}

fn via_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(via::parse_via_list(value)?.into_iter().map(Header::Via).collect())
}

fn from_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::From(parse_one_address(value, "From", false)?)])
}

fn to_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::To(parse_one_address(value, "To", false)?)])
}

fn contact_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(parse_address_list(value, "Contact", true)?.into_iter().map(Header::Contact).collect())
}

fn referred_by_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::ReferredBy(parse_one_address(value, "Referred-By", false)?)])
}

fn refer_to_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::ReferTo(parse_one_address(value, "Refer-To", false)?)])
}

fn route_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(parse_address_list(value, "Route", false)?.into_iter().map(Header::Route).collect())
}

fn record_route_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(parse_address_list(value, "Record-Route", false)?.into_iter().map(Header::RecordRoute).collect())
}

fn call_id_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::CallId(simple::parse_call_id(value)?)])
}

fn cseq_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::CSeq(cseq::parse_cseq(value)?)])
}

fn content_length_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::ContentLength(uint::parse_uint32(value, "Content-Length")?)])
}

fn content_type_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::ContentType(simple::parse_content_type(value)?)])
}

fn max_forwards_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::MaxForwards(uint::parse_uint32(value, "Max-Forwards")?)])
}

fn expires_parser(value: &[u8]) -> Result<Vec<Header>> {
    Ok(vec![Header::Expires(uint::parse_uint32(value, "Expires")?)])
}

/// Wildcard is a valid Contact value but MUST be rejected on To/From/Refer-To/Route/
/// Record-Route/Referred-By (spec §4.3 "the Wildcard URI is only valid in Contact").
fn parse_one_address(value: &[u8], header_name: &str, allow_wildcard: bool) -> Result<AddressValue> {
    let (rest, addr) = parse_address(value)?;
    if !trim_wsp(rest).is_empty() {
        return Err(Error::invalid_header(header_name, "trailing data after address"));
    }
    if addr.is_wildcard() && !allow_wildcard {
        return Err(Error::invalid_header(header_name, "wildcard address is only valid on Contact"));
    }
    Ok(addr)
}

fn parse_address_list(value: &[u8], header_name: &str, allow_wildcard: bool) -> Result<Vec<AddressValue>> {
    let mut out = Vec::new();
    let mut rest = trim_wsp(value);
    loop {
        let (r, addr) = parse_address(rest)?;
        if addr.is_wildcard() && !allow_wildcard {
            return Err(Error::invalid_header(header_name, "wildcard address is only valid on Contact"));
        }
        out.push(addr);
        let r = trim_wsp(r);
        match r.first() {
            Some(&b',') => rest = trim_wsp(&r[1..]),
            None => break,
            Some(_) => return Err(Error::invalid_header(header_name, "trailing data after address")),
        }
    }
    Ok(out)
}

fn trim_wsp(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&b| b != b' ' && b != b'\t').unwrap_or(input.len());
    &input[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_contact_is_accepted() {
        let table = HeaderParserTable::default();
        let headers = parse_header_value(&table, &HeaderName::Contact, "Contact", b"*").unwrap();
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn wildcard_from_is_rejected() {
        let table = HeaderParserTable::default();
        assert!(parse_header_value(&table, &HeaderName::From, "From", b"*").is_err());
    }

    #[test]
    fn unknown_header_becomes_generic() {
        let table = HeaderParserTable::default();
        let headers = parse_header_value(&table, &HeaderName::Other("X-Trace".to_string()), "X-Trace", b" abc123 ").unwrap();
        assert_eq!(headers, vec![Header::Generic(GenericHeader { name: "X-Trace".to_string(), value: "abc123".to_string() })]);
    }

    #[test]
    fn comma_split_route_yields_multiple_headers() {
        let table = HeaderParserTable::default();
        let headers = parse_header_value(&table, &HeaderName::Route, "Route", b"<sip:a@b;lr>, <sip:c@d;lr>").unwrap();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn removing_a_registry_entry_downgrades_it_to_generic() {
        let mut table = HeaderParserTable::default();
        table.remove("via");
        let headers = parse_header_value(&table, &HeaderName::Via, "Via", b"SIP/2.0/UDP a").unwrap();
        assert_eq!(headers, vec![Header::Generic(GenericHeader { name: "Via".to_string(), value: "SIP/2.0/UDP a".to_string() })]);
    }
}
