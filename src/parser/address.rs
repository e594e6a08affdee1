//! The address-value parser (spec §4.3) behind From/To/Contact/Referred-By/Refer-To/Route/
//! Record-Route: `[ display-name ] ( "<" URI ">" | URI ) *( ";" generic-param )`.
//!
//! Per-header validation (wildcard restricted to Contact, Refer-To/Route/Record-Route being
//! URI-only) happens one layer up in `parser::headers`; this module only knows the shared
//! grammar.
//!
//! The angle-bracket delimiter and the quoted display-name both go through real `nom`
//! combinators (`delimited`/`char`/`take_till`, and [`params::quoted_string`] respectively). The
//! boundary scan ahead of them — finding the `<` or top-level `;`/`,` that ends the display-name
//! span while tracking quote state — stays a single hand-rolled walk, the same way the teacher's
//! `uri/absolute.rs` keeps `find_uri_end` a plain function alongside its combinator parsers: it
//! has to watch two kinds of state (in-quotes, escaped) across the whole remaining input at once,
//! which doesn't decompose into a fixed sequence of combinator calls.

use nom::bytes::complete::take_till;
use nom::character::complete::char as nom_char;
use nom::sequence::delimited;

use crate::error::{Error, Result};
use crate::parser::params::{parse_param_bag, quoted_string};
use crate::parser::uri::parse_uri;
use crate::types::address::AddressValue;
use crate::types::uri::Uri;

fn trim_wsp(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&b| b != b' ' && b != b'\t').unwrap_or(input.len());
    let end = input.iter().rposition(|&b| b != b' ' && b != b'\t').map_or(start, |p| p + 1);
    &input[start..end]
}

/// Parses one `(display-name)? (name-addr | addr-spec)` value, stopping before the first
/// top-level `,` (list-valued headers split on that at the call site) or at end of input.
pub fn parse_address(input: &[u8]) -> Result<(&[u8], AddressValue)> {
    let input = trim_wsp(input);

    if let Some(rest) = input.strip_prefix(b"*") {
        let boundary_ok = rest.first().map_or(true, |&b| b == b';' || b == b',' || b == b' ' || b == b'\t');
        if boundary_ok {
            return Ok((rest, AddressValue::new(Uri::wildcard())));
        }
    }

    let mut in_quotes = false;
    let mut angle_pos = None;
    let mut term_pos = input.len();
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'"' => in_quotes = !in_quotes,
            b'\\' if in_quotes && i + 1 < input.len() => i += 1,
            b'<' if !in_quotes => {
                angle_pos = Some(i);
                break;
            }
            b';' | b',' if !in_quotes => {
                term_pos = i;
                break;
            }
            _ => {}
        }
        i += 1;
    }

    if let Some(lt) = angle_pos {
        let display_name = parse_display_name(&input[..lt])?;
        let (after_gt, uri_inner) = take_angle_addr(&input[lt..])?;
        let (uri_rest, uri) = parse_uri(uri_inner)?;
        if !uri_rest.is_empty() {
            return Err(Error::invalid_uri("trailing data inside <...>"));
        }
        let (rest, params) = parse_param_bag(after_gt, b';', &[b',']).map_err(Error::from)?;
        Ok((rest, AddressValue { display_name, uri, params }))
    } else {
        let (uri_rest, uri) = parse_uri(&input[..term_pos])?;
        if !uri_rest.is_empty() {
            return Err(Error::invalid_uri("trailing data after bare URI"));
        }
        let rest = &input[term_pos..];
        let (rest, params) = parse_param_bag(rest, b';', &[b',']).map_err(Error::from)?;
        Ok((rest, AddressValue { display_name: None, uri, params }))
    }
}

/// `"<" addr-spec ">"`, extracted with a real combinator chain rather than a manual index scan.
fn take_angle_addr(input: &[u8]) -> Result<(&[u8], &[u8])> {
    delimited(nom_char('<'), take_till(|b: u8| b == b'>'), nom_char('>'))(input)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| Error::invalid_uri("unterminated name-addr: missing '>'"))
}

/// Parses a display-name (trimmed, possibly quoted) ahead of a `<...>` address. An empty or
/// whitespace-only span is "no display name"; an opening `"` with no matching unescaped closing
/// `"` is a hard error.
fn parse_display_name(raw: &[u8]) -> Result<Option<String>> {
    let raw = trim_wsp(raw);
    if raw.is_empty() {
        return Ok(None);
    }
    if raw[0] != b'"' {
        return Ok(Some(
            std::str::from_utf8(raw).map_err(|_| Error::invalid_uri("non-UTF8 display name"))?.to_string(),
        ));
    }

    let (rest, name) =
        quoted_string(raw).map_err(|_| Error::invalid_uri("unterminated quoted display name"))?;
    if !rest.is_empty() {
        return Err(Error::invalid_uri("trailing data after quoted display name"));
    }
    Ok(Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_addr_with_quoted_display_name_and_tag() {
        let (rest, addr) = parse_address(br#""Alice" <sip:alice@127.0.0.2:5060>;tag=1928301774"#).unwrap();
        assert!(rest.is_empty());
        assert_eq!(addr.display_name.as_deref(), Some("Alice"));
        assert_eq!(addr.uri.to_string(), "sip:alice@127.0.0.2:5060");
        assert_eq!(addr.tag(), Some("1928301774"));
    }

    #[test]
    fn bare_addr_spec_with_no_display_name() {
        let (rest, addr) = parse_address(b"sip:bob@127.0.0.1:5060").unwrap();
        assert!(rest.is_empty());
        assert!(addr.display_name.is_none());
        assert_eq!(addr.uri.host, "127.0.0.1");
    }

    #[test]
    fn bare_addr_spec_params_after_first_semicolon_are_header_params() {
        let (rest, addr) = parse_address(b"sip:bob@example.com;tag=abc").unwrap();
        assert!(rest.is_empty());
        assert_eq!(addr.tag(), Some("abc"));
        assert!(!addr.uri.uri_params.has("tag"));
    }

    #[test]
    fn wildcard_contact_value() {
        let (rest, addr) = parse_address(b"*").unwrap();
        assert!(rest.is_empty());
        assert!(addr.is_wildcard());
    }

    #[test]
    fn unquoted_display_name_before_angle_addr() {
        let (rest, addr) = parse_address(b"Bob <sip:bob@example.com>").unwrap();
        assert!(rest.is_empty());
        assert_eq!(addr.display_name.as_deref(), Some("Bob"));
    }

    #[test]
    fn unterminated_quoted_display_name_is_an_error() {
        assert!(parse_address(br#""Alice <sip:alice@example.com>"#).is_err());
    }

    #[test]
    fn stops_before_top_level_comma_for_list_headers() {
        let (rest, addr) = parse_address(b"sip:a@b;branch=b1, sip:c@d;branch=b2").unwrap();
        assert_eq!(rest, b", sip:c@d;branch=b2");
        assert_eq!(addr.params.get("branch"), Some("b1"));
    }
}
