//! The Via header's own little FSM (spec §4.5): `Protocol → Version → Transport → Host → Port? →
//! Params?`, plus comma-splitting into one [`ViaHeader`] per element (never a linked list).

use crate::error::{Error, Result};
use crate::parser::lexer::is_wsp;
use crate::parser::params::parse_param_bag;
use crate::types::via::ViaHeader;

/// Parses the full (possibly comma-joined) value of a Via header line into one or more hops.
pub fn parse_via_list(value: &[u8]) -> Result<Vec<ViaHeader>> {
    let mut out = Vec::new();
    let mut rest = value;
    loop {
        let (r, via) = parse_one_via(rest)?;
        out.push(via);
        let r = trim_leading_wsp(r);
        match r.first() {
            Some(&b',') => {
                rest = trim_leading_wsp(&r[1..]);
            }
            None => break,
            Some(_) => return Err(Error::invalid_header("Via", "trailing data after value")),
        }
    }
    Ok(out)
}

fn parse_one_via(input: &[u8]) -> Result<(&[u8], ViaHeader)> {
    let input = trim_leading_wsp(input);

    let (rest, protocol_name) = take_until_slash(input, "protocol name")?;
    let (rest, protocol_version) = take_until_slash(rest, "protocol version")?;
    let (rest, transport) = take_transport(rest)?;

    let rest = take_required_wsp(rest)?;
    let (rest, host) = take_host(rest)?;
    let (rest, port) = take_port(rest)?;
    let (rest, params) = parse_param_bag(rest, b';', &[b',']).map_err(Error::from)?;

    Ok((rest, ViaHeader { protocol_name, protocol_version, transport, host, port, params }))
}

fn take_until_slash<'a>(input: &'a [u8], what: &str) -> Result<(&'a [u8], String)> {
    let end = input.iter().position(|&b| b == b'/').ok_or_else(|| Error::invalid_header("Via", format!("missing {what}")))?;
    if end == 0 {
        return Err(Error::invalid_header("Via", format!("empty {what}")));
    }
    let token = std::str::from_utf8(&input[..end])
        .map_err(|_| Error::invalid_header("Via", format!("non-UTF8 {what}")))?
        .to_string();
    Ok((&input[end + 1..], token))
}

fn take_transport(input: &[u8]) -> Result<(&[u8], String)> {
    let end = input.iter().position(|&b| is_wsp(b)).ok_or_else(|| Error::invalid_header("Via", "missing transport"))?;
    if end == 0 {
        return Err(Error::invalid_header("Via", "empty transport"));
    }
    let token = std::str::from_utf8(&input[..end])
        .map_err(|_| Error::invalid_header("Via", "non-UTF8 transport"))?
        .to_string();
    Ok((&input[end..], token))
}

fn take_required_wsp(input: &[u8]) -> Result<&[u8]> {
    let end = input.iter().position(|&b| !is_wsp(b)).unwrap_or(input.len());
    if end == 0 {
        return Err(Error::invalid_header("Via", "missing whitespace before host"));
    }
    Ok(&input[end..])
}

const MAX_IPV6_LITERAL_LEN: usize = 42;

fn take_host(input: &[u8]) -> Result<(&[u8], String)> {
    if input.first() == Some(&b'[') {
        let window_end = input.len().min(MAX_IPV6_LITERAL_LEN);
        let close = input[..window_end]
            .iter()
            .position(|&b| b == b']')
            .ok_or_else(|| Error::invalid_header("Via", "unterminated IPv6 literal"))?;
        let literal = std::str::from_utf8(&input[..=close])
            .map_err(|_| Error::invalid_header("Via", "non-UTF8 IPv6 literal"))?
            .to_string();
        return Ok((&input[close + 1..], literal));
    }
    let end = input.iter().position(|&b| b == b':' || b == b';' || b == b',' || is_wsp(b)).unwrap_or(input.len());
    if end == 0 {
        return Err(Error::invalid_header("Via", "empty host"));
    }
    let host = std::str::from_utf8(&input[..end])
        .map_err(|_| Error::invalid_header("Via", "non-UTF8 host"))?
        .to_string();
    Ok((&input[end..], host))
}

fn take_port(input: &[u8]) -> Result<(&[u8], u16)> {
    if input.first() != Some(&b':') {
        return Ok((input, 0));
    }
    let rest = &input[1..];
    let end = rest.iter().position(|&b| !b.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return Err(Error::invalid_header("Via", "empty port"));
    }
    let port: u32 = std::str::from_utf8(&rest[..end])
        .expect("checked ASCII digits")
        .parse()
        .map_err(|_| Error::invalid_header("Via", "bad port"))?;
    let port: u16 = port.try_into().map_err(|_| Error::invalid_header("Via", "port out of range"))?;
    Ok((&rest[end..], port))
}

fn trim_leading_wsp(input: &[u8]) -> &[u8] {
    let end = input.iter().position(|&b| !is_wsp(b)).unwrap_or(input.len());
    &input[end..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_via() {
        let vias = parse_via_list(b"SIP/2.0/UDP 127.0.0.2:5060;branch=z9hG4bK.abc").unwrap();
        assert_eq!(vias.len(), 1);
        assert_eq!(vias[0].transport, "UDP");
        assert_eq!(vias[0].host, "127.0.0.2");
        assert_eq!(vias[0].port, 5060);
        assert_eq!(vias[0].branch(), Some("z9hG4bK.abc"));
    }

    #[test]
    fn comma_separated_list_produces_multiple_hops() {
        let vias = parse_via_list(b"SIP/2.0/UDP a;branch=b1, SIP/2.0/UDP c;branch=b2").unwrap();
        assert_eq!(vias.len(), 2);
        assert_eq!(vias[0].branch(), Some("b1"));
        assert_eq!(vias[1].branch(), Some("b2"));
    }

    #[test]
    fn ipv6_host_is_preserved_with_brackets() {
        let vias = parse_via_list(b"SIP/2.0/TCP [2001:db8::1]:5060").unwrap();
        assert_eq!(vias[0].host, "[2001:db8::1]");
    }

    #[test]
    fn missing_transport_is_an_error() {
        assert!(parse_via_list(b"SIP/2.0/").is_err());
    }
}
