//! Request-line parser (spec §4.6 step 2): `Method SP Request-URI SP SIP-Version`.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::parser::uri::parse_uri;
use crate::types::message::Version;
use crate::types::method::Method;
use crate::types::uri::Uri;

pub struct RequestLine {
    pub method: Method,
    pub request_uri: Uri,
    pub version: Version,
}

pub fn parse_request_line(line: &[u8]) -> Result<RequestLine> {
    let sp1 = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::InvalidStartLine("missing SP after method".to_string()))?;
    let method_str = std::str::from_utf8(&line[..sp1])
        .map_err(|_| Error::InvalidStartLine("non-UTF8 method token".to_string()))?;
    let rest = &line[sp1 + 1..];

    let sp2 = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::InvalidStartLine("missing SP after Request-URI".to_string()))?;
    let uri_bytes = &rest[..sp2];
    let version_bytes = &rest[sp2 + 1..];

    let method =
        Method::from_str(method_str).map_err(|_| Error::InvalidStartLine(format!("invalid method {method_str:?}")))?;

    let (uri_rest, request_uri) = parse_uri(uri_bytes)?;
    if !uri_rest.is_empty() {
        return Err(Error::InvalidStartLine("trailing data in Request-URI".to_string()));
    }
    if request_uri.wildcard {
        return Err(Error::InvalidStartLine("wildcard URI is not allowed in a request-line".to_string()));
    }

    let version = parse_version(version_bytes)?;
    Ok(RequestLine { method, request_uri, version })
}

/// Parses a `SIP/major.minor` version token. Shared with the status-line parser.
pub(crate) fn parse_version(bytes: &[u8]) -> Result<Version> {
    let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidStartLine("non-UTF8 version token".to_string()))?;
    let s = s.trim();
    let rest = s
        .strip_prefix("SIP/")
        .ok_or_else(|| Error::InvalidStartLine(format!("not a SIP version token: {s:?}")))?;
    let (major_str, minor_str) = rest
        .split_once('.')
        .ok_or_else(|| Error::InvalidStartLine(format!("malformed SIP version: {s:?}")))?;
    let major: u8 = major_str
        .parse()
        .map_err(|_| Error::InvalidStartLine(format!("malformed SIP version major: {major_str:?}")))?;
    let minor: u8 = minor_str
        .parse()
        .map_err(|_| Error::InvalidStartLine(format!("malformed SIP version minor: {minor_str:?}")))?;
    Ok(Version { major, minor })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_invite() {
        let rl = parse_request_line(b"INVITE sip:bob@127.0.0.1:5060 SIP/2.0").unwrap();
        assert_eq!(rl.method, Method::Invite);
        assert_eq!(rl.request_uri.host, "127.0.0.1");
        assert_eq!(rl.version, Version::V2_0);
    }

    #[test]
    fn wildcard_uri_is_rejected() {
        assert!(parse_request_line(b"OPTIONS * SIP/2.0").is_err());
    }

    #[test]
    fn missing_version_is_an_error() {
        assert!(parse_request_line(b"INVITE sip:bob@example.com").is_err());
    }

    #[test]
    fn extension_method_is_accepted() {
        let rl = parse_request_line(b"FOOBAR sip:bob@example.com SIP/2.0").unwrap();
        assert_eq!(rl.method, Method::Extension("FOOBAR".to_string()));
    }
}
