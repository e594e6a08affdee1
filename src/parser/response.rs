//! Status-line parser (spec §4.6 step 3): `SIP-Version SP Status-Code SP Reason-Phrase`.

use crate::error::{Error, Result};
use crate::parser::request::parse_version;
use crate::types::message::Version;
use crate::types::status::StatusCode;

pub struct StatusLine {
    pub version: Version,
    pub status_code: StatusCode,
    pub reason_phrase: String,
}

pub fn parse_status_line(line: &[u8]) -> Result<StatusLine> {
    let sp1 = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::InvalidStartLine("missing SP after version".to_string()))?;
    let version = parse_version(&line[..sp1])?;
    let rest = &line[sp1 + 1..];

    let sp2 = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::InvalidStartLine("missing SP after status code".to_string()))?;
    let code_str = std::str::from_utf8(&rest[..sp2])
        .map_err(|_| Error::InvalidStartLine("non-UTF8 status code".to_string()))?;
    let code: u16 =
        code_str.parse().map_err(|_| Error::InvalidStartLine(format!("non-numeric status code {code_str:?}")))?;
    let status_code =
        StatusCode::new(code).map_err(|_| Error::InvalidStartLine(format!("status code {code} out of range")))?;

    let reason_phrase = std::str::from_utf8(&rest[sp2 + 1..])
        .map_err(|_| Error::InvalidStartLine("non-UTF8 reason phrase".to_string()))?
        .to_string();

    Ok(StatusLine { version, status_code, reason_phrase })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ok_response() {
        let sl = parse_status_line(b"SIP/2.0 200 OK").unwrap();
        assert_eq!(sl.status_code.as_u16(), 200);
        assert_eq!(sl.reason_phrase, "OK");
    }

    #[test]
    fn reason_phrase_may_contain_spaces() {
        let sl = parse_status_line(b"SIP/2.0 404 Not Found").unwrap();
        assert_eq!(sl.reason_phrase, "Not Found");
    }

    #[test]
    fn out_of_range_status_code_is_an_error() {
        assert!(parse_status_line(b"SIP/2.0 700 Bogus").is_err());
    }

    #[test]
    fn missing_reason_phrase_is_an_error() {
        assert!(parse_status_line(b"SIP/2.0 200").is_err());
    }
}
