//! Call-ID and Content-Type: opaque tokens with no internal structure beyond "non-empty"
//! (spec §4.5).

use crate::error::{Error, Result};
use crate::parser::lexer::is_wsp;

fn trim(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|&b| !is_wsp(b)).unwrap_or(value.len());
    let end = value.iter().rposition(|&b| !is_wsp(b)).map_or(start, |p| p + 1);
    &value[start..end]
}

pub fn parse_call_id(value: &[u8]) -> Result<String> {
    let trimmed = trim(value);
    if trimmed.is_empty() {
        return Err(Error::invalid_header("Call-ID", "empty value"));
    }
    std::str::from_utf8(trimmed).map(str::to_string).map_err(|_| Error::invalid_header("Call-ID", "non-UTF8 value"))
}

pub fn parse_content_type(value: &[u8]) -> Result<String> {
    let trimmed = trim(value);
    std::str::from_utf8(trimmed).map(str::to_string).map_err(|_| Error::invalid_header("Content-Type", "non-UTF8 value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_id_round_trips() {
        assert_eq!(parse_call_id(b"  x@y  ").unwrap(), "x@y");
    }

    #[test]
    fn empty_call_id_is_an_error() {
        assert!(parse_call_id(b"   ").is_err());
    }

    #[test]
    fn content_type_is_preserved_verbatim() {
        assert_eq!(parse_content_type(b"application/sdp").unwrap(), "application/sdp");
    }
}
