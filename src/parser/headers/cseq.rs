//! CSeq parser (spec §4.5): `1*DIGIT 1*WSP Method`, sequence number ≤ 2³¹−1 (spec §8
//! invariant (a)).

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::parser::lexer::is_wsp;
use crate::types::header::CSeqValue;
use crate::types::method::Method;

const MAX_CSEQ: u32 = (1u32 << 31) - 1;

pub fn parse_cseq(value: &[u8]) -> Result<CSeqValue> {
    let value = trim(value);
    let digit_end = value.iter().position(|&b| !b.is_ascii_digit()).unwrap_or(value.len());
    if digit_end == 0 {
        return Err(Error::invalid_header("CSeq", "missing sequence number"));
    }
    let seq_str = std::str::from_utf8(&value[..digit_end]).expect("checked ASCII digits");
    let seq: u32 = seq_str.parse().map_err(|_| Error::invalid_header("CSeq", "sequence number overflow"))?;
    if seq > MAX_CSEQ {
        return Err(Error::invalid_header("CSeq", "sequence number exceeds 2^31-1"));
    }

    let rest = &value[digit_end..];
    let ws_end = rest.iter().position(|&b| !is_wsp(b)).unwrap_or(rest.len());
    if ws_end == 0 {
        return Err(Error::invalid_header("CSeq", "missing whitespace before method"));
    }
    let method_str = std::str::from_utf8(trim(&rest[ws_end..]))
        .map_err(|_| Error::invalid_header("CSeq", "non-UTF8 method"))?;
    let method = Method::from_str(method_str).map_err(|e| Error::invalid_header("CSeq", e.to_string()))?;

    Ok(CSeqValue { seq, method })
}

fn trim(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|&b| !is_wsp(b)).unwrap_or(value.len());
    let end = value.iter().rposition(|&b| !is_wsp(b)).map_or(start, |p| p + 1);
    &value[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seq_and_method() {
        let c = parse_cseq(b"1 INVITE").unwrap();
        assert_eq!(c.seq, 1);
        assert_eq!(c.method, Method::Invite);
    }

    #[test]
    fn rejects_missing_whitespace() {
        assert!(parse_cseq(b"1INVITE").is_err());
    }

    #[test]
    fn rejects_seq_above_signed_32_bit_max() {
        assert!(parse_cseq(b"2147483648 INVITE").is_err());
    }

    #[test]
    fn accepts_max_seq() {
        assert_eq!(parse_cseq(b"2147483647 BYE").unwrap().seq, 2147483647);
    }

    #[test]
    fn extension_method_is_preserved() {
        assert_eq!(parse_cseq(b"5 FOOBAR").unwrap().method, Method::Extension("FOOBAR".to_string()));
    }
}
