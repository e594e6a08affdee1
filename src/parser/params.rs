//! Generic parameter-bag scanner shared by URI parameters, URI headers, and header parameters
//! (RFC 3261 §4.4 of this crate's framing spec; grammar roots in RFC 3261 §25.1 `generic-param`).
//!
//! `token` and `name=value`/`name="quoted value"` are built from real `nom` combinators, the same
//! way the teacher's `uri/headers.rs` builds its `header` parser out of `tag`/`alt`/`opt` around
//! a hand-rolled escape-aware byte scanner for the value body itself — quoted-string unescaping
//! is intrinsically a stateful walk (it has to track `\`-escapes one byte at a time), so it stays
//! a loop, called from inside the combinator chain rather than replacing it.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::char as nom_char;
use nom::combinator::{map_res, opt};
use nom::sequence::{pair, preceded};

use crate::parser::ParseResult;
use crate::types::param::ParamBag;

/// True for RFC 3261 `token` characters: `alphanum / "-" / "." / "!" / "%" / "*" / "_" / "+" /
/// "`" / "'" / "~"`.
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-.!%*_+`'~".contains(&b)
}

fn token(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(is_token_char)(input)
}

fn token_string(input: &[u8]) -> ParseResult<String> {
    map_res(token, |b: &[u8]| std::str::from_utf8(b).map(str::to_string))(input)
}

/// Parses a quoted-string (including the surrounding `"`s), unescaping `\x` pairs. The quotes
/// themselves are matched with `nom::character::complete::char`; the body between them is a
/// hand-rolled escape walk, since `\`-unescaping can't be expressed as a fixed character class.
///
/// `pub(crate)` so `parser::address` can reuse it for quoted display-names (RFC 3261 §25.1's
/// `quoted-string` is the same grammar in both places).
pub(crate) fn quoted_string(input: &[u8]) -> ParseResult<String> {
    let (mut rest, _) = nom_char('"')(input)?;
    let mut out = String::new();
    loop {
        match rest.first() {
            Some(b'"') => return Ok((&rest[1..], out)),
            Some(b'\\') if rest.len() > 1 => {
                out.push(rest[1] as char);
                rest = &rest[2..];
            }
            Some(&b) => {
                out.push(b as char);
                rest = &rest[1..];
            }
            None => return Err(nom::Err::Incomplete(nom::Needed::Unknown)),
        }
    }
}

fn param_value(input: &[u8]) -> ParseResult<String> {
    alt((quoted_string, token_string))(input)
}

/// `generic-param = token [ "=" (token / quoted-string) ]`.
fn param(input: &[u8]) -> ParseResult<(String, Option<String>)> {
    pair(token_string, opt(preceded(nom_char('='), param_value)))(input)
}

fn byte_char(b: u8) -> impl Fn(&[u8]) -> ParseResult<char> {
    move |input: &[u8]| nom_char(b as char)(input)
}

/// Scans zero or more `separator`-prefixed parameters until `input` is exhausted or a
/// terminator byte not in `terminators` would need to be consumed (the caller stops before it
/// by construction — this scanner simply returns whatever unconsumed tail remains).
///
/// `terminators` lists bytes that end the bag even without being consumed as a separator (e.g.
/// `?` ends the URI-parameters bag and starts the headers bag).
pub fn parse_param_bag<'a>(
    input: &'a [u8],
    separator: u8,
    terminators: &[u8],
) -> ParseResult<'a, ParamBag> {
    parse_param_bag_inner(input, separator, terminators, true)
}

/// Like [`parse_param_bag`] but the first parameter is not itself preceded by `separator` —
/// the shape of a URI's `?name=value&name2=value2` headers component, where `?` (already
/// consumed by the caller) stands in for the first entry's separator.
pub fn parse_param_bag_unled<'a>(
    input: &'a [u8],
    separator: u8,
    terminators: &[u8],
) -> ParseResult<'a, ParamBag> {
    parse_param_bag_inner(input, separator, terminators, false)
}

fn parse_param_bag_inner<'a>(
    input: &'a [u8],
    separator: u8,
    terminators: &[u8],
    leading_separator: bool,
) -> ParseResult<'a, ParamBag> {
    let mut bag = ParamBag::new();
    let mut rest = input;
    let mut first = true;

    loop {
        if leading_separator || !first {
            match opt(byte_char(separator))(rest)? {
                (after_sep, Some(_)) => rest = after_sep,
                (_, None) => break,
            }
        }
        first = false;

        let (after_param, (key, value)) = param(rest)?;
        bag.add(key, value);
        rest = after_param;

        match rest.first() {
            Some(&b) if b == separator => continue,
            Some(&b) if terminators.contains(&b) => break,
            None => break,
            _ => break,
        }
    }

    Ok((rest, bag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flag_and_valued_params() {
        let (rest, bag) = parse_param_bag(b";transport=tcp;lr", b';', &[]).unwrap();
        assert!(rest.is_empty());
        assert_eq!(bag.get("transport"), Some("tcp"));
        assert!(bag.is_flag("lr"));
    }

    #[test]
    fn stops_at_terminator_without_consuming_it() {
        let (rest, bag) = parse_param_bag(b";transport=tcp?subject=hi", b';', b"?").unwrap();
        assert_eq!(rest, b"?subject=hi");
        assert_eq!(bag.get("transport"), Some("tcp"));
    }

    #[test]
    fn parses_quoted_value_with_escape() {
        let (rest, bag) = parse_param_bag(br#";foo="a\"b""#, b';', &[]).unwrap();
        assert!(rest.is_empty());
        assert_eq!(bag.get("foo"), Some("a\"b"));
    }

    #[test]
    fn empty_bag_when_no_separator_present() {
        let (rest, bag) = parse_param_bag(b"remaining", b';', &[]).unwrap();
        assert_eq!(rest, b"remaining");
        assert!(bag.is_empty());
    }

    #[test]
    fn ampersand_separated_uri_headers() {
        let (rest, bag) =
            parse_param_bag_unled(b"subject=meeting&priority=urgent", b'&', &[]).unwrap();
        assert!(rest.is_empty());
        assert_eq!(bag.get("subject"), Some("meeting"));
        assert_eq!(bag.get("priority"), Some("urgent"));
    }
}
