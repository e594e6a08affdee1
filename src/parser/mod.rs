//! Recursive-descent parsing over SIP wire bytes.
//!
//! All parsers operate on `&[u8]` rather than `&str` so that a message with an opaque binary
//! body never forces a UTF-8 validation pass over bytes the parser doesn't need to look at.

use nom::IResult;

pub mod params;
pub mod lexer;
pub mod address;
pub mod uri;
pub mod headers;
pub mod request;
pub mod response;
pub mod message;

/// The result type every parser in this crate returns: the unconsumed tail of `input` and the
/// parsed value, or a `nom` error carrying the byte slice where parsing failed.
pub type ParseResult<'a, O> = IResult<&'a [u8], O>;
