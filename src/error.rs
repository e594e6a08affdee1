//! Error taxonomy for message parsing, header parsing, and stream framing.
//!
//! Mirrors the kinds called out in the framing specification rather than exposing nom's
//! internal error types: callers of this crate should never need to depend on `nom`.

use thiserror::Error;

/// A type alias for handling `Result`s with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or framing SIP messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The first line of a message is neither a request-line nor a status-line.
    #[error("invalid start line: {0}")]
    InvalidStartLine(String),

    /// A URI failed to parse.
    #[error("invalid URI: {reason}")]
    InvalidUri {
        /// Why the URI was rejected (missing scheme, bad port, double port, unterminated
        /// IPv6 literal, ...).
        reason: String,
    },

    /// A recognized header's value failed its dedicated parser.
    #[error("invalid {name} header: {reason}")]
    InvalidHeader {
        /// The header name as it appeared on the wire.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A stream transport requires `Content-Length` and none was present.
    #[error("missing required Content-Length header on stream transport")]
    MissingContentLength,

    /// The message (or the portion framed so far) exceeds the configured size ceiling.
    #[error("message exceeds maximum length of {max} bytes")]
    MessageTooLarge {
        /// The configured ceiling that was exceeded.
        max: usize,
    },

    /// The byte stream ended before a complete message was available.
    ///
    /// On [`crate::framer::StreamFramer`] this corresponds to the `NeedMore` status, not a
    /// hard error. The whole-buffer parser (`parser::message::parse_message`) treats it as a
    /// hard error since there is no further input to wait for.
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// The stream framer was asked to continue parsing from a state it cannot recover from
    /// without caller intervention (programmer error, or a state corrupted by a prior bug).
    #[error("framer is in an unknown or unrecoverable state")]
    UnknownState,

    /// Catch-all for malformed input that does not fit a more specific variant.
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    pub(crate) fn invalid_uri(reason: impl Into<String>) -> Self {
        Error::InvalidUri { reason: reason.into() }
    }

    pub(crate) fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader { name: name.into(), reason: reason.into() }
    }
}

/// Converts a nom error over `&[u8]` into our error type, losing only the internal
/// `ErrorKind` (callers see a byte offset instead, which is more actionable).
impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                Error::Parse(format!("at {} remaining bytes: {:?}", e.input.len(), e.code))
            }
            nom::Err::Incomplete(_) => Error::UnexpectedEof("need more data".to_string()),
        }
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::Parse(format!("invalid integer: {err}"))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Parse(format!("invalid UTF-8: {err}"))
    }
}
