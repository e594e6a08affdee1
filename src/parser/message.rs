//! The whole-buffer message parser (spec §4.6): one input slice containing exactly one SIP
//! message in, a [`Message`] out.

use bytes::Bytes;
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::parser::headers::parse_header_value;
use crate::parser::lexer::{next_line, LineOutcome};
use crate::parser::request::parse_request_line;
use crate::parser::response::parse_status_line;
use crate::types::header::{GenericHeader, Header};
use crate::types::headers::{HeaderList, HeaderName};
use crate::types::message::{Message, Request, Response};

/// Parses one message using the default configuration (datagram-style: `Content-Length` is not
/// mandatory).
pub fn parse_message(input: &[u8]) -> Result<Message> {
    parse_message_with_config(input, &ParserConfig::default())
}

/// Parses one message, requiring that `input` contains exactly that message and nothing more.
/// Applies `config`'s `require_content_length` and `swallow_header_errors` policies (spec §6,
/// §7).
pub fn parse_message_with_config(input: &[u8], config: &ParserConfig) -> Result<Message> {
    let (message, consumed) = parse_message_prefix(input, config)?;
    if consumed != input.len() {
        return Err(Error::Parse("trailing data after message".to_string()));
    }
    Ok(message)
}

/// Parses the single message at the front of `input`, returning it along with how many bytes it
/// occupied. Unlike [`parse_message_with_config`], trailing bytes (the start of a subsequent
/// message) are tolerated — this is what [`crate::framer::StreamFramer`] drives.
pub fn parse_message_prefix(input: &[u8], config: &ParserConfig) -> Result<(Message, usize)> {
    let (start_line, mut rest) = match next_line(input)? {
        LineOutcome::Found { line, consumed } => (line.into_owned(), &input[consumed..]),
        LineOutcome::NeedMore => return Err(Error::UnexpectedEof("incomplete start-line".to_string())),
    };

    // spec §4.6 step 1: a line beginning with a SIP-version token is a response; otherwise it
    // must be a request-line ending with one (parse_request_line rejects anything else).
    let is_response = start_line.starts_with(b"SIP/");

    let mut headers = HeaderList::new();
    loop {
        match next_line(rest)? {
            LineOutcome::Found { line, consumed } => {
                rest = &rest[consumed..];
                if line.is_empty() {
                    break;
                }
                append_header_line(&mut headers, &line, config)?;
            }
            LineOutcome::NeedMore => return Err(Error::UnexpectedEof("incomplete header section".to_string())),
        }
    }

    let content_length = headers.get_first(&HeaderName::ContentLength).and_then(|h| match h {
        Header::ContentLength(n) => Some(*n as usize),
        _ => None,
    });

    if content_length.is_none() && config.require_content_length {
        return Err(Error::MissingContentLength);
    }

    let body_len = content_length.unwrap_or(rest.len());
    if rest.len() < body_len {
        return Err(Error::UnexpectedEof(format!(
            "declared Content-Length {body_len} exceeds the {} bytes available",
            rest.len()
        )));
    }
    let body = Bytes::copy_from_slice(&rest[..body_len]);
    let consumed = input.len() - (rest.len() - body_len);

    let message = if is_response {
        let sl = parse_status_line(&start_line)?;
        Message::Response(Response::from_parts(sl.version, sl.status_code, sl.reason_phrase, headers, body))
    } else {
        let rl = parse_request_line(&start_line)?;
        Message::Request(Request::from_parts(rl.method, rl.request_uri, rl.version, headers, body))
    };
    Ok((message, consumed))
}

fn append_header_line(headers: &mut HeaderList, line: &[u8], config: &ParserConfig) -> Result<()> {
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or_else(|| Error::Parse(format!("header line missing ':': {:?}", String::from_utf8_lossy(line))))?;
    let raw_name = std::str::from_utf8(&line[..colon])
        .map_err(|_| Error::Parse("non-UTF8 header name".to_string()))?
        .trim()
        .to_string();
    let value = trim_leading_wsp(&line[colon + 1..]);
    let name = HeaderName::parse(&raw_name);

    match parse_header_value(&config.header_parsers, &name, &raw_name, value) {
        Ok(parsed) => {
            for h in parsed {
                headers.append(h);
            }
            Ok(())
        }
        Err(e) if config.swallow_header_errors => {
            debug!(header = %raw_name, error = %e, "downgrading header to generic after parse failure");
            let value_str = String::from_utf8_lossy(value).trim().to_string();
            headers.append(Header::Generic(GenericHeader { name: raw_name, value: value_str }));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn trim_leading_wsp(input: &[u8]) -> &[u8] {
    let end = input.iter().position(|&b| b != b' ' && b != b'\t').unwrap_or(input.len());
    &input[end..]
}
