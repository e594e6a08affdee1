//! # sip-core
//!
//! SIP (RFC 3261) message parsing, header model, and stream-framed transport parser.
//!
//! This crate covers the message-layer core of SIP: turning wire bytes into a typed [`Message`]
//! and back, and reassembling whole messages out of whatever chunks a stream transport happens
//! to deliver them in. It does not implement transactions, dialogs, retransmission timers, or
//! network I/O — those live one layer up, built on top of what's exported here.
//!
//! ## Layout
//!
//! - [`types`] — the data model: [`Uri`](types::Uri), [`Header`](types::Header),
//!   [`Message`](types::Message)/[`Request`](types::Request)/[`Response`](types::Response), and
//!   their supporting value types.
//! - [`parser`] — the recursive-descent parsers that turn header and start-line bytes into the
//!   types above.
//! - [`framer`] — [`StreamFramer`](framer::StreamFramer), which reassembles messages out of an
//!   appendable byte buffer fed by a stream transport.
//! - [`builder`] — fluent [`SimpleRequestBuilder`](builder::SimpleRequestBuilder)/
//!   [`SimpleResponseBuilder`](builder::SimpleResponseBuilder) for constructing messages without
//!   going through the wire format.
//! - [`config`] — [`ParserConfig`], the knobs that vary parsing behavior across transports.
//! - [`error`] — the [`Error`] enum and [`Result`] alias shared by every fallible operation here.
//!
//! ## Example
//!
//! ```
//! use sip_core::{parse_message, Message};
//!
//! let data = b"INVITE sip:bob@example.com SIP/2.0\r\n\
//! Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
//! Max-Forwards: 70\r\n\
//! To: Bob <sip:bob@example.com>\r\n\
//! From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
//! Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
//! CSeq: 314159 INVITE\r\n\
//! Content-Length: 0\r\n\r\n";
//!
//! let message = parse_message(data).expect("valid SIP message");
//! assert!(message.is_request());
//! ```
//!
//! ## Feature flags
//!
//! - `lenient_parsing` — accepts a bare LF as a line terminator in addition to CRLF, for
//!   interop with peers that send Unix-style line endings. Off by default: RFC 3261 §7.3.1
//!   only recognizes CRLF, and treating a lone LF as significant outside this mode is a framing
//!   error (see [`parser::lexer::next_line`]).

pub mod builder;
pub mod config;
pub mod error;
pub mod framer;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use config::ParserConfig;
pub use framer::{FrameStatus, StreamFramer};
pub use parser::parse_message;
pub use types::{
    AddressValue, CSeqValue, GenericHeader, Header, HeaderList, HeaderName, Message, Method,
    ParamBag, Request, Response, Scheme, StatusCode, Uri, ViaHeader,
};
