//! Fluent builders for constructing [`Request`](crate::types::message::Request)/
//! [`Response`](crate::types::message::Response) values programmatically, complementing the
//! parser (spec §4.6 builds the other direction, from wire bytes).
//!
//! Each setter takes already-typed values (a [`Uri`](crate::types::uri::Uri), a branch string)
//! rather than re-parsing header text, so a builder can never produce the kind of malformed
//! header the parser exists to reject.

mod request;
mod response;

pub use request::SimpleRequestBuilder;
pub use response::SimpleResponseBuilder;
