use std::str::FromStr;

use bytes::Bytes;

use crate::error::Result;
use crate::types::address::AddressValue;
use crate::types::header::{CSeqValue, Header};
use crate::types::message::{HeaderAccess, Response};
use crate::types::method::Method;
use crate::types::status::StatusCode;
use crate::types::uri::Uri;
use crate::types::via::ViaHeader;

/// Fluent construction of a [`Response`], mirroring [`SimpleRequestBuilder`](super::SimpleRequestBuilder).
///
/// ```
/// use sip_core::builder::SimpleResponseBuilder;
/// use sip_core::types::status::StatusCode;
///
/// let resp = SimpleResponseBuilder::new(StatusCode::OK).unwrap()
///     .to("Bob", "sip:bob@example.com", Some("b5qt9xl3"))
///     .call_id("a84b4c76e66710")
///     .build();
/// assert_eq!(resp.status_code, StatusCode::OK);
/// ```
pub struct SimpleResponseBuilder {
    response: Response,
}

impl SimpleResponseBuilder {
    pub fn new(status_code: StatusCode) -> Result<Self> {
        Ok(Self { response: Response::new(status_code) })
    }

    pub fn from_response(response: Response) -> Self {
        Self { response }
    }

    pub fn trying() -> Self {
        Self { response: Response::new(StatusCode::TRYING) }
    }

    pub fn ringing() -> Self {
        Self { response: Response::new(StatusCode::RINGING) }
    }

    pub fn ok() -> Self {
        Self { response: Response::new(StatusCode::OK) }
    }

    pub fn reason_phrase(mut self, reason: &str) -> Self {
        self.response.reason_phrase = reason.to_string();
        self
    }

    pub fn from(mut self, display_name: &str, uri: &str, tag: Option<&str>) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            let mut addr = AddressValue::new(uri).with_display_name(display_name);
            if let Some(tag) = tag {
                addr.set_tag(tag);
            }
            self.response.replace_header(Header::From(addr));
        }
        self
    }

    pub fn to(mut self, display_name: &str, uri: &str, tag: Option<&str>) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            let mut addr = AddressValue::new(uri).with_display_name(display_name);
            if let Some(tag) = tag {
                addr.set_tag(tag);
            }
            self.response.replace_header(Header::To(addr));
        }
        self
    }

    pub fn call_id(mut self, call_id: &str) -> Self {
        self.response.replace_header(Header::CallId(call_id.to_string()));
        self
    }

    pub fn cseq(mut self, seq: u32, method: Method) -> Self {
        self.response.replace_header(Header::CSeq(CSeqValue { seq, method }));
        self
    }

    pub fn via(mut self, host: &str, transport: &str, branch: Option<&str>) -> Self {
        let mut via = ViaHeader::new("SIP", "2.0", transport, host);
        if let Some(branch) = branch {
            via.set_branch(branch);
        }
        self.response.append_header(Header::Via(via));
        self
    }

    pub fn contact(mut self, uri: &str, display_name: Option<&str>) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            let mut addr = AddressValue::new(uri);
            if let Some(name) = display_name {
                addr = addr.with_display_name(name);
            }
            self.response.append_header(Header::Contact(addr));
        }
        self
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.response.replace_header(Header::ContentType(content_type.to_string()));
        self
    }

    pub fn header(mut self, header: Header) -> Self {
        self.response.append_header(header);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.response.set_body(body);
        self
    }

    pub fn build(self) -> Response {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_basic_200_ok() {
        let resp = SimpleResponseBuilder::ok()
            .to("Bob", "sip:bob@example.com", Some("b5qt9xl3"))
            .from("Alice", "sip:alice@example.com", Some("1928301774"))
            .call_id("a84b4c76e66710")
            .cseq(1, Method::Invite)
            .build();

        assert_eq!(resp.status_code, StatusCode::OK);
        assert_eq!(resp.reason_phrase, "OK");
        assert_eq!(resp.to().unwrap().tag(), Some("b5qt9xl3"));
    }

    #[test]
    fn custom_reason_phrase_overrides_default() {
        let resp = SimpleResponseBuilder::new(StatusCode::NOT_FOUND).unwrap().reason_phrase("User Not Found").build();
        assert_eq!(resp.reason_phrase, "User Not Found");
    }

    #[test]
    fn body_synchronizes_content_length() {
        let resp = SimpleResponseBuilder::ok().content_type("application/sdp").body(Bytes::from_static(b"v=0\r\n")).build();
        assert_eq!(resp.content_length(), Some(&5));
    }
}
