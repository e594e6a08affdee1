use std::str::FromStr;

use bytes::Bytes;

use crate::error::Result;
use crate::types::address::AddressValue;
use crate::types::header::{CSeqValue, Header};
use crate::types::message::{HeaderAccess, Request};
use crate::types::method::Method;
use crate::types::uri::Uri;
use crate::types::via::ViaHeader;

/// Fluent construction of a [`Request`], trimmed to the 11 first-class headers plus body.
///
/// ```
/// use sip_core::builder::SimpleRequestBuilder;
/// use sip_core::types::method::Method;
///
/// let req = SimpleRequestBuilder::new(Method::Invite, "sip:bob@example.com").unwrap()
///     .from("Alice", "sip:alice@example.com", Some("1928301774"))
///     .to("Bob", "sip:bob@example.com", None)
///     .call_id("a84b4c76e66710")
///     .cseq(1)
///     .via("alice.example.com", "UDP", Some("z9hG4bK776asdhds"))
///     .max_forwards(70)
///     .build();
/// assert_eq!(req.method, Method::Invite);
/// ```
pub struct SimpleRequestBuilder {
    request: Request,
}

impl SimpleRequestBuilder {
    /// Starts a builder for `method` targeting `uri`, which must parse as a [`Uri`].
    pub fn new(method: Method, uri: &str) -> Result<Self> {
        let uri = Uri::from_str(uri)?;
        Ok(Self { request: Request::new(method, uri) })
    }

    /// Starts from an already-built request, to tweak a handful of headers.
    pub fn from_request(request: Request) -> Self {
        Self { request }
    }

    pub fn invite(uri: &str) -> Result<Self> {
        Self::new(Method::Invite, uri)
    }

    pub fn register(uri: &str) -> Result<Self> {
        Self::new(Method::Register, uri)
    }

    pub fn bye(uri: &str) -> Result<Self> {
        Self::new(Method::Bye, uri)
    }

    pub fn ack(uri: &str) -> Result<Self> {
        Self::new(Method::Ack, uri)
    }

    pub fn cancel(uri: &str) -> Result<Self> {
        Self::new(Method::Cancel, uri)
    }

    pub fn options(uri: &str) -> Result<Self> {
        Self::new(Method::Options, uri)
    }

    pub fn method(&self) -> Method {
        self.request.method.clone()
    }

    /// Sets the From header. `tag` is almost always required outside of the very first request
    /// of a dialog-less transaction (spec §4.5 does not itself enforce this — callers do).
    pub fn from(mut self, display_name: &str, uri: &str, tag: Option<&str>) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            let mut addr = AddressValue::new(uri).with_display_name(display_name);
            if let Some(tag) = tag {
                addr.set_tag(tag);
            }
            self.request.replace_header(Header::From(addr));
        }
        self
    }

    pub fn to(mut self, display_name: &str, uri: &str, tag: Option<&str>) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            let mut addr = AddressValue::new(uri).with_display_name(display_name);
            if let Some(tag) = tag {
                addr.set_tag(tag);
            }
            self.request.replace_header(Header::To(addr));
        }
        self
    }

    pub fn call_id(mut self, call_id: &str) -> Self {
        self.request.replace_header(Header::CallId(call_id.to_string()));
        self
    }

    /// Sets CSeq, reusing the request's own method (spec §8 invariant (a): CSeq's method must
    /// match the request it accompanies).
    pub fn cseq(mut self, seq: u32) -> Self {
        let method = self.request.method.clone();
        self.request.replace_header(Header::CSeq(CSeqValue { seq, method }));
        self
    }

    /// Appends a Via hop (spec §4.5: a comma-joined line becomes one `ViaHeader` per element, so
    /// building one request hop at a time means one `append_header` call per hop).
    pub fn via(mut self, host: &str, transport: &str, branch: Option<&str>) -> Self {
        let mut via = ViaHeader::new("SIP", "2.0", transport, host);
        if let Some(branch) = branch {
            via.set_branch(branch);
        }
        self.request.append_header(Header::Via(via));
        self
    }

    pub fn max_forwards(mut self, value: u32) -> Self {
        self.request.replace_header(Header::MaxForwards(value));
        self
    }

    pub fn expires(mut self, seconds: u32) -> Self {
        self.request.replace_header(Header::Expires(seconds));
        self
    }

    pub fn contact(mut self, uri: &str, display_name: Option<&str>) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            let mut addr = AddressValue::new(uri);
            if let Some(name) = display_name {
                addr = addr.with_display_name(name);
            }
            self.request.append_header(Header::Contact(addr));
        }
        self
    }

    /// Appends a Route header (one URI per call — spec §4.5 keeps these as separate headers,
    /// never a linked list).
    pub fn route(mut self, uri: &str) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            self.request.append_header(Header::Route(AddressValue::new(uri)));
        }
        self
    }

    pub fn record_route(mut self, uri: &str) -> Self {
        if let Ok(uri) = Uri::from_str(uri) {
            self.request.append_header(Header::RecordRoute(AddressValue::new(uri)));
        }
        self
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.request.replace_header(Header::ContentType(content_type.to_string()));
        self
    }

    /// Appends a raw header not among the 11 first-class kinds.
    pub fn header(mut self, header: Header) -> Self {
        self.request.append_header(header);
        self
    }

    /// Sets the body, which re-synchronizes `Content-Length` ([`Request::set_body`]).
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.set_body(body);
        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::headers::HeaderName;

    #[test]
    fn builds_a_basic_invite() {
        let req = SimpleRequestBuilder::invite("sip:bob@example.com")
            .unwrap()
            .from("Alice", "sip:alice@example.com", Some("1928301774"))
            .to("Bob", "sip:bob@example.com", None)
            .call_id("a84b4c76e66710")
            .cseq(1)
            .via("alice.example.com", "UDP", Some("z9hG4bK776asdhds"))
            .max_forwards(70)
            .contact("sip:alice@192.168.1.2:5060", None)
            .build();

        assert_eq!(req.method, Method::Invite);
        assert_eq!(req.from().unwrap().tag(), Some("1928301774"));
        assert_eq!(req.cseq().unwrap().method, Method::Invite);
        assert_eq!(req.headers.get_all(&HeaderName::Via).len(), 1);
    }

    #[test]
    fn invalid_target_uri_is_rejected() {
        assert!(SimpleRequestBuilder::new(Method::Invite, "not a uri").is_err());
    }

    #[test]
    fn body_synchronizes_content_length() {
        let req = SimpleRequestBuilder::invite("sip:bob@example.com")
            .unwrap()
            .content_type("application/sdp")
            .body(Bytes::from_static(b"v=0\r\n"))
            .build();
        assert_eq!(req.content_length(), Some(&5));
    }

    #[test]
    fn repeated_field_setters_replace_rather_than_duplicate() {
        let req = SimpleRequestBuilder::invite("sip:bob@example.com")
            .unwrap()
            .call_id("first")
            .call_id("second")
            .build();
        assert_eq!(req.headers.get_all(&HeaderName::CallId).len(), 1);
        assert_eq!(req.call_id(), Some(&"second".to_string()));
    }
}
