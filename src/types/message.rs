//! The top-level `Message` sum type (spec §3): `Request { method, request-URI, version,
//! headers, body, transport-tag, source, destination }` or the equivalent `Response`.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::header::Header;
use crate::types::headers::{HeaderList, HeaderName};
use crate::types::method::Method;
use crate::types::status::StatusCode;
use crate::types::uri::Uri;

/// `SIP/major.minor`, always `SIP/2.0` for RFC 3261 traffic but parsed rather than assumed so a
/// malformed version token surfaces as `InvalidStartLine` instead of silently passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const V2_0: Version = Version { major: 2, minor: 0 };
}

impl Default for Version {
    fn default() -> Self {
        Version::V2_0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP/{}.{}", self.major, self.minor)
    }
}

/// Endpoint tagging applied by the transport collaborator (spec §6) after a message is framed.
/// The core never populates these itself — they exist so callers have somewhere to stash the
/// information without inventing their own wrapper type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportInfo {
    pub transport: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
}

macro_rules! header_accessors {
    ($($method:ident => $variant:ident : $t:ty),+ $(,)?) => {
        $(
            pub fn $method(&self) -> Option<&$t> {
                match self.headers.$method() {
                    Some(Header::$variant(v)) => Some(v),
                    _ => None,
                }
            }
        )+
    };
}

/// Shared header/body surface for [`Request`] and [`Response`] (spec §6 "typed accessors ...
/// generic accessors ... mutators").
pub trait HeaderAccess {
    fn header_list(&self) -> &HeaderList;
    fn header_list_mut(&mut self) -> &mut HeaderList;
    fn body(&self) -> &Bytes;

    fn header(&self, name: &HeaderName) -> Option<&Header> {
        self.header_list().get_first(name)
    }

    fn headers_named(&self, name: &HeaderName) -> Vec<&Header> {
        self.header_list().get_all(name)
    }

    fn append_header(&mut self, header: Header) {
        self.header_list_mut().append(header);
    }

    fn append_header_after(&mut self, after: &HeaderName, header: Header) {
        self.header_list_mut().append_after(after, header);
    }

    fn prepend_header(&mut self, header: Header) {
        self.header_list_mut().prepend(header);
    }

    fn replace_header(&mut self, header: Header) {
        self.header_list_mut().replace(header);
    }

    fn remove_header(&mut self, name: &HeaderName) -> usize {
        self.header_list_mut().remove(name)
    }
}

/// Sets `Content-Length` to the octet length of `body`, replacing any existing occurrence or
/// appending one if absent (spec §3 "Setting the body enforces Content-Length").
fn sync_content_length(headers: &mut HeaderList, body: &Bytes) {
    headers.replace(Header::ContentLength(body.len() as u32));
}

/// A SIP request: `Method Request-URI SIP-Version`, headers, body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub request_uri: Uri,
    pub version: Version,
    pub headers: HeaderList,
    body: Bytes,
    pub transport_info: TransportInfo,
}

impl Request {
    pub fn new(method: Method, request_uri: Uri) -> Self {
        let mut req = Request {
            method,
            request_uri,
            version: Version::default(),
            headers: HeaderList::new(),
            body: Bytes::new(),
            transport_info: TransportInfo::default(),
        };
        sync_content_length(&mut req.headers, &req.body);
        req
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
        sync_content_length(&mut self.headers, &self.body);
    }

    /// Builds a request directly from its already-parsed parts (spec §4.6 step 6). Bypasses
    /// `Content-Length` synchronization: the headers and body both came straight off the wire
    /// and are already consistent by construction.
    pub(crate) fn from_parts(method: Method, request_uri: Uri, version: Version, headers: HeaderList, body: Bytes) -> Self {
        Request { method, request_uri, version, headers, body, transport_info: TransportInfo::default() }
    }

    /// Serializes the request (spec §4.8): start-line, headers in recorded order, blank line,
    /// body octets. `compact` substitutes single-letter header aliases.
    pub fn serialize(&self, compact: bool) -> Vec<u8> {
        let mut out = format!("{} {} {}\r\n", self.method, self.request_uri, self.version);
        self.headers.write_all(compact, &mut out);
        out.push_str("\r\n");
        let mut bytes = out.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }

    header_accessors! {
        via => Via: crate::types::via::ViaHeader,
        from => From: crate::types::address::AddressValue,
        to => To: crate::types::address::AddressValue,
        contact => Contact: crate::types::address::AddressValue,
        referred_by => ReferredBy: crate::types::address::AddressValue,
        refer_to => ReferTo: crate::types::address::AddressValue,
        route => Route: crate::types::address::AddressValue,
        record_route => RecordRoute: crate::types::address::AddressValue,
        call_id => CallId: String,
        cseq => CSeq: crate::types::header::CSeqValue,
        content_length => ContentLength: u32,
        content_type => ContentType: String,
        max_forwards => MaxForwards: u32,
        expires => Expires: u32,
    }
}

impl HeaderAccess for Request {
    fn header_list(&self) -> &HeaderList {
        &self.headers
    }
    fn header_list_mut(&mut self) -> &mut HeaderList {
        &mut self.headers
    }
    fn body(&self) -> &Bytes {
        &self.body
    }
}

/// A SIP response: `SIP-Version Status-Code Reason-Phrase`, headers, body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub version: Version,
    pub status_code: StatusCode,
    pub reason_phrase: String,
    pub headers: HeaderList,
    body: Bytes,
    pub transport_info: TransportInfo,
}

impl Response {
    pub fn new(status_code: StatusCode) -> Self {
        let reason_phrase = status_code.default_reason_phrase().to_string();
        let mut resp = Response {
            version: Version::default(),
            status_code,
            reason_phrase,
            headers: HeaderList::new(),
            body: Bytes::new(),
            transport_info: TransportInfo::default(),
        };
        sync_content_length(&mut resp.headers, &resp.body);
        resp
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
        sync_content_length(&mut self.headers, &self.body);
    }

    /// Builds a response directly from its already-parsed parts (spec §4.6 step 6).
    pub(crate) fn from_parts(
        version: Version,
        status_code: StatusCode,
        reason_phrase: String,
        headers: HeaderList,
        body: Bytes,
    ) -> Self {
        Response { version, status_code, reason_phrase, headers, body, transport_info: TransportInfo::default() }
    }

    /// Serializes the response (spec §4.8), mirroring [`Request::serialize`].
    pub fn serialize(&self, compact: bool) -> Vec<u8> {
        let mut out = format!("{} {} {}\r\n", self.version, self.status_code.as_u16(), self.reason_phrase);
        self.headers.write_all(compact, &mut out);
        out.push_str("\r\n");
        let mut bytes = out.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }

    header_accessors! {
        via => Via: crate::types::via::ViaHeader,
        from => From: crate::types::address::AddressValue,
        to => To: crate::types::address::AddressValue,
        contact => Contact: crate::types::address::AddressValue,
        referred_by => ReferredBy: crate::types::address::AddressValue,
        refer_to => ReferTo: crate::types::address::AddressValue,
        route => Route: crate::types::address::AddressValue,
        record_route => RecordRoute: crate::types::address::AddressValue,
        call_id => CallId: String,
        cseq => CSeq: crate::types::header::CSeqValue,
        content_length => ContentLength: u32,
        content_type => ContentType: String,
        max_forwards => MaxForwards: u32,
        expires => Expires: u32,
    }
}

impl HeaderAccess for Response {
    fn header_list(&self) -> &HeaderList {
        &self.headers
    }
    fn header_list_mut(&mut self) -> &mut HeaderList {
        &mut self.headers
    }
    fn body(&self) -> &Bytes {
        &self.body
    }
}

/// A fully parsed (or constructed) SIP message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Request(Request),
    Response(Response),
}

impl Message {
    pub fn headers(&self) -> &HeaderList {
        match self {
            Message::Request(r) => &r.headers,
            Message::Response(r) => &r.headers,
        }
    }

    pub fn body(&self) -> &Bytes {
        match self {
            Message::Request(r) => r.body(),
            Message::Response(r) => r.body(),
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }

    /// Serializes whichever variant this is (spec §4.8).
    pub fn serialize(&self, compact: bool) -> Vec<u8> {
        match self {
            Message::Request(r) => r.serialize(compact),
            Message::Response(r) => r.serialize(compact),
        }
    }
}

impl From<Request> for Message {
    fn from(r: Request) -> Self {
        Message::Request(r)
    }
}

impl From<Response> for Message {
    fn from(r: Response) -> Self {
        Message::Response(r)
    }
}
