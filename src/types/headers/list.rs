//! The ordered header sequence plus cached "topmost occurrence" slots for the 11 first-class
//! header kinds (spec §3 "Header list", §9 "Fast-reference pointers back into a list").
//!
//! Slots are rebuilt with a single linear scan after any mutation that could move or remove the
//! topmost occurrence of a kind, rather than maintained incrementally: `HeaderList`s are sized to
//! one SIP message (at most a few dozen headers), so the scan is cheap and this sidesteps an
//! entire class of off-by-one bugs that incremental index bookkeeping invites.

use serde::{Deserialize, Serialize};

use crate::types::header::Header;
use crate::types::headers::header_name::HeaderName;

/// Cached index of the first (topmost, by insertion/wire order) occurrence of each first-class
/// header kind. `None` means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct FastRefs {
    via: Option<usize>,
    from: Option<usize>,
    to: Option<usize>,
    contact: Option<usize>,
    referred_by: Option<usize>,
    refer_to: Option<usize>,
    route: Option<usize>,
    record_route: Option<usize>,
    call_id: Option<usize>,
    cseq: Option<usize>,
    content_length: Option<usize>,
    content_type: Option<usize>,
    max_forwards: Option<usize>,
    expires: Option<usize>,
}

/// An ordered sequence of [`Header`]s preserving wire order, with O(1) access to the topmost
/// occurrence of each first-class kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderList {
    items: Vec<Header>,
    refs: FastRefs,
}

impl HeaderList {
    pub fn new() -> Self {
        HeaderList::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Appends a header at the end of the sequence (its natural position after the last header
    /// currently present on the wire).
    pub fn append(&mut self, header: Header) {
        self.items.push(header);
        self.refresh_fast_refs();
    }

    /// Inserts `header` immediately after the last header named `after`, or at the end if no
    /// header with that name is present.
    pub fn append_after(&mut self, after: &HeaderName, header: Header) {
        let pos = self.items.iter().rposition(|h| &h.name() == after);
        match pos {
            Some(i) => self.items.insert(i + 1, header),
            None => self.items.push(header),
        }
        self.refresh_fast_refs();
    }

    /// Inserts `header` at the front of the sequence.
    pub fn prepend(&mut self, header: Header) {
        self.items.insert(0, header);
        self.refresh_fast_refs();
    }

    /// Replaces every occurrence of `header`'s name with a single occurrence of `header`, at the
    /// position of the first occurrence (or the end, if none existed).
    pub fn replace(&mut self, header: Header) {
        let name = header.name();
        let first = self.items.iter().position(|h| h.name() == name);
        self.items.retain(|h| h.name() != name);
        match first {
            Some(i) => {
                let i = i.min(self.items.len());
                self.items.insert(i, header);
            }
            None => self.items.push(header),
        }
        self.refresh_fast_refs();
    }

    /// Removes every header named `name`, returning how many were removed.
    pub fn remove(&mut self, name: &HeaderName) -> usize {
        let before = self.items.len();
        self.items.retain(|h| &h.name() != name);
        self.refresh_fast_refs();
        before - self.items.len()
    }

    /// Every header named `name`, in wire order (used for list-valued headers like Via).
    pub fn get_all(&self, name: &HeaderName) -> Vec<&Header> {
        self.items.iter().filter(|h| &h.name() == name).collect()
    }

    /// The first header named `name`, in wire order.
    pub fn get_first(&self, name: &HeaderName) -> Option<&Header> {
        self.items.iter().find(|h| &h.name() == name)
    }

    pub fn via(&self) -> Option<&Header> {
        self.refs.via.map(|i| &self.items[i])
    }
    pub fn from(&self) -> Option<&Header> {
        self.refs.from.map(|i| &self.items[i])
    }
    pub fn to(&self) -> Option<&Header> {
        self.refs.to.map(|i| &self.items[i])
    }
    pub fn contact(&self) -> Option<&Header> {
        self.refs.contact.map(|i| &self.items[i])
    }
    pub fn referred_by(&self) -> Option<&Header> {
        self.refs.referred_by.map(|i| &self.items[i])
    }
    pub fn refer_to(&self) -> Option<&Header> {
        self.refs.refer_to.map(|i| &self.items[i])
    }
    pub fn route(&self) -> Option<&Header> {
        self.refs.route.map(|i| &self.items[i])
    }
    pub fn record_route(&self) -> Option<&Header> {
        self.refs.record_route.map(|i| &self.items[i])
    }
    pub fn call_id(&self) -> Option<&Header> {
        self.refs.call_id.map(|i| &self.items[i])
    }
    pub fn cseq(&self) -> Option<&Header> {
        self.refs.cseq.map(|i| &self.items[i])
    }
    pub fn content_length(&self) -> Option<&Header> {
        self.refs.content_length.map(|i| &self.items[i])
    }
    pub fn content_type(&self) -> Option<&Header> {
        self.refs.content_type.map(|i| &self.items[i])
    }
    pub fn max_forwards(&self) -> Option<&Header> {
        self.refs.max_forwards.map(|i| &self.items[i])
    }
    pub fn expires(&self) -> Option<&Header> {
        self.refs.expires.map(|i| &self.items[i])
    }

    /// Serializes every header in order (spec §4.8): `Name: value\r\n` per header, no trailing
    /// blank line (the message writer appends the body-separating `\r\n` itself).
    pub fn write_all(&self, compact: bool, out: &mut String) {
        for header in &self.items {
            header.write_full(compact, out);
        }
    }

    fn refresh_fast_refs(&mut self) {
        let mut refs = FastRefs::default();
        for (i, h) in self.items.iter().enumerate() {
            match h {
                Header::Via(_) if refs.via.is_none() => refs.via = Some(i),
                Header::From(_) if refs.from.is_none() => refs.from = Some(i),
                Header::To(_) if refs.to.is_none() => refs.to = Some(i),
                Header::Contact(_) if refs.contact.is_none() => refs.contact = Some(i),
                Header::ReferredBy(_) if refs.referred_by.is_none() => refs.referred_by = Some(i),
                Header::ReferTo(_) if refs.refer_to.is_none() => refs.refer_to = Some(i),
                Header::Route(_) if refs.route.is_none() => refs.route = Some(i),
                Header::RecordRoute(_) if refs.record_route.is_none() => refs.record_route = Some(i),
                Header::CallId(_) if refs.call_id.is_none() => refs.call_id = Some(i),
                Header::CSeq(_) if refs.cseq.is_none() => refs.cseq = Some(i),
                Header::ContentLength(_) if refs.content_length.is_none() => refs.content_length = Some(i),
                Header::ContentType(_) if refs.content_type.is_none() => refs.content_type = Some(i),
                Header::MaxForwards(_) if refs.max_forwards.is_none() => refs.max_forwards = Some(i),
                Header::Expires(_) if refs.expires.is_none() => refs.expires = Some(i),
                _ => {}
            }
        }
        self.refs = refs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::address::AddressValue;
    use crate::types::uri::Uri;

    fn to_header(tag: &str) -> Header {
        let mut addr = AddressValue::new(Uri::sip("bob@example.com"));
        addr.set_tag(tag);
        Header::To(addr)
    }

    #[test]
    fn fast_ref_points_to_topmost_occurrence() {
        let mut list = HeaderList::new();
        list.append(to_header("first"));
        list.append(to_header("second"));
        assert_eq!(list.to().unwrap().value(), "<sip:bob@example.com>;tag=first");
    }

    #[test]
    fn removing_topmost_repoints_to_next_occurrence() {
        let mut list = HeaderList::new();
        list.append(to_header("first"));
        list.append(Header::CallId("x@y".to_string()));
        list.append(to_header("second"));
        assert_eq!(list.remove(&HeaderName::To), 2);
        assert!(list.to().is_none());

        let mut list = HeaderList::new();
        list.append(Header::Via(crate::types::via::ViaHeader::new("SIP", "2.0", "UDP", "a")));
        list.append(Header::Via(crate::types::via::ViaHeader::new("SIP", "2.0", "UDP", "b")));
        assert!(list.remove(&HeaderName::Via) == 2);
        assert!(list.via().is_none());
    }

    #[test]
    fn removing_one_of_two_repoints_slot() {
        let mut list = HeaderList::new();
        list.append(Header::MaxForwards(70));
        list.append(Header::CallId("x@y".to_string()));
        list.replace(Header::MaxForwards(60));
        assert_eq!(list.max_forwards(), Some(&Header::MaxForwards(60)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn prepend_makes_new_header_topmost() {
        let mut list = HeaderList::new();
        list.append(Header::Expires(3600));
        list.prepend(Header::Expires(10));
        assert_eq!(list.expires(), Some(&Header::Expires(10)));
    }

    #[test]
    fn append_after_inserts_immediately_following_named_header() {
        let mut list = HeaderList::new();
        list.append(Header::CallId("x@y".to_string()));
        list.append(Header::MaxForwards(70));
        list.append_after(&HeaderName::CallId, Header::ContentLength(0));
        let names: Vec<_> = list.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec![HeaderName::CallId, HeaderName::ContentLength, HeaderName::MaxForwards]);
    }

    #[test]
    fn get_all_returns_every_occurrence_in_order() {
        let mut list = HeaderList::new();
        list.append(Header::Via(crate::types::via::ViaHeader::new("SIP", "2.0", "UDP", "a")));
        list.append(Header::Via(crate::types::via::ViaHeader::new("SIP", "2.0", "UDP", "b")));
        assert_eq!(list.get_all(&HeaderName::Via).len(), 2);
    }
}
