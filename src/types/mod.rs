//! The data model: URIs, parameter bags, headers, and messages (spec §3).

pub mod address;
pub mod header;
pub mod headers;
pub mod message;
pub mod method;
pub mod param;
pub mod status;
pub mod uri;
pub mod via;

pub use address::AddressValue;
pub use header::{CSeqValue, GenericHeader, Header};
pub use headers::{HeaderList, HeaderName};
pub use message::{Message, Request, Response};
pub use method::Method;
pub use param::ParamBag;
pub use status::StatusCode;
pub use uri::{Scheme, Uri};
pub use via::ViaHeader;
