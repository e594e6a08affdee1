//! Property-based round-trip checks (spec §8 law 2: parse → serialize → parse again yields an
//! equal message). The torture-style exhaustive tests in `streaming_torture.rs` cover the one
//! invariant worth enumerating longhand (every chunk-boundary split); this file covers the
//! lighter "does this generally hold" property across randomized well-formed inputs instead.

use proptest::prelude::*;

use sip_core::parse_message;

fn token_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9.-]{0,15}"
}

fn request_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just("INVITE".to_string()),
            Just("ACK".to_string()),
            Just("BYE".to_string()),
            Just("OPTIONS".to_string()),
            Just("REGISTER".to_string()),
            Just("CANCEL".to_string()),
        ],
        token_strategy(),
        token_strategy(),
        token_strategy(),
        1u32..100_000,
        token_strategy(),
        1u32..70,
    )
        .prop_map(|(method, user, host, branch, cseq, call_host, max_forwards)| {
            format!(
                "{method} sip:{user}@{host} SIP/2.0\r\n\
Via: SIP/2.0/UDP {host};branch=z9hG4bK{branch}\r\n\
Max-Forwards: {max_forwards}\r\n\
To: <sip:{user}@{host}>\r\n\
From: <sip:{user}@{host}>;tag={branch}\r\n\
Call-ID: {branch}@{call_host}\r\n\
CSeq: {cseq} {method}\r\n\
Content-Length: 0\r\n\
\r\n"
            )
        })
}

proptest! {
    #[test]
    fn parse_serialize_parse_is_idempotent(raw in request_strategy()) {
        let first = parse_message(raw.as_bytes()).expect("generated message must be well-formed");
        let serialized = first.serialize(false);
        let second = parse_message(&serialized).expect("serialized message must reparse");
        prop_assert_eq!(first, second);
    }
}
