//! Exhaustive chunk-boundary coverage for `StreamFramer` (spec §8 scenario 6): a complete
//! message is fed to the framer split at every possible byte position, and at every split the
//! framer must eventually produce exactly the same message a whole-buffer parse would, without
//! ever reporting a hard error for a split that's merely incomplete.

use sip_core::{parse_message, FrameStatus, StreamFramer};

const INVITE: &[u8] = b"INVITE sip:bob@biloxi.example.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.example.com;branch=z9hG4bK776asdhds\r\n\
Max-Forwards: 70\r\n\
To: Bob <sip:bob@biloxi.example.com>\r\n\
From: Alice <sip:alice@atlanta.example.com>;tag=1928301774\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.example.com\r\n\
CSeq: 314159 INVITE\r\n\
Contact: <sip:alice@pc33.atlanta.example.com>\r\n\
Content-Type: application/sdp\r\n\
Content-Length: 4\r\n\
\r\n\
abcd";

const RESPONSE: &[u8] = b"SIP/2.0 200 OK\r\n\
Via: SIP/2.0/UDP pc33.atlanta.example.com;branch=z9hG4bK776asdhds\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.example.com\r\n\
CSeq: 314159 INVITE\r\n\
Content-Length: 0\r\n\
\r\n";

fn assert_split_point_reframes(message: &[u8], split: usize) {
    let expected = parse_message(message).expect("fixture message must parse whole");

    let mut framer = StreamFramer::for_stream_transport();
    framer.write(&message[..split]);

    let mut framed = None;
    loop {
        match framer.parse_next() {
            FrameStatus::Message(m) => {
                framed = Some(m);
                break;
            }
            FrameStatus::NeedMore => {
                if framer.buffered_len() == message.len() {
                    panic!("whole message buffered but framer still reports NeedMore at split {split}");
                }
                framer.write(&message[split..]);
            }
            FrameStatus::Error(e) => panic!("unexpected framing error at split {split}: {e}"),
        }
    }

    assert_eq!(framed.unwrap(), expected, "reframed message differs from whole-buffer parse at split {split}");
}

#[test]
fn invite_reframes_correctly_at_every_split_point() {
    for split in 0..=INVITE.len() {
        assert_split_point_reframes(INVITE, split);
    }
}

#[test]
fn response_reframes_correctly_at_every_split_point() {
    for split in 0..=RESPONSE.len() {
        assert_split_point_reframes(RESPONSE, split);
    }
}

#[test]
fn back_to_back_messages_split_at_every_point_in_the_first_message() {
    let mut both = INVITE.to_vec();
    both.extend_from_slice(RESPONSE);

    for split in 0..=INVITE.len() {
        let mut framer = StreamFramer::for_stream_transport();
        framer.write(&both[..split]);
        framer.write(&both[split..]);

        let mut messages = Vec::new();
        loop {
            match framer.parse_next() {
                FrameStatus::Message(m) => messages.push(m),
                FrameStatus::NeedMore => break,
                FrameStatus::Error(e) => panic!("unexpected framing error at split {split}: {e}"),
            }
        }
        assert_eq!(messages.len(), 2, "expected both pipelined messages framed at split {split}");
    }
}
