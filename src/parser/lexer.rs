//! Lexer primitives (spec §4.1): ASCII case folding, CRLF-terminated line extraction with RFC
//! 3261 §7.3.1 line folding, and the "found line or need more data" outcome the stream framer
//! depends on.
//!
//! This is deliberately *not* built on `nom`: nom's `complete` combinators have no notion of
//! "not enough data yet" distinct from "this input is malformed", and the streaming variant
//! would need every grammar rule in the crate ported to it. A small hand-written scanner gives
//! the two outcomes spec §4.1(c) asks for directly.
//!
//! Folding (RFC 3261 §7.3.1: a CRLF immediately followed by SP/HTAB continues the *value already
//! in progress* rather than ending the line) can only ever continue something non-empty — there
//! is no header-value content for a blank line to extend. So a CRLF that terminates a
//! zero-length line is never ambiguous: it ends the line immediately, regardless of what follows
//! it or whether more bytes could still arrive later. This matters because the header section's
//! terminating blank line is exactly such a zero-length line, and both callers of this scanner —
//! the whole-buffer message parser and `StreamFramer`, which may see that CRLF sitting at the
//! exact end of whatever's buffered so far — need to recognize it as complete without waiting for
//! a byte that, for an empty line, could never change the answer.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Lowercases `s`, allocating only if it contains an uppercase ASCII letter (spec §4.1(a)).
pub fn ascii_lower(s: &str) -> Cow<'_, str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// `WSP = SP / HTAB` (spec §4.1(b)).
pub fn is_wsp(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// The result of scanning for one CRLF-terminated logical line.
pub enum LineOutcome<'a> {
    /// A complete logical line, with folded continuations collapsed to single spaces, and the
    /// number of bytes (including all CRLFs consumed, folded or terminal) this line occupied.
    Found { line: Cow<'a, [u8]>, consumed: usize },
    /// `buf` does not yet contain a complete line; the caller should wait for more bytes.
    NeedMore,
}

/// Scans one logical header/start line from the front of `buf`.
///
/// A line ends at the first CRLF that is *not* immediately followed by SP or HTAB (RFC 3261
/// §7.3.1: a CRLF immediately followed by linear whitespace continues the previous line rather
/// than ending it). Runs of linear whitespace introduced by folding collapse to a single SP.
///
/// A bare `\n` with no preceding `\r`, or a bare `\r` not followed by `\n`, is a permanent
/// framing error by default (spec §4.1(c) "a lone LF or lone CR without its partner is a framing
/// error") — SIP's line terminator is always the two-byte sequence, never a lenient single byte.
///
/// With the `lenient_parsing` feature enabled, a bare LF is instead accepted as its own line
/// terminator, matching how widely-deployed SIP stacks handle peers that send Unix-style line
/// endings; a bare CR not followed by LF is still always an error.
pub fn next_line(buf: &[u8]) -> Result<LineOutcome<'_>> {
    let mut pos = 0usize;
    let mut seg_start = 0usize;
    let mut acc: Option<Vec<u8>> = None;

    loop {
        let rel = match buf[pos..].iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(r) => r,
            None => return Ok(LineOutcome::NeedMore),
        };
        let cr = pos + rel;

        if buf[cr] == b'\n' {
            #[cfg(feature = "lenient_parsing")]
            {
                let consumed = cr + 1;
                let line = match acc {
                    Some(mut v) => {
                        v.extend_from_slice(&buf[seg_start..cr]);
                        Cow::Owned(v)
                    }
                    None => Cow::Borrowed(&buf[seg_start..cr]),
                };
                return Ok(LineOutcome::Found { line, consumed });
            }
            #[cfg(not(feature = "lenient_parsing"))]
            return Err(Error::Parse("bare LF without preceding CR".to_string()));
        }
        // buf[cr] == b'\r'
        if cr + 1 >= buf.len() {
            return Ok(LineOutcome::NeedMore);
        }
        if buf[cr + 1] != b'\n' {
            return Err(Error::Parse("bare CR without following LF".to_string()));
        }

        // Nothing accumulated since the last terminator (or the start of the scan): this CRLF
        // ends a zero-length line, which can never be a fold-in-progress (folding continues a
        // value, and there's no value here to continue). Settle it now instead of peeking ahead
        // — this is what lets a Content-Length: 0 message's terminating blank line resolve even
        // when it sits at the exact end of whatever's buffered so far.
        let line_so_far_is_empty = acc.is_none() && seg_start == cr;
        if line_so_far_is_empty {
            return Ok(LineOutcome::Found { line: Cow::Borrowed(&buf[seg_start..cr]), consumed: cr + 2 });
        }

        if cr + 2 >= buf.len() {
            // No byte follows the CRLF yet, so we can't tell whether it folds into a
            // continuation of the non-empty content gathered so far.
            return Ok(LineOutcome::NeedMore);
        }

        if is_wsp(buf[cr + 2]) {
            let v = acc.get_or_insert_with(Vec::new);
            v.extend_from_slice(&buf[seg_start..cr]);
            v.push(b' ');
            let mut j = cr + 2;
            while j < buf.len() && is_wsp(buf[j]) {
                j += 1;
            }
            if j == buf.len() {
                return Ok(LineOutcome::NeedMore);
            }
            seg_start = j;
            pos = j;
        } else {
            let consumed = cr + 2;
            let line = match acc {
                Some(mut v) => {
                    v.extend_from_slice(&buf[seg_start..cr]);
                    Cow::Owned(v)
                }
                None => Cow::Borrowed(&buf[seg_start..cr]),
            };
            return Ok(LineOutcome::Found { line, consumed });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(buf: &[u8]) -> (Vec<u8>, usize) {
        match next_line(buf).unwrap() {
            LineOutcome::Found { line, consumed } => (line.into_owned(), consumed),
            LineOutcome::NeedMore => panic!("expected Found"),
        }
    }

    #[test]
    fn simple_line_with_no_folding() {
        let (line, consumed) = found(b"Call-ID: x@y\r\nrest");
        assert_eq!(line, b"Call-ID: x@y");
        assert_eq!(consumed, b"Call-ID: x@y\r\n".len());
    }

    #[test]
    fn empty_line_signals_end_of_headers() {
        let (line, consumed) = found(b"\r\nbody");
        assert!(line.is_empty());
        assert_eq!(consumed, 2);
    }

    #[test]
    fn folded_continuation_collapses_to_single_space() {
        let (line, _) = found(b"Subject: I know\r\n   you're there\r\n");
        assert_eq!(line, b"Subject: I know you're there");
    }

    #[test]
    fn multiple_folds_each_collapse_to_one_space() {
        let (line, _) = found(b"a: 1\r\n 2\r\n\t3\r\nrest");
        assert_eq!(line, b"a: 1 2 3");
    }

    #[test]
    fn incomplete_line_needs_more_data() {
        assert!(matches!(next_line(b"Via: SIP/2.0/UDP").unwrap(), LineOutcome::NeedMore));
    }

    #[test]
    fn crlf_with_unknown_next_byte_needs_more_data() {
        // Can't yet tell whether this CRLF ends the line or folds into the next one.
        assert!(matches!(next_line(b"a: 1\r\n").unwrap(), LineOutcome::NeedMore));
    }

    #[test]
    fn blank_line_at_exact_end_of_buffer_is_found_immediately() {
        // The header-terminating blank line can never be a fold in progress (there's no value
        // for it to continue), so it doesn't need to wait for a byte that could never change the
        // answer — unlike `crlf_with_unknown_next_byte_needs_more_data` below, where the line has
        // real content and a fold is still possible.
        match next_line(b"\r\n").unwrap() {
            LineOutcome::Found { line, consumed } => {
                assert!(line.is_empty());
                assert_eq!(consumed, 2);
            }
            LineOutcome::NeedMore => panic!("expected Found"),
        }
    }

    #[test]
    fn blank_line_followed_by_more_buffered_bytes_is_still_found_immediately() {
        match next_line(b"\r\nbody-or-next-message").unwrap() {
            LineOutcome::Found { line, consumed } => {
                assert!(line.is_empty());
                assert_eq!(consumed, 2);
            }
            LineOutcome::NeedMore => panic!("expected Found"),
        }
    }

    #[test]
    #[cfg(not(feature = "lenient_parsing"))]
    fn bare_lf_is_a_framing_error() {
        assert!(next_line(b"a: 1\nb: 2\r\n").is_err());
    }

    #[test]
    #[cfg(feature = "lenient_parsing")]
    fn bare_lf_is_accepted_as_a_line_terminator() {
        let (line, consumed) = found(b"a: 1\nb: 2\r\n");
        assert_eq!(line, b"a: 1");
        assert_eq!(consumed, 5);
    }

    #[test]
    fn bare_cr_is_a_framing_error() {
        assert!(next_line(b"a: 1\rb: 2\r\n").is_err());
    }
}
