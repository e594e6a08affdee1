//! The stream-framed transport parser (spec §4.7).
//!
//! A [`StreamFramer`] owns an appendable buffer and reconstructs [`Message`]s out of it one at a
//! time, regardless of how the underlying transport chops bytes into chunks: a message may
//! arrive split across any number of `write` calls, and several messages may arrive in a single
//! one. Not safe for concurrent use — one instance per connection, driven serially by its owning
//! transport collaborator (spec §5).

pub mod pool;

use bytes::BytesMut;
use tracing::{debug, trace, warn};

use crate::config::ParserConfig;
use crate::error::Error;
use crate::parser::message::parse_message_prefix;
use crate::types::message::Message;

/// The outcome of [`StreamFramer::parse_next`].
#[derive(Debug)]
pub enum FrameStatus {
    /// A complete message was framed and removed from the buffer.
    Message(Message),
    /// Not enough bytes are buffered yet to know whether a complete message is present.
    NeedMore,
    /// A framing error occurred. [`Error::MessageTooLarge`] and most parse failures leave the
    /// framer in a recoverable state: call [`StreamFramer::discard`] with the number of bytes to
    /// skip before parsing can resume.
    Error(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramerState {
    Ready,
    /// A prior `parse_next` call failed and the caller has not yet called `discard` or `reset`.
    Stuck(StuckReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StuckReason {
    TooLarge,
    ParseError,
}

pub struct StreamFramer {
    buf: BytesMut,
    state: FramerState,
    config: ParserConfig,
}

impl StreamFramer {
    /// Builds a framer with the given configuration, taking a backing buffer from the
    /// process-wide pool.
    pub fn new(config: ParserConfig) -> Self {
        StreamFramer { buf: pool::acquire(), state: FramerState::Ready, config }
    }

    /// Builds a framer using [`ParserConfig::for_stream_transport`], the profile stream
    /// transports should use by default (Content-Length becomes mandatory).
    pub fn for_stream_transport() -> Self {
        Self::new(ParserConfig::for_stream_transport())
    }

    /// Appends freshly received bytes to the buffer. Does not parse.
    pub fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// How many bytes are currently buffered and unconsumed.
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Attempts to decode the next message out of the buffered bytes.
    ///
    /// Returns [`FrameStatus::NeedMore`] rather than an error when the buffer simply doesn't yet
    /// contain a whole message — the caller should `write` more bytes and call again.
    pub fn parse_next(&mut self) -> FrameStatus {
        if let FramerState::Stuck(reason) = self.state {
            return FrameStatus::Error(match reason {
                StuckReason::TooLarge => Error::MessageTooLarge { max: self.config.max_message_length },
                StuckReason::ParseError => Error::UnknownState,
            });
        }

        self.skip_keepalive_noise();
        if self.buf.is_empty() {
            return FrameStatus::NeedMore;
        }

        match parse_message_prefix(&self.buf, &self.config) {
            Ok((message, consumed)) => {
                if consumed > self.config.max_message_length {
                    warn!(
                        consumed,
                        max = self.config.max_message_length,
                        "framed message exceeds MaxMessageLength"
                    );
                    self.state = FramerState::Stuck(StuckReason::TooLarge);
                    return FrameStatus::Error(Error::MessageTooLarge { max: self.config.max_message_length });
                }
                trace!(consumed, "framed one message");
                let _ = self.buf.split_to(consumed);
                FrameStatus::Message(message)
            }
            Err(Error::UnexpectedEof(_)) => {
                if self.buf.len() > self.config.max_message_length {
                    warn!(
                        buffered = self.buf.len(),
                        max = self.config.max_message_length,
                        "buffered message exceeds MaxMessageLength"
                    );
                    self.state = FramerState::Stuck(StuckReason::TooLarge);
                    return FrameStatus::Error(Error::MessageTooLarge { max: self.config.max_message_length });
                }
                FrameStatus::NeedMore
            }
            Err(e) => {
                debug!(error = %e, "permanent framing error, awaiting discard");
                self.state = FramerState::Stuck(StuckReason::ParseError);
                FrameStatus::Error(e)
            }
        }
    }

    /// Clears the recoverable-error state without discarding any bytes. Rarely what a caller
    /// wants after [`FrameStatus::Error`] — prefer [`Self::discard`], which also clears the
    /// offending bytes.
    pub fn reset(&mut self) {
        self.state = FramerState::Ready;
    }

    /// Skips `n` buffered bytes and clears the recoverable-error state — the recovery path after
    /// a [`FrameStatus::Error`] (spec §8 "Size bound law").
    pub fn discard(&mut self, n: usize) {
        let n = n.min(self.buf.len());
        let _ = self.buf.split_to(n);
        self.reset();
    }

    /// Releases the backing buffer to the process-wide pool (spec §4.7 `close`, §5, §9).
    pub fn close(self) {
        pool::release(self.buf);
    }

    /// Silently absorbs RFC 3261 §7.3.1 stream keep-alives (runs of lone CRLFs) and stray NUL
    /// padding at the front of the buffer, so neither one is ever mistaken for the start of a
    /// malformed message (spec §4.7, §9 open question on `\x00`-only chunks).
    fn skip_keepalive_noise(&mut self) {
        let mut skip = 0;
        loop {
            if self.buf[skip..].starts_with(b"\r\n") {
                skip += 2;
            } else if skip < self.buf.len() && self.buf[skip] == 0 {
                skip += 1;
            } else {
                break;
            }
        }
        if skip > 0 {
            let _ = self.buf.split_to(skip);
        }
    }
}
