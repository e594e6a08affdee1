//! Parser and framer configuration (spec §6 "Configuration options").

use crate::parser::headers::HeaderParserTable;

/// Tunables shared by the whole-buffer message parser and the stream framer.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Hard ceiling on the total octets of a single message (spec §4.7, §8 "Size bound").
    pub max_message_length: usize,
    /// The lowercase-name → parser registry (spec §6 `HeaderParsers`). Replacing it wholesale —
    /// or removing individual entries — changes which headers get a dedicated parser; anything
    /// without an entry becomes [`Header::Generic`](crate::types::header::Header::Generic).
    pub header_parsers: HeaderParserTable,
    /// Serialize with single-letter compact header aliases (spec §4.8).
    pub compact_headers: bool,
    /// Stream transports MUST carry `Content-Length` (spec §4.7); datagram transports may omit
    /// it, in which case body length is whatever is left in the buffer.
    pub require_content_length: bool,
    /// When a recognized header's value fails its dedicated parser, downgrade it to a generic
    /// header instead of failing the whole message (spec §7 "MAY swallow").
    pub swallow_header_errors: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_message_length: 65_535,
            header_parsers: HeaderParserTable::default(),
            compact_headers: false,
            require_content_length: false,
            swallow_header_errors: false,
        }
    }
}

impl ParserConfig {
    /// The profile the stream framer (spec §4.7) uses by default: stream transports require
    /// `Content-Length`.
    pub fn for_stream_transport() -> Self {
        ParserConfig { require_content_length: true, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_keeps_the_full_header_parser_registry() {
        let config = ParserConfig::default();
        assert!(config.header_parsers.get("via").is_some());
    }

    #[test]
    fn header_parsers_can_be_trimmed_per_config_instance() {
        let mut config = ParserConfig::default();
        config.header_parsers.remove("contact");
        assert!(config.header_parsers.get("contact").is_none());
        // Untouched entries, and other ParserConfig instances, are unaffected.
        assert!(ParserConfig::default().header_parsers.get("contact").is_some());
    }
}
