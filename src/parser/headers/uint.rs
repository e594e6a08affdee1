//! Shared decimal `uint32` parsing for Content-Length, Max-Forwards, and Expires (spec §4.5
//! "Content-Length and Max-Forwards are uint32 decimal; overflow → error").

use crate::error::{Error, Result};

pub fn parse_uint32(value: &[u8], header_name: &str) -> Result<u32> {
    let trimmed = trim(value);
    if trimmed.is_empty() || !trimmed.iter().all(u8::is_ascii_digit) {
        return Err(Error::invalid_header(header_name, "expected a decimal integer"));
    }
    std::str::from_utf8(trimmed)
        .expect("checked ASCII digits")
        .parse::<u32>()
        .map_err(|_| Error::invalid_header(header_name, "integer overflow"))
}

fn trim(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|&b| b != b' ' && b != b'\t').unwrap_or(value.len());
    let end = value.iter().rposition(|&b| b != b' ' && b != b'\t').map_or(start, |p| p + 1);
    &value[start..end]
}
