//! Content-type sniffing from the first bytes of an asset.

/// Number of leading bytes inspected.
pub const SNIFF_LEN: usize = 512;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Guesses a MIME type for `head` (at most [`SNIFF_LEN`] bytes).
///
/// Magic numbers first, then a text/binary heuristic. Never fails.
pub fn content_type(head: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(head) {
        return kind.mime_type();
    }
    if looks_like_text(head) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}

/// True for UTF-8 without binary control bytes. A multi-byte char cut off at the
/// end of the prefix still counts as text.
fn looks_like_text(head: &[u8]) -> bool {
    if head.iter().any(|&b| is_binary_byte(b)) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
