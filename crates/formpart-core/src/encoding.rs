//! Percent encoding over raw bytes.
//!
//! The classifier percent-encodes field names and values before they are
//! folded through the nested-key assembler, so CR/LF and `&`/`=` bytes in a
//! part body can never corrupt the `key=value&key=value` pair syntax. The
//! assembler reverses the encoding on insertion.
//!
//! Operates on `[u8]` rather than `str` because part bodies are binary.
//! Invalid or truncated escape sequences are kept verbatim for robustness.

use std::borrow::Cow;

/// Percent-encode bytes, keeping the RFC 3986 unreserved set untouched.
///
/// Everything outside `A-Z a-z 0-9 - _ . ~` becomes `%XX` with uppercase
/// hex digits.
///
/// # Example
///
/// ```
/// use formpart_core::percent_encode;
///
/// assert_eq!(percent_encode(b"a b"), "a%20b");
/// assert_eq!(percent_encode(b"x\r\ny"), "x%0D%0Ay");
/// assert_eq!(percent_encode(b"safe-chars_1.2~"), "safe-chars_1.2~");
/// ```
#[must_use]
pub fn percent_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if is_unreserved(b) {
            out.push(char::from(b));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(b >> 4)]));
            out.push(char::from(HEX[usize::from(b & 0x0F)]));
        }
    }
    out
}

/// Percent-decode a string into bytes.
///
/// Returns `Cow::Borrowed` when no escape sequences are present (the common
/// case), `Cow::Owned` otherwise. Invalid hex pairs and truncated escapes
/// pass through unchanged. `+` is not treated as a space: the matching
/// [`percent_encode`] never produces it.
///
/// # Example
///
/// ```
/// use formpart_core::percent_decode;
///
/// assert_eq!(&*percent_decode("a%20b"), b"a b");
/// assert_eq!(&*percent_decode("plain"), b"plain");
/// assert_eq!(&*percent_decode("%ZZ"), b"%ZZ");
/// ```
#[must_use]
pub fn percent_decode(s: &str) -> Cow<'_, [u8]> {
    // Fast path: no encoding
    if !s.contains('%') {
        return Cow::Borrowed(s.as_bytes());
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    Cow::Owned(out)
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}

/// Convert a hex digit to its numeric value.
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
