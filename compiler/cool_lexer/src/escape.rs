//! Escaping for string literal payloads in token documents.
//!
//! Escaped form uses `\\` `\"` `\n` `\t` `\b` `\f`; printable ASCII passes
//! through unchanged and every other byte is written as a three-digit octal
//! escape `\ooo`. Unescaping accepts exactly that set, so
//! `unescape_string(&escape_string(s)) == Ok(s)` for every `s`.

/// Errors from [`unescape_string`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EscapeError {
    /// A backslash with nothing after it.
    #[error("unexpected end of string after backslash at byte {offset}")]
    TrailingBackslash { offset: usize },
    /// A backslash followed by something other than a known escape.
    #[error(
        "unexpected escape sequence {found:?} at byte {offset}; expected \\\\, \\\", \\n, \\t, \
         \\b, \\f, or \\ooo where ooo is an octal number"
    )]
    InvalidEscape { offset: usize, found: String },
    /// Octal escapes produced bytes that are not UTF-8.
    #[error("unescaped string is not valid UTF-8")]
    InvalidUtf8,
}

/// Escape a string for a token document.
pub fn escape_string(text: &str) -> String {
    escape_bytes(text.as_bytes())
}

/// Escape arbitrary bytes.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            0x08 => out.push_str("\\b"),
            0x0C => out.push_str("\\f"),
            b' '..=b'~' => out.push(char::from(b)),
            _ => {
                out.push('\\');
                out.push(char::from(b'0' + (b >> 6)));
                out.push(char::from(b'0' + ((b >> 3) & 0o7)));
                out.push(char::from(b'0' + (b & 0o7)));
            }
        }
    }
    out
}

/// Decode `\ooo` with the first digit in `0..=3`.
fn octal_escape(digits: &[u8]) -> Option<u8> {
    match *digits {
        [a @ b'0'..=b'3', b @ b'0'..=b'7', c @ b'0'..=b'7'] => {
            Some(((a - b'0') << 6) | ((b - b'0') << 3) | (c - b'0'))
        }
        _ => None,
    }
}

/// Reverse [`escape_bytes`].
pub fn unescape_bytes(text: &str) -> Result<Vec<u8>, EscapeError> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        let offset = i;
        let Some(&next) = bytes.get(i + 1) else {
            return Err(EscapeError::TrailingBackslash { offset });
        };
        let simple = match next {
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            _ => None,
        };
        if let Some(resolved) = simple {
            out.push(resolved);
            i += 2;
            continue;
        }

        let end = (i + 4).min(bytes.len());
        match octal_escape(&bytes[i + 1..end]) {
            Some(value) => {
                out.push(value);
                i = end;
            }
            None => {
                return Err(EscapeError::InvalidEscape {
                    offset,
                    found: String::from_utf8_lossy(&bytes[offset..end]).into_owned(),
                });
            }
        }
    }

    Ok(out)
}

/// Reverse [`escape_string`].
pub fn unescape_string(text: &str) -> Result<String, EscapeError> {
    String::from_utf8(unescape_bytes(text)?).map_err(|_| EscapeError::InvalidUtf8)
}
