//! Reversible escaping for rendered diff values.
//!
//! Diffed values end up on single output lines, so embedded control
//! characters have to be encoded. The encoding is unambiguous and
//! round-trippable: [`unescape`] inverts [`escape`] for every input.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("truncated escape sequence")]
    Truncated,
    #[error("unknown escape sequence: \\{0}")]
    UnknownEscape(char),
    #[error("invalid code point in escape sequence: {0}")]
    InvalidCodePoint(String),
}

/// Encodes control characters so the value fits on one output line.
///
/// Backslash doubles; newline, carriage return, tab and NUL use their
/// mnemonic escapes; any other control character is rendered as
/// `\u{hex}`. Printable characters pass through untouched.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Decodes a string produced by [`escape`].
pub fn unescape(encoded: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(encoded.len());
    let mut chars = encoded.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('u') => {
                match chars.next() {
                    Some('{') => {}
                    Some(other) => return Err(UnescapeError::UnknownEscape(other)),
                    None => return Err(UnescapeError::Truncated),
                }
                let mut digits = String::new();
                let mut closed = false;
                for d in chars.by_ref() {
                    if d == '}' {
                        closed = true;
                        break;
                    }
                    digits.push(d);
                }
                if !closed || digits.is_empty() {
                    return Err(UnescapeError::Truncated);
                }
                let code = u32::from_str_radix(&digits, 16)
                    .map_err(|_| UnescapeError::InvalidCodePoint(digits.clone()))?;
                let decoded =
                    char::from_u32(code).ok_or(UnescapeError::InvalidCodePoint(digits))?;
                out.push(decoded);
            }
            Some(other) => return Err(UnescapeError::UnknownEscape(other)),
            None => return Err(UnescapeError::Truncated),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_passes_through() {
        assert_eq!(escape("hello, world!"), "hello, world!");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(escape("a\nb\tc\\d"), "a\\nb\\tc\\\\d");
        assert_eq!(escape("\u{7}"), "\\u{7}");
        assert_eq!(escape("\0"), "\\0");
    }

    #[test]
    fn test_round_trip() {
        let inputs = ["", "plain", "a\nb", "tab\there", "back\\slash", "\r\n\0", "\u{1}\u{1f}x"];
        for input in inputs {
            assert_eq!(unescape(&escape(input)).unwrap(), input, "input: {input:?}");
        }
    }

    #[test]
    fn test_unescape_rejects_malformed() {
        assert_eq!(unescape("dangling\\"), Err(UnescapeError::Truncated));
        assert_eq!(unescape("\\q"), Err(UnescapeError::UnknownEscape('q')));
        assert_eq!(unescape("\\u{"), Err(UnescapeError::Truncated));
        assert_eq!(unescape("\\u{}"), Err(UnescapeError::Truncated));
        assert_eq!(
            unescape("\\u{zz}"),
            Err(UnescapeError::InvalidCodePoint("zz".to_string()))
        );
        assert_eq!(
            unescape("\\u{110000}"),
            Err(UnescapeError::InvalidCodePoint("110000".to_string()))
        );
    }
}
