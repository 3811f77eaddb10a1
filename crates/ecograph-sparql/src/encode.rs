//! Literal and triple-fragment encoding.
//!
//! User text only ever reaches a statement through [`encode_literal`],
//! which escapes everything that could close the literal early and
//! refuses control characters the store would reject.

/// A character that cannot be embedded in a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsafeCharacter {
    pub character: char,
    /// Byte offset in the raw value.
    pub offset: usize,
}

/// Escape sequence for `c`, if it needs one inside `"..."`.
fn escape_for(c: char) -> Option<&'static str> {
    match c {
        '\\' => Some("\\\\"),
        '"' => Some("\\\""),
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\t' => Some("\\t"),
        '\u{08}' => Some("\\b"),
        '\u{0C}' => Some("\\f"),
        _ => None,
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{1F}' | '\u{7F}')
}

/// Wrap a raw value as a double-quoted SPARQL string literal.
pub fn encode_literal(raw: &str) -> Result<String, UnsafeCharacter> {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for (offset, ch) in raw.char_indices() {
        match escape_for(ch) {
            Some(escaped) => out.push_str(escaped),
            None if is_forbidden(ch) => {
                return Err(UnsafeCharacter {
                    character: ch,
                    offset,
                })
            }
            None => out.push(ch),
        }
    }
    out.push('"');
    Ok(out)
}

/// Render `<predicate> "<escaped value>"`, without trailing punctuation.
pub fn encode_triple(predicate: &str, raw: &str) -> Result<String, UnsafeCharacter> {
    Ok(format!("{predicate} {}", encode_literal(raw)?))
}

/// Parse a double-quoted literal produced by [`encode_literal`] back to
/// its raw value. Returns `None` for anything that is not a single
/// well-formed literal.
pub fn decode_literal(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push(match chars.next()? {
                '\\' => '\\',
                '"' => '"',
                '\'' => '\'',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                'b' => '\u{08}',
                'f' => '\u{0C}',
                _ => return None,
            }),
            // An unescaped quote would have ended the literal.
            '"' | '\n' | '\r' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value() {
        assert_eq!(encode_literal("Green Key").unwrap(), "\"Green Key\"");
    }

    #[test]
    fn test_triple_fragment_has_no_punctuation() {
        assert_eq!(
            encode_triple("rdfs:label", "Green Key").unwrap(),
            "rdfs:label \"Green Key\""
        );
    }

    #[test]
    fn test_escape_special_chars() {
        let encoded = encode_literal("say \"hi\"\\\nbye\ttab").unwrap();
        assert_eq!(encoded, r#""say \"hi\"\\\nbye\ttab""#);
    }

    #[test]
    fn test_escape_roundtrip() {
        let raw = "l'\"écolodge\"\n\\ C:\\temp\r\n";
        let encoded = encode_literal(raw).unwrap();
        assert!(!encoded[1..encoded.len() - 1].contains('\n'));
        assert_eq!(decode_literal(&encoded).as_deref(), Some(raw));
    }

    #[test]
    fn test_backslash_before_quote_cannot_close_literal() {
        let raw = "trailing backslash \\";
        let encoded = encode_literal(raw).unwrap();
        assert!(encoded.ends_with("\\\\\""));
        assert_eq!(decode_literal(&encoded).as_deref(), Some(raw));
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = encode_literal("nul\u{0}byte").unwrap_err();
        assert_eq!(
            err,
            UnsafeCharacter {
                character: '\u{0}',
                offset: 3
            }
        );
        assert!(encode_literal("bell\u{7}").is_err());
        assert!(encode_literal("del\u{7F}").is_err());
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(encode_literal("Région 🌿").unwrap(), "\"Région 🌿\"");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode_literal("no quotes"), None);
        assert_eq!(decode_literal("\"dangling\\\""), None);
        assert_eq!(decode_literal("\"a\"b\""), None);
        assert_eq!(decode_literal("\"bad \\q escape\""), None);
    }
}
