//! SQL string literal escaping (spec §4.1). Two modes exist because the
//! server's `NO_BACKSLASH_ESCAPES` SQL mode changes which one is safe:
//! when it's set, backslash has no special meaning and only quote
//! doubling works.

/// Backslash-escapes `\0 \n \r \\ \' \" \x1a`, the default MySQL
/// escaping mode. Unsafe to use when the server session has
/// `NO_BACKSLASH_ESCAPES` enabled — use [`escape_quotes`] instead.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\u{1a}' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out
}

/// Doubles single quotes only. Safe regardless of `NO_BACKSLASH_ESCAPES`
/// (spec §7's `Status::SERVER_STATUS_NO_BACKSLASH_ESCAPES`), at the cost
/// of not escaping control characters.
pub fn escape_quotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\'' {
            out.push_str("''");
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_string_covers_every_special_char() {
        assert_eq!(
            escape_string("a\0b\nc\rd\\e'f\"g\u{1a}h"),
            "a\\0b\\nc\\rd\\\\e\\'f\\\"g\\Zh"
        );
    }

    #[test]
    fn escape_quotes_only_doubles_single_quotes() {
        assert_eq!(escape_quotes("it's a \"test\"\\n"), "it''s a \"test\"\\n");
    }
}
