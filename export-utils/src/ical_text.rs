//! Content line helpers for the iCalendar text format (RFC 5545).

/// Maximum length of a physical line in octets, excluding the line break.
pub const MAX_LINE_OCTETS: usize = 75;

/// Line break between content lines.
pub const CRLF: &str = "\r\n";

const FOLD_SEPARATOR: &str = "\r\n\t";

/// Escapes a TEXT property value.
///
/// Backslash, semicolon and comma get a leading backslash. Line breaks
/// (`\n`, `\r\n` or a lone `\r`) become the two characters `\n`.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    escaped.push_str("\\n");
                }
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverses [`escape_text`]. Unknown escapes keep the escaped character.
pub fn unescape_text(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => unescaped.push('\n'),
            Some(escaped) => unescaped.push(escaped),
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Folds a content line so that no physical line exceeds
/// [`MAX_LINE_OCTETS`].
///
/// Continuation lines start with a single tab which counts towards their
/// length. Multi-byte characters are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / 24);
    let mut rest = line;
    let mut budget = MAX_LINE_OCTETS;
    while rest.len() > budget {
        let mut end = budget;
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        folded.push_str(&rest[..end]);
        folded.push_str(FOLD_SEPARATOR);
        rest = &rest[end..];
        budget = MAX_LINE_OCTETS - 1;
    }
    folded.push_str(rest);
    folded
}

/// Reverses [`fold_line`] on a whole document: a line break followed by a
/// space or tab is removed together with that whitespace character.
pub fn unfold(document: &str) -> String {
    document
        .replace("\r\n ", "")
        .replace("\r\n\t", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(
            "Bach\\, Händel \\; more\\nsecond line \\\\o/",
            escape_text("Bach, Händel ; more\r\nsecond line \\o/")
        );
        assert_eq!("a\\nb", escape_text("a\rb"));
        assert_eq!("plain", escape_text("plain"));
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(
            "Bach, Händel ; more\nsecond line \\o/",
            unescape_text("Bach\\, Händel \\; more\\nsecond line \\\\o/")
        );
        assert_eq!("trailing\\", unescape_text("trailing\\"));
        assert_eq!("plain", unescape_text("plain"));
    }

    #[test]
    fn test_fold_short_line_untouched() {
        let line = "SUMMARY:Short";
        assert_eq!(line, fold_line(line));
        let exact = format!("DESCRIPTION:{}", "x".repeat(MAX_LINE_OCTETS - 12));
        assert_eq!(MAX_LINE_OCTETS, exact.len());
        assert_eq!(exact, fold_line(&exact));
    }

    #[test]
    fn test_fold_long_line() {
        let line = format!("DESCRIPTION:{}", "abcdefghij".repeat(20));
        let folded = fold_line(&line);
        let physical: Vec<&str> = folded.split(CRLF).collect();

        assert_eq!(3, physical.len());
        assert_eq!(MAX_LINE_OCTETS, physical[0].len());
        assert_eq!(MAX_LINE_OCTETS, physical[1].len());
        assert!(physical[1].starts_with('\t'));
        assert!(physical[2].starts_with('\t'));
        assert_eq!(line, unfold(&folded));
    }

    #[test]
    fn test_fold_never_splits_characters() {
        let line = format!("SUMMARY:{}", "ü".repeat(100));
        let folded = fold_line(&line);

        for physical in folded.split(CRLF) {
            assert!(physical.len() <= MAX_LINE_OCTETS);
        }
        // "SUMMARY:" takes 8 octets, leaving room for 33 two-octet characters
        assert_eq!(8 + 33 * 2, folded.split(CRLF).next().unwrap().len());
        assert_eq!(line, unfold(&folded));
    }

    #[test]
    fn test_unfold_accepts_space_continuation() {
        assert_eq!("SUMMARY:abcdef", unfold("SUMMARY:abc\r\n def"));
    }
}
