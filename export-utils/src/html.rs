//! Reduction of stored HTML fragments to plain text.

use scraper::Html;

#[derive(Clone, Copy)]
enum State {
    Text,
    Tag { quote: Option<char> },
    Comment,
}

/// Removes HTML and XML tags, comments and processing instructions.
///
/// Entities are left untouched. A `<` which cannot start a tag (followed by
/// whitespace, a digit or the end of input) is kept as text. An unterminated
/// tag swallows the rest of the input.
pub fn strip_tags(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut state = State::Text;
    let mut chars = input.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match state {
            State::Text => {
                if c != '<' {
                    result.push(c);
                    continue;
                }
                match chars.peek() {
                    Some(&(_, next)) if next.is_ascii_alphabetic() || matches!(next, '/' | '?') => {
                        state = State::Tag { quote: None };
                    }
                    Some(&(_, '!')) if input[index..].starts_with("<!--") => {
                        chars.nth(2);
                        state = State::Comment;
                    }
                    Some(&(_, '!')) => state = State::Tag { quote: None },
                    _ => result.push(c),
                }
            }
            State::Tag { quote: None } => match c {
                '>' => state = State::Text,
                '"' | '\'' => state = State::Tag { quote: Some(c) },
                _ => {}
            },
            State::Tag { quote: Some(quote) } => {
                if c == quote {
                    state = State::Tag { quote: None };
                }
            }
            State::Comment => {
                if c == '>' && input[..index].ends_with("--") {
                    state = State::Text;
                }
            }
        }
    }

    result
}

/// Decodes character references and drops markup, returning the text content
/// of the fragment.
///
/// A decoded `&lt;b&gt;` becomes a literal `<b>` in the output, so callers
/// which must not emit markup strip tags again afterwards.
pub fn html_to_text(input: &str) -> String {
    Html::parse_fragment(input)
        .root_element()
        .text()
        .collect::<String>()
}

/// Entity decoding followed by tag stripping, the normalization used for
/// titles.
pub fn plain_title(input: &str) -> String {
    strip_tags(&html_to_text(input))
}
