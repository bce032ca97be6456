//! Text normalization and tokenization (T): pure functions turning a
//! paragraph into plain text, normalized text, or a word-token stream.

use crate::model::Paragraph;

/// Concatenation of run texts verbatim. A thin wrapper so call sites can
/// write `text::plain_text(p)` alongside `text::tokenize_words(...)`.
pub fn plain_text(paragraph: &Paragraph) -> String {
    paragraph.plain_text()
}

/// `plain_text`, trimmed, with whitespace runs collapsed to single spaces.
/// Used only by the similarity oracle.
pub fn normalized_text(paragraph: &Paragraph) -> String {
    paragraph.normalized_text()
}

/// Ordered sequence of maximal non-whitespace runs (`\S+`). Whitespace is
/// discarded; callers that need to re-join tokens insert single spaces.
pub fn tokenize_words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Ordered sequence of single characters, each as a one-char `&str` slice.
/// Used by `CompareOptions::granularity = Character`; callers re-join tokens
/// with no separator.
pub fn tokenize_characters(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut indices = s.char_indices().peekable();
    while let Some((start, _)) = indices.next() {
        let end = indices.peek().map(|(i, _)| *i).unwrap_or(s.len());
        tokens.push(&s[start..end]);
    }
    tokens
}

/// Ordered sequence of sentences: maximal runs ending at `.`/`!`/`?` (plus
/// any trailing closing quote) followed by whitespace or end of string, with
/// the terminator kept on the preceding sentence. Used by
/// `CompareOptions::granularity = Sentence`; callers re-join tokens with a
/// single space.
pub fn tokenize_sentences(s: &str) -> Vec<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut start = 0;
    let bytes = trimmed.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'.' || b == b'!' || b == b'?' {
            let mut end = i + 1;
            while end < bytes.len() && (bytes[end] == b'"' || bytes[end] == b'\'') {
                end += 1;
            }
            if end >= bytes.len() || bytes[end].is_ascii_whitespace() {
                tokens.push(trimmed[start..end].trim());
                // Skip the whitespace run so the next sentence starts clean.
                let mut next = end;
                while next < bytes.len() && bytes[next].is_ascii_whitespace() {
                    next += 1;
                }
                start = next;
                i = next;
                continue;
            }
        }
        i += 1;
    }
    if start < trimmed.len() {
        let tail = trimmed[start..].trim();
        if !tail.is_empty() {
            tokens.push(tail);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_any_whitespace_run() {
        assert_eq!(tokenize_words("  Hello   world\t\tfoo\n"), vec!["Hello", "world", "foo"]);
    }

    #[test]
    fn tokenize_empty_string_yields_no_tokens() {
        assert!(tokenize_words("   ").is_empty());
    }

    #[test]
    fn tokenize_characters_splits_every_char() {
        assert_eq!(tokenize_characters("abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn tokenize_characters_of_empty_string_yields_no_tokens() {
        assert!(tokenize_characters("").is_empty());
    }

    #[test]
    fn tokenize_characters_handles_multibyte_chars_as_single_tokens() {
        assert_eq!(tokenize_characters("café"), vec!["c", "a", "f", "é"]);
    }

    #[test]
    fn tokenize_sentences_splits_on_terminal_punctuation() {
        assert_eq!(tokenize_sentences("One. Two! Three?"), vec!["One.", "Two!", "Three?"]);
    }

    #[test]
    fn tokenize_sentences_keeps_trailing_fragment_without_terminator() {
        assert_eq!(tokenize_sentences("One. Two"), vec!["One.", "Two"]);
    }

    #[test]
    fn tokenize_sentences_of_empty_string_yields_no_tokens() {
        assert!(tokenize_sentences("   ").is_empty());
    }
}
