//! Word tokenizer
//!
//! Splits the text of a translatable span into an alternating sequence of
//! word tokens and separator tokens. A word is a maximal run of Unicode
//! alphanumeric characters, so multi-script target alphabets tokenize the
//! same way Latin text does. Concatenating the tokens in order reproduces
//! the input exactly; tokenization never fails.
//!
//! The tokenizer has no semantic awareness: a word inside a URL or a
//! code-like identifier quoted in a comment is still an ordinary word.

/// A word or separator token within a translatable span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// The token text, borrowed from the span
    pub text: &'a str,
    /// Byte offset of the token within its parent span text
    pub start: usize,
    /// Whether this token is a candidate for dictionary lookup
    pub is_word: bool,
}

/// The word-character predicate: Unicode letter or digit, locale-agnostic
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Split `text` into word and separator tokens
pub fn tokenize(text: &str) -> Vec<WordToken<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current_is_word: Option<bool> = None;

    for (offset, c) in text.char_indices() {
        let word = is_word_char(c);
        match current_is_word {
            Some(w) if w == word => {}
            Some(w) => {
                tokens.push(WordToken {
                    text: &text[start..offset],
                    start,
                    is_word: w,
                });
                start = offset;
                current_is_word = Some(word);
            }
            None => current_is_word = Some(word),
        }
    }

    if let Some(w) = current_is_word {
        tokens.push(WordToken {
            text: &text[start..],
            start,
            is_word: w,
        });
    }

    tokens
}
