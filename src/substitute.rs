//! Substitution engine
//!
//! Rewrites the text of a translatable span by looking up each word token
//! in the dictionary. Separators and unmatched words pass through
//! unchanged, so removing all word tokens from the original and the
//! rewritten text yields identical separator strings. Substitution is a
//! total function: it never fails, whatever the input text.

use crate::dictionary::Dictionary;
use crate::span::SpanKind;
use crate::tokenizer::tokenize;

/// Replace dictionary-matched word tokens in `text`
///
/// Lookup operates on whole word tokens only; an entry for "number" never
/// matches inside "numbers" or "renumber".
pub fn substitute(text: &str, dictionary: &Dictionary) -> String {
    let mut result = String::with_capacity(text.len());
    for token in tokenize(text) {
        if token.is_word {
            match dictionary.lookup(token.text) {
                Some(translated) => result.push_str(&translated),
                None => result.push_str(token.text),
            }
        } else {
            result.push_str(token.text);
        }
    }
    result
}

/// Substitute while honoring backslash escapes
///
/// Used for string bodies and template literal text, where `\` plus the
/// following character form an escape sequence that substitution must never
/// split or rewrite. The text is cut at each escape; the free segments are
/// substituted independently and the escape pairs copied verbatim.
fn substitute_escaped(text: &str, dictionary: &Dictionary) -> String {
    let mut result = String::with_capacity(text.len());
    let mut segment_start = 0;
    let mut chars = text.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c == '\\' {
            result.push_str(&substitute(&text[segment_start..offset], dictionary));
            result.push('\\');
            match chars.next() {
                Some((_, escaped)) => {
                    result.push(escaped);
                    segment_start = offset + 1 + escaped.len_utf8();
                }
                // unterminated constructs never reach here; keep the lone
                // backslash if they somehow do
                None => {
                    segment_start = text.len();
                }
            }
        }
    }

    result.push_str(&substitute(&text[segment_start..], dictionary));
    result
}

/// Produce the rewritten text for a span of the given kind
///
/// Code and interpolation-hole spans are returned verbatim; comment,
/// string, and template-text spans are word-substituted, with escape
/// sequences protected where the grammar defines them.
pub fn rewrite_span(kind: SpanKind, raw: &str, dictionary: &Dictionary) -> String {
    match kind {
        SpanKind::Code | SpanKind::TemplateHole => raw.to_string(),
        SpanKind::LineComment | SpanKind::BlockComment => substitute(raw, dictionary),
        SpanKind::String | SpanKind::TemplateText => substitute_escaped(raw, dictionary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_pairs([("número", "നമ്പർ"), ("positive", "negative")])
    }

    #[test]
    fn test_word_hit_and_miss() {
        assert_eq!(
            substitute("if número is 0", &dict()),
            "if നമ്പർ is 0"
        );
    }

    #[test]
    fn test_no_partial_word_substitution() {
        assert_eq!(substitute("números", &dict()), "números");
        assert_eq!(substitute("numerología número", &dict()), "numerología നമ്പർ");
    }

    #[test]
    fn test_separators_preserved() {
        let original = "  -- número,  número!\t";
        let rewritten = substitute(original, &dict());
        let strip = |s: &str| -> String { s.chars().filter(|c| !c.is_alphanumeric()).collect() };
        assert_eq!(strip(original), strip(&rewritten));
    }

    #[test]
    fn test_empty_dictionary_is_identity() {
        let text = "// any número of things";
        assert_eq!(substitute(text, &Dictionary::new()), text);
    }

    #[test]
    fn test_escape_pair_never_substituted() {
        // "n" maps to something, but the n of "\n" is an escape
        let dictionary = Dictionary::from_pairs([("n", "X")]);
        assert_eq!(
            rewrite_span(SpanKind::String, "'a\\nn'", &dictionary),
            "'a\\nX'"
        );
    }

    #[test]
    fn test_escaped_quote_inside_string_body() {
        let dictionary = Dictionary::from_pairs([("it", "eso")]);
        assert_eq!(
            rewrite_span(SpanKind::String, r"'it\'s it'", &dictionary),
            r"'eso\'s eso'"
        );
    }

    #[test]
    fn test_comment_markers_pass_through() {
        assert_eq!(
            rewrite_span(SpanKind::BlockComment, "/* número */", &dict()),
            "/* നമ്പർ */"
        );
        assert_eq!(
            rewrite_span(SpanKind::LineComment, "// if número is positive", &dict()),
            "// if നമ്പർ is negative"
        );
    }

    #[test]
    fn test_code_span_is_untouched() {
        let code = "const número = /positive/;";
        assert_eq!(rewrite_span(SpanKind::Code, code, &dict()), code);
        assert_eq!(rewrite_span(SpanKind::TemplateHole, "${positive}", &dict()), "${positive}");
    }

    #[test]
    fn test_template_text_substitution() {
        assert_eq!(
            rewrite_span(SpanKind::TemplateText, "The factorial of ", &Dictionary::from_pairs([("factorial", "factorial-x")])),
            "The factorial-x of "
        );
    }
}
