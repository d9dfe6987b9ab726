//! Reassembler
//!
//! Concatenates the scanner's spans back into a single output text: code
//! and interpolation-hole spans verbatim, translatable spans through the
//! substitution engine. Span order and the byte identity of untouched
//! regions are guaranteed.

use crate::dictionary::Dictionary;
use crate::span::Span;
use crate::substitute::rewrite_span;

/// Rebuild the full output text from `spans` over `source`
pub fn reassemble(source: &str, spans: &[Span], dictionary: &Dictionary) -> String {
    let mut output = String::with_capacity(source.len());
    for span in spans {
        let raw = span.text(source);
        if span.is_translatable() {
            output.push_str(&rewrite_span(span.kind, raw, dictionary));
        } else {
            output.push_str(raw);
        }
    }
    output
}
