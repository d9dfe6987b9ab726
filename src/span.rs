//! Classified slices of a source text
//!
//! The scanner partitions a source file into contiguous, non-overlapping
//! spans. Concatenating the spans in order reproduces the input exactly;
//! only translatable spans are ever rewritten downstream.

/// Lexical classification of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Executable source text, including regex literals and operators.
    /// Never rewritten.
    Code,
    /// A `//` comment, from the first slash up to (not including) the line
    /// terminator
    LineComment,
    /// A `/* ... */` comment, delimiters included
    BlockComment,
    /// A single- or double-quoted string literal, quotes included
    String,
    /// A literal text segment of a template literal, between the backtick /
    /// `${` / `}` boundaries (delimiters excluded)
    TemplateText,
    /// A `${ ... }` interpolation hole of a template literal, delimiters
    /// included. Classified as code and never rewritten.
    TemplateHole,
}

impl SpanKind {
    /// Whether spans of this kind are eligible for word substitution
    pub fn is_translatable(self) -> bool {
        matches!(
            self,
            SpanKind::LineComment
                | SpanKind::BlockComment
                | SpanKind::String
                | SpanKind::TemplateText
        )
    }
}

/// A contiguous, classified slice of the source text
///
/// Offsets are byte positions into the original text, half-open. Spans are
/// produced once by the scanner and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The raw text of this span within `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn is_translatable(&self) -> bool {
        self.kind.is_translatable()
    }
}
