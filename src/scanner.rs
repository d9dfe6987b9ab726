//! Lexical scanner
//!
//! Partitions a source text into an ordered, boundary-exact sequence of
//! [`Span`]s in a single forward pass. Code regions (including regex
//! literals and template interpolation holes) are kept verbatim; comment
//! bodies, string bodies, and template literal text become translatable
//! spans.
//!
//! Two pieces of auxiliary state make this possible without a full parser:
//!
//! - the class of the last significant code token, used to decide whether a
//!   `/` starts a regex literal or is the division operator;
//! - an explicit stack of template / interpolation contexts, so holes that
//!   contain nested strings and templates are scanned to arbitrary depth
//!   without relying on call-stack recursion.

use crate::error::{ConstructKind, ScanError};
use crate::span::{Span, SpanKind};

/// Class of the most recent significant code token
///
/// A `/` seen in code position starts a regex literal only when the token
/// before it cannot end an expression. Keywords like `return` are lexically
/// identifiers but cannot end an expression, so `return /re/` scans as a
/// regex. This is the classic best-effort heuristic; it resolves from local
/// context only and does not error on ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastToken {
    /// Start of input, or after an operator, opening bracket, comma,
    /// semicolon, or keyword: a `/` here starts a regex literal.
    ExpressionStart,
    /// After an identifier, number, string, template, `)`, `]`, or a
    /// postfix `++`/`--`: a `/` here is the division operator.
    ExpressionEnd,
}

/// Keywords that cannot end an expression, so a regex literal may follow
const NON_VALUE_KEYWORDS: &[&str] = &[
    "await", "case", "delete", "do", "else", "in", "instanceof", "new", "of", "return", "throw",
    "typeof", "void", "yield",
];

/// Template-literal scanning context, kept on an explicit stack
#[derive(Debug, Clone, Copy)]
enum Context {
    /// Inside a template literal; `start` is the offset of the opening
    /// backtick
    Template { start: usize },
    /// Inside a `${ ... }` hole; `start` is the offset of the `$` and
    /// `depth` counts unbalanced `{` inside the hole
    Hole { start: usize, depth: usize },
}

/// Scan `source` into contiguous, non-overlapping spans covering the whole
/// input
///
/// # Errors
///
/// Returns [`ScanError::UnterminatedConstruct`] if end of input is reached
/// inside a string, block comment, template literal, or interpolation hole.
pub fn scan(source: &str) -> Result<Vec<Span>, ScanError> {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    spans: Vec<Span>,
    /// Start of the pending segment in the current context: code text at the
    /// top level, or literal text inside a top-level template
    seg_start: usize,
    stack: Vec<Context>,
    last_token: LastToken,
    /// Set after a `.` so that `obj.return` is read as a property access,
    /// not the keyword
    after_dot: bool,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner {
            src,
            pos: 0,
            spans: Vec::new(),
            seg_start: 0,
            stack: Vec::new(),
            last_token: LastToken::ExpressionStart,
            after_dot: false,
        }
    }

    fn run(mut self) -> Result<Vec<Span>, ScanError> {
        while let Some(c) = self.peek() {
            match self.stack.last() {
                Some(Context::Template { .. }) => self.scan_template_char(c)?,
                _ => self.scan_code_char(c)?,
            }
        }

        if let Some(context) = self.stack.last() {
            let (kind, offset) = match *context {
                Context::Template { start } => (ConstructKind::TemplateLiteral, start),
                Context::Hole { start, .. } => (ConstructKind::TemplateHole, start),
            };
            return Err(ScanError::UnterminatedConstruct { kind, offset });
        }

        self.flush_code(self.src.len());
        Ok(self.spans)
    }

    /// One step in code position: the top level of the file or the interior
    /// of an interpolation hole
    fn scan_code_char(&mut self, c: char) -> Result<(), ScanError> {
        match c {
            '/' => match self.peek_ahead(1) {
                Some('/') => self.scan_line_comment(),
                Some('*') => self.scan_block_comment()?,
                _ => {
                    if self.last_token == LastToken::ExpressionStart {
                        self.scan_regex();
                    } else {
                        // division operator
                        self.bump();
                        self.set_token(LastToken::ExpressionStart);
                    }
                }
            },
            '"' | '\'' => self.scan_string(c)?,
            '`' => self.enter_template(),
            '{' => {
                if let Some(Context::Hole { depth, .. }) = self.stack.last_mut() {
                    *depth += 1;
                }
                self.bump();
                self.set_token(LastToken::ExpressionStart);
            }
            '}' => self.close_brace(),
            '.' => {
                self.bump();
                self.after_dot = true;
                self.last_token = LastToken::ExpressionStart;
            }
            ')' | ']' => {
                self.bump();
                self.set_token(LastToken::ExpressionEnd);
            }
            '+' | '-' => self.scan_plus_minus(c),
            c if is_ident_char(c) => self.scan_word(),
            c if c.is_whitespace() => {
                self.bump();
            }
            _ => {
                self.bump();
                self.set_token(LastToken::ExpressionStart);
            }
        }
        Ok(())
    }

    /// One step inside a template literal's text portion
    fn scan_template_char(&mut self, c: char) -> Result<(), ScanError> {
        match c {
            '`' => {
                let backtick = self.pos;
                self.stack.pop();
                if self.stack.is_empty() {
                    self.emit(SpanKind::TemplateText, self.seg_start, backtick);
                    // the closing backtick belongs to the following code span
                    self.seg_start = backtick;
                }
                self.bump();
                self.last_token = LastToken::ExpressionEnd;
                self.after_dot = false;
            }
            '$' if self.peek_ahead(1) == Some('{') => {
                let hole_start = self.pos;
                if self.stack.len() == 1 {
                    self.emit(SpanKind::TemplateText, self.seg_start, hole_start);
                }
                self.bump();
                self.bump();
                self.stack.push(Context::Hole {
                    start: hole_start,
                    depth: 1,
                });
                self.last_token = LastToken::ExpressionStart;
                self.after_dot = false;
            }
            '\\' => {
                let start = match self.stack.last() {
                    Some(Context::Template { start }) => *start,
                    _ => self.pos,
                };
                self.bump();
                if self.bump().is_none() {
                    return Err(ScanError::UnterminatedConstruct {
                        kind: ConstructKind::TemplateLiteral,
                        offset: start,
                    });
                }
            }
            _ => {
                self.bump();
            }
        }
        Ok(())
    }

    /// Handle `}` in code position: either closes an interpolation hole or
    /// is an ordinary brace
    fn close_brace(&mut self) {
        if let Some(Context::Hole { start, depth }) = self.stack.last_mut() {
            let hole_start = *start;
            *depth -= 1;
            if *depth == 0 {
                self.stack.pop();
                self.bump();
                if self.stack.len() == 1 {
                    // outermost hole: emit it and resume template text
                    self.emit(SpanKind::TemplateHole, hole_start, self.pos);
                    self.seg_start = self.pos;
                }
                return;
            }
        }
        self.bump();
        self.set_token(LastToken::ExpressionStart);
    }

    fn enter_template(&mut self) {
        let backtick = self.pos;
        self.bump();
        if self.stack.is_empty() {
            // the opening backtick stays with the preceding code span
            self.flush_code(self.pos);
            self.seg_start = self.pos;
        }
        self.stack.push(Context::Template { start: backtick });
    }

    fn scan_line_comment(&mut self) {
        let start = self.pos;
        self.bump();
        self.bump();
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
        if self.stack.is_empty() {
            self.flush_code(start);
            self.emit(SpanKind::LineComment, start, self.pos);
            self.seg_start = self.pos;
        }
        // comments are not significant tokens; last_token is unchanged
    }

    fn scan_block_comment(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        self.bump();
        self.bump();
        loop {
            match self.peek() {
                Some('*') if self.peek_ahead(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    break;
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    return Err(ScanError::UnterminatedConstruct {
                        kind: ConstructKind::BlockComment,
                        offset: start,
                    });
                }
            }
        }
        if self.stack.is_empty() {
            self.flush_code(start);
            self.emit(SpanKind::BlockComment, start, self.pos);
            self.seg_start = self.pos;
        }
        Ok(())
    }

    fn scan_string(&mut self, quote: char) -> Result<(), ScanError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.peek() {
                Some('\\') => {
                    // a backslash consumes exactly one following character,
                    // including a line terminator for line continuation
                    self.bump();
                    if self.bump().is_none() {
                        return Err(ScanError::UnterminatedConstruct {
                            kind: ConstructKind::String,
                            offset: start,
                        });
                    }
                }
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    return Err(ScanError::UnterminatedConstruct {
                        kind: ConstructKind::String,
                        offset: start,
                    });
                }
            }
        }
        if self.stack.is_empty() {
            self.flush_code(start);
            self.emit(SpanKind::String, start, self.pos);
            self.seg_start = self.pos;
        }
        self.set_token(LastToken::ExpressionEnd);
        Ok(())
    }

    /// Scan a regex literal body as code, honoring its escape and
    /// character-class rules so a `/` inside `[...]` or after `\` does not
    /// terminate it
    fn scan_regex(&mut self) {
        self.bump(); // opening slash
        let mut in_class = false;
        loop {
            match self.peek() {
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        break;
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.bump();
                }
                Some(']') => {
                    in_class = false;
                    self.bump();
                }
                Some('/') if !in_class => {
                    self.bump();
                    // trailing flags
                    while self.peek().is_some_and(is_ident_char) {
                        self.bump();
                    }
                    break;
                }
                // a regex literal cannot span lines; stop rather than
                // swallow the rest of the file on a misclassified slash
                Some('\n') | Some('\r') | None => break,
                Some(_) => {
                    self.bump();
                }
            }
        }
        self.set_token(LastToken::ExpressionEnd);
    }

    /// Distinguish postfix `++`/`--` (which leave an expression ended) from
    /// prefix use and the plain operators
    fn scan_plus_minus(&mut self, c: char) {
        self.bump();
        if self.peek() == Some(c) {
            self.bump();
            // postfix keeps ExpressionEnd, prefix keeps ExpressionStart
            self.after_dot = false;
        } else {
            self.set_token(LastToken::ExpressionStart);
        }
    }

    /// Scan an identifier, keyword, or number in code position
    fn scan_word(&mut self) {
        let start = self.pos;
        let first = self.peek().unwrap_or('\0');
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        let word = &self.src[start..self.pos];
        let token = if first.is_ascii_digit() {
            LastToken::ExpressionEnd
        } else if !self.after_dot && NON_VALUE_KEYWORDS.contains(&word) {
            LastToken::ExpressionStart
        } else {
            LastToken::ExpressionEnd
        };
        self.set_token(token);
    }

    fn set_token(&mut self, token: LastToken) {
        self.last_token = token;
        self.after_dot = false;
    }

    /// Emit the pending code segment ending at `end`, if non-empty
    fn flush_code(&mut self, end: usize) {
        self.emit(SpanKind::Code, self.seg_start, end);
    }

    fn emit(&mut self, kind: SpanKind, start: usize, end: usize) {
        if start < end {
            self.spans.push(Span::new(kind, start, end));
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(SpanKind, String)> {
        scan(source)
            .unwrap()
            .iter()
            .map(|s| (s.kind, s.text(source).to_string()))
            .collect()
    }

    fn assert_coverage(source: &str) {
        let spans = scan(source).unwrap();
        let mut pos = 0;
        for span in &spans {
            assert_eq!(span.start, pos, "gap or overlap at {} in {:?}", pos, source);
            pos = span.end;
        }
        assert_eq!(pos, source.len());
        let rebuilt: String = spans.iter().map(|s| s.text(source)).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_plain_code_is_one_span() {
        let source = "const x = 1 + 2;\n";
        assert_eq!(kinds(source), vec![(SpanKind::Code, source.to_string())]);
    }

    #[test]
    fn test_line_comment() {
        let source = "let a = 1; // the número\nlet b = 2;";
        let spans = kinds(source);
        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, "let a = 1; ".to_string()),
                (SpanKind::LineComment, "// the número".to_string()),
                (SpanKind::Code, "\nlet b = 2;".to_string()),
            ]
        );
        assert_coverage(source);
    }

    #[test]
    fn test_line_comment_at_eof_without_newline() {
        let source = "x(); // trailing";
        let spans = kinds(source);
        assert_eq!(spans.last().unwrap().0, SpanKind::LineComment);
        assert_eq!(spans.last().unwrap().1, "// trailing");
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let source = "a();\n/* one\n   two */\nb();";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::BlockComment, "/* one\n   two */".to_string()));
        assert_coverage(source);
    }

    #[test]
    fn test_block_comment_unterminated() {
        let err = scan("x; /* oops").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedConstruct {
                kind: ConstructKind::BlockComment,
                offset: 3,
            }
        );
    }

    #[test]
    fn test_single_and_double_quoted_strings() {
        let source = r#"f('uno', "dos");"#;
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::String, "'uno'".to_string()));
        assert_eq!(spans[3], (SpanKind::String, "\"dos\"".to_string()));
        assert_coverage(source);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let source = r#"x = 'it\'s';"#;
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::String, r"'it\'s'".to_string()));
    }

    #[test]
    fn test_backslash_escapes_line_terminator() {
        let source = "x = 'one \\\ntwo';";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::String, "'one \\\ntwo'".to_string()));
    }

    #[test]
    fn test_string_unterminated() {
        let err = scan("const s = 'open").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedConstruct {
                kind: ConstructKind::String,
                offset: 10,
            }
        );
    }

    #[test]
    fn test_comment_markers_inside_string_are_text() {
        let source = "s = 'not // a comment /* either */';";
        let spans = kinds(source);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].0, SpanKind::String);
    }

    #[test]
    fn test_template_literal_with_holes() {
        let source = "console.log(`The factorial of ${num} is ${result}`);";
        let spans = kinds(source);
        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, "console.log(`".to_string()),
                (SpanKind::TemplateText, "The factorial of ".to_string()),
                (SpanKind::TemplateHole, "${num}".to_string()),
                (SpanKind::TemplateText, " is ".to_string()),
                (SpanKind::TemplateHole, "${result}".to_string()),
                (SpanKind::Code, "`);".to_string()),
            ]
        );
        assert_coverage(source);
    }

    #[test]
    fn test_template_hole_with_nested_braces() {
        let source = "`v: ${fn({a: 1})}`";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::TemplateText, "v: ".to_string()));
        assert_eq!(spans[2], (SpanKind::TemplateHole, "${fn({a: 1})}".to_string()));
        assert_coverage(source);
    }

    #[test]
    fn test_template_hole_with_nested_template() {
        // the inner template belongs to the outer hole and is never
        // a translatable span
        let source = "`a ${`b ${c} d`} e`";
        let spans = kinds(source);
        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, "`".to_string()),
                (SpanKind::TemplateText, "a ".to_string()),
                (SpanKind::TemplateHole, "${`b ${c} d`}".to_string()),
                (SpanKind::TemplateText, " e".to_string()),
                (SpanKind::Code, "`".to_string()),
            ]
        );
        assert_coverage(source);
    }

    #[test]
    fn test_template_hole_with_string_containing_brace() {
        let source = "`x ${f('}')} y`";
        let spans = kinds(source);
        assert_eq!(spans[2], (SpanKind::TemplateHole, "${f('}')}".to_string()));
        assert_coverage(source);
    }

    #[test]
    fn test_template_escape_consumes_backtick() {
        let source = r"`a \` b`";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::TemplateText, r"a \` b".to_string()));
        assert_coverage(source);
    }

    #[test]
    fn test_template_unterminated() {
        let err = scan("x = `open").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedConstruct {
                kind: ConstructKind::TemplateLiteral,
                offset: 4,
            }
        );
    }

    #[test]
    fn test_template_hole_unterminated() {
        let err = scan("x = `a ${b").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedConstruct {
                kind: ConstructKind::TemplateHole,
                offset: 7,
            }
        );
    }

    #[test]
    fn test_regex_after_operator_is_code() {
        let source = "if (/x == 0/.test(s)) {}";
        let spans = kinds(source);
        assert_eq!(spans, vec![(SpanKind::Code, source.to_string())]);
    }

    #[test]
    fn test_regex_after_assignment() {
        // the slashes must not be misread as a comment even though the
        // body contains none of its own
        let source = "const re = /a\\/b[/]c/gi; done();";
        assert_eq!(kinds(source), vec![(SpanKind::Code, source.to_string())]);
    }

    #[test]
    fn test_regex_after_return_keyword() {
        let source = "return /ok/;";
        assert_eq!(kinds(source), vec![(SpanKind::Code, source.to_string())]);
    }

    #[test]
    fn test_division_after_identifier() {
        // `a / b` then a genuine line comment: the first slash must be
        // division, not a regex start that would swallow the comment
        let source = "x = a / b; // half\n";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::LineComment, "// half".to_string()));
    }

    #[test]
    fn test_division_after_close_paren_and_number() {
        let source = "y = (a + 1) / 2 / n;";
        assert_eq!(kinds(source), vec![(SpanKind::Code, source.to_string())]);
        assert_coverage(source);
    }

    #[test]
    fn test_division_after_postfix_increment() {
        let source = "z = i++ / 2;";
        assert_eq!(kinds(source), vec![(SpanKind::Code, source.to_string())]);
    }

    #[test]
    fn test_keyword_as_property_name_is_a_value() {
        // obj.return is a property access, so the slash is division
        let source = "q = obj.return / 2;";
        assert_eq!(kinds(source), vec![(SpanKind::Code, source.to_string())]);
    }

    #[test]
    fn test_string_inside_hole_is_not_translatable() {
        let source = "`${greet('hola')}`";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::TemplateHole, "${greet('hola')}".to_string()));
        assert!(spans.iter().all(|s| s.0 != SpanKind::String));
    }

    #[test]
    fn test_comment_inside_hole_is_part_of_the_hole() {
        let source = "`${a /* x */ + b}`";
        let spans = kinds(source);
        assert_eq!(
            spans[1],
            (SpanKind::TemplateHole, "${a /* x */ + b}".to_string())
        );
    }

    #[test]
    fn test_crlf_line_comment_boundary() {
        let source = "a(); // hey\r\nb();";
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::LineComment, "// hey".to_string()));
        assert_eq!(spans[2], (SpanKind::Code, "\r\nb();".to_string()));
    }

    #[test]
    fn test_multibyte_text_offsets() {
        let source = "f('número'); // número\n";
        assert_coverage(source);
        let spans = kinds(source);
        assert_eq!(spans[1], (SpanKind::String, "'número'".to_string()));
        assert_eq!(spans[3], (SpanKind::LineComment, "// número".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(scan("").unwrap(), vec![]);
    }

    #[test]
    fn test_coverage_on_mixed_source() {
        let source = "// c\nconst s = 'a'; /* b */ let t = `x${y}z`; r = /q/;\n";
        assert_coverage(source);
    }
}
