//! Error types for scanning and dictionary loading

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The lexical construct that was left unterminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    String,
    BlockComment,
    TemplateLiteral,
    TemplateHole,
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstructKind::String => "string literal",
            ConstructKind::BlockComment => "block comment",
            ConstructKind::TemplateLiteral => "template literal",
            ConstructKind::TemplateHole => "template interpolation",
        };
        f.write_str(name)
    }
}

/// Errors raised by the lexical scanner
///
/// A scan error aborts the whole file; no partial output is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// End of input was reached while still inside a string, block comment,
    /// template literal, or interpolation hole
    #[error("unterminated {kind} starting at byte offset {offset}")]
    UnterminatedConstruct { kind: ConstructKind, offset: usize },
}

/// Errors raised while loading a dictionary resource
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dictionary '{}' as JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid dictionary '{}': root must be a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}
