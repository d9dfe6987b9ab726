//! srclocal — localize the human-readable text embedded in program source
//!
//! Replaces individual words in comment bodies, string-literal bodies, and
//! template-literal text with dictionary-translated equivalents, while
//! leaving every executable token byte-identical. Identifiers, operators,
//! regex literals, interpolation expressions, whitespace, and line endings
//! are preserved exactly.
//!
//! The pipeline: raw text → [`scanner::scan`] → classified spans → word
//! tokenization and dictionary substitution per translatable span →
//! [`reassemble::reassemble`] → output text.
//!
//! # Example
//!
//! ```
//! use srclocal::{Dictionary, localize_source};
//!
//! let dictionary = Dictionary::from_pairs([("número", "നമ്പർ")]);
//! let output = localize_source("// if número is 0\n", &dictionary).unwrap();
//! assert_eq!(output, "// if നമ്പർ is 0\n");
//! ```

pub mod dictionary;
pub mod error;
pub mod loader;
pub mod reassemble;
pub mod scanner;
pub mod span;
pub mod substitute;
pub mod tokenizer;
pub mod walk;

pub use dictionary::Dictionary;
pub use error::{ConstructKind, DictionaryError, ScanError};
pub use loader::load_dictionary_from_file;
pub use reassemble::reassemble;
pub use scanner::scan;
pub use span::{Span, SpanKind};
pub use substitute::{rewrite_span, substitute};
pub use tokenizer::{WordToken, tokenize};
pub use walk::{
    ProcessError, ProcessSummary, process_directory, process_file, validate_file_extensions,
};

/// Localize one source text with the given dictionary
///
/// Scans, substitutes, and reassembles in a single pass over the input.
/// The dictionary is read-only for the duration of the call; no state is
/// shared across invocations, so independent files may be processed in
/// parallel.
///
/// # Errors
///
/// Returns [`ScanError`] if the source contains an unterminated string,
/// block comment, template literal, or interpolation hole. No partial
/// output is produced on error.
pub fn localize_source(source: &str, dictionary: &Dictionary) -> Result<String, ScanError> {
    let spans = scanner::scan(source)?;
    Ok(reassemble::reassemble(source, &spans, dictionary))
}
