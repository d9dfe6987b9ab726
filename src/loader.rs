//! Dictionary resource loading
//!
//! The on-disk dictionary format is a flat JSON object mapping source words
//! to target words:
//!
//! ```json
//! {
//!     "@metadata": { "authors": ["..."] },
//!     "número": "നമ്പർ",
//!     "positive": "negative"
//! }
//! ```
//!
//! Keys starting with `@` (metadata) are skipped. Non-string values are
//! skipped with a warning. The dictionary is loaded once before scanning
//! begins and is immutable for the rest of the run.

use crate::dictionary::Dictionary;
use crate::error::DictionaryError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Load a dictionary from a JSON file
///
/// # Errors
///
/// - File read errors
/// - Invalid JSON
/// - A JSON root that is not an object
pub fn load_dictionary_from_file(path: &Path) -> Result<Dictionary, DictionaryError> {
    let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let json: Value =
        serde_json::from_str(&content).map_err(|source| DictionaryError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let object = json.as_object().ok_or_else(|| DictionaryError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    let mut dictionary = Dictionary::new();
    for (key, value) in object {
        if key.starts_with('@') {
            continue;
        }
        match value.as_str() {
            Some(target) => dictionary.insert(key.clone(), target.to_string()),
            None => warn!(
                entry = %key,
                path = %path.display(),
                "dictionary entry is not a string, skipping"
            ),
        }
    }

    Ok(dictionary)
}
