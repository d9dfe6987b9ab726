//! The word-substitution dictionary
//!
//! An immutable source-word to target-word mapping, constructed once per
//! invocation and passed explicitly to the substitution engine. Lookup is a
//! pure function of the word text. No assumption is made that entries are
//! true translations of each other; any word-to-word mapping works.

use std::collections::HashMap;

/// A read-only word-to-word mapping driving substitution
///
/// Matching is case-sensitive by default. With
/// [`Dictionary::with_case_insensitive`] enabled, a case-folded lookup is
/// attempted on an exact miss and the original token's capitalization
/// pattern (all-caps, capitalized, or lowercase) is re-applied to the
/// translated word.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
    /// Lowercased keys, built only when case-insensitive fallback is on
    folded: HashMap<String, String>,
    case_insensitive: bool,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Build a dictionary from `(source, target)` pairs
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut dictionary = Dictionary::new();
        for (source, target) in pairs {
            dictionary.insert(source.into(), target.into());
        }
        dictionary
    }

    /// Enable or disable the case-insensitive fallback
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self.folded = if case_insensitive {
            self.entries
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect()
        } else {
            HashMap::new()
        };
        self
    }

    pub fn insert(&mut self, source: String, target: String) {
        if self.case_insensitive {
            self.folded.insert(source.to_lowercase(), target.clone());
        }
        self.entries.insert(source, target);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the translation for a whole word token
    ///
    /// Exact match first; on a miss with the case-insensitive fallback
    /// enabled, a folded match re-applies `word`'s capitalization pattern.
    /// Returns `None` on a miss, which callers treat as "leave unchanged".
    pub fn lookup(&self, word: &str) -> Option<String> {
        if let Some(target) = self.entries.get(word) {
            return Some(target.clone());
        }
        if self.case_insensitive {
            if let Some(target) = self.folded.get(&word.to_lowercase()) {
                return Some(apply_capitalization(word, target));
            }
        }
        None
    }

    /// The inverse mapping (target words become source words)
    ///
    /// Useful for round-trip translation; collisions keep an arbitrary
    /// entry, so the inverse is only faithful when targets are distinct.
    pub fn inverted(&self) -> Dictionary {
        Dictionary::from_pairs(self.entries.iter().map(|(k, v)| (v.clone(), k.clone())))
            .with_case_insensitive(self.case_insensitive)
    }
}

/// Re-apply the capitalization pattern of `sample` to `word`
///
/// Recognized patterns are all-caps, capitalized (first letter upper, rest
/// lower), and lowercase; any other mix leaves `word` untouched.
fn apply_capitalization(sample: &str, word: &str) -> String {
    let letters: Vec<char> = sample.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return word.to_string();
    }

    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return word.to_uppercase();
    }

    let first_upper = letters[0].is_uppercase();
    let rest_lower = letters.iter().skip(1).all(|c| c.is_lowercase());

    if first_upper && rest_lower {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else if !first_upper && rest_lower {
        word.to_lowercase()
    } else {
        word.to_string()
    }
}
