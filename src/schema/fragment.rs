//! Name fragments — the minimal tagged text units names are composed from.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Vowels recognized by the phonetic helpers, including accented forms
/// and `y`.
const VOWELS: &str = "aeiouy\u{e1}\u{e9}\u{ed}\u{f3}\u{fa}\u{e0}\u{e8}\u{ec}\u{f2}\u{f9}\u{e2}\u{ea}\u{ee}\u{f4}\u{fb}\u{e4}\u{eb}\u{ef}\u{f6}\u{fc}";

/// Returns true if the character is a vowel (case-insensitive).
pub fn is_vowel(ch: char) -> bool {
    ch.to_lowercase().any(|c| VOWELS.contains(c))
}

/// Gender tag carried by a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

/// Caller-supplied gender constraint for name assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenderFilter {
    #[default]
    Any,
    Male,
    Female,
}

impl GenderFilter {
    /// Whether a fragment with the given tag passes this filter.
    /// Untagged fragments only pass `Any`.
    pub fn admits(&self, gender: Option<Gender>) -> bool {
        match self {
            GenderFilter::Any => true,
            GenderFilter::Male => {
                matches!(gender, Some(Gender::Male) | Some(Gender::Unisex))
            }
            GenderFilter::Female => {
                matches!(gender, Some(Gender::Female) | Some(Gender::Unisex))
            }
        }
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(GenderFilter::Any),
            "male" | "m" => Ok(GenderFilter::Male),
            "female" | "f" => Ok(GenderFilter::Female),
            other => Err(format!("unknown gender filter '{}'", other)),
        }
    }
}

/// A single name fragment: a prefix, suffix, given name, clan name, and
/// so on. Identity is structural; fragments carry no id.
///
/// The vowel flags describe the fragment's boundaries and drive the
/// phonetic smoothing pass. Terse table entries (surnames, clan leads)
/// may omit them, so every field except `text` is defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub ends_vowel: bool,
    #[serde(default)]
    pub starts_vowel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl Fragment {
    /// The primary meaning keyword: the text before the first `/` of the
    /// meaning tag, trimmed and lowercased. `None` when the meaning is
    /// empty.
    pub fn primary_keyword(&self) -> Option<String> {
        let head = self.meaning.split('/').next().unwrap_or("").trim();
        if head.is_empty() {
            None
        } else {
            Some(head.to_lowercase())
        }
    }

    /// Whether the fragment text actually starts with a vowel letter.
    /// Used by the table linter to cross-check the declared flag.
    pub fn text_starts_vowel(&self) -> bool {
        self.text.chars().next().is_some_and(is_vowel)
    }

    /// Whether the fragment text actually ends with a vowel letter.
    pub fn text_ends_vowel(&self) -> bool {
        self.text.chars().next_back().is_some_and(is_vowel)
    }
}
