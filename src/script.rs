//! Script detection for incoming phrases.
//!
//! A phrase is either written in Tibetan script or in its Wylie Latin
//! transliteration. The script decides which delimiters are used for
//! splitting and backtracking, and which dictionary field is queried.

use serde::{Deserialize, Serialize};

/// Tsek (syllable separator ་)
pub const TSEK: char = '\u{0F0B}';

/// Trailing delimiter on every Wylie headword stored in the dictionary
pub const WYLIE_TERMINATOR: char = '/';

/// The script a phrase is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Tibetan Unicode script (U+0F00 to U+0FFF)
    Tibetan,
    /// Wylie Latin transliteration
    Wylie,
}

impl Script {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Tibetan => "tibetan",
            Script::Wylie => "wylie",
        }
    }

    /// The word boundary the segmenter backtracks on
    pub fn word_delimiter(&self) -> char {
        match self {
            Script::Tibetan => TSEK,
            Script::Wylie => ' ',
        }
    }

    /// The dictionary field holding headwords in this script
    pub fn field(&self) -> &'static str {
        match self {
            Script::Tibetan => "name_tibt",
            Script::Wylie => "name_latin",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a character lies in the Tibetan Unicode block
pub fn is_tibetan_char(c: char) -> bool {
    ('\u{0F00}'..='\u{0FFF}').contains(&c)
}

/// Classify a phrase: Tibetan if any character is in the Tibetan block.
pub fn classify(phrase: &str) -> Script {
    if phrase.chars().any(is_tibetan_char) {
        Script::Tibetan
    } else {
        Script::Wylie
    }
}
