//! Match representation for segmented text.
//!
//! A Match is one unit of a parsed phrase: either a dictionary headword or a
//! residual span that no dictionary entry covers.

use serde::{Deserialize, Serialize};

use crate::script::{Script, WYLIE_TERMINATOR};

/// A single unit produced by the segmenter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Match {
    /// Dictionary identifier (None for residue)
    pub id: Option<String>,

    /// Canonical Tibetan form
    pub tibetan: Option<String>,

    /// Canonical Wylie form, without the dictionary's trailing `/`
    pub wylie: String,

    /// Whether the dictionary recognised this unit
    pub matched: bool,
}

impl Match {
    /// Create a dictionary hit
    pub fn hit(id: Option<String>, tibetan: Option<String>, wylie: &str) -> Self {
        Match {
            id,
            tibetan,
            wylie: wylie.trim_end_matches(WYLIE_TERMINATOR).to_string(),
            matched: true,
        }
    }

    /// Create an unmatched residual span
    pub fn residual(text: &str) -> Self {
        Match {
            id: None,
            tibetan: Some(text.to_string()),
            wylie: text.to_string(),
            matched: false,
        }
    }

    /// The text this match consumes from the phrase, in the given script
    pub fn matched_text(&self, script: Script) -> &str {
        match script {
            Script::Tibetan => self.tibetan.as_deref().unwrap_or(""),
            Script::Wylie => &self.wylie,
        }
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tibetan {
            Some(ref tibetan) => write!(f, "{}", tibetan)?,
            None => write!(f, "-")?,
        }
        write!(f, "\t{}", self.wylie)?;
        if let Some(ref id) = self.id {
            write!(f, "\t{}", id)?;
        } else if !self.matched {
            write!(f, "\t?")?;
        }
        Ok(())
    }
}
