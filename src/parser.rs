//! Phrase parsing: the per-request pipeline.
//!
//! classify → trim leading noise → split → segment each sub-phrase in order.
//! Sub-phrases are processed sequentially because later ones reuse the
//! matches of earlier ones.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::dictionary::Dictionary;
use crate::error::ParseError;
use crate::script::{classify, Script};
use crate::segmenter::Segmenter;
use crate::splitter::{split_phrase, trim_leading_noise};
use crate::token::Match;
use crate::trace::Trace;

/// The result of parsing one phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResponse {
    /// The phrase after trimming leading noise
    pub original_phrase: String,
    /// The detected script
    pub script_type: Script,
    /// Matches in left-to-right order
    pub parsed: Vec<Match>,
    /// Trace lines, present only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<String>>,
}

/// Parses phrases against a dictionary
pub struct PhraseParser<D: Dictionary + ?Sized> {
    /// The dictionary (shared reference)
    dictionary: Arc<D>,
}

impl<D: Dictionary> PhraseParser<D> {
    /// Create a new parser with the given dictionary
    pub fn new(dictionary: D) -> Self {
        PhraseParser {
            dictionary: Arc::new(dictionary),
        }
    }
}

impl<D: Dictionary + ?Sized> PhraseParser<D> {
    /// Create a new parser with a shared dictionary reference
    pub fn with_arc(dictionary: Arc<D>) -> Self {
        PhraseParser { dictionary }
    }

    /// Get a reference to the dictionary
    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Parse a phrase
    pub fn parse(&self, text: &str, debug: bool) -> Result<ParseResponse, ParseError> {
        let mut trace = if debug {
            Trace::enabled()
        } else {
            Trace::disabled()
        };

        let parsed = self.parse_with_trace(text, &mut trace)?;
        Ok(ParseResponse {
            debug: trace.finish(),
            ..parsed
        })
    }

    /// Parse a phrase, recording steps into a caller-owned trace
    pub fn parse_with_trace(&self, text: &str, trace: &mut Trace) -> Result<ParseResponse, ParseError> {
        let text = text.trim();
        trace.push(text);
        if text.is_empty() {
            return Err(ParseError::EmptyPhrase);
        }

        // Candidates are queried exactly as written; no normalization
        let script = classify(text);
        let phrase = trim_leading_noise(text);

        let segmenter = Segmenter::new(&*self.dictionary, script);
        let mut parsed: Vec<Match> = Vec::new();

        for sub in split_phrase(phrase, script) {
            trace.push_with(|| format!("Doing: {}", sub));
            let found = segmenter.segment(sub, &parsed, trace);
            parsed.extend(found);
        }

        debug!(%script, matches = parsed.len(), "parsed phrase");

        Ok(ParseResponse {
            original_phrase: phrase.to_string(),
            script_type: script,
            parsed,
            debug: None,
        })
    }
}

impl<D: Dictionary + ?Sized> Clone for PhraseParser<D> {
    fn clone(&self) -> Self {
        PhraseParser {
            dictionary: Arc::clone(&self.dictionary),
        }
    }
}
