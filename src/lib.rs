//! # tibphrase
//!
//! Segments phrases written in Tibetan script or Wylie transliteration into
//! dictionary headwords.
//!
//! Each phrase is split on punctuation into sub-phrases. Every sub-phrase is
//! then consumed by greedy longest match: the longest remaining span is looked
//! up in a dictionary, backing off one word at a time on a miss. Spans the
//! dictionary does not know are kept as unmatched residue, so no input text
//! is dropped.
//!
//! ## Quick Start
//!
//! ```rust
//! use tibphrase::{MemoryDictionary, PhraseParser};
//!
//! // Build a dictionary from TSV data (id, Tibetan, Wylie)
//! let tsv = "1\tཆོས\tchos\n2\tསྐུ\tsku";
//! let parser = PhraseParser::new(MemoryDictionary::from_tsv(tsv));
//!
//! let response = parser.parse("chos sku", false).unwrap();
//! for m in &response.parsed {
//!     println!("{}", m);
//! }
//! assert_eq!(response.parsed.len(), 2);
//! ```
//!
//! ## Solr Dictionary
//!
//! With the `solr` feature (on by default), [`SolrDictionary`] queries the
//! `name_tibt` / `name_latin` fields of a Solr index, one request per
//! candidate. The `server` feature adds an HTTP endpoint in [`server`].

pub mod config;
pub mod dictionary;
pub mod error;
pub mod parser;
pub mod query;
pub mod script;
pub mod segmenter;
pub mod splitter;
pub mod text;
pub mod token;
pub mod trace;

#[cfg(feature = "solr")]
pub mod solr;

#[cfg(feature = "server")]
pub mod server;

// Re-export main types for convenience
pub use config::{
    default_config_path, Config, DEFAULT_REFERER, DEFAULT_SOLR_URL, DEFAULT_USER_AGENT,
};
pub use dictionary::{Dictionary, Entry, MemoryDictionary};
pub use error::{ConfigError, LookupError, ParseError};
pub use parser::{ParseResponse, PhraseParser};
pub use query::Query;
pub use script::{classify, Script};
pub use segmenter::{Segmenter, MAX_ITERATIONS};
pub use splitter::{split_phrase, trim_leading_noise};
pub use token::Match;
pub use trace::Trace;

#[cfg(feature = "solr")]
pub use solr::SolrDictionary;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let tsv = "1\tཆོས་སྐུ\tchos sku\n2\tངོ་བོ་ཉིད\tngo bo nyid\n3\tཆོས\tchos";
        let parser = PhraseParser::new(MemoryDictionary::from_tsv(tsv));

        let response = parser.parse("ཆོས་སྐུ་ངོ་བོ་ཉིད། ཆོས་ཀཀ།", false).unwrap();

        let forms: Vec<_> = response
            .parsed
            .iter()
            .map(|m| m.tibetan.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(forms, vec!["ཆོས་སྐུ", "ངོ་བོ་ཉིད", "ཆོས", "ཀཀ"]);
        assert!(!response.parsed[3].matched);
    }

    #[test]
    fn test_determinism() {
        let tsv = "1\tཆོས\tchos\n2\tསྐུ\tsku";
        let parser = PhraseParser::new(MemoryDictionary::from_tsv(tsv));

        let first = parser.parse("ཆོས་སྐུ་ཀཀ་ཆོས།", false).unwrap();
        let second = parser.parse("ཆོས་སྐུ་ཀཀ་ཆོས།", false).unwrap();
        assert_eq!(first, second);
    }
}
