//! Dictionary lookups.
//!
//! The segmenter only needs one operation from a dictionary: given a query,
//! return the top matching headword or nothing. A lookup that fails for any
//! reason is reported as nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::query::Query;
use crate::script::{Script, WYLIE_TERMINATOR};
use crate::token::Match;
use crate::trace::Trace;

/// A source of headwords
pub trait Dictionary: Send + Sync {
    /// Look up a query, returning at most one match
    fn lookup(&self, query: &Query, trace: &mut Trace) -> Option<Match>;
}

/// A dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Identifier
    pub id: String,
    /// Tibetan headword
    pub tibetan: String,
    /// Wylie headword, stored `/`-terminated
    pub wylie: String,
}

/// An in-process dictionary with exact field matching
#[derive(Debug, Default)]
pub struct MemoryDictionary {
    entries: Vec<Entry>,
    by_tibetan: HashMap<String, usize>,
    by_wylie: HashMap<String, usize>,
    lookups: AtomicUsize,
}

impl MemoryDictionary {
    /// Create a new empty dictionary
    pub fn new() -> Self {
        MemoryDictionary::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry. When two entries share a headword, the first one wins.
    pub fn insert(&mut self, id: &str, tibetan: &str, wylie: &str) {
        let mut wylie = wylie.to_string();
        if !wylie.is_empty() && !wylie.ends_with(WYLIE_TERMINATOR) {
            wylie.push(WYLIE_TERMINATOR);
        }

        let idx = self.entries.len();
        if !tibetan.is_empty() {
            self.by_tibetan.entry(tibetan.to_string()).or_insert(idx);
        }
        if !wylie.is_empty() {
            self.by_wylie.entry(wylie.clone()).or_insert(idx);
        }
        self.entries.push(Entry {
            id: id.to_string(),
            tibetan: tibetan.to_string(),
            wylie,
        });
    }

    /// Load entries from a TSV string (format: id\ttibetan\twylie)
    pub fn load_tsv(&mut self, tsv_content: &str) {
        for line in tsv_content.lines() {
            // Skip comments and empty lines
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
            let id = parts[0];
            let tibetan = parts.get(1).copied().unwrap_or("");
            let wylie = parts.get(2).copied().unwrap_or("");
            if tibetan.is_empty() && wylie.is_empty() {
                continue;
            }

            self.insert(id, tibetan, wylie);
        }
    }

    /// Build a dictionary from TSV content
    pub fn from_tsv(tsv_content: &str) -> Self {
        let mut dict = MemoryDictionary::new();
        dict.load_tsv(tsv_content);
        dict
    }

    /// Number of lookups served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn find(&self, query: &Query) -> Option<&Entry> {
        let index = match query.script {
            Script::Tibetan => &self.by_tibetan,
            Script::Wylie => &self.by_wylie,
        };
        query
            .terms
            .iter()
            .find_map(|term| index.get(term))
            .map(|&idx| &self.entries[idx])
    }
}

impl Dictionary for MemoryDictionary {
    fn lookup(&self, query: &Query, trace: &mut Trace) -> Option<Match> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        trace.push_with(|| format!("Query: {}", query.to_lucene()));

        let entry = self.find(query)?;
        let tibetan = (!entry.tibetan.is_empty()).then(|| entry.tibetan.clone());
        let wylie = if entry.wylie.is_empty() {
            query.candidate.as_str()
        } else {
            entry.wylie.as_str()
        };
        Some(Match::hit(Some(entry.id.clone()), tibetan, wylie))
    }
}
