//! The segmenter implementing longest-match with backtracking.
//!
//! A sub-phrase is consumed left to right. At each step the whole remaining
//! span is looked up; on a miss the span is cut back to its last word
//! delimiter and retried, until either a headword is found or a single
//! delimiter-free unit is left over, which becomes a residual match.
//!
//! Every cut is measured from an `anchor`, the text that was left after the
//! previous match. The candidate being tried is always a prefix of it.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::dictionary::Dictionary;
use crate::query::Query;
use crate::script::{Script, TSEK};
use crate::text::{char_len, drop_chars};
use crate::token::Match;
use crate::trace::Trace;

/// Safety bound on loop iterations per sub-phrase
pub const MAX_ITERATIONS: usize = 100;

/// A case-marker vowel (gigu, naro, or a-chung with gigu) left after a match,
/// followed by the tseks, shads or spaces that close it off
static LEADING_PARTICLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[\x{0F72}\x{0F7C}]|\x{0F60}\x{0F72})?[\x{0F0B}\x{0F0D}\s]+")
        .expect("Invalid regex")
});

/// Segments sub-phrases of one script against a dictionary
pub struct Segmenter<'d, D: Dictionary + ?Sized> {
    dictionary: &'d D,
    script: Script,
}

impl<'d, D: Dictionary + ?Sized> Segmenter<'d, D> {
    /// Create a segmenter for the given dictionary and script
    pub fn new(dictionary: &'d D, script: Script) -> Self {
        Segmenter { dictionary, script }
    }

    /// The script this segmenter works on
    pub fn script(&self) -> Script {
        self.script
    }

    /// Segment one sub-phrase.
    ///
    /// `already_parsed` holds the matches of earlier sub-phrases in the same
    /// request. A candidate equal to the Tibetan form of any of them, or of
    /// a match made earlier in this sub-phrase, is consumed without a lookup
    /// and the earlier match is repeated in the output.
    pub fn segment(&self, subphrase: &str, already_parsed: &[Match], trace: &mut Trace) -> Vec<Match> {
        let mut results: Vec<Match> = Vec::new();
        // Outer whitespace is trimmed too; a delimiter at index 0 can never be backed off to
        let mut anchor = subphrase.trim().trim_end_matches(TSEK).to_string();
        // The current candidate is anchor[..end]
        let mut end = anchor.len();
        let mut iterations = 0;

        while end > 0 {
            iterations += 1;
            if iterations > MAX_ITERATIONS {
                warn!(
                    subphrase,
                    remaining = &anchor[..end],
                    "segmentation stopped at iteration limit"
                );
                trace.push(format!("Iteration limit reached at: {}", &anchor[..end]));
                break;
            }

            let candidate = &anchor[..end];
            trace.push_with(|| format!("subphrase: {}", candidate));

            if let Some(known) = already_found(candidate, &results, already_parsed) {
                debug!(candidate, "already parsed");
                let known = known.clone();
                let width = char_len(candidate);
                results.push(known);
                anchor = advance(&anchor, width).to_string();
                end = anchor.len();
                continue;
            }

            let query = Query::build(candidate, self.script);
            if let Some(found) = self.dictionary.lookup(&query, trace) {
                debug!(candidate, matched = %found.wylie, "dictionary hit");
                let width = char_len(found.matched_text(self.script));
                results.push(found);
                anchor = advance(&anchor, width).to_string();
                end = anchor.len();
                continue;
            }

            match candidate.rfind(self.script.word_delimiter()) {
                // Back off one word and retry from the same anchor
                Some(idx) if idx > 0 => end = idx,
                _ => {
                    debug!(candidate, "unmatched residue");
                    results.push(Match::residual(candidate));
                    let width = char_len(candidate);
                    anchor = advance(&anchor, width).to_string();
                    end = anchor.len();
                }
            }
        }

        results
    }
}

/// Find an earlier match in this request whose Tibetan form is the candidate
fn already_found<'a>(
    candidate: &str,
    results: &'a [Match],
    already_parsed: &'a [Match],
) -> Option<&'a Match> {
    already_parsed
        .iter()
        .chain(results)
        .find(|m| m.tibetan.as_deref() == Some(candidate))
}

/// The rest of `anchor` after consuming `width` characters and any
/// particle that trails the consumed text.
pub fn advance(anchor: &str, width: usize) -> &str {
    strip_leading_particle(drop_chars(anchor, width))
}

/// Drop a leading case-marker vowel plus its closing delimiters
pub fn strip_leading_particle(text: &str) -> &str {
    match LEADING_PARTICLE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::MemoryDictionary;

    fn make_wylie_dict() -> MemoryDictionary {
        MemoryDictionary::from_tsv(
            "1\tཆོས\tchos\n\
             2\tསྐུ\tsku\n\
             3\tངོ་བོ་ཉིད\tngo bo nyid\n\
             4\tརྒྱལ་པོ\trgyal po\n",
        )
    }

    fn make_tibetan_dict() -> MemoryDictionary {
        MemoryDictionary::from_tsv(
            "1\tཆོས\tchos\n\
             2\tཆོས་སྐུ\tchos sku\n\
             3\tངོ་བོ\tngo bo\n\
             4\tརྒྱལ་པོ\trgyal po\n\
             5\tབཀྲ་ཤིས\tbkra shis\n",
        )
    }

    fn wylie_forms(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.wylie.as_str()).collect()
    }

    #[test]
    fn test_strip_leading_particle() {
        assert_eq!(strip_leading_particle("ི་སྐུ"), "སྐུ");
        assert_eq!(strip_leading_particle("ོ། སྐུ"), "སྐུ");
        assert_eq!(strip_leading_particle("འི་སྐུ"), "སྐུ");
        assert_eq!(strip_leading_particle("  sku"), "sku");
        // A vowel without a closing delimiter stays
        assert_eq!(strip_leading_particle("ིས་"), "ིས་");
        assert_eq!(strip_leading_particle("sku"), "sku");
    }

    #[test]
    fn test_advance_counts_characters() {
        assert_eq!(advance("ཆོས་སྐུ", 3), "སྐུ");
        assert_eq!(advance("chos sku", 4), "sku");
        assert_eq!(advance("chos", 10), "");
    }

    #[test]
    fn test_wylie_longest_match_backtracks() {
        let dict = make_wylie_dict();
        let segmenter = Segmenter::new(&dict, Script::Wylie);
        let mut trace = Trace::disabled();

        let results = segmenter.segment("chos sku ngo bo nyid", &[], &mut trace);
        assert_eq!(wylie_forms(&results), vec!["chos", "sku", "ngo bo nyid"]);
        assert!(results.iter().all(|m| m.matched));
    }

    #[test]
    fn test_tibetan_prefers_longest() {
        let dict = make_tibetan_dict();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        let results = segmenter.segment("ཆོས་སྐུ་ངོ་བོ", &[], &mut trace);
        let forms: Vec<_> = results.iter().map(|m| m.tibetan.as_deref().unwrap()).collect();
        assert_eq!(forms, vec!["ཆོས་སྐུ", "ངོ་བོ"]);
        // Two misses while cutting back, then one hit per headword
        assert_eq!(dict.lookup_count(), 4);
    }

    #[test]
    fn test_trailing_tsek_stripped() {
        let dict = make_tibetan_dict();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        let results = segmenter.segment("བཀྲ་ཤིས་་", &[], &mut trace);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tibetan.as_deref(), Some("བཀྲ་ཤིས"));
    }

    #[test]
    fn test_genitive_particle_consumed() {
        let dict = make_tibetan_dict();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        // རྒྱལ་པོའི matches རྒྱལ་པོ via the suffix variant; the འི that
        // follows is dropped with its tsek
        let results = segmenter.segment("རྒྱལ་པོའི་ཆོས", &[], &mut trace);
        let forms: Vec<_> = results.iter().map(|m| m.tibetan.as_deref().unwrap()).collect();
        assert_eq!(forms, vec!["རྒྱལ་པོ", "ཆོས"]);
    }

    #[test]
    fn test_unmatched_residue() {
        let dict = make_wylie_dict();
        let segmenter = Segmenter::new(&dict, Script::Wylie);
        let mut trace = Trace::disabled();

        let results = segmenter.segment("xyzzy", &[], &mut trace);
        assert_eq!(results, vec![Match::residual("xyzzy")]);
    }

    #[test]
    fn test_residue_between_matches() {
        let dict = make_wylie_dict();
        let segmenter = Segmenter::new(&dict, Script::Wylie);
        let mut trace = Trace::disabled();

        let results = segmenter.segment("chos blah sku", &[], &mut trace);
        assert_eq!(wylie_forms(&results), vec!["chos", "blah", "sku"]);
        assert_eq!(
            results.iter().map(|m| m.matched).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_already_parsed_skips_lookup() {
        let dict = make_tibetan_dict();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        let earlier = vec![Match::hit(Some("1".into()), Some("ཆོས".into()), "chos")];
        let results = segmenter.segment("ཆོས", &earlier, &mut trace);
        assert_eq!(results, earlier);
        assert_eq!(dict.lookup_count(), 0);
    }

    #[test]
    fn test_repeat_within_subphrase_skips_lookup() {
        let dict = make_tibetan_dict();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        let results = segmenter.segment("ཆོས་ཆོས", &[], &mut trace);
        // ཆོས་ཆོས misses, ཆོས hits, the second ཆོས is recognised locally
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], results[1]);
        assert_eq!(dict.lookup_count(), 2);
    }

    #[test]
    fn test_leading_delimiter_does_not_drop_text() {
        let dict = make_wylie_dict();
        let segmenter = Segmenter::new(&dict, Script::Wylie);
        let mut trace = Trace::disabled();

        let results = segmenter.segment(" qqq", &[], &mut trace);
        assert_eq!(results, vec![Match::residual("qqq")]);
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let dict = make_wylie_dict();
        let segmenter = Segmenter::new(&dict, Script::Wylie);
        let mut trace = Trace::disabled();

        let results = segmenter.segment(" ngo bo nyid sku ", &[], &mut trace);
        assert_eq!(wylie_forms(&results), vec!["ngo bo nyid", "sku"]);
        assert!(results.iter().all(|m| m.matched));
    }

    #[test]
    fn test_iteration_limit() {
        // A hit with an empty Tibetan form consumes nothing
        struct Stuck;
        impl Dictionary for Stuck {
            fn lookup(&self, _query: &Query, _trace: &mut Trace) -> Option<Match> {
                Some(Match::hit(None, None, "x"))
            }
        }

        let segmenter = Segmenter::new(&Stuck, Script::Tibetan);
        let mut trace = Trace::enabled();
        let results = segmenter.segment("ཀཀ", &[], &mut trace);
        assert_eq!(results.len(), MAX_ITERATIONS);
        assert!(trace
            .lines()
            .last()
            .is_some_and(|l| l.starts_with("Iteration limit reached")));
    }

    #[test]
    fn test_long_undelimited_input_terminates() {
        let dict = MemoryDictionary::new();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        let input = "ཀ".repeat(5000);
        let results = segmenter.segment(&input, &[], &mut trace);
        assert_eq!(results, vec![Match::residual(&input)]);
        assert_eq!(dict.lookup_count(), 1);
    }

    #[test]
    fn test_many_syllables_hit_cap() {
        let dict = MemoryDictionary::new();
        let segmenter = Segmenter::new(&dict, Script::Tibetan);
        let mut trace = Trace::disabled();

        // Every residual syllable costs one iteration per remaining syllable,
        // so the cap truncates the result
        let input = vec!["ཀ"; 30].join("་");
        let results = segmenter.segment(&input, &[], &mut trace);
        assert!(!results.is_empty());
        assert!(results.len() < 30);
        assert!(results.iter().all(|m| !m.matched));
        assert!(dict.lookup_count() <= MAX_ITERATIONS);
    }
}
