//! Splitting a phrase into independently segmented sub-phrases.
//!
//! Tibetan phrases are cut on shad-family punctuation, whitespace and commas.
//! Wylie phrases are cut on ASCII punctuation. The word delimiters of each
//! script (tsek, space) are left in place for the segmenter to backtrack on.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::script::Script;

/// Leading Tibetan marks, digits, punctuation, whitespace, underscores and slashes
static LEADING_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{0F00}-\x{0F3F}\s_/]+").expect("Invalid regex"));

/// Shad variants and clause marks (། ༏ ༐ ༑ ༒ ༔ ༈), whitespace and comma
static TIBETAN_DELIMITERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{0F0D}\x{0F0F}\x{0F10}\x{0F11}\x{0F12}\x{0F14}\x{0F08}\s,]+")
        .expect("Invalid regex")
});

static WYLIE_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;:\[\]|/!_,]+").expect("Invalid regex"));

/// Remove leading noise from a phrase, whatever its script.
pub fn trim_leading_noise(phrase: &str) -> &str {
    match LEADING_NOISE.find(phrase) {
        Some(m) => &phrase[m.end()..],
        None => phrase,
    }
}

/// Split a phrase into non-empty sub-phrases, preserving order.
pub fn split_phrase(phrase: &str, script: Script) -> Vec<&str> {
    let delimiters = match script {
        Script::Tibetan => &*TIBETAN_DELIMITERS,
        Script::Wylie => &*WYLIE_DELIMITERS,
    };

    delimiters
        .split(phrase)
        .filter(|part| !part.is_empty())
        .collect()
}
