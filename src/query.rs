//! Dictionary query construction.
//!
//! A candidate is looked up as one or two alternative terms. Two suffix
//! classes are expanded so that inflected forms still find their headword:
//!
//! - `པར`/`བར` (`par`/`bar`): the candidate itself, or with its last letter dropped
//! - `འི`/`འོ` (`'i`/`'o`): the candidate with its last one or two letters dropped
//!
//! Letter counts are code points, so a stacked cluster is several letters.

use crate::script::{Script, WYLIE_TERMINATOR};
use crate::text::{drop_last_chars, ends_with_any};

const TIBETAN_LA_SUFFIXES: &[&str] = &["པར", "བར"];
const TIBETAN_GENITIVE_SUFFIXES: &[&str] = &["འི", "འོ"];
const WYLIE_LA_SUFFIXES: &[&str] = &["par", "bar"];
const WYLIE_GENITIVE_SUFFIXES: &[&str] = &["'i", "'o"];

/// A field query for one candidate string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The candidate the query was built from
    pub candidate: String,
    /// The script of the candidate
    pub script: Script,
    /// Alternative literal terms, compared exactly against the field
    pub terms: Vec<String>,
}

impl Query {
    /// Build the query for a candidate in the given script
    pub fn build(candidate: &str, script: Script) -> Self {
        let (la, genitive) = match script {
            Script::Tibetan => (TIBETAN_LA_SUFFIXES, TIBETAN_GENITIVE_SUFFIXES),
            Script::Wylie => (WYLIE_LA_SUFFIXES, WYLIE_GENITIVE_SUFFIXES),
        };

        let forms = if ends_with_any(candidate, la) {
            vec![candidate, drop_last_chars(candidate, 1)]
        } else if ends_with_any(candidate, genitive) {
            vec![drop_last_chars(candidate, 1), drop_last_chars(candidate, 2)]
        } else {
            vec![candidate]
        };

        let terms = forms
            .into_iter()
            .map(|form| match script {
                Script::Tibetan => form.to_string(),
                Script::Wylie => format!("{}{}", form, WYLIE_TERMINATOR),
            })
            .collect();

        Query {
            candidate: candidate.to_string(),
            script,
            terms,
        }
    }

    /// The dictionary field this query targets
    pub fn field(&self) -> &'static str {
        self.script.field()
    }

    /// Render as a Lucene field query, e.g. `name_latin:("par/" OR "pa/")`
    pub fn to_lucene(&self) -> String {
        let quoted: Vec<String> = self.terms.iter().map(|t| quote(t)).collect();
        match quoted.as_slice() {
            [single] => format!("{}:{}", self.field(), single),
            _ => format!("{}:({})", self.field(), quoted.join(" OR ")),
        }
    }
}

/// Quote a phrase term, escaping characters that would end it early
fn quote(term: &str) -> String {
    let mut quoted = String::with_capacity(term.len() + 2);
    quoted.push('"');
    for c in term.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wylie_plain() {
        let q = Query::build("chos", Script::Wylie);
        assert_eq!(q.terms, vec!["chos/"]);
        assert_eq!(q.to_lucene(), r#"name_latin:"chos/""#);
    }

    #[test]
    fn test_wylie_la_suffix() {
        let q = Query::build("gsal bar", Script::Wylie);
        assert_eq!(q.terms, vec!["gsal bar/", "gsal ba/"]);
        assert_eq!(q.to_lucene(), r#"name_latin:("gsal bar/" OR "gsal ba/")"#);
    }

    #[test]
    fn test_wylie_genitive_suffix() {
        let q = Query::build("rgyal po'i", Script::Wylie);
        assert_eq!(q.terms, vec!["rgyal po'/", "rgyal po/"]);
    }

    #[test]
    fn test_tibetan_plain_has_no_terminator() {
        let q = Query::build("ཆོས", Script::Tibetan);
        assert_eq!(q.terms, vec!["ཆོས"]);
        assert_eq!(q.to_lucene(), "name_tibt:\"ཆོས\"");
    }

    #[test]
    fn test_tibetan_la_suffix() {
        let q = Query::build("གསལ་བར", Script::Tibetan);
        assert_eq!(q.terms, vec!["གསལ་བར", "གསལ་བ"]);
    }

    #[test]
    fn test_tibetan_genitive_suffix() {
        let q = Query::build("རྒྱལ་པོའི", Script::Tibetan);
        assert_eq!(q.terms, vec!["རྒྱལ་པོའ", "རྒྱལ་པོ"]);
        assert_eq!(q.to_lucene(), "name_tibt:(\"རྒྱལ་པོའ\" OR \"རྒྱལ་པོ\")");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let q = Query::build("a\"b", Script::Wylie);
        assert_eq!(q.to_lucene(), r#"name_latin:"a\"b/""#);
    }

    #[test]
    fn test_keeps_candidate() {
        let q = Query::build("par", Script::Wylie);
        assert_eq!(q.candidate, "par");
        assert_eq!(q.terms, vec!["par/", "pa/"]);
    }
}
