//! Solr-backed dictionary.
//!
//! Each lookup is one blocking GET against the index's select handler,
//! asking for the top document only. Any failure is logged, written to the
//! request trace and reported as a miss.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::LookupError;
use crate::query::Query;
use crate::token::Match;
use crate::trace::Trace;

/// Stored fields requested from the index
pub const FIELD_LIST: &str = "uid,id,header,name_tibt,name_latin";

/// Accept header of the index's own browser client
const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Longest response excerpt kept in the trace for a rejected request
const BODY_EXCERPT_CHARS: usize = 1000;

/// A dictionary served by a Solr select endpoint
#[derive(Debug, Clone)]
pub struct SolrDictionary {
    base_url: String,
    client: Client,
}

impl SolrDictionary {
    /// Create a client for the given select URL
    ///
    /// The index rejects requests that do not look like its web client, so
    /// every request carries the browser Accept headers and, when given, a
    /// Referer.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
        referer: Option<&str>,
    ) -> Result<Self, LookupError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        if let Some(referer) = referer {
            let value = HeaderValue::from_str(referer).map_err(|_| LookupError::InvalidHeader("Referer"))?;
            headers.insert(REFERER, value);
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        Ok(SolrDictionary {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Self::new(
            &config.solr_url,
            config.timeout(),
            &config.user_agent,
            config.referer.as_deref(),
        )
    }

    /// The select URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The full request URL for a query
    pub fn request_url(&self, query: &Query) -> Result<Url, LookupError> {
        request_url(&self.base_url, query)
    }

    fn fetch(&self, query: &Query, trace: &mut Trace) -> Result<Option<Match>, LookupError> {
        let url = self.request_url(query)?;
        debug!(%url, "dictionary lookup");
        trace.push_with(|| format!("URL: {}", url));

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        trace.push_with(|| format!("HTTP status code: {}", status.as_u16()));

        if !status.is_success() {
            if trace.is_enabled() {
                let body = response.text().unwrap_or_default();
                let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
                trace.push(format!("Response body (first {} chars): {}", BODY_EXCERPT_CHARS, excerpt));
            }
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        trace.push_with(|| format!("Response body length: {}", body.len()));

        parse_response(&body, &query.candidate)
    }
}

impl Dictionary for SolrDictionary {
    fn lookup(&self, query: &Query, trace: &mut Trace) -> Option<Match> {
        match self.fetch(query, trace) {
            Ok(found) => found,
            Err(e) => {
                warn!(candidate = %query.candidate, error = %e, "dictionary lookup failed");
                trace.push(format!("Lookup failed: {}", e));
                None
            }
        }
    }
}

/// Build the select URL for a query against a base URL
pub fn request_url(base_url: &str, query: &Query) -> Result<Url, LookupError> {
    let lucene = query.to_lucene();
    Url::parse_with_params(
        base_url,
        &[
            ("q", lucene.as_str()),
            ("fl", FIELD_LIST),
            ("wt", "json"),
            ("rows", "1"),
        ],
    )
    .map_err(|_| LookupError::InvalidUrl(base_url.to_string()))
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    response: DocList,
}

#[derive(Debug, Deserialize)]
struct DocList {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    name_tibt: Option<OneOrMany>,
    #[serde(default)]
    name_latin: Option<OneOrMany>,
}

/// A stored field that may be single- or multi-valued
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn first(self) -> Option<String> {
        match self {
            OneOrMany::One(s) => Some(s),
            OneOrMany::Many(v) => v.into_iter().next(),
        }
    }
}

/// Map a select response body to the top match, if any
pub fn parse_response(body: &str, candidate: &str) -> Result<Option<Match>, LookupError> {
    let parsed: SelectResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    let Some(doc) = parsed.response.docs.into_iter().next() else {
        return Ok(None);
    };

    let id = doc.id.and_then(|id| match id {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    });
    let tibetan = doc.name_tibt.and_then(OneOrMany::first);
    let wylie = doc.name_latin.and_then(OneOrMany::first);

    Ok(Some(Match::hit(
        id,
        tibetan,
        wylie.as_deref().unwrap_or(candidate),
    )))
}
