//! HTTP endpoint for phrase parsing.
//!
//! `GET|POST /tibetan/v1/parse?text=...&debug=1`. Parsing makes blocking
//! dictionary calls, so each request is run on the blocking thread pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::dictionary::Dictionary;
use crate::error::ParseError;
use crate::parser::PhraseParser;

/// Route of the parse endpoint
pub const PARSE_ROUTE: &str = "/tibetan/v1/parse";

/// Values of `debug` that turn the trace on
const DEBUG_FLAGS: &[&str] = &["1", "true", "on", "yes", "debug"];

type AppState = Arc<PhraseParser<dyn Dictionary>>;

/// Request parameters, from the query string or a JSON body
#[derive(Debug, Default, Deserialize)]
pub struct ParseParams {
    pub text: Option<String>,
    /// Dictionary filter; accepted but not used
    pub dicts: Option<String>,
    pub debug: Option<Value>,
}

impl ParseParams {
    /// Whether the caller asked for the trace
    pub fn debug_enabled(&self) -> bool {
        match self.debug {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(ref n)) => n.as_i64() == Some(1),
            Some(Value::String(ref s)) => DEBUG_FLAGS.contains(&s.as_str()),
            _ => false,
        }
    }

    /// Fill fields missing here from `fallback`
    fn or_from(self, fallback: ParseParams) -> ParseParams {
        ParseParams {
            text: self.text.or(fallback.text),
            dicts: self.dicts.or(fallback.dicts),
            debug: self.debug.or(fallback.debug),
        }
    }
}

/// Build the router for a parser
pub fn router(parser: PhraseParser<dyn Dictionary>) -> Router {
    let state: AppState = Arc::new(parser);
    Router::new()
        .route(PARSE_ROUTE, get(parse_get).post(parse_post))
        .route("/parse", get(parse_get).post(parse_post))
        .with_state(state)
}

/// Serve the parse endpoint until the process is stopped
pub async fn serve(addr: SocketAddr, parser: PhraseParser<dyn Dictionary>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}{}", listener.local_addr()?, PARSE_ROUTE);
    axum::serve(listener, router(parser)).await
}

async fn parse_get(State(parser): State<AppState>, Query(params): Query<ParseParams>) -> Response {
    run_parse(parser, params).await
}

async fn parse_post(
    State(parser): State<AppState>,
    Query(query): Query<ParseParams>,
    body: Bytes,
) -> Response {
    let params = if body.is_empty() {
        query
    } else {
        match serde_json::from_slice::<ParseParams>(&body) {
            Ok(from_body) => from_body.or_from(query),
            Err(e) => {
                debug!(error = %e, "ignoring non-JSON request body");
                query
            }
        }
    };
    run_parse(parser, params).await
}

async fn run_parse(parser: AppState, params: ParseParams) -> Response {
    let debug = params.debug_enabled();
    if let Some(ref dicts) = params.dicts {
        debug!(dicts = dicts.as_str(), "dictionary filter ignored");
    }
    let text = params.text.unwrap_or_default();

    let outcome = tokio::task::spawn_blocking(move || parser.parse(&text, debug)).await;
    match outcome {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(e)) => e.into_response(),
        Err(e) => {
            error!(error = %e, "parse task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "code": "internal_error",
                    "message": "Parsing failed",
                    "data": { "status": 500 }
                })),
            )
                .into_response()
        }
    }
}

impl IntoResponse for ParseError {
    fn into_response(self) -> Response {
        let status = match self {
            ParseError::EmptyPhrase => StatusCode::BAD_REQUEST,
        };
        let body = json!({
            "code": self.code(),
            "message": self.to_string(),
            "data": { "status": status.as_u16() }
        });
        (status, Json(body)).into_response()
    }
}
