// src/fetch/source.rs
//! Where raw inspection records come from.
//!
//! `InspectionSource` is the narrow contract with the open-data service: take a
//! `QuerySpec`, hand back raw records or a `FetchError`. The fetcher owns everything
//! after that (renaming, coercion, audit, dedup). Tests swap in a canned source.

use serde_json::Value;
use ureq::Agent;

use crate::config::consts::API_TOKEN_HEADER;
use crate::config::options::FetchOptions;
use crate::core::net;
use crate::error::FetchError;
use crate::query::QuerySpec;
use crate::record::RawInspection;

pub trait InspectionSource: Send + Sync {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<RawInspection>, FetchError>;
}

/// Socrata resource endpoint over HTTPS.
pub struct HttpSource {
    agent: Agent,
    endpoint: String,
    app_token: Option<String>,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, app_token: Option<String>) -> Self {
        Self { agent: net::agent(), endpoint: endpoint.into(), app_token }
    }

    pub fn from_options(opts: &FetchOptions) -> Self {
        Self::new(opts.endpoint.clone(), opts.app_token.clone())
    }
}

impl InspectionSource for HttpSource {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<RawInspection>, FetchError> {
        let mut headers = Vec::new();
        if let Some(token) = self.app_token.as_deref() {
            headers.push((API_TOKEN_HEADER, token));
        }

        logd!("Fetch: GET {} where={}", self.endpoint, spec.where_clause());
        let body = net::http_get_text(&self.agent, &self.endpoint, &spec.params(), &headers)?;
        decode_records(&body)
    }
}

/// Decode a response body. Must be a JSON array of objects; per-field oddities are
/// tolerated later, but a body of the wrong shape is a `Decode` error.
pub fn decode_records(body: &str) -> Result<Vec<RawInspection>, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(_) => serde_json::from_value::<RawInspection>(item)
                    .map_err(|e| FetchError::Decode(e.to_string())),
                other => Err(FetchError::Decode(format!("expected an object, got {other}"))),
            })
            .collect(),
        Value::Object(obj) => {
            // Socrata error payload: {"error": true, "message": ...}
            let msg = obj
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("expected a JSON array");
            Err(FetchError::Decode(s!(msg)))
        }
        other => Err(FetchError::Decode(format!("expected a JSON array, got {other}"))),
    }
}
