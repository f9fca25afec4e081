//! Prometheus range-query client.
//!
//! Wraps the `/api/v1/query_range` endpoint: every call queries the last
//! 15 minutes at 15-second resolution and returns the first series' values.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// Lookback window for every range query.
const LOOKBACK: Duration = Duration::from_secs(15 * 60);

/// Resolution step, in seconds.
const STEP_SECS: u64 = 15;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the query client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured address could not be turned into an endpoint URL.
    #[error("invalid Prometheus address: {0}")]
    Config(String),

    /// Network failure or request timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered, but with an error of its own.
    #[error("backend error ({error_type}): {message}")]
    Backend { error_type: String, message: String },

    /// The backend answered 200 with a body we cannot make sense of.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Source of sample series for a view session.
///
/// The live plot only ever asks for "the current series for this query";
/// keeping that behind a trait lets tests drive the session with a stub.
pub trait SeriesSource {
    fn fetch(&self, query: &str) -> Result<Vec<f64>, ClientError>;
}

/// HTTP client for the Prometheus query API.
pub struct PromClient {
    http: reqwest::blocking::Client,
    endpoint: reqwest::Url,
}

impl PromClient {
    /// Build a client for the given base address (e.g. `http://127.0.0.1:9090`).
    pub fn new(address: &str) -> Result<Self, ClientError> {
        let base = reqwest::Url::parse(address).map_err(|e| ClientError::Config(e.to_string()))?;
        let endpoint = base
            .join("api/v1/query_range")
            .map_err(|e| ClientError::Config(e.to_string()))?;
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, endpoint })
    }

    /// Issue a range query over the last 15 minutes at 15-second resolution.
    ///
    /// Returns the first series' values in chronological order. An empty or
    /// non-matrix result is "no data yet" and comes back as an empty vec.
    pub fn query_range(&self, query: &str) -> Result<Vec<f64>, ClientError> {
        let end = Utc::now().timestamp();
        let start = end - LOOKBACK.as_secs() as i64;
        let start_s = start.to_string();
        let end_s = end.to_string();
        let step_s = STEP_SECS.to_string();

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("query", query),
                ("start", start_s.as_str()),
                ("end", end_s.as_str()),
                ("step", step_s.as_str()),
            ])
            .send()?;

        let http_ok = response.status().is_success();
        let body = response.text()?;
        first_series(http_ok, &body)
    }
}

impl SeriesSource for PromClient {
    fn fetch(&self, query: &str) -> Result<Vec<f64>, ClientError> {
        self.query_range(query)
    }
}

/// Query API response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(rename = "errorType", default)]
    error_type: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    #[serde(rename = "resultType")]
    result_type: String,
    #[serde(default)]
    result: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    values: Vec<SamplePair>,
}

/// Samples arrive as `[unix_ts, "value-as-string"]` pairs.
type SamplePair = (f64, String);

/// Decode a query_range response body into the first series' samples.
fn first_series(http_ok: bool, body: &str) -> Result<Vec<f64>, ClientError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if http_ok => return Err(ClientError::Decode(e.to_string())),
        // Error responses are not guaranteed to carry the JSON envelope
        // (proxies, wrong path); surface whatever text came back.
        Err(_) => {
            return Err(ClientError::Backend {
                error_type: "server".to_string(),
                message: body.trim().to_string(),
            })
        }
    };

    if envelope.status != "success" {
        return Err(ClientError::Backend {
            error_type: envelope.error_type.unwrap_or_else(|| "unknown".to_string()),
            message: envelope.error.unwrap_or_default(),
        });
    }

    let data = match envelope.data {
        Some(data) if data.result_type == "matrix" => data,
        _ => return Ok(Vec::new()),
    };

    // Single-series design: series beyond the first are dropped.
    let Some(series) = data.result.into_iter().next() else {
        return Ok(Vec::new());
    };

    series
        .values
        .iter()
        .map(|(_, value)| {
            value
                .parse::<f64>()
                .map_err(|_| ClientError::Decode(format!("bad sample value {value:?}")))
        })
        .collect()
}
