//! Core `TextSimplifier` trait and `ApiSimplifier` implementation.
//!
//! `ApiSimplifier` calls the Simplif-IA REST backend — `POST /api/simplify`
//! and `POST /api/analyze`.  All connection details come from [`ApiConfig`];
//! nothing is hardcoded.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::api::request::RequestPayload;
use crate::config::ApiConfig;

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors that can occur while calling the backend.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was received at all — connection refused, DNS failure,
    /// or the request timed out.
    #[error("no response from server: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.  Carries the detail
    /// message extracted from the response body.
    #[error("server error: {0}")]
    Api(String),

    /// The response arrived but could not be parsed as the expected JSON.
    #[error("failed to parse server response: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Success body of `POST /api/simplify`.
#[derive(Debug, Deserialize)]
struct SimplifyResponse {
    output: String,
}

/// An `{original, suggestion}` pair from the clarity analysis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub original: String,
    pub suggestion: String,
}

/// Success body of `POST /api/analyze`.
///
/// `suggestions` is tolerated absent — some providers only return a score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClarityReport {
    /// Readability rating of the simplified text, 0–100.
    pub score: f32,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Failure body — FastAPI-style `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

// ---------------------------------------------------------------------------
// TextSimplifier trait
// ---------------------------------------------------------------------------

/// Async interface to the simplification backend.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn TextSimplifier>`).
#[async_trait]
pub trait TextSimplifier: Send + Sync {
    /// Submit `payload` for simplification; returns the rewritten text.
    async fn simplify(&self, payload: &RequestPayload) -> Result<String, ApiError>;

    /// Submit a simplified text for clarity analysis.
    async fn analyze(&self, payload: &RequestPayload) -> Result<ClarityReport, ApiError>;
}

// ---------------------------------------------------------------------------
// ApiSimplifier
// ---------------------------------------------------------------------------

/// Calls the Simplif-IA REST backend over HTTP.
///
/// # No hardcoded URLs
/// All connection details (`environment`, base URLs, `timeout_secs`) come
/// exclusively from the [`ApiConfig`] passed to
/// [`ApiSimplifier::from_config`].
pub struct ApiSimplifier {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiSimplifier {
    /// Build an `ApiSimplifier` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// POST `payload` to `url` and deserialise the success body as `T`.
    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        payload: &RequestPayload,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        format!("HTTP {status}")
                    } else {
                        body.clone()
                    }
                });
            return Err(ApiError::Api(detail));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TextSimplifier for ApiSimplifier {
    async fn simplify(&self, payload: &RequestPayload) -> Result<String, ApiError> {
        let response: SimplifyResponse =
            self.post(&self.config.simplify_url(), payload).await?;
        Ok(response.output)
    }

    async fn analyze(&self, payload: &RequestPayload) -> Result<ClarityReport, ApiError> {
        self.post(&self.config.analyze_url(), payload).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn from_config_builds_without_panic() {
        let config = ApiConfig::default();
        let _client = ApiSimplifier::from_config(&config);
    }

    /// Verify that `ApiSimplifier` is object-safe (usable as
    /// `dyn TextSimplifier`).
    #[test]
    fn simplifier_is_object_safe() {
        let config = ApiConfig::default();
        let client: Box<dyn TextSimplifier> = Box::new(ApiSimplifier::from_config(&config));
        drop(client);
    }

    #[test]
    fn clarity_report_tolerates_missing_suggestions() {
        let report: ClarityReport = serde_json::from_str(r#"{"score": 87.5}"#).unwrap();
        assert_eq!(report.score, 87.5);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn clarity_report_preserves_suggestion_order() {
        let report: ClarityReport = serde_json::from_str(
            r#"{
                "score": 60,
                "suggestions": [
                    {"original": "clause", "suggestion": "règle"},
                    {"original": "stipule", "suggestion": "dit"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(report.suggestions.len(), 2);
        assert_eq!(report.suggestions[0].original, "clause");
        assert_eq!(report.suggestions[1].original, "stipule");
    }
}
