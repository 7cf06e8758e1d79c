//! Request payload builder for the simplify / analyze endpoints.
//!
//! Both endpoints accept the same JSON shape; [`RequestPayload`] has one
//! constructor per call.  Building a payload is pure — no side effects, no
//! network — so the empty-input check happens here, before anything is sent.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Level, Provider};
use crate::config::AuthMode;

/// Local validation prompt shown when the user submits without any text.
pub const EMPTY_INPUT_PROMPT: &str = "Veuillez saisir un texte.";

// ---------------------------------------------------------------------------
// RequestError
// ---------------------------------------------------------------------------

/// Errors raised while assembling a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The input text is empty or whitespace-only.  Handled locally — the
    /// backend is never contacted.
    #[error("input text must not be empty")]
    EmptyText,
}

// ---------------------------------------------------------------------------
// RequestPayload
// ---------------------------------------------------------------------------

/// JSON body sent to `POST /api/simplify` and `POST /api/analyze`.
///
/// Exactly one of `provider` / `api_key` is present, depending on the
/// configured [`AuthMode`]; the absent field is skipped during
/// serialisation so the wire shape matches what each backend generation
/// expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    pub text: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl RequestPayload {
    /// Build the simplification payload from the current user selection.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyText`] when `text` is empty or
    /// whitespace-only.
    pub fn simplify(
        text: &str,
        level: Level,
        provider: Provider,
        auth: AuthMode,
        api_key: Option<&str>,
    ) -> Result<Self, RequestError> {
        if text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }

        let (provider_field, key_field) = match auth {
            AuthMode::ProviderManaged => (Some(provider.api_value().to_string()), None),
            AuthMode::UserKey => (
                None,
                Some(api_key.unwrap_or_default().to_string()),
            ),
        };

        Ok(Self {
            text: text.to_string(),
            level: level.api_value().to_string(),
            provider: provider_field,
            api_key: key_field,
        })
    }

    /// Build the clarity-analysis payload.
    ///
    /// `simplified` is the *output* of the simplify call — never the original
    /// input — and travels with the same level/provider context.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyText`] when `simplified` is empty (a
    /// backend returning an empty output is not worth analysing).
    pub fn analysis(
        simplified: &str,
        level: Level,
        provider: Provider,
    ) -> Result<Self, RequestError> {
        if simplified.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }

        Ok(Self {
            text: simplified.to_string(),
            level: level.api_value().to_string(),
            provider: Some(provider.api_value().to_string()),
            api_key: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
