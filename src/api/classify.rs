//! Failure classification for backend calls.
//!
//! Different providers return different error vocabularies, so the credit
//! check is a permissive substring match rather than an exact one — the
//! backend is an uncontrolled external boundary and its detail text is
//! provider-specific and unstructured.
//!
//! Every classified failure renders as a marker-prefixed French message:
//! `⚠️` for the credit warning, `❌` for everything else.  The marker is
//! what lets the view style an error differently from a real result.

use crate::api::client::ApiError;
use crate::catalog::Provider;

// ---------------------------------------------------------------------------
// ErrorClass
// ---------------------------------------------------------------------------

/// Substrings that signal quota / balance exhaustion.  Matched
/// case-sensitively against the raw detail string.
pub const CREDIT_MARKERS: [&str; 3] = ["quota", "balance", "Insufficient"];

/// Coarse category of a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The selected provider's account is out of credit.
    InsufficientCredit,
    /// No response was received at all.
    ServerUnreachable,
    /// Any other failure; the detail string is shown verbatim.
    GenericServerError,
}

impl ErrorClass {
    /// Classify a raw detail string.  `None` means no response was received.
    pub fn from_detail(detail: Option<&str>) -> Self {
        match detail {
            None => ErrorClass::ServerUnreachable,
            Some(detail) => {
                if CREDIT_MARKERS.iter().any(|marker| detail.contains(marker)) {
                    ErrorClass::InsufficientCredit
                } else {
                    ErrorClass::GenericServerError
                }
            }
        }
    }

    /// Classify a typed [`ApiError`].
    ///
    /// A parse failure counts as generic: a response *was* received, it just
    /// was not the JSON we expected.
    pub fn from_api_error(error: &ApiError) -> Self {
        match error {
            ApiError::Unreachable(_) => ErrorClass::ServerUnreachable,
            ApiError::Api(detail) => ErrorClass::from_detail(Some(detail)),
            ApiError::Parse(_) => ErrorClass::GenericServerError,
        }
    }
}

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

/// Fallback text when the server never answered.
const SERVER_SILENT: &str = "Le serveur ne répond pas.";

/// Build the message displayed in place of a result when `error` occurred.
///
/// The credit warning names the selected provider so the user knows which
/// account to recharge.
pub fn user_message(error: &ApiError, provider: Provider) -> String {
    match ErrorClass::from_api_error(error) {
        ErrorClass::InsufficientCredit => format!(
            "⚠️ Crédit insuffisant : rechargez votre compte {}.",
            provider.label()
        ),
        ErrorClass::ServerUnreachable => format!("❌ Erreur : {SERVER_SILENT}"),
        ErrorClass::GenericServerError => match error {
            ApiError::Api(detail) => format!("❌ Erreur : {detail}"),
            other => format!("❌ Erreur : {other}"),
        },
    }
}

/// Returns `true` when `text` is a classified error message rather than a
/// simplification result.
pub fn is_error_message(text: &str) -> bool {
    text.starts_with('❌') || text.starts_with('⚠')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- ErrorClass::from_detail ---

    #[test]
    fn quota_detail_is_insufficient_credit() {
        let class = ErrorClass::from_detail(Some("You exceeded your current quota"));
        assert_eq!(class, ErrorClass::InsufficientCredit);
    }

    #[test]
    fn balance_detail_is_insufficient_credit() {
        let class = ErrorClass::from_detail(Some("Insufficient balance on account"));
        assert_eq!(class, ErrorClass::InsufficientCredit);
    }

    #[test]
    fn capitalised_insufficient_is_insufficient_credit() {
        let class = ErrorClass::from_detail(Some("Insufficient funds for this request"));
        assert_eq!(class, ErrorClass::InsufficientCredit);
    }

    /// The match is case-sensitive by design — `"insufficient"` in lowercase
    /// is not one of the known provider spellings.
    #[test]
    fn lowercase_insufficient_is_generic() {
        let class = ErrorClass::from_detail(Some("insufficient permissions"));
        assert_eq!(class, ErrorClass::GenericServerError);
    }

    #[test]
    fn uppercase_quota_is_generic() {
        let class = ErrorClass::from_detail(Some("QUOTA EXCEEDED"));
        assert_eq!(class, ErrorClass::GenericServerError);
    }

    #[test]
    fn no_response_is_server_unreachable() {
        assert_eq!(ErrorClass::from_detail(None), ErrorClass::ServerUnreachable);
    }

    #[test]
    fn other_detail_is_generic() {
        let class = ErrorClass::from_detail(Some("Internal server error"));
        assert_eq!(class, ErrorClass::GenericServerError);
    }

    // ---- ErrorClass::from_api_error ---

    #[test]
    fn unreachable_error_maps_to_server_unreachable() {
        let error = ApiError::Unreachable("connection refused".into());
        assert_eq!(
            ErrorClass::from_api_error(&error),
            ErrorClass::ServerUnreachable
        );
    }

    #[test]
    fn parse_error_maps_to_generic() {
        let error = ApiError::Parse("expected value at line 1".into());
        assert_eq!(
            ErrorClass::from_api_error(&error),
            ErrorClass::GenericServerError
        );
    }

    // ---- user_message ---

    #[test]
    fn generic_message_preserves_detail_verbatim() {
        let error = ApiError::Api("Internal server error".into());
        let msg = user_message(&error, Provider::OpenAi);
        assert_eq!(msg, "❌ Erreur : Internal server error");
    }

    #[test]
    fn unreachable_message_is_server_silent() {
        let error = ApiError::Unreachable("connect timeout".into());
        let msg = user_message(&error, Provider::OpenAi);
        assert_eq!(msg, "❌ Erreur : Le serveur ne répond pas.");
    }

    /// The credit message must be distinct from the generic one and name the
    /// selected provider.
    #[test]
    fn credit_message_is_distinct_and_names_provider() {
        let error = ApiError::Api("Insufficient balance on account".into());
        let credit = user_message(&error, Provider::Gemini);
        let generic = user_message(&ApiError::Api("boom".into()), Provider::Gemini);

        assert!(credit.starts_with('⚠'));
        assert!(credit.contains("Google Gemini"));
        assert_ne!(credit, generic);
    }

    // ---- is_error_message ---

    #[test]
    fn classified_messages_carry_a_marker() {
        let error = ApiError::Api("boom".into());
        assert!(is_error_message(&user_message(&error, Provider::OpenAi)));

        let credit = ApiError::Api("quota".into());
        assert!(is_error_message(&user_message(&credit, Provider::OpenAi)));
    }

    #[test]
    fn plain_result_text_carries_no_marker() {
        assert!(!is_error_message(
            "Tu ne peux pas travailler pour un concurrent."
        ));
    }
}
