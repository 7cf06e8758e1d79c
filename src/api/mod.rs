//! Backend API module for Simplif-IA.
//!
//! This module provides:
//! * [`TextSimplifier`] — async trait implemented by all backend clients.
//! * [`ApiSimplifier`] — reqwest client for the REST backend.
//! * [`RequestPayload`] — simplify / analyze request bodies, with local
//!   empty-input validation.
//! * [`ErrorClass`] / [`user_message`] — failure classification and the
//!   marker-prefixed messages shown in place of a result.
//! * [`ApiError`] — error variants for backend operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use simplifia::api::{ApiSimplifier, RequestPayload, TextSimplifier};
//! use simplifia::catalog::{Level, Provider};
//! use simplifia::config::{ApiConfig, AuthMode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiSimplifier::from_config(&ApiConfig::default());
//!
//!     let payload = RequestPayload::simplify(
//!         "Le contrat stipule une clause de non-concurrence...",
//!         Level::Student,
//!         Provider::OpenAi,
//!         AuthMode::ProviderManaged,
//!         None,
//!     )
//!     .unwrap();
//!
//!     let simplified = client.simplify(&payload).await.unwrap();
//!     println!("{simplified}");
//! }
//! ```

pub mod classify;
pub mod client;
pub mod request;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use classify::{is_error_message, user_message, ErrorClass, CREDIT_MARKERS};
pub use client::{ApiError, ApiSimplifier, ClarityReport, Suggestion, TextSimplifier};
pub use request::{RequestError, RequestPayload, EMPTY_INPUT_PROMPT};
