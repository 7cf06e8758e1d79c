//! Clipboard export backed by the `arboard` crate.
//!
//! A short-lived [`arboard::Clipboard`] handle is created per call rather
//! than shared, because `arboard::Clipboard` is not `Send` on all platforms
//! and the handle is cheap to create.
//!
//! Every failure is a typed [`ExportError`] the shell turns into a soft
//! notice — copying must never crash the app.

use arboard::Clipboard;
use thiserror::Error;

/// Confirmation shown after a successful copy.
pub const COPY_CONFIRMATION: &str = "Texte copié dans le presse-papier !";

// ---------------------------------------------------------------------------
// ExportError
// ---------------------------------------------------------------------------

/// All errors that can surface while exporting the result text.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There is no result text to copy.
    #[error("nothing to copy")]
    EmptyText,

    /// Could not open the system clipboard.
    #[error("cannot access clipboard: {0}")]
    ClipboardAccess(String),

    /// Could not write text to the system clipboard.
    #[error("cannot set clipboard text: {0}")]
    ClipboardSet(String),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Write `text` verbatim into the system clipboard.
///
/// # Errors
///
/// Returns [`ExportError::EmptyText`] when `text` is empty or
/// whitespace-only, [`ExportError::ClipboardAccess`] if the OS clipboard
/// cannot be opened, or [`ExportError::ClipboardSet`] if writing fails.
pub fn copy_text(text: &str) -> Result<(), ExportError> {
    if text.trim().is_empty() {
        return Err(ExportError::EmptyText);
    }

    let mut clipboard =
        Clipboard::new().map_err(|e| ExportError::ClipboardAccess(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ExportError::ClipboardSet(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
