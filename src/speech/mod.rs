//! Read-aloud (text-to-speech) module.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               SpeechPlayback (controller)            │
//! │   voice cache (overwrite on refresh)                 │
//! │   cancel-before-speak · rate clamp · fr-FR tag       │
//! │                        │                             │
//! │                        ▼                             │
//! │               SpeechEngine (trait)                   │
//! │        ┌──────────────┴──────────────┐               │
//! │   SystemSpeech (tts crate)      none (no-op)         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The controller degrades silently when the host has no speech engine:
//! `speak` becomes a no-op and the voice set stays empty.

pub mod engine;
pub mod playback;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use engine::{SpeechEngine, SpeechError, SystemSpeech, Utterance, VoiceInfo};
pub use playback::{SpeechPlayback, LANGUAGE_TAG, MAX_RATE, MIN_RATE};

// test-only re-export so other test modules can import the mock without
// `use simplifia::speech::engine::MockSpeechEngine`.
#[cfg(test)]
pub use engine::{MockCall, MockSpeechEngine};
