//! Read-aloud playback controller.
//!
//! [`SpeechPlayback`] sits between the UI and a [`SpeechEngine`].  It owns a
//! cached copy of the engine's voice set and enforces the playback rules:
//! at most one audible utterance (a new `speak` cancels the previous one),
//! rate clamped into [[`MIN_RATE`], [`MAX_RATE`]], and silent degradation
//! when the host has no speech engine at all.

use crate::speech::engine::{SpeechEngine, SystemSpeech, Utterance, VoiceInfo};

/// Language tag attached to every utterance.
pub const LANGUAGE_TAG: &str = "fr-FR";

/// Lower bound of the playback rate multiplier.
pub const MIN_RATE: f32 = 0.5;
/// Upper bound of the playback rate multiplier.
pub const MAX_RATE: f32 = 2.0;

// ---------------------------------------------------------------------------
// SpeechPlayback
// ---------------------------------------------------------------------------

/// Playback controller over an optional [`SpeechEngine`].
///
/// `engine == None` models an unsupported environment: every operation is a
/// no-op and the voice set is empty, but nothing panics.
pub struct SpeechPlayback {
    engine: Option<Box<dyn SpeechEngine>>,
    voices: Vec<VoiceInfo>,
}

impl SpeechPlayback {
    /// Build a controller over the platform speech engine.
    ///
    /// When the engine cannot be initialised the controller is created
    /// disabled — read-aloud buttons become silent no-ops.
    pub fn system() -> Self {
        match SystemSpeech::new() {
            Ok(engine) => Self::new(Some(Box::new(engine))),
            Err(e) => {
                log::warn!("speech: engine unavailable ({e}) — read-aloud disabled");
                Self::disabled()
            }
        }
    }

    /// Build a controller over an explicit engine (or none).
    pub fn new(engine: Option<Box<dyn SpeechEngine>>) -> Self {
        let mut playback = Self {
            engine,
            voices: Vec::new(),
        };
        playback.refresh_voices();
        playback
    }

    /// A controller with no engine — every operation is a no-op.
    pub fn disabled() -> Self {
        Self {
            engine: None,
            voices: Vec::new(),
        }
    }

    /// Whether a speech engine is present.
    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// The cached voice set.  May be empty — some hosts report their voices
    /// asynchronously after startup; call [`refresh_voices`](Self::refresh_voices)
    /// to pick up late arrivals.
    pub fn voices(&self) -> &[VoiceInfo] {
        &self.voices
    }

    /// Replace the cached voice set.  Last write wins — the cache is
    /// overwritten, never appended to.
    ///
    /// This is the notification entry point for engines that report voice
    /// changes asynchronously.
    pub fn update_voices(&mut self, voices: Vec<VoiceInfo>) {
        self.voices = voices;
    }

    /// Re-query the engine and overwrite the cached voice set.
    pub fn refresh_voices(&mut self) {
        let latest = self
            .engine
            .as_ref()
            .map(|engine| engine.voices())
            .unwrap_or_default();
        self.update_voices(latest);
    }

    /// Read `text` aloud.
    ///
    /// Rules, in order:
    /// - empty or whitespace-only `text` → no-op;
    /// - no engine → no-op;
    /// - any utterance in progress is cancelled first;
    /// - `rate` is clamped into [[`MIN_RATE`], [`MAX_RATE`]];
    /// - `voice_id` is honoured only if still present in the refreshed voice
    ///   set, else the engine default is used.
    pub fn speak(&mut self, text: &str, voice_id: Option<&str>, rate: f32) {
        if text.trim().is_empty() {
            return;
        }

        // Re-query before resolving the voice so late-arriving voices are
        // honoured and vanished ones are dropped.
        self.refresh_voices();

        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.cancel();

        let resolved = voice_id
            .filter(|id| self.voices.iter().any(|v| v.id == *id))
            .map(str::to_string);

        let utterance = Utterance {
            text: text.to_string(),
            language: LANGUAGE_TAG.to_string(),
            rate: rate.clamp(MIN_RATE, MAX_RATE),
            voice_id: resolved,
        };

        if let Err(e) = engine.speak(&utterance) {
            log::warn!("speech: utterance failed: {e}");
        }
    }

    /// Stop the current utterance, if any.
    pub fn cancel(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
