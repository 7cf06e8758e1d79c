//! Core speech engine trait and implementations.
//!
//! # Overview
//!
//! [`SpeechEngine`] is the public interface used by the playback controller.
//! It is object-safe so it can be held behind a `Box<dyn SpeechEngine>`.
//!
//! [`SystemSpeech`] is the production implementation that wraps the `tts`
//! crate (the platform text-to-speech capability).  Construct it with
//! [`SystemSpeech::new`]; on platforms without a speech engine this fails
//! and the playback controller degrades to a silent no-op.
//!
//! [`MockSpeechEngine`] (available under `#[cfg(test)]`) records every call
//! — useful for unit-testing the playback controller without audio output.

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// All errors that can arise from the speech subsystem.
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    /// The platform speech engine could not be initialised.
    #[error("speech engine unavailable: {0}")]
    EngineInit(String),

    /// Starting the utterance failed.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

// ---------------------------------------------------------------------------
// Voice / Utterance
// ---------------------------------------------------------------------------

/// Read-only descriptor of a voice exposed by the speech engine.
///
/// The engine owns the voice set; this is a weak reference by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceInfo {
    pub id: String,
    /// BCP-47 language tag, e.g. `fr-FR`.
    pub language: String,
}

/// One unit of synthesized speech, ready to hand to an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Target language tag for the utterance.
    pub language: String,
    /// Rate multiplier, already clamped by the playback controller.
    pub rate: f32,
    /// Resolved voice id — `None` means the engine default.
    pub voice_id: Option<String>,
}

// ---------------------------------------------------------------------------
// SpeechEngine trait
// ---------------------------------------------------------------------------

/// Object-safe interface for text-to-speech engines.
///
/// # Contract
///
/// - `speak` starts the utterance and returns without waiting for playback
///   to finish.
/// - `cancel` stops any utterance currently audible; calling it with nothing
///   playing is a no-op.
/// - `voices` may legitimately return an empty list — some hosts report
///   their voices asynchronously after startup.
pub trait SpeechEngine {
    /// Current voice set exposed by the engine.
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Start speaking `utterance`, interrupting any utterance in progress.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop the current utterance, if any.
    fn cancel(&mut self);
}

// Compile-time assertion: Box<dyn SpeechEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechEngine>) {}
};

// ---------------------------------------------------------------------------
// SystemSpeech
// ---------------------------------------------------------------------------

/// Production speech engine that wraps [`tts::Tts`].
///
/// The `tts` crate exposes a backend-specific rate range rather than a
/// multiplier, so the [0.5, 2.0] multiplier carried by an [`Utterance`] is
/// mapped linearly: 0.5 → `min_rate`, 1.0 → `normal_rate`, 2.0 → `max_rate`.
pub struct SystemSpeech {
    tts: tts::Tts,
}

impl std::fmt::Debug for SystemSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemSpeech").finish_non_exhaustive()
    }
}

impl SystemSpeech {
    /// Initialise the platform speech engine.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError::EngineInit`] when the host has no usable
    /// text-to-speech backend.
    pub fn new() -> Result<Self, SpeechError> {
        let tts = tts::Tts::default().map_err(|e| SpeechError::EngineInit(e.to_string()))?;
        Ok(Self { tts })
    }

    /// Map a [0.5, 2.0] rate multiplier onto the backend's rate range.
    fn engine_rate(&self, multiplier: f32) -> f32 {
        let normal = self.tts.normal_rate();
        if multiplier >= 1.0 {
            let max = self.tts.max_rate();
            normal + (max - normal) * (multiplier - 1.0)
        } else {
            let min = self.tts.min_rate();
            min + (normal - min) * ((multiplier - 0.5) / 0.5)
        }
    }

    /// Pick the concrete voice for `utterance`: the requested id when the
    /// engine still exposes it, else the first voice matching the
    /// utterance's primary language subtag, else the engine default.
    fn resolve_voice(&self, utterance: &Utterance) -> Option<tts::Voice> {
        let voices = self.tts.voices().ok()?;

        if let Some(id) = &utterance.voice_id {
            if let Some(voice) = voices.iter().find(|v| v.id() == *id) {
                return Some(voice.clone());
            }
        }

        let primary = utterance.language.split('-').next().unwrap_or("");
        voices
            .into_iter()
            .find(|v| v.language().to_string().starts_with(primary))
    }
}

impl SpeechEngine for SystemSpeech {
    fn voices(&self) -> Vec<VoiceInfo> {
        match self.tts.voices() {
            Ok(voices) => voices
                .into_iter()
                .map(|v| VoiceInfo {
                    id: v.id(),
                    language: v.language().to_string(),
                })
                .collect(),
            Err(e) => {
                log::warn!("speech: voice listing failed: {e}");
                Vec::new()
            }
        }
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if let Some(voice) = self.resolve_voice(utterance) {
            if let Err(e) = self.tts.set_voice(&voice) {
                log::warn!("speech: set_voice failed: {e}");
            }
        }

        let rate = self.engine_rate(utterance.rate);
        if let Err(e) = self.tts.set_rate(rate) {
            log::warn!("speech: set_rate failed: {e}");
        }

        // interrupt = true: the backend drops any utterance in progress.
        self.tts
            .speak(utterance.text.clone(), true)
            .map(|_| ())
            .map_err(|e| SpeechError::Synthesis(e.to_string()))
    }

    fn cancel(&mut self) {
        if let Err(e) = self.tts.stop() {
            log::warn!("speech: stop failed: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// MockSpeechEngine  (test-only)
// ---------------------------------------------------------------------------

/// Calls recorded by [`MockSpeechEngine`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Cancel,
    Speak(Utterance),
}

/// Test double that records every call and serves a configurable voice set.
///
/// Both fields are `Rc<RefCell<_>>` so a test can keep handles after moving
/// the engine into a `SpeechPlayback`.
#[cfg(test)]
pub struct MockSpeechEngine {
    pub voices: std::rc::Rc<std::cell::RefCell<Vec<VoiceInfo>>>,
    pub calls: std::rc::Rc<std::cell::RefCell<Vec<MockCall>>>,
}

#[cfg(test)]
impl MockSpeechEngine {
    pub fn new(voices: Vec<VoiceInfo>) -> Self {
        Self {
            voices: std::rc::Rc::new(std::cell::RefCell::new(voices)),
            calls: std::rc::Rc::new(std::cell::RefCell::new(Vec::new())),
        }
    }
}

#[cfg(test)]
impl SpeechEngine for MockSpeechEngine {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.borrow().clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.calls.borrow_mut().push(MockCall::Speak(utterance.clone()));
        Ok(())
    }

    fn cancel(&mut self) {
        self.calls.borrow_mut().push(MockCall::Cancel);
    }
}
