//! Session state machine and shared application state.
//!
//! [`Phase`] drives the orchestrator's state machine.  The UI reads it via
//! [`SharedState`] to render the appropriate view.
//!
//! [`SessionState`] is the single source of truth for everything the UI
//! needs: input text, current selection, phase, result text, clarity report,
//! and any error or notice.  It exists for one window lifetime and is never
//! persisted.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::api::Suggestion;
use crate::catalog::{Level, Provider};
use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// States of the simplification pipeline.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──submit──▶ Simplifying
///                  ──output──▶ Analyzing   (analysis enabled)
///                              ──report / degraded──▶ Result
///                  ──output──▶ Result      (analysis disabled)
///                  ──failure──▶ Error
/// Error / Result ──next submit──▶ Simplifying
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the user to submit a text.
    Idle,

    /// The simplify request is in flight.
    Simplifying,

    /// Simplification succeeded; the clarity-analysis request is in flight.
    Analyzing,

    /// A simplified text (with or without its clarity report) is displayed.
    Result,

    /// A classified error message is displayed.  The pipeline accepts a new
    /// submit.
    Error,
}

impl Phase {
    /// Returns `true` while a backend call is in flight.
    ///
    /// This is the concurrency guard: the UI disables the submit button and
    /// the orchestrator ignores submit commands while busy, so at most one
    /// orchestration is ever in flight.
    ///
    /// ```
    /// use simplifia::pipeline::Phase;
    ///
    /// assert!(!Phase::Idle.is_busy());
    /// assert!(Phase::Simplifying.is_busy());
    /// assert!(Phase::Analyzing.is_busy());
    /// assert!(!Phase::Result.is_busy());
    /// assert!(!Phase::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Simplifying | Phase::Analyzing)
    }

    /// A short human-readable label suitable for the UI status line.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Prêt",
            Phase::Simplifying => "Simplification en cours",
            Phase::Analyzing => "Analyse de clarté",
            Phase::Result => "Terminé",
            Phase::Error => "Erreur",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Shared session state — the single source of truth for the UI.
///
/// Held behind [`SharedState`] (`Arc<Mutex<SessionState>>`).  The pipeline
/// orchestrator mutates it; the egui update loop reads it each frame.
pub struct SessionState {
    /// Text the user wants simplified.
    pub input_text: String,

    /// Selected target level.
    pub level: Level,

    /// Selected AI provider.
    pub provider: Provider,

    /// Current phase of the pipeline.
    pub phase: Phase,

    /// The simplified text from the last successful run.
    ///
    /// `None` until a run succeeds, and cleared when a new one starts.
    /// Mutually exclusive with `error` per settled cycle.
    pub simplified: Option<String>,

    /// Readability score (0–100) from the clarity analysis.
    ///
    /// Only meaningful alongside `simplified`; absent when analysis is
    /// disabled or degraded.
    pub clarity_score: Option<f32>,

    /// Improvement suggestions, in the order the backend returned them.
    pub suggestions: Vec<Suggestion>,

    /// Classified, marker-prefixed error message shown in place of a result.
    pub error: Option<String>,

    /// Transient local notice (validation prompt, copy confirmation).
    pub notice: Option<String>,

    /// Preferred voice id for read-aloud.
    pub voice: Option<String>,

    /// Read-aloud rate multiplier, kept within [0.5, 2.0].
    pub speech_rate: f32,

    /// Application configuration snapshot.
    ///
    /// The pipeline reads `api.analysis` and the auth settings from here.
    pub config: AppConfig,
}

impl SessionState {
    /// Create a new `SessionState` seeded from `config`.
    pub fn new(config: AppConfig) -> Self {
        Self {
            input_text: String::new(),
            level: config.level,
            provider: config.provider,
            phase: Phase::Idle,
            simplified: None,
            clarity_score: None,
            suggestions: Vec::new(),
            error: None,
            notice: None,
            voice: config.speech.voice.clone(),
            speech_rate: config.speech.rate,
            config,
        }
    }

    /// Whether a backend call is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase.is_busy()
    }

    /// Enter `Simplifying`: clear every output of the previous cycle.
    ///
    /// Score and suggestions are cleared here so they can never be displayed
    /// next to a result they do not belong to.
    pub fn start_submission(&mut self) {
        self.phase = Phase::Simplifying;
        self.simplified = None;
        self.clarity_score = None;
        self.suggestions.clear();
        self.error = None;
        self.notice = None;
    }

    /// Settle the cycle with a classified error message.
    pub fn settle_failure(&mut self, message: String) {
        self.error = Some(message);
        self.phase = Phase::Error;
    }

    /// Settle the cycle with the stored result.
    pub fn settle_result(&mut self) {
        self.phase = Phase::Result;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] seeded from `config`.
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(SessionState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Phase::is_busy ---

    #[test]
    fn idle_is_not_busy() {
        assert!(!Phase::Idle.is_busy());
    }

    #[test]
    fn simplifying_is_busy() {
        assert!(Phase::Simplifying.is_busy());
    }

    #[test]
    fn analyzing_is_busy() {
        assert!(Phase::Analyzing.is_busy());
    }

    #[test]
    fn result_is_not_busy() {
        assert!(!Phase::Result.is_busy());
    }

    #[test]
    fn error_is_not_busy() {
        assert!(!Phase::Error.is_busy());
    }

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }

    // ---- SessionState ---

    #[test]
    fn new_session_is_idle_and_empty() {
        let state = SessionState::default();
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.is_loading());
        assert!(state.input_text.is_empty());
        assert!(state.simplified.is_none());
        assert!(state.clarity_score.is_none());
        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
        assert!(state.notice.is_none());
    }

    #[test]
    fn session_is_seeded_from_config() {
        let mut config = AppConfig::default();
        config.level = crate::catalog::Level::Genius;
        config.provider = crate::catalog::Provider::DeepSeek;
        config.speech.rate = 1.5;

        let state = SessionState::new(config);
        assert_eq!(state.level, crate::catalog::Level::Genius);
        assert_eq!(state.provider, crate::catalog::Provider::DeepSeek);
        assert_eq!(state.speech_rate, 1.5);
    }

    #[test]
    fn start_submission_clears_previous_cycle() {
        let mut state = SessionState::default();
        state.simplified = Some("ancien résultat".into());
        state.clarity_score = Some(72.0);
        state.suggestions.push(Suggestion {
            original: "a".into(),
            suggestion: "b".into(),
        });
        state.error = Some("❌ Erreur : boom".into());
        state.notice = Some("notice".into());

        state.start_submission();

        assert_eq!(state.phase, Phase::Simplifying);
        assert!(state.is_loading());
        assert!(state.simplified.is_none());
        assert!(state.clarity_score.is_none());
        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
        assert!(state.notice.is_none());
    }

    #[test]
    fn settle_failure_sets_error_and_clears_busy() {
        let mut state = SessionState::default();
        state.start_submission();

        state.settle_failure("❌ Erreur : boom".into());

        assert_eq!(state.phase, Phase::Error);
        assert!(!state.is_loading());
        assert_eq!(state.error.as_deref(), Some("❌ Erreur : boom"));
        assert!(state.simplified.is_none());
    }

    #[test]
    fn settle_result_clears_busy() {
        let mut state = SessionState::default();
        state.start_submission();
        state.simplified = Some("résultat".into());

        state.settle_result();

        assert_eq!(state.phase, Phase::Result);
        assert!(!state.is_loading());
        assert!(state.error.is_none());
    }

    // ---- SharedState ---

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state(AppConfig::default());
        let state2 = Arc::clone(&state);

        state.lock().unwrap().phase = Phase::Simplifying;
        assert_eq!(state2.lock().unwrap().phase, Phase::Simplifying);
    }
}
