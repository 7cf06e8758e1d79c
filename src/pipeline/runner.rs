//! Pipeline orchestrator — drives the submit → simplify → analyze loop.
//!
//! [`SimplifyPipeline`] owns the [`SharedState`] and responds to
//! [`PipelineCommand`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Pipeline flow
//!
//! ```text
//! PipelineCommand::Submit
//!   ├─ busy?            → ignored (one orchestration in flight at a time)
//!   ├─ empty input?     → local validation notice, no network call
//!   └─ otherwise
//!        ├─ clear previous outputs, set state = Simplifying
//!        ├─ TextSimplifier::simplify (async)
//!        │    ├─ Err → classified message, state = Error
//!        │    └─ Ok  → store simplified text
//!        │          ├─ [analysis on] TextSimplifier::analyze   [Analyzing]
//!        │          │    ├─ Ok  → store score + suggestions
//!        │          │    └─ Err → warn, keep simplified text (degraded)
//!        │          └─ state = Result
//! ```
//!
//! Every path out of `Simplifying`/`Analyzing` ends in `Result` or `Error`,
//! so the busy flag can never stay stuck.  The analyze call is only issued
//! after the simplify response is observed, with the simplified output as
//! its input — never concurrently, never on a failure path.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{user_message, RequestError, RequestPayload, TextSimplifier, EMPTY_INPUT_PROMPT};

use super::state::{Phase, SharedState};

// ---------------------------------------------------------------------------
// PipelineCommand
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the pipeline orchestrator.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Simplify the current input text.
    Submit,
}

// ---------------------------------------------------------------------------
// SimplifyPipeline
// ---------------------------------------------------------------------------

/// Drives the complete simplify → analyze pipeline.
///
/// Create with [`SimplifyPipeline::new`], then call [`run`](Self::run)
/// inside a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use simplifia::api::{ApiSimplifier, TextSimplifier};
/// use simplifia::config::AppConfig;
/// use simplifia::pipeline::{new_shared_state, SimplifyPipeline};
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let shared_state = new_shared_state(config.clone());
/// let api: Arc<dyn TextSimplifier> = Arc::new(ApiSimplifier::from_config(&config.api));
///
/// let (command_tx, command_rx) = tokio::sync::mpsc::channel(16);
/// let pipeline = SimplifyPipeline::new(shared_state, api);
/// pipeline.run(command_rx).await;
/// # let _ = command_tx;
/// # }
/// ```
pub struct SimplifyPipeline {
    state: SharedState,
    api: Arc<dyn TextSimplifier>,
}

impl SimplifyPipeline {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state` — shared session state (also read by the UI).
    /// * `api`   — backend client (e.g. `ApiSimplifier`).
    pub fn new(state: SharedState, api: Arc<dyn TextSimplifier>) -> Self {
        Self { state, api }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(self, mut command_rx: mpsc::Receiver<PipelineCommand>) {
        while let Some(command) = command_rx.recv().await {
            match command {
                PipelineCommand::Submit => self.handle_submit().await,
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Submit handler
    // -----------------------------------------------------------------------

    /// Handle one submit: validate, simplify, optionally analyze, settle.
    async fn handle_submit(&self) {
        // ── 1. Guard + snapshot under one short lock ─────────────────────
        let (payload, level, provider, analysis_enabled) = {
            let mut st = self.state.lock().unwrap();

            if st.phase.is_busy() {
                log::debug!("pipeline: submit ignored — a request is already in flight");
                return;
            }

            let payload = match RequestPayload::simplify(
                &st.input_text,
                st.level,
                st.provider,
                st.config.api.auth,
                st.config.api.api_key.as_deref(),
            ) {
                Ok(payload) => payload,
                Err(RequestError::EmptyText) => {
                    // Local validation — the backend is never contacted.
                    st.notice = Some(EMPTY_INPUT_PROMPT.to_string());
                    return;
                }
            };

            st.start_submission();
            (payload, st.level, st.provider, st.config.api.analysis)
        };

        log::debug!(
            "pipeline: simplify request (level={}, provider={})",
            level.api_value(),
            provider.api_value()
        );

        // ── 2. Simplify ──────────────────────────────────────────────────
        let output = match self.api.simplify(&payload).await {
            Ok(output) => output,
            Err(e) => {
                log::error!("pipeline: simplify failed: {e}");
                let message = user_message(&e, provider);
                self.state.lock().unwrap().settle_failure(message);
                return;
            }
        };

        {
            let mut st = self.state.lock().unwrap();
            st.simplified = Some(output.clone());
        }

        // ── 3. Clarity analysis (best-effort) ────────────────────────────
        if analysis_enabled {
            {
                let mut st = self.state.lock().unwrap();
                st.phase = Phase::Analyzing;
            }

            match RequestPayload::analysis(&output, level, provider) {
                Ok(analyze_payload) => match self.api.analyze(&analyze_payload).await {
                    Ok(report) => {
                        let mut st = self.state.lock().unwrap();
                        st.clarity_score = Some(report.score);
                        st.suggestions = report.suggestions;
                    }
                    Err(e) => {
                        // Degraded, not fatal — the simplified text stays.
                        log::warn!(
                            "pipeline: clarity analysis failed ({e}) — keeping the simplified text"
                        );
                    }
                },
                Err(e) => {
                    log::warn!("pipeline: clarity analysis skipped ({e})");
                }
            }
        }

        // ── 4. Finalise state ────────────────────────────────────────────
        self.state.lock().unwrap().settle_result();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ClarityReport, Suggestion};
    use crate::config::AppConfig;
    use crate::pipeline::state::new_shared_state;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // -----------------------------------------------------------------------
    // Test double
    // -----------------------------------------------------------------------

    /// Scripted backend: counts calls and records the analyze payload.
    struct ScriptedApi {
        simplify_result: Result<String, ApiError>,
        analyze_result: Result<ClarityReport, ApiError>,
        simplify_calls: AtomicUsize,
        analyze_calls: AtomicUsize,
        last_analyze_payload: Mutex<Option<RequestPayload>>,
    }

    impl ScriptedApi {
        fn new(
            simplify_result: Result<String, ApiError>,
            analyze_result: Result<ClarityReport, ApiError>,
        ) -> Arc<Self> {
            Arc::new(Self {
                simplify_result,
                analyze_result,
                simplify_calls: AtomicUsize::new(0),
                analyze_calls: AtomicUsize::new(0),
                last_analyze_payload: Mutex::new(None),
            })
        }

        fn ok(output: &str, report: ClarityReport) -> Arc<Self> {
            Self::new(Ok(output.to_string()), Ok(report))
        }
    }

    #[async_trait]
    impl TextSimplifier for ScriptedApi {
        async fn simplify(&self, _payload: &RequestPayload) -> Result<String, ApiError> {
            self.simplify_calls.fetch_add(1, Ordering::SeqCst);
            self.simplify_result.clone()
        }

        async fn analyze(&self, payload: &RequestPayload) -> Result<ClarityReport, ApiError> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_analyze_payload.lock().unwrap() = Some(payload.clone());
            self.analyze_result.clone()
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn sample_report() -> ClarityReport {
        ClarityReport {
            score: 85.0,
            suggestions: vec![
                Suggestion {
                    original: "stipule".into(),
                    suggestion: "dit".into(),
                },
                Suggestion {
                    original: "clause".into(),
                    suggestion: "règle".into(),
                },
            ],
        }
    }

    async fn run_one_submit(state: SharedState, api: Arc<dyn TextSimplifier>) {
        let (tx, rx) = mpsc::channel(4);
        tx.send(PipelineCommand::Submit).await.unwrap();
        drop(tx); // close channel so run() returns

        SimplifyPipeline::new(state, api).run(rx).await;
    }

    fn state_with_input(text: &str) -> SharedState {
        let state = new_shared_state(AppConfig::default());
        state.lock().unwrap().input_text = text.to_string();
        state
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// Successful simplify + analyze: result, score and ordered suggestions
    /// all land in the session state.
    #[tokio::test]
    async fn success_with_analysis_populates_everything() {
        let api = ScriptedApi::ok("Tu ne peux pas travailler pour un concurrent.", sample_report());
        let state = state_with_input("Le contrat stipule une clause de non-concurrence...");

        run_one_submit(Arc::clone(&state), api.clone()).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Result);
        assert!(!st.is_loading());
        assert_eq!(
            st.simplified.as_deref(),
            Some("Tu ne peux pas travailler pour un concurrent.")
        );
        assert_eq!(st.clarity_score, Some(85.0));
        assert_eq!(st.suggestions[0].original, "stipule");
        assert_eq!(st.suggestions[1].original, "clause");
        assert!(st.error.is_none());
        assert_eq!(api.simplify_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 1);
    }

    /// The analyze call must receive the *simplified output*, not the
    /// original input, with the same level/provider context.
    #[tokio::test]
    async fn analyze_receives_simplified_output() {
        let api = ScriptedApi::ok("simplifié", sample_report());
        let state = state_with_input("texte original compliqué");

        run_one_submit(Arc::clone(&state), api.clone()).await;

        let payload = api.last_analyze_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.text, "simplifié");
        assert_eq!(payload.level, "enfant");
        assert_eq!(payload.provider.as_deref(), Some("openai"));
    }

    /// When the analyze call fails, the simplified text must survive and the
    /// cycle settles in `Result`, not `Error`.
    #[tokio::test]
    async fn analysis_failure_keeps_simplified_text() {
        let api = ScriptedApi::new(
            Ok("simplifié".into()),
            Err(ApiError::Api("Internal server error".into())),
        );
        let state = state_with_input("texte");

        run_one_submit(Arc::clone(&state), api.clone()).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Result);
        assert!(!st.is_loading());
        assert_eq!(st.simplified.as_deref(), Some("simplifié"));
        assert!(st.clarity_score.is_none());
        assert!(st.suggestions.is_empty());
        assert!(st.error.is_none());
    }

    /// A failing simplify call settles in `Error` with the classified
    /// message; nothing of a previous result leaks through.
    #[tokio::test]
    async fn simplify_failure_sets_classified_error() {
        let api = ScriptedApi::new(
            Err(ApiError::Api("Insufficient balance on account".into())),
            Ok(sample_report()),
        );
        let state = state_with_input("texte");
        state.lock().unwrap().simplified = Some("ancien résultat".into());

        run_one_submit(Arc::clone(&state), api.clone()).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Error);
        assert!(!st.is_loading());
        assert!(st.simplified.is_none());
        let error = st.error.as_deref().unwrap();
        assert!(error.starts_with('⚠'));
        assert!(error.contains("OpenAI (GPT-4o)"));
        // No analyze call on the failure path.
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 0);
    }

    /// An unreachable server yields the dedicated "no response" message.
    #[tokio::test]
    async fn unreachable_server_yields_silent_server_message() {
        let api = ScriptedApi::new(
            Err(ApiError::Unreachable("connection refused".into())),
            Ok(sample_report()),
        );
        let state = state_with_input("texte");

        run_one_submit(Arc::clone(&state), api).await;

        let st = state.lock().unwrap();
        assert_eq!(
            st.error.as_deref(),
            Some("❌ Erreur : Le serveur ne répond pas.")
        );
    }

    /// Empty or whitespace-only input never reaches the network; the local
    /// validation prompt is shown instead and the phase stays `Idle`.
    #[tokio::test]
    async fn empty_input_is_local_validation_only() {
        let api = ScriptedApi::ok("jamais appelé", sample_report());
        let state = state_with_input("   \n\t ");

        run_one_submit(Arc::clone(&state), api.clone()).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Idle);
        assert!(!st.is_loading());
        assert_eq!(st.notice.as_deref(), Some(EMPTY_INPUT_PROMPT));
        assert_eq!(api.simplify_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 0);
    }

    /// A submit arriving while a request is in flight is a no-op.
    #[tokio::test]
    async fn submit_while_busy_is_ignored() {
        let api = ScriptedApi::ok("simplifié", sample_report());
        let state = state_with_input("texte");
        state.lock().unwrap().phase = Phase::Simplifying;

        run_one_submit(Arc::clone(&state), api.clone()).await;

        assert_eq!(api.simplify_calls.load(Ordering::SeqCst), 0);
        // The in-flight cycle is untouched.
        assert_eq!(state.lock().unwrap().phase, Phase::Simplifying);
    }

    /// With analysis disabled, the analyze endpoint is never called and the
    /// cycle settles directly in `Result`.
    #[tokio::test]
    async fn analysis_disabled_skips_analyze_call() {
        let api = ScriptedApi::ok("simplifié", sample_report());
        let state = state_with_input("texte");
        state.lock().unwrap().config.api.analysis = false;

        run_one_submit(Arc::clone(&state), api.clone()).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Result);
        assert_eq!(st.simplified.as_deref(), Some("simplifié"));
        assert!(st.clarity_score.is_none());
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 0);
    }

    /// After a settled cycle the pipeline accepts the next submit — the busy
    /// guard resets on success and on failure alike.
    #[tokio::test]
    async fn pipeline_is_ready_again_after_each_cycle() {
        let api = ScriptedApi::new(
            Err(ApiError::Api("boom".into())),
            Ok(sample_report()),
        );
        let state = state_with_input("texte");

        let (tx, rx) = mpsc::channel(4);
        tx.send(PipelineCommand::Submit).await.unwrap();
        tx.send(PipelineCommand::Submit).await.unwrap();
        drop(tx);

        SimplifyPipeline::new(Arc::clone(&state), api.clone()).run(rx).await;

        // Both submits went through — the first failure did not wedge the
        // busy flag.
        assert_eq!(api.simplify_calls.load(Ordering::SeqCst), 2);
        assert!(!state.lock().unwrap().is_loading());
    }

    /// A new submission clears the previous cycle's score and suggestions
    /// before any response arrives.
    #[tokio::test]
    async fn new_submission_clears_previous_report() {
        let api = ScriptedApi::new(
            Ok("simplifié".into()),
            Err(ApiError::Api("analysis down".into())),
        );
        let state = state_with_input("texte");
        {
            let mut st = state.lock().unwrap();
            st.clarity_score = Some(42.0);
            st.suggestions.push(Suggestion {
                original: "x".into(),
                suggestion: "y".into(),
            });
        }

        run_one_submit(Arc::clone(&state), api).await;

        let st = state.lock().unwrap();
        // The stale report is gone even though the new analysis degraded.
        assert!(st.clarity_score.is_none());
        assert!(st.suggestions.is_empty());
        assert_eq!(st.simplified.as_deref(), Some("simplifié"));
    }
}
