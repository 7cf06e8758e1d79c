//! Pipeline orchestrator module for Simplif-IA.
//!
//! This module wires the submit → simplify → analyze flow and exposes the
//! shared session state that the UI reads every frame.
//!
//! # Architecture
//!
//! ```text
//! PipelineCommand (mpsc)
//!        │
//!        ▼
//! SimplifyPipeline::run()  ← async tokio task
//!        │
//!        └─ Submit
//!              │
//!              ├─ busy / empty-input guards (no network call)
//!              ├─ TextSimplifier::simplify          → Simplifying
//!              ├─ [analysis on] TextSimplifier::analyze → Analyzing
//!              └─ settle                            → Result | Error
//!
//! SharedState (Arc<Mutex<SessionState>>) ←── read by egui update() each frame
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use simplifia::api::{ApiSimplifier, TextSimplifier};
//! use simplifia::config::AppConfig;
//! use simplifia::pipeline::{new_shared_state, PipelineCommand, SimplifyPipeline};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let shared_state = new_shared_state(config.clone());
//!     let api: Arc<dyn TextSimplifier> = Arc::new(ApiSimplifier::from_config(&config.api));
//!
//!     let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(16);
//!     let pipeline = SimplifyPipeline::new(shared_state.clone(), api);
//!
//!     tokio::spawn(async move { pipeline.run(command_rx).await });
//!
//!     // command_tx is handed to the UI, which sends Submit on click.
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineCommand, SimplifyPipeline};
pub use state::{new_shared_state, Phase, SessionState, SharedState};
