//! Application entry point — Simplif-IA.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the backend client ([`ApiSimplifier`]) from config.
//! 5. Create the shared session state and the pipeline command channel.
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Initialise the read-aloud controller (degrades to a no-op when the
//!    host has no speech engine).
//! 8. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;

use simplifia::{
    api::{ApiSimplifier, TextSimplifier},
    app::SimplifiaApp,
    config::AppConfig,
    pipeline::{new_shared_state, PipelineCommand, SimplifyPipeline},
    speech::SpeechPlayback,
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([880.0, 760.0])
        .with_min_inner_size([640.0, 480.0]);

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Simplif-IA starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 worker threads — simplify + analyze round-trips)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Backend client
    let api: Arc<dyn TextSimplifier> = Arc::new(ApiSimplifier::from_config(&config.api));
    log::info!("Backend target: {}", config.api.base_url());

    // 5. Shared state + command channel
    let state = new_shared_state(config.clone());
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(16);

    // 6. Spawn the pipeline orchestrator onto the tokio runtime
    {
        let pipeline = SimplifyPipeline::new(Arc::clone(&state), api);
        rt.spawn(pipeline.run(command_rx));
    }

    // 7. Read-aloud controller (UI-thread owned; logs + degrades on failure)
    let speech = SpeechPlayback::system();

    // 8. Build the egui app and run it (blocks until the window is closed)
    let app = SimplifiaApp::new(state, command_tx, speech);
    let options = native_options(&config);

    eframe::run_native(
        "Simplif-IA",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
