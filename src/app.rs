//! Simplif-IA card window — egui/eframe application.
//!
//! # Architecture
//!
//! [`SimplifiaApp`] is the top-level [`eframe::App`].  It owns:
//!
//! * `state`      — the [`SharedState`] mutated by the pipeline orchestrator;
//!   the update loop reads it every frame and writes the user's edits
//!   (input text, level, provider, speech preferences) back into it.
//! * `command_tx` — sends [`PipelineCommand::Submit`] to the orchestrator.
//! * `speech`     — the [`SpeechPlayback`] controller, driven directly from
//!   the UI thread (read-aloud is independent of the pipeline lifecycle).
//!
//! The window is a single card: configuration on top, the text to simplify
//! in the middle, one submit button, and a result panel whose styling
//! depends on the outcome (the `❌`/`⚠️` marker in the message is what makes
//! an error distinguishable from a real result).

use eframe::egui;
use tokio::sync::mpsc;

use crate::api::is_error_message;
use crate::catalog::{Level, Provider};
use crate::export;
use crate::pipeline::{PipelineCommand, SharedState};
use crate::speech::{SpeechPlayback, MAX_RATE, MIN_RATE};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

const ACCENT: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);
const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);
const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);
const SUCCESS_BG: egui::Color32 = egui::Color32::from_rgb(248, 250, 252);
const ERROR_BG: egui::Color32 = egui::Color32::from_rgb(254, 242, 242);
const ERROR_ACCENT: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

// ---------------------------------------------------------------------------
// SimplifiaApp
// ---------------------------------------------------------------------------

/// eframe application — the Simplif-IA card window.
pub struct SimplifiaApp {
    /// Shared session state, mutated by the pipeline orchestrator.
    state: SharedState,
    /// Send commands to the background pipeline orchestrator.
    command_tx: mpsc::Sender<PipelineCommand>,
    /// Read-aloud controller (UI-thread owned).
    speech: SpeechPlayback,
    /// Whether the read-aloud options row is expanded.
    show_speech_options: bool,
    /// Window position observed last frame, persisted on exit.
    last_window_pos: Option<(f32, f32)>,
}

/// UI actions collected during a frame and executed after the state lock is
/// released.
#[derive(Default)]
struct FrameActions {
    submit: bool,
    speak: Option<String>,
    copy: Option<String>,
}

impl SimplifiaApp {
    /// Create a new [`SimplifiaApp`].
    ///
    /// * `state`      — shared session state.
    /// * `command_tx` — sender end of the pipeline command channel.
    /// * `speech`     — read-aloud controller (possibly disabled).
    pub fn new(
        state: SharedState,
        command_tx: mpsc::Sender<PipelineCommand>,
        speech: SpeechPlayback,
    ) -> Self {
        Self {
            state,
            command_tx,
            speech,
            show_speech_options: false,
            last_window_pos: None,
        }
    }

    // ── Section renderers ────────────────────────────────────────────────

    fn draw_header(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("SimplifIA 💡")
                    .color(TEXT_PRIMARY)
                    .size(30.0)
                    .strong(),
            );
            ui.label(
                egui::RichText::new("L'intelligence artificielle qui rend le savoir accessible.")
                    .color(TEXT_MUTED)
                    .size(14.0),
            );
            ui.add_space(12.0);
        });
    }

    fn draw_provider_picker(ui: &mut egui::Ui, provider: &mut Provider) {
        ui.label(egui::RichText::new("Moteur de réflexion").color(TEXT_MUTED).strong());
        egui::ComboBox::from_id_salt("provider")
            .selected_text(provider.label())
            .show_ui(ui, |ui| {
                for candidate in Provider::ALL {
                    ui.selectable_value(provider, candidate, candidate.label());
                }
            });
    }

    fn draw_level_picker(ui: &mut egui::Ui, level: &mut Level) {
        ui.label(egui::RichText::new("Public cible").color(TEXT_MUTED).strong());
        ui.horizontal_wrapped(|ui| {
            for candidate in Level::ALL {
                let selected = *level == candidate;
                let text = if selected {
                    egui::RichText::new(candidate.label()).color(egui::Color32::WHITE)
                } else {
                    egui::RichText::new(candidate.label()).color(TEXT_MUTED)
                };
                let mut button = egui::Button::new(text);
                if selected {
                    button = button.fill(ACCENT);
                }
                if ui.add(button).clicked() {
                    *level = candidate;
                }
            }
        });
    }

    fn draw_input(ui: &mut egui::Ui, input_text: &mut String) {
        ui.label(egui::RichText::new("Contenu à vulgariser").color(TEXT_MUTED).strong());
        ui.add(
            egui::TextEdit::multiline(input_text)
                .hint_text("Collez ici votre texte complexe (article, contrat, cours...)")
                .desired_rows(7)
                .desired_width(f32::INFINITY),
        );
    }

    fn draw_submit(ui: &mut egui::Ui, busy: bool, actions: &mut FrameActions) {
        let label = if busy {
            "L'IA analyse le texte... 🧠"
        } else {
            "Simplifier maintenant ✨"
        };

        let button = egui::Button::new(
            egui::RichText::new(label)
                .color(egui::Color32::WHITE)
                .size(16.0),
        )
        .fill(if busy { TEXT_MUTED } else { TEXT_PRIMARY })
        .min_size(egui::vec2(ui.available_width(), 40.0));

        if ui.add_enabled(!busy, button).clicked() {
            actions.submit = true;
        }
    }

    /// Render the result panel.  Error messages carry a `❌`/`⚠️` marker and
    /// get the error styling; everything else is a real simplification.
    fn draw_result_panel(
        ui: &mut egui::Ui,
        text: &str,
        level: Level,
        clarity_score: Option<f32>,
        suggestions: &[crate::api::Suggestion],
        speech_available: bool,
        actions: &mut FrameActions,
    ) {
        let is_error = is_error_message(text);
        let (fill, accent) = if is_error {
            (ERROR_BG, ERROR_ACCENT)
        } else {
            (SUCCESS_BG, ACCENT)
        };

        let frame = egui::Frame::new()
            .fill(fill)
            .stroke(egui::Stroke::new(2.0, accent))
            .corner_radius(egui::CornerRadius::same(10))
            .inner_margin(egui::Margin::same(14));

        frame.show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Résultat pour : {}", level.label()))
                        .color(TEXT_PRIMARY)
                        .strong()
                        .size(12.0),
                );

                if !is_error {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(egui::Button::new("📋"))
                            .on_hover_text("Copier")
                            .clicked()
                        {
                            actions.copy = Some(text.to_string());
                        }
                        if speech_available
                            && ui
                                .add(egui::Button::new("🔊"))
                                .on_hover_text("Écouter")
                                .clicked()
                        {
                            actions.speak = Some(text.to_string());
                        }
                    });
                }
            });

            ui.add_space(6.0);
            ui.label(egui::RichText::new(text).color(TEXT_PRIMARY).size(14.0));

            if let Some(score) = clarity_score {
                ui.add_space(8.0);
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Clarté : {score:.0}/100"))
                        .color(accent)
                        .strong(),
                );
                for suggestion in suggestions {
                    ui.label(
                        egui::RichText::new(format!(
                            "« {} » → « {} »",
                            suggestion.original, suggestion.suggestion
                        ))
                        .color(TEXT_MUTED)
                        .size(12.0),
                    );
                }
            }
        });
    }

    fn draw_speech_options(
        &mut self,
        ui: &mut egui::Ui,
        voice: &mut Option<String>,
        speech_rate: &mut f32,
    ) {
        if ui
            .selectable_label(self.show_speech_options, "🔊 Options de lecture")
            .clicked()
        {
            self.show_speech_options = !self.show_speech_options;
            if self.show_speech_options {
                self.speech.refresh_voices();
            }
        }

        if !self.show_speech_options {
            return;
        }

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Voix").color(TEXT_MUTED));
            let selected = voice.clone().unwrap_or_else(|| "Voix par défaut".into());
            egui::ComboBox::from_id_salt("voice")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    ui.selectable_value(voice, None, "Voix par défaut");
                    for info in self.speech.voices() {
                        ui.selectable_value(
                            voice,
                            Some(info.id.clone()),
                            format!("{} ({})", info.id, info.language),
                        );
                    }
                });
            if ui.button("⟳").on_hover_text("Recharger les voix").clicked() {
                self.speech.refresh_voices();
            }
        });

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Vitesse").color(TEXT_MUTED));
            ui.add(egui::Slider::new(speech_rate, MIN_RATE..=MAX_RATE).fixed_decimals(2));
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for SimplifiaApp {
    /// Called every frame by eframe.  Reads the shared state, renders the
    /// card, then executes the collected actions.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track the window position so it can be persisted on exit.
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.last_window_pos = Some((rect.min.x, rect.min.y));
        }

        let mut actions = FrameActions::default();

        // UI values copied out of / written back into the shared state.  The
        // lock is held only for the copy, never while rendering.
        let (mut input_text, mut level, mut provider, mut voice, mut speech_rate) = {
            let st = self.state.lock().unwrap();
            (
                st.input_text.clone(),
                st.level,
                st.provider,
                st.voice.clone(),
                st.speech_rate,
            )
        };
        let (phase, result_text, clarity_score, suggestions, notice) = {
            let st = self.state.lock().unwrap();
            let result_text = st.error.clone().or_else(|| st.simplified.clone());
            (
                st.phase.clone(),
                result_text,
                st.clarity_score,
                st.suggestions.clone(),
                st.notice.clone(),
            )
        };

        let busy = phase.is_busy();
        let speech_available = self.speech.is_available();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                Self::draw_header(ui);

                Self::draw_provider_picker(ui, &mut provider);
                ui.add_space(8.0);
                Self::draw_level_picker(ui, &mut level);
                ui.add_space(8.0);
                Self::draw_input(ui, &mut input_text);
                ui.add_space(10.0);
                Self::draw_submit(ui, busy, &mut actions);

                if busy {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new(phase.label()).color(TEXT_MUTED));
                    });
                }

                if let Some(notice) = &notice {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(notice).color(ACCENT));
                }

                if let Some(text) = &result_text {
                    ui.add_space(12.0);
                    Self::draw_result_panel(
                        ui,
                        text,
                        level,
                        clarity_score,
                        &suggestions,
                        speech_available,
                        &mut actions,
                    );
                }

                if speech_available {
                    ui.add_space(10.0);
                    self.draw_speech_options(ui, &mut voice, &mut speech_rate);
                }
            });
        });

        // Write the user's edits back.
        {
            let mut st = self.state.lock().unwrap();
            st.input_text = input_text;
            st.level = level;
            st.provider = provider;
            st.voice = voice.clone();
            st.speech_rate = speech_rate;
        }

        // ── Execute collected actions (lock released) ────────────────────
        if actions.submit {
            if self.command_tx.try_send(PipelineCommand::Submit).is_err() {
                log::warn!("app: pipeline command channel full — submit dropped");
            }
        }

        if let Some(text) = actions.speak {
            self.speech.speak(&text, voice.as_deref(), speech_rate);
        }

        if let Some(text) = actions.copy {
            let notice = match export::copy_text(&text) {
                Ok(()) => export::COPY_CONFIRMATION.to_string(),
                Err(e) => {
                    log::warn!("app: copy failed: {e}");
                    "Impossible de copier le texte.".to_string()
                }
            };
            self.state.lock().unwrap().notice = Some(notice);
        }

        // Poll the shared state while a request is in flight.
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    /// Persist the user's selection and the window position (best-effort).
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let config = {
            let st = self.state.lock().unwrap();
            let mut config = st.config.clone();
            config.level = st.level;
            config.provider = st.provider;
            config.speech.voice = st.voice.clone();
            config.speech.rate = st.speech_rate;
            config.ui.window_position = self.last_window_pos;
            config
        };

        if let Err(e) = config.save() {
            log::warn!("app: failed to save settings on exit: {e}");
        }
        log::info!("Simplif-IA window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
