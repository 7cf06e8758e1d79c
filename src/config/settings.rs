//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::{Level, Provider};

use super::AppPaths;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Selects which backend deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    /// Local development backend (`uvicorn` on 127.0.0.1).
    Local,
    /// The deployed backend.
    Deployed,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Local
    }
}

// ---------------------------------------------------------------------------
// AuthMode
// ---------------------------------------------------------------------------

/// How requests authenticate against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AuthMode {
    /// The backend holds the provider credentials; requests carry a
    /// `provider` identifier.
    ProviderManaged,
    /// Legacy deployments: the user supplies their own key, sent as
    /// `api_key` in place of `provider`.
    UserKey,
}

impl Default for AuthMode {
    fn default() -> Self {
        Self::ProviderManaged
    }
}

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Settings for the simplify / analyze backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Which deployment to target.
    pub environment: Environment,
    /// Base URL of the local development backend.
    pub local_url: String,
    /// Base URL of the deployed backend.
    pub deployed_url: String,
    /// Request authentication mode.
    pub auth: AuthMode,
    /// User-supplied key — only used when `auth == AuthMode::UserKey`.
    pub api_key: Option<String>,
    /// Whether the clarity-analysis step runs after a successful
    /// simplification.
    pub analysis: bool,
    /// Maximum seconds to wait for a backend response before timing out.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            local_url: "http://127.0.0.1:8000".into(),
            deployed_url: "https://mon-projet-llm-simplif-ia.onrender.com".into(),
            auth: AuthMode::default(),
            api_key: None,
            analysis: true,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Base URL for the selected environment.
    pub fn base_url(&self) -> &str {
        match self.environment {
            Environment::Local => &self.local_url,
            Environment::Deployed => &self.deployed_url,
        }
    }

    /// Full URL of the simplification endpoint.
    pub fn simplify_url(&self) -> String {
        format!("{}/api/simplify", self.base_url())
    }

    /// Full URL of the clarity-analysis endpoint.
    pub fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.base_url())
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the read-aloud subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Playback rate multiplier, kept within [0.5, 2.0].
    pub rate: f32,
    /// Preferred voice id — `None` means the engine default.
    pub voice: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            voice: None,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance and behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Last saved window position `(x, y)` in screen pixels.  `None` means
    /// let the OS / window manager pick a position on first launch.
    pub window_position: Option<(f32, f32)>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_position: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use simplifia::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Target level preselected when the app opens.
    pub level: Level,
    /// Provider preselected when the app opens.
    pub provider: Provider,
    /// Backend settings.
    pub api: ApiConfig,
    /// Read-aloud settings.
    pub speech: SpeechConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            provider: Provider::default(),
            api: ApiConfig::default(),
            speech: SpeechConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
