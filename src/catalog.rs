//! Static level / provider catalogs.
//!
//! Both catalogs are fixed enumerations: each variant maps 1:1 to the wire
//! value sent to the backend and to a human-readable French label shown in
//! the UI.  Pure lookup data — no behaviour lives here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Target audience / comprehension tier for the simplified output.
///
/// The wire values are opaque identifiers understood by the backend; the
/// client passes them through verbatim and attaches no semantics of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Explain like I'm five.
    Child,
    /// Teenager register.
    Teen,
    /// Academic but accessible.
    Student,
    /// Expert seeking a fresh perspective.
    Genius,
    /// Backend picks the register adaptively.
    Adaptive,
}

impl Level {
    /// Every selectable level, in display order.
    pub const ALL: [Level; 5] = [
        Level::Child,
        Level::Teen,
        Level::Student,
        Level::Genius,
        Level::Adaptive,
    ];

    /// Identifier sent in request payloads.
    pub fn api_value(&self) -> &'static str {
        match self {
            Level::Child => "enfant",
            Level::Teen => "ado",
            Level::Student => "etudiant",
            Level::Genius => "genie",
            Level::Adaptive => "bonus",
        }
    }

    /// French display label.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Child => "👶 Enfant (5 ans)",
            Level::Teen => "😎 Adolescent",
            Level::Student => "🎓 Étudiant",
            Level::Genius => "🧠 Génie",
            Level::Adaptive => "🧩 Adaptatif (Bonus)",
        }
    }

    /// Reverse lookup from a wire value.  Returns `None` for unknown values.
    pub fn from_api_value(value: &str) -> Option<Level> {
        Level::ALL.iter().copied().find(|l| l.api_value() == value)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Child
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Backend AI engine that performs the simplification / analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    OpenAi,
    Gemini,
    DeepSeek,
}

impl Provider {
    /// Every selectable provider, in display order.
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Gemini, Provider::DeepSeek];

    /// Identifier sent in request payloads.
    pub fn api_value(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::DeepSeek => "deepseek",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI (GPT-4o)",
            Provider::Gemini => "Google Gemini",
            Provider::DeepSeek => "DeepSeek AI",
        }
    }

    /// Reverse lookup from a wire value.  Returns `None` for unknown values.
    pub fn from_api_value(value: &str) -> Option<Provider> {
        Provider::ALL
            .iter()
            .copied()
            .find(|p| p.api_value() == value)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::OpenAi
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_wire_values_are_stable() {
        assert_eq!(Level::Child.api_value(), "enfant");
        assert_eq!(Level::Teen.api_value(), "ado");
        assert_eq!(Level::Student.api_value(), "etudiant");
        assert_eq!(Level::Genius.api_value(), "genie");
        assert_eq!(Level::Adaptive.api_value(), "bonus");
    }

    #[test]
    fn level_round_trips_through_wire_value() {
        for level in Level::ALL {
            assert_eq!(Level::from_api_value(level.api_value()), Some(level));
        }
    }

    #[test]
    fn unknown_level_value_is_none() {
        assert_eq!(Level::from_api_value("doctorat"), None);
    }

    #[test]
    fn default_level_is_child() {
        assert_eq!(Level::default(), Level::Child);
    }

    #[test]
    fn provider_wire_values_are_stable() {
        assert_eq!(Provider::OpenAi.api_value(), "openai");
        assert_eq!(Provider::Gemini.api_value(), "gemini");
        assert_eq!(Provider::DeepSeek.api_value(), "deepseek");
    }

    #[test]
    fn provider_round_trips_through_wire_value() {
        for provider in Provider::ALL {
            assert_eq!(Provider::from_api_value(provider.api_value()), Some(provider));
        }
    }

    #[test]
    fn provider_labels_are_distinct() {
        let labels: Vec<_> = Provider::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels.len(), 3);
        assert!(labels.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn default_provider_is_openai() {
        assert_eq!(Provider::default(), Provider::OpenAi);
    }
}
