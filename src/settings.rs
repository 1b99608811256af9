// src/settings.rs

use crate::constants::{BALANCED_MODEL, FAST_MODEL, SMART_MODEL};
use serde::{Deserialize, Serialize};

/// Tone the assistant should write in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Casual,
    Professional,
    Flirty,
    Humorous,
    Supportive,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Casual,
        Style::Professional,
        Style::Flirty,
        Style::Humorous,
        Style::Supportive,
    ];

    /// Text spliced into system prompts.
    pub fn description(self) -> &'static str {
        match self {
            Style::Casual => "casual & friendly",
            Style::Professional => "professional",
            Style::Flirty => "flirty",
            Style::Humorous => "humorous",
            Style::Supportive => "supportive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Style::Casual => "💬 Casual",
            Style::Professional => "💼 Professional",
            Style::Flirty => "😍 Flirty",
            Style::Humorous => "😄 Funny",
            Style::Supportive => "🤗 Supportive",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ReplyLength {
    pub const ALL: [ReplyLength; 3] = [ReplyLength::Short, ReplyLength::Medium, ReplyLength::Long];

    pub fn description(self) -> &'static str {
        match self {
            ReplyLength::Short => "short",
            ReplyLength::Medium => "medium",
            ReplyLength::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReplyLength::Short => "📝 Short",
            ReplyLength::Medium => "📄 Medium",
            ReplyLength::Long => "📚 Long",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// User-facing model choice; each maps to a fixed backend identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    Fast,
    Smart,
    #[default]
    Balanced,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 3] = [ModelChoice::Fast, ModelChoice::Smart, ModelChoice::Balanced];

    pub fn model_id(self) -> &'static str {
        match self {
            ModelChoice::Fast => FAST_MODEL,
            ModelChoice::Smart => SMART_MODEL,
            ModelChoice::Balanced => BALANCED_MODEL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelChoice::Fast => "⚡ Fast",
            ModelChoice::Smart => "🧠 Smart",
            ModelChoice::Balanced => "🎯 Balanced",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.0);
pub const MAX_TOKENS_RANGE: (u32, u32) = (50, 1000);
pub const CONTEXT_WINDOW_RANGE: (usize, usize) = (2, 20);

/// Per-session knobs read by the prompt builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub style: Style,
    pub length: ReplyLength,
    pub model: ModelChoice,
    pub temperature: f32,
    pub max_response_tokens: u32,
    pub context_window: usize,
    pub autocorrect_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            length: ReplyLength::default(),
            model: ModelChoice::default(),
            temperature: 0.7,
            max_response_tokens: 400,
            context_window: 6,
            autocorrect_enabled: true,
        }
    }
}

impl Settings {
    /// Clamps numeric fields into their allowed ranges. Applied wherever
    /// settings enter from the outside (config file, key presses).
    pub fn clamped(mut self) -> Self {
        self.temperature = if self.temperature.is_nan() {
            Settings::default().temperature
        } else {
            self.temperature.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1)
        };
        self.max_response_tokens = self
            .max_response_tokens
            .clamp(MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1);
        self.context_window = self
            .context_window
            .clamp(CONTEXT_WINDOW_RANGE.0, CONTEXT_WINDOW_RANGE.1);
        self
    }

    pub fn is_in_range(&self) -> bool {
        (TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&self.temperature)
            && (MAX_TOKENS_RANGE.0..=MAX_TOKENS_RANGE.1).contains(&self.max_response_tokens)
            && (CONTEXT_WINDOW_RANGE.0..=CONTEXT_WINDOW_RANGE.1).contains(&self.context_window)
    }
}
