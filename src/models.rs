// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who wrote a message in the simulated conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The user.
    Sent,
    /// The conversation partner.
    Received,
}

/// Represents one turn in the conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn sent(text: impl Into<String>) -> Self {
        Self::new(Role::Sent, text)
    }

    pub fn received(text: impl Into<String>) -> Self {
        Self::new(Role::Received, text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionCategory {
    Improved,
    Alternative,
    Other,
}

impl SuggestionCategory {
    /// Categorises by case-insensitive substring match on the label.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("improved") {
            SuggestionCategory::Improved
        } else if lower.contains("option") {
            SuggestionCategory::Alternative
        } else {
            SuggestionCategory::Other
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SuggestionCategory::Improved => "✨",
            SuggestionCategory::Alternative => "💡",
            SuggestionCategory::Other => "🔄",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub text: String,
    pub category: SuggestionCategory,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let label = label.into();
        let category = SuggestionCategory::from_label(&label);
        Self {
            label,
            text: text.into(),
            category,
        }
    }

    pub fn display_label(&self) -> String {
        format!("{} {}", self.category.icon(), self.label)
    }
}

/// Parsed output of one "get help" request, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    pub items: Vec<Suggestion>,
}

impl SuggestionSet {
    pub fn new(items: Vec<Suggestion>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Suggestion> {
        self.items.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.items.iter()
    }

    /// Renders the set in the same labelled shape the model is asked for.
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|s| format!("**{}:** {}", s.label, s.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    #[default]
    Neutral,
    Excited,
    Confused,
    Romantic,
    Professional,
}

impl Mood {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Mood::Positive),
            "negative" => Some(Mood::Negative),
            "neutral" => Some(Mood::Neutral),
            "excited" => Some(Mood::Excited),
            "confused" => Some(Mood::Confused),
            "romantic" => Some(Mood::Romantic),
            "professional" => Some(Mood::Professional),
            _ => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Positive => "😊",
            Mood::Negative => "😔",
            Mood::Neutral => "😐",
            Mood::Excited => "🤩",
            Mood::Confused => "😕",
            Mood::Romantic => "😍",
            Mood::Professional => "💼",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mood::Positive => "Positive",
            Mood::Negative => "Negative",
            Mood::Neutral => "Neutral",
            Mood::Excited => "Excited",
            Mood::Confused => "Confused",
            Mood::Romantic => "Romantic",
            Mood::Professional => "Professional",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub mood: Mood,
    pub confidence: f32,
}

impl Default for MoodAnalysis {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            confidence: 0.5,
        }
    }
}

impl MoodAnalysis {
    pub fn summary(&self) -> String {
        format!(
            "{} {} ({}% confidence)",
            self.mood.emoji(),
            self.mood,
            (self.confidence * 100.0).round() as u32
        )
    }
}

/// A tone word, remembered together with the draft it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneReading {
    pub draft: String,
    pub tone: String,
}

/// Outcome of an auto-fix request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarFix {
    Changed(String),
    Unchanged,
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label() {
        assert_eq!(SuggestionCategory::from_label("Improved"), SuggestionCategory::Improved);
        assert_eq!(SuggestionCategory::from_label("IMPROVED version"), SuggestionCategory::Improved);
        assert_eq!(SuggestionCategory::from_label("Option 2"), SuggestionCategory::Alternative);
        assert_eq!(SuggestionCategory::from_label("Tip"), SuggestionCategory::Other);
    }

    #[test]
    fn test_render_shape() {
        let set = SuggestionSet::new(vec![
            Suggestion::new("Improved", "Pretty good, thanks!"),
            Suggestion::new("Option 1", "Not bad at all, you?"),
        ]);
        assert_eq!(
            set.render(),
            "**Improved:** Pretty good, thanks!\n**Option 1:** Not bad at all, you?"
        );
    }

    #[test]
    fn test_mood_parse_is_case_insensitive() {
        assert_eq!(Mood::parse("Excited"), Some(Mood::Excited));
        assert_eq!(Mood::parse(" romantic "), Some(Mood::Romantic));
        assert_eq!(Mood::parse("grumpy"), None);
    }

    #[test]
    fn test_mood_summary() {
        let m = MoodAnalysis {
            mood: Mood::Positive,
            confidence: 0.92,
        };
        assert_eq!(m.summary(), "😊 Positive (92% confidence)");
    }

    #[test]
    fn test_message_serializes_role_lowercase() {
        let msg = ChatMessage::received("hi there");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "received");
        assert_eq!(json["text"], "hi there");
    }
}
