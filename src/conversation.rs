// src/conversation.rs

use crate::constants::SEED_GREETING;
use crate::models::{ChatMessage, GrammarFix, MoodAnalysis, Role, SuggestionSet, ToneReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChatStats {
    pub total: usize,
    pub sent: usize,
    pub received: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftStats {
    pub words: usize,
    pub chars: usize,
}

/// Session state for one drafting session. Owned by the caller and passed
/// to the prompt builders; updated from interpreter results.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pub draft: String,
    suggestions: SuggestionSet,
    mood: Option<MoodAnalysis>,
    tone: Option<ToneReading>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation opened by the partner's default greeting.
    pub fn with_greeting() -> Self {
        let mut conversation = Self::new();
        conversation.push(Role::Received, SEED_GREETING);
        conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends a message. Blank text is refused.
    pub fn push(&mut self, role: Role, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(ChatMessage::new(role, text));
        true
    }

    /// Moves the current draft into the history and clears it.
    pub fn send_draft(&mut self, role: Role) -> Option<&ChatMessage> {
        let draft = std::mem::take(&mut self.draft);
        if self.push(role, &draft) {
            self.messages.last()
        } else {
            self.draft = draft;
            None
        }
    }

    pub fn has_draft(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    /// Replaces the previous suggestions wholesale.
    pub fn set_suggestions(&mut self, suggestions: SuggestionSet) {
        self.suggestions = suggestions;
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions = SuggestionSet::default();
    }

    /// Copies suggestion `idx` into the draft and clears the set.
    pub fn adopt_suggestion(&mut self, idx: usize) -> Option<String> {
        let text = self.suggestions.get(idx)?.text.clone();
        self.draft = text.clone();
        self.clear_suggestions();
        Some(text)
    }

    /// Returns whether the draft was replaced.
    pub fn apply_grammar_fix(&mut self, fix: &GrammarFix) -> bool {
        match fix {
            GrammarFix::Changed(text) => {
                self.draft = text.clone();
                true
            }
            GrammarFix::Unchanged => false,
        }
    }

    pub fn mood(&self) -> Option<&MoodAnalysis> {
        self.mood.as_ref()
    }

    pub fn set_mood(&mut self, mood: MoodAnalysis) {
        self.mood = Some(mood);
    }

    pub fn set_tone(&mut self, reading: ToneReading) {
        self.tone = Some(reading);
    }

    /// The last tone reading, if it was taken for the current draft.
    pub fn draft_tone(&self) -> Option<&str> {
        self.tone
            .as_ref()
            .filter(|r| r.draft.trim() == self.draft.trim())
            .map(|r| r.tone.as_str())
    }

    pub fn draft_stats(&self) -> DraftStats {
        DraftStats {
            words: self.draft.split_whitespace().count(),
            chars: self.draft.chars().count(),
        }
    }

    /// Clears history, draft, suggestions, mood and tone.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn stats(&self) -> ChatStats {
        let sent = self.messages.iter().filter(|m| m.role == Role::Sent).count();
        ChatStats {
            total: self.messages.len(),
            sent,
            received: self.messages.len() - sent,
        }
    }
}
