use crate::assistant::DraftAssistant;
use crate::constants::QUICK_ACTIONS;
use crate::conversation::Conversation;
use crate::log_view::LogView;
use crate::models::{GrammarFix, MoodAnalysis, Role, Suggestion, SuggestionSet, ToneReading};
use crate::settings::Settings;
use crate::status_indicator::StatusIndicator;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// Result of a background request, delivered back to the UI loop.
#[derive(Debug)]
pub enum TaskOutcome {
    Suggestions(Result<SuggestionSet, String>),
    /// `original` is the draft the fix was computed for.
    Grammar {
        original: String,
        fix: GrammarFix,
        send_after: bool,
    },
    Mood(MoodAnalysis),
    QuickReplies(Vec<String>),
    Rephrase(Result<String, String>),
    Tone(Result<ToneReading, String>),
    KeyCheck(Result<(), String>),
}

pub const BUSY_MESSAGE: &str = "⏳ Still working on the last request...";

pub struct App {
    pub state: AppState,
    pub conversation: Conversation,
    pub settings: Settings,
    /// While on, Enter records the draft as the partner's message.
    pub partner_mode: bool,
    pub is_processing: bool,
    pub chat_scroll: u16,
    pub status_indicator: StatusIndicator,
    pub logs: LogView,
    assistant: Option<Arc<DraftAssistant>>,
    outcome_tx: mpsc::UnboundedSender<TaskOutcome>,
}

impl App {
    pub fn new(
        settings: Settings,
        assistant: Option<DraftAssistant>,
    ) -> (App, mpsc::UnboundedReceiver<TaskOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let mut logs = LogView::new();
        if assistant.is_none() {
            logs.add("No API key configured; assistant features are disabled.".to_string());
        }

        let app = App {
            state: AppState::Chat,
            conversation: Conversation::with_greeting(),
            settings,
            partner_mode: false,
            is_processing: false,
            chat_scroll: 0,
            status_indicator: StatusIndicator::new(),
            logs,
            assistant: assistant.map(Arc::new),
            outcome_tx,
        };
        (app, outcome_rx)
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.logs.add(text.clone());
        self.status_indicator.set_status(text);
    }

    /// Returns the assistant if a new request may start right now.
    fn ready_assistant(&mut self) -> Option<Arc<DraftAssistant>> {
        if self.is_processing {
            self.notify(BUSY_MESSAGE);
            return None;
        }
        match &self.assistant {
            Some(assistant) => Some(Arc::clone(assistant)),
            None => {
                self.notify("🔑 Please configure your API key first.");
                None
            }
        }
    }

    fn require_draft(&mut self) -> bool {
        if self.conversation.has_draft() {
            true
        } else {
            self.notify("📝 Please type a message first.");
            false
        }
    }

    fn begin(&mut self, status: &str) {
        self.is_processing = true;
        self.status_indicator.set_thinking(true);
        self.status_indicator.set_status(status);
        self.logs.add(status.to_string());
    }

    pub fn request_suggestions(&mut self) {
        if !self.require_draft() {
            return;
        }
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("🤖 Generating smart suggestions...");

        let history = self.conversation.messages().to_vec();
        let draft = self.conversation.draft.clone();
        let settings = self.settings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = assistant.suggest(&history, &draft, &settings).await;
            let _ = tx.send(TaskOutcome::Suggestions(result));
        });
    }

    pub fn request_grammar_fix(&mut self, send_after: bool) {
        if !self.require_draft() {
            return;
        }
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("✨ Fixing grammar and style...");

        let draft = self.conversation.draft.clone();
        let settings = self.settings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let fix = assistant.fix_grammar(&draft, &settings).await;
            let _ = tx.send(TaskOutcome::Grammar {
                original: draft,
                fix,
                send_after,
            });
        });
    }

    pub fn request_mood(&mut self) {
        if self.conversation.messages().is_empty() {
            return;
        }
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("📊 Reading the room...");

        let history = self.conversation.messages().to_vec();
        let settings = self.settings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let mood = assistant.analyze_mood(&history, &settings).await;
            let _ = tx.send(TaskOutcome::Mood(mood));
        });
    }

    pub fn request_quick_replies(&mut self) {
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("⚡ Thinking of quick replies...");

        let history = self.conversation.messages().to_vec();
        let settings = self.settings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let replies = assistant.quick_replies(&history, &settings).await;
            let _ = tx.send(TaskOutcome::QuickReplies(replies));
        });
    }

    pub fn request_rephrase(&mut self) {
        if !self.require_draft() {
            return;
        }
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("🔄 Rephrasing...");

        let draft = self.conversation.draft.clone();
        let settings = self.settings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = assistant.rephrase(&draft, &settings).await;
            let _ = tx.send(TaskOutcome::Rephrase(result));
        });
    }

    pub fn request_tone(&mut self) {
        if !self.require_draft() {
            return;
        }
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("🎭 Analyzing tone...");

        let draft = self.conversation.draft.clone();
        let settings = self.settings.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = assistant
                .analyze_tone(&draft, &settings)
                .await
                .map(|tone| ToneReading { draft, tone });
            let _ = tx.send(TaskOutcome::Tone(result));
        });
    }

    /// Replaces the draft with canned reply `idx`. Needs no API key.
    pub fn use_quick_action(&mut self, idx: usize) {
        if let Some((label, text)) = QUICK_ACTIONS.get(idx) {
            self.conversation.draft = text.to_string();
            self.notify(format!("⚡ Quick action: {}", label));
        }
    }

    /// Checks the API key in the background. No-op without an assistant.
    pub fn request_key_check(&mut self) {
        if self.assistant.is_none() {
            return;
        }
        let Some(assistant) = self.ready_assistant() else {
            return;
        };
        self.begin("🔑 Checking API key...");

        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = assistant.check_key().await;
            let _ = tx.send(TaskOutcome::KeyCheck(result));
        });
    }

    /// Sends the draft, running it through auto-fix first when enabled.
    pub fn submit_draft(&mut self) {
        if !self.conversation.has_draft() {
            return;
        }
        if self.is_processing {
            self.notify(BUSY_MESSAGE);
            return;
        }

        let role = if self.partner_mode { Role::Received } else { Role::Sent };
        if role == Role::Sent && self.settings.autocorrect_enabled && self.assistant.is_some() {
            self.request_grammar_fix(true);
        } else {
            self.send_draft(role);
        }
    }

    fn send_draft(&mut self, role: Role) {
        if let Some(msg) = self.conversation.send_draft(role) {
            let who = match msg.role {
                Role::Sent => "You",
                Role::Received => "Friend",
            };
            self.logs.add(format!("{} sent a message", who));
            self.chat_scroll = u16::MAX;
        }
    }

    pub fn adopt_suggestion(&mut self, idx: usize) {
        if let Some(text) = self.conversation.adopt_suggestion(idx) {
            let preview: String = text.chars().take(30).collect();
            self.notify(format!("✅ Using: {}...", preview));
        }
    }

    pub fn reset_chat(&mut self) {
        if self.is_processing {
            return;
        }
        self.conversation.reset();
        self.notify("🗑️ Chat history cleared!");
    }

    pub fn apply_outcome(&mut self, outcome: TaskOutcome) {
        self.is_processing = false;
        self.status_indicator.set_thinking(false);
        self.status_indicator.clear_status();

        match outcome {
            TaskOutcome::Suggestions(Ok(set)) => {
                if set.is_empty() {
                    self.notify("🤷 No usable suggestions this time. Try again?");
                } else {
                    self.logs.add(format!("Received {} suggestions", set.len()));
                }
                self.conversation.set_suggestions(set);
            }
            TaskOutcome::Suggestions(Err(message))
            | TaskOutcome::Rephrase(Err(message))
            | TaskOutcome::Tone(Err(message))
            | TaskOutcome::KeyCheck(Err(message)) => {
                self.notify(message);
            }
            TaskOutcome::Grammar {
                original,
                fix,
                send_after,
            } => {
                if self.conversation.draft != original {
                    self.notify("✏️ Draft changed while fixing; nothing was replaced or sent.");
                    return;
                }
                if self.conversation.apply_grammar_fix(&fix) {
                    let fixed = format!("✅ Fixed: '{}'", self.conversation.draft);
                    self.notify(fixed);
                } else if !send_after {
                    self.notify("✨ Your message looks good already!");
                }
                if send_after {
                    self.send_draft(Role::Sent);
                }
            }
            TaskOutcome::Mood(mood) => {
                self.logs.add(format!("Mood: {}", mood.summary()));
                self.conversation.set_mood(mood);
            }
            TaskOutcome::QuickReplies(replies) => {
                if replies.is_empty() {
                    self.notify("No quick replies available.");
                    return;
                }
                let items = replies
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| Suggestion::new(format!("Quick {}", i + 1), text))
                    .collect();
                self.conversation.set_suggestions(SuggestionSet::new(items));
            }
            TaskOutcome::Rephrase(Ok(text)) => {
                self.conversation
                    .set_suggestions(SuggestionSet::new(vec![Suggestion::new("Rephrased", text)]));
            }
            TaskOutcome::Tone(Ok(reading)) => {
                self.notify(format!("🎭 Detected tone: {}", reading.tone));
                self.conversation.set_tone(reading);
            }
            TaskOutcome::KeyCheck(Ok(())) => {
                self.logs.add("🔑 API key verified".to_string());
            }
        }
    }
}
