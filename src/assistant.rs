// src/assistant.rs

use crate::{
    api::{CompletionRequest, LlmClient},
    errors::DraftResult,
    interpreter::{
        interpret_grammar_fix, interpret_mood, interpret_tone, parse_quick_replies,
        parse_suggestions,
    },
    models::{ChatMessage, GrammarFix, MoodAnalysis, SuggestionSet},
    prompts::{
        build_grammar_request, build_mood_request, build_quick_replies_request,
        build_rephrase_request, build_suggestion_request, build_tone_request,
    },
    settings::Settings,
};
use log::{info, warn};

pub const EMPTY_DRAFT_MESSAGE: &str = "📝 Please type a message first.";
pub const UNKNOWN_TONE_MESSAGE: &str = "🎭 Couldn't read the tone this time.";

/// Runs one request per call: build the prompt, call the API once, interpret
/// the answer. API failures come back as user-facing text, never as errors.
pub struct DraftAssistant {
    client: LlmClient,
}

impl DraftAssistant {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    pub fn from_config() -> DraftResult<Self> {
        Ok(Self::new(LlmClient::from_config()?))
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, String> {
        match self.client.chat_completion(request).await {
            Ok(completion) => {
                if let Some(usage) = completion.usage {
                    info!(
                        "{}: tokens in={} out={}",
                        request.summary, usage.input_tokens, usage.output_tokens
                    );
                }
                Ok(completion.text)
            }
            Err(e) => {
                warn!("{} failed: {}", request.summary, e);
                Err(e.user_message())
            }
        }
    }

    /// Improved rewrite plus alternatives for `draft`. An empty set means the
    /// model answered but nothing usable could be extracted.
    pub async fn suggest(
        &self,
        history: &[ChatMessage],
        draft: &str,
        settings: &Settings,
    ) -> Result<SuggestionSet, String> {
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(EMPTY_DRAFT_MESSAGE.to_string());
        }

        let request = build_suggestion_request(history, draft, settings);
        let raw = self.complete(&request).await?;
        let suggestions = parse_suggestions(&raw);
        if suggestions.is_empty() {
            warn!("no usable suggestions in response: {:?}", raw);
        }
        Ok(suggestions)
    }

    /// Grammar-corrected draft. Any failure leaves the draft as it was.
    pub async fn fix_grammar(&self, draft: &str, settings: &Settings) -> GrammarFix {
        if draft.trim().is_empty() {
            return GrammarFix::Unchanged;
        }

        let request = build_grammar_request(draft.trim(), settings);
        match self.complete(&request).await {
            Ok(raw) => interpret_grammar_fix(draft, &raw),
            Err(_) => GrammarFix::Unchanged,
        }
    }

    /// Best-effort mood of the recent conversation.
    pub async fn analyze_mood(&self, history: &[ChatMessage], settings: &Settings) -> MoodAnalysis {
        if history.is_empty() {
            return MoodAnalysis::default();
        }

        let request = build_mood_request(history, settings);
        match self.complete(&request).await {
            Ok(raw) => interpret_mood(&raw),
            Err(_) => MoodAnalysis::default(),
        }
    }

    /// Up to three short canned replies; empty on any failure.
    pub async fn quick_replies(&self, history: &[ChatMessage], settings: &Settings) -> Vec<String> {
        let request = build_quick_replies_request(history, settings);
        match self.complete(&request).await {
            Ok(raw) => parse_quick_replies(&raw),
            Err(_) => Vec::new(),
        }
    }

    /// One-word tone of the draft.
    pub async fn analyze_tone(&self, draft: &str, settings: &Settings) -> Result<String, String> {
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(EMPTY_DRAFT_MESSAGE.to_string());
        }

        let raw = self.complete(&build_tone_request(draft, settings)).await?;
        interpret_tone(&raw).ok_or_else(|| UNKNOWN_TONE_MESSAGE.to_string())
    }

    /// Checks the configured key. Errors come back as the fixed user message
    /// for their category.
    pub async fn check_key(&self) -> Result<(), String> {
        self.client.validate_api_key().await.map_err(|e| {
            warn!("api key check failed: {}", e);
            e.user_message()
        })
    }

    pub async fn rephrase(&self, draft: &str, settings: &Settings) -> Result<String, String> {
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(EMPTY_DRAFT_MESSAGE.to_string());
        }

        let request = build_rephrase_request(draft, settings);
        let raw = self.complete(&request).await?;
        match interpret_grammar_fix(draft, &raw) {
            GrammarFix::Changed(text) => Ok(text),
            GrammarFix::Unchanged => Ok(draft.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mood, SuggestionCategory};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_string_contains, method},
        Mock, MockServer, ResponseTemplate,
    };

    fn assistant(uri: &str) -> DraftAssistant {
        let client = LlmClient::new(uri, "test-key", Duration::from_secs(5), Duration::ZERO).unwrap();
        DraftAssistant::new(client)
    }

    fn reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        }))
    }

    #[tokio::test]
    async fn test_suggest_parses_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("[typing] pretty good thx"))
            .respond_with(reply(
                "**✨ Improved:** Pretty good, thanks!\n**💡 Option 1:** Not bad, you?\n**💡 Option 2:** Great day so far!",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let history = vec![ChatMessage::received("Hey! How's your day going?")];
        let set = assistant(&server.uri())
            .suggest(&history, "pretty good thx", &Settings::default())
            .await
            .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.items[0].category, SuggestionCategory::Improved);
        assert_eq!(set.items[2].text, "Great day so far!");
    }

    #[tokio::test]
    async fn test_suggest_maps_auth_failure_to_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = assistant(&server.uri())
            .suggest(&[], "hello there", &Settings::default())
            .await
            .unwrap_err();
        assert_eq!(err, "❌ Invalid API key. Please check your key.");
    }

    #[tokio::test]
    async fn test_suggest_rejects_empty_draft_without_calling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("unused"))
            .expect(0)
            .mount(&server)
            .await;

        let err = assistant(&server.uri())
            .suggest(&[], "   ", &Settings::default())
            .await
            .unwrap_err();
        assert_eq!(err, EMPTY_DRAFT_MESSAGE);
    }

    #[tokio::test]
    async fn test_unparseable_suggestions_is_empty_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("I'm not sure what you mean."))
            .mount(&server)
            .await;

        let set = assistant(&server.uri())
            .suggest(&[], "hmm ok", &Settings::default())
            .await
            .unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_fix_grammar_changed_and_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("I am good."))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let a = assistant(&server.uri());
        assert_eq!(
            a.fix_grammar("i am good", &Settings::default()).await,
            GrammarFix::Changed("I am good.".to_string())
        );
        assert_eq!(
            a.fix_grammar("i am good", &Settings::default()).await,
            GrammarFix::Unchanged
        );
    }

    #[tokio::test]
    async fn test_mood_best_effort() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply(r#"{"mood": "romantic", "confidence": 0.81}"#))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(reply("the vibe is good"))
            .mount(&server)
            .await;

        let a = assistant(&server.uri());
        let history = vec![ChatMessage::received("miss you already")];

        let first = a.analyze_mood(&history, &Settings::default()).await;
        assert_eq!(first.mood, Mood::Romantic);

        let second = a.analyze_mood(&history, &Settings::default()).await;
        assert_eq!(second, MoodAnalysis::default());
    }

    #[tokio::test]
    async fn test_mood_skips_call_for_empty_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("{}"))
            .expect(0)
            .mount(&server)
            .await;

        let mood = assistant(&server.uri()).analyze_mood(&[], &Settings::default()).await;
        assert_eq!(mood, MoodAnalysis::default());
    }

    #[tokio::test]
    async fn test_analyze_tone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Analyze the tone of this text in one word"))
            .respond_with(reply("Playful."))
            .expect(1)
            .mount(&server)
            .await;

        let a = assistant(&server.uri());
        assert_eq!(
            a.analyze_tone("race you there!", &Settings::default()).await.unwrap(),
            "Playful"
        );
        assert_eq!(
            a.analyze_tone("  ", &Settings::default()).await.unwrap_err(),
            EMPTY_DRAFT_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_check_key_reports_category_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = assistant(&server.uri()).check_key().await.unwrap_err();
        assert_eq!(err, "🚫 Server/Model error. Please try again later.");
    }

    #[tokio::test]
    async fn test_quick_replies_and_rephrase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("suggest 3 brief"))
            .respond_with(reply("Sounds fun!\nI'm in\nMaybe later"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("Rephrase this message"))
            .respond_with(reply("Catch you later!"))
            .mount(&server)
            .await;

        let a = assistant(&server.uri());
        let history = vec![ChatMessage::received("party tonight?")];
        assert_eq!(
            a.quick_replies(&history, &Settings::default()).await,
            vec!["Sounds fun!", "I'm in", "Maybe later"]
        );
        assert_eq!(
            a.rephrase("see you later", &Settings::default()).await.unwrap(),
            "Catch you later!"
        );
    }
}
