// src/prompts.rs
//
// Turns conversation history, the in-progress draft and the user's settings
// into completion requests. Everything here is pure string building.

use crate::api::CompletionRequest;
use crate::constants::{
    FAST_MODEL, FRIEND_SPEAKER, MOOD_CONTEXT_MESSAGES, QUICK_REPLIES_MAX_TOKENS, SEED_GREETING,
    TONE_MAX_TOKENS, TYPING_MARKER, YOU_SPEAKER,
};
use crate::models::{ChatMessage, Role};
use crate::settings::{Settings, Style};

fn speaker(role: Role) -> &'static str {
    match role {
        Role::Received => FRIEND_SPEAKER,
        Role::Sent => YOU_SPEAKER,
    }
}

/// `Speaker: text` lines for the last `window` messages, or the seed
/// greeting when there is no history yet.
fn history_lines(history: &[ChatMessage], window: usize) -> Vec<String> {
    if history.is_empty() {
        return vec![format!("{}: {}", FRIEND_SPEAKER, SEED_GREETING)];
    }

    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .map(|m| format!("{}: {}", speaker(m.role), m.text))
        .collect()
}

/// Renders the conversation context followed by the draft marked as
/// still being typed.
pub fn render_context(history: &[ChatMessage], draft: &str, context_window: usize) -> String {
    let mut lines = history_lines(history, context_window);
    lines.push(format!("{}: {} {}", YOU_SPEAKER, TYPING_MARKER, draft));
    lines.join("\n")
}

pub fn suggestion_system_prompt(settings: &Settings) -> String {
    format!(
        "You are a helpful chat assistant. Provide natural, engaging suggestions that fit the conversation context.\n\
         Style: {}\n\
         Length: {}\n\
         \n\
         Always format your response as exactly three lines:\n\
         **✨ Improved:** [enhanced version of the draft]\n\
         **💡 Option 1:** [alternative reply 1]\n\
         **💡 Option 2:** [alternative reply 2]",
        settings.style.description(),
        settings.length.description()
    )
}

/// Request for one improved rewrite plus two alternatives.
pub fn build_suggestion_request(
    history: &[ChatMessage],
    draft: &str,
    settings: &Settings,
) -> CompletionRequest {
    let context = render_context(history, draft, settings.context_window);
    let user_content = format!(
        "Conversation context:\n{}\n\n\
         The user is drafting: \"{}\"\n\n\
         Please provide:\n\
         1. An improved version of their draft (if grammar/style needs fixing)\n\
         2. 2 alternative reply suggestions",
        context, draft
    );

    CompletionRequest {
        system_prompt: Some(suggestion_system_prompt(settings)),
        user_content,
        model: settings.model.model_id().to_string(),
        max_tokens: settings.max_response_tokens,
        temperature: settings.temperature,
        summary: "suggestions",
    }
}

/// Request for a grammar/spelling fix. The model must answer with the
/// corrected text only.
pub fn build_grammar_request(draft: &str, settings: &Settings) -> CompletionRequest {
    CompletionRequest {
        system_prompt: Some(format!(
            "Fix grammar and spelling. Make it sound {}. Keep the same meaning. \
             Return only the corrected text, nothing else: no quotes, no labels, no explanations.",
            settings.style.description()
        )),
        user_content: draft.to_string(),
        model: settings.model.model_id().to_string(),
        max_tokens: settings.max_response_tokens,
        temperature: settings.temperature,
        summary: "grammar_fix",
    }
}

/// Request for a mood reading of the last few messages, answered as JSON.
pub fn build_mood_request(history: &[ChatMessage], settings: &Settings) -> CompletionRequest {
    let context = history_lines(history, MOOD_CONTEXT_MESSAGES).join("\n");

    CompletionRequest {
        system_prompt: Some(
            "Analyze the mood and tone of this conversation.\n\
             Return only a single JSON object, with no other text, of the form:\n\
             {\"mood\": \"<positive|negative|neutral|excited|confused|romantic|professional>\", \"confidence\": <0.0-1.0>}"
                .to_string(),
        ),
        user_content: format!("Conversation:\n{}", context),
        model: settings.model.model_id().to_string(),
        max_tokens: settings.max_response_tokens,
        temperature: settings.temperature,
        summary: "mood_analysis",
    }
}

/// Request for three short canned replies to the latest message.
pub fn build_quick_replies_request(
    history: &[ChatMessage],
    settings: &Settings,
) -> CompletionRequest {
    let context = history_lines(history, settings.context_window).join("\n");

    CompletionRequest {
        system_prompt: Some(format!(
            "You are a helpful chat assistant. Respond in a {} manner with {} responses.",
            Style::Casual.description(),
            "short"
        )),
        user_content: format!(
            "Based on this conversation context, suggest 3 brief, natural responses (each under 10 words):\n\n\
             Context:\n{}\n\n\
             Format as simple lines without numbering or formatting.",
            context
        ),
        model: FAST_MODEL.to_string(),
        max_tokens: QUICK_REPLIES_MAX_TOKENS,
        temperature: settings.temperature,
        summary: "quick_replies",
    }
}

/// One-word tone reading of the draft. Always on the Fast model.
pub fn build_tone_request(draft: &str, settings: &Settings) -> CompletionRequest {
    CompletionRequest {
        system_prompt: Some(format!(
            "You are a helpful chat assistant. Respond in a {} manner with {} responses.",
            Style::Casual.description(),
            "short"
        )),
        user_content: format!("Analyze the tone of this text in one word: '{}'", draft),
        model: FAST_MODEL.to_string(),
        max_tokens: TONE_MAX_TOKENS,
        temperature: settings.temperature,
        summary: "tone",
    }
}

/// Request for one alternative phrasing of the draft.
pub fn build_rephrase_request(draft: &str, settings: &Settings) -> CompletionRequest {
    CompletionRequest {
        system_prompt: Some(format!(
            "You are a helpful chat assistant. Respond in a {} manner with {} responses. \
             Return only the rephrased message.",
            settings.style.description(),
            settings.length.description()
        )),
        user_content: format!(
            "Rephrase this message in a different way while keeping the same meaning: '{}'",
            draft
        ),
        model: settings.model.model_id().to_string(),
        max_tokens: settings.max_response_tokens,
        temperature: settings.temperature,
        summary: "rephrase",
    }
}
