// UI Constants
pub const HEADER_TITLE: &str = "draftwise · reply drafting assistant";
pub const LOG_VIEW_CAPACITY: usize = 200;

// API Constants
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 1000;
pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";

pub const FAST_MODEL: &str = "llama-3.1-8b-instant";
pub const SMART_MODEL: &str = "llama-3.1-70b-versatile";
pub const BALANCED_MODEL: &str = "llama-3.1-8b-instant";

// Context Constants
pub const SEED_GREETING: &str = "Hey! How's your day going?";
pub const FRIEND_SPEAKER: &str = "Friend";
pub const YOU_SPEAKER: &str = "You";
pub const TYPING_MARKER: &str = "[typing]";
pub const MOOD_CONTEXT_MESSAGES: usize = 5;

// Fixed request parameters for the side tasks
pub const QUICK_REPLIES_MAX_TOKENS: u32 = 120;
pub const TONE_MAX_TOKENS: u32 = 20;
pub const VALIDATION_MAX_TOKENS: u32 = 5;

// Interpreter Constants
pub const MIN_SUGGESTION_CHARS: usize = 4;
pub const MAX_QUICK_REPLY_CHARS: usize = 50;
pub const MAX_QUICK_REPLIES: usize = 3;
pub const MOOD_DISPLAY_THRESHOLD: f32 = 0.7;

// Canned drafts, usable without an API key: (button label, draft text)
pub const QUICK_ACTIONS: [(&str, &str); 3] = [
    ("👍 Sounds great!", "That sounds great!"),
    ("🤔 Let me think", "Let me think about it and get back to you"),
    ("😊 Can't wait!", "Can't wait! 😊"),
];

// Word/char counts are shown once the draft is longer than this
pub const WRITING_ASSIST_MIN_CHARS: usize = 10;
