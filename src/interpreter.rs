// src/interpreter.rs
//
// Turns free-text completions back into structured results. The model's
// output drifts, so every parser here is tolerant: lines that don't fit are
// dropped, never reported as errors.

use crate::constants::{MAX_QUICK_REPLIES, MAX_QUICK_REPLY_CHARS, MIN_SUGGESTION_CHARS};
use crate::models::{GrammarFix, Mood, MoodAnalysis, Suggestion, SuggestionSet};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static DECORATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*+|</?strong>").expect("decoration pattern is valid"));

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•]+|\d+[.)])\s*").expect("list marker pattern is valid"));

const LABEL_ICONS: [char; 2] = ['✨', '💡'];
const QUOTE_PAIRS: [(char, char); 3] = [('"', '"'), ('\'', '\''), ('“', '”')];

fn is_candidate_line(line: &str) -> bool {
    line.contains("**") || line.contains("<strong>") || line.contains("Improved:") || line.contains("Option")
}

/// Removes one layer of matching quotes around `text`.
fn strip_enclosing_quotes(text: &str) -> &str {
    for (open, close) in QUOTE_PAIRS {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            return inner.trim();
        }
    }
    text
}

fn clean_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !LABEL_ICONS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses a suggestions completion into labelled suggestions, in order.
pub fn parse_suggestions(raw: &str) -> SuggestionSet {
    let mut items = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() || !is_candidate_line(line) {
            continue;
        }

        let clean = DECORATION.replace_all(line, "");
        let clean = clean.trim();

        let Some((label, text)) = clean.split_once(':') else {
            debug!("dropping suggestion line without a colon: {:?}", line);
            continue;
        };

        let text = strip_enclosing_quotes(text.trim());
        if text.chars().count() < MIN_SUGGESTION_CHARS {
            debug!("dropping short suggestion: {:?}", text);
            continue;
        }

        items.push(Suggestion::new(clean_label(label), text));
    }

    SuggestionSet::new(items)
}

/// Decides whether a grammar-fix completion actually changed the draft.
pub fn interpret_grammar_fix(original: &str, raw: &str) -> GrammarFix {
    let fixed = raw.trim();
    if fixed.is_empty() || fixed == original.trim() {
        GrammarFix::Unchanged
    } else {
        GrammarFix::Changed(fixed.to_string())
    }
}

#[derive(Deserialize)]
struct RawMood {
    mood: String,
    confidence: f64,
}

/// The outermost `{...}` span, so code fences or a chatty preamble around
/// the object don't defeat parsing.
fn json_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn try_parse_mood(raw: &str) -> Option<MoodAnalysis> {
    let candidate = json_object_span(raw)?;
    let parsed: RawMood = serde_json::from_str(candidate).ok()?;
    let mood = Mood::parse(&parsed.mood)?;
    if !parsed.confidence.is_finite() || !(0.0..=1.0).contains(&parsed.confidence) {
        return None;
    }
    Some(MoodAnalysis {
        mood,
        confidence: parsed.confidence as f32,
    })
}

/// Best-effort mood reading; anything unexpected yields the neutral default.
pub fn interpret_mood(raw: &str) -> MoodAnalysis {
    try_parse_mood(raw).unwrap_or_else(|| {
        debug!("mood response not understood, using default: {:?}", raw);
        MoodAnalysis::default()
    })
}

/// One capitalised tone word from a tone completion, e.g. `"Friendly."` or
/// `**Tone:** warm and upbeat`. `None` when nothing word-like is left.
pub fn interpret_tone(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let clean = DECORATION.replace_all(line, "");
    let clean = strip_enclosing_quotes(clean.trim());
    let clean = clean.rsplit_once(':').map_or(clean, |(_, rest)| rest.trim());

    let word = clean
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '-');
    let mut chars = word.chars();
    let first = chars.next()?;
    Some(
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    )
}

/// Up to three short reply lines, with list markers and quotes removed.
pub fn parse_quick_replies(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .map(|line| LIST_MARKER.replace(line, "").into_owned())
        .map(|line| strip_enclosing_quotes(line.trim()).to_string())
        .filter(|line| !line.is_empty() && line.chars().count() < MAX_QUICK_REPLY_CHARS)
        .take(MAX_QUICK_REPLIES)
        .collect()
}
