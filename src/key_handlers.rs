use crate::app::{App, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn suggestion_index(key: &KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::F(n @ 1..=3) => Some(n as usize - 1),
        KeyCode::Char(c @ '1'..='3') if key.modifiers.contains(KeyModifiers::ALT) => {
            Some(c as usize - '1' as usize)
        }
        _ => None,
    }
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    if let Some(idx) = suggestion_index(&key) {
        app.adopt_suggestion(idx);
        return;
    }

    match key.code {
        KeyCode::Esc => app.state = AppState::QuitConfirm,
        KeyCode::Enter => app.submit_draft(),
        KeyCode::Backspace => {
            app.conversation.draft.pop();
        }
        KeyCode::F(n @ 9..=11) => app.use_quick_action(n as usize - 9),
        KeyCode::PageUp | KeyCode::Up => app.scroll_up(),
        KeyCode::PageDown | KeyCode::Down => app.scroll_down(),
        KeyCode::F(5) => {
            app.settings.style = app.settings.style.next();
            app.notify(format!("Style: {}", app.settings.style.label()));
        }
        KeyCode::F(6) => {
            app.settings.length = app.settings.length.next();
            app.notify(format!("Length: {}", app.settings.length.label()));
        }
        KeyCode::F(7) => {
            app.settings.model = app.settings.model.next();
            app.notify(format!("Model: {}", app.settings.model.label()));
        }
        KeyCode::F(8) => {
            app.settings.autocorrect_enabled = !app.settings.autocorrect_enabled;
            let state = if app.settings.autocorrect_enabled { "on" } else { "off" };
            app.notify(format!("Auto-fix on send: {}", state));
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
            'c' => app.state = AppState::QuitConfirm,
            'g' => app.request_suggestions(),
            'f' => app.request_grammar_fix(false),
            't' => app.request_mood(),
            'q' => app.request_quick_replies(),
            'e' => app.request_rephrase(),
            'a' => app.request_tone(),
            'x' => app.conversation.clear_suggestions(),
            'l' => app.reset_chat(),
            'p' => {
                app.partner_mode = !app.partner_mode;
                let who = if app.partner_mode { "Friend" } else { "You" };
                app.notify(format!("Now typing as {}", who));
            }
            'u' => app.scroll_up(),
            'd' => app.scroll_down(),
            _ => {}
        },
        KeyCode::Char(c) => app.conversation.draft.push(c),
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Suggestion, SuggestionSet};
    use crate::settings::{Settings, Style};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        App::new(Settings::default(), None).0
    }

    #[test]
    fn test_typing_edits_draft() {
        let mut app = app();
        for c in "hey!".chars() {
            handle_chat_input(key(KeyCode::Char(c)), &mut app);
        }
        handle_chat_input(key(KeyCode::Backspace), &mut app);
        assert_eq!(app.conversation.draft, "hey");
    }

    #[test]
    fn test_enter_sends() {
        let mut app = app();
        app.conversation.draft = "sounds good".to_string();
        handle_chat_input(key(KeyCode::Enter), &mut app);
        assert_eq!(app.conversation.messages().len(), 2);
    }

    #[test]
    fn test_function_key_adopts_suggestion() {
        let mut app = app();
        app.conversation.set_suggestions(SuggestionSet::new(vec![
            Suggestion::new("Improved", "First idea here"),
            Suggestion::new("Option 1", "Second idea here"),
        ]));
        handle_chat_input(key(KeyCode::F(2)), &mut app);
        assert_eq!(app.conversation.draft, "Second idea here");
    }

    #[test]
    fn test_alt_digit_adopts_suggestion() {
        let mut app = app();
        app.conversation
            .set_suggestions(SuggestionSet::new(vec![Suggestion::new("Improved", "Only idea")]));
        handle_chat_input(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT), &mut app);
        assert_eq!(app.conversation.draft, "Only idea");
    }

    #[test]
    fn test_function_keys_insert_quick_actions() {
        let mut app = app();
        handle_chat_input(key(KeyCode::F(9)), &mut app);
        assert_eq!(app.conversation.draft, "That sounds great!");
        handle_chat_input(key(KeyCode::F(11)), &mut app);
        assert_eq!(app.conversation.draft, "Can't wait! 😊");
    }

    #[test]
    fn test_tone_without_draft_asks_for_text() {
        let mut app = app();
        handle_chat_input(ctrl('a'), &mut app);
        assert!(!app.is_processing);
        assert_eq!(app.status_indicator.status(), "📝 Please type a message first.");
    }

    #[test]
    fn test_ctrl_p_toggles_partner_mode() {
        let mut app = app();
        handle_chat_input(ctrl('p'), &mut app);
        assert!(app.partner_mode);
        handle_chat_input(ctrl('p'), &mut app);
        assert!(!app.partner_mode);
    }

    #[test]
    fn test_settings_keys() {
        let mut app = app();
        handle_chat_input(key(KeyCode::F(5)), &mut app);
        assert_eq!(app.settings.style, Style::Professional);
        handle_chat_input(key(KeyCode::F(8)), &mut app);
        assert!(!app.settings.autocorrect_enabled);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app();
        handle_chat_input(key(KeyCode::Esc), &mut app);
        assert_eq!(app.state, AppState::QuitConfirm);
        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut app);
        assert_eq!(app.state, AppState::Chat);
        handle_chat_input(ctrl('c'), &mut app);
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut app);
        assert_eq!(app.state, AppState::Quit);
    }
}
