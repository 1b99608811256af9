use crate::app::App;
use crate::constants::{MOOD_DISPLAY_THRESHOLD, QUICK_ACTIONS};
use crate::models::SuggestionCategory;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn category_color(category: SuggestionCategory) -> Color {
    match category {
        SuggestionCategory::Improved => Color::LightMagenta,
        SuggestionCategory::Alternative => Color::LightBlue,
        SuggestionCategory::Other => Color::Gray,
    }
}

pub fn draw_suggestions(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("💡 AI Suggestions");

    let suggestions = app.conversation.suggestions();
    if suggestions.is_empty() {
        let mut lines = vec![
            Line::from("Type a draft and press Ctrl+G for help."),
            Line::from(""),
            Line::from(Span::styled(
                "⚡ Quick Actions",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(QUICK_ACTIONS.iter().enumerate().map(|(i, (label, _))| {
            Line::from(format!("F{} {}", i + 9, label))
        }));

        let hint = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(hint, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("F{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    s.display_label(),
                    Style::default()
                        .fg(category_color(s.category))
                        .add_modifier(Modifier::BOLD),
                ),
            ])];
            for wrapped in textwrap::wrap(&s.text, width.max(8)) {
                lines.push(Line::from(format!("  {}", wrapped)));
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Mood line; readings below the confidence threshold are not shown.
pub fn draw_mood(f: &mut Frame<'_>, area: Rect, app: &App) {
    let text = match app.conversation.mood() {
        Some(mood) if mood.confidence > MOOD_DISPLAY_THRESHOLD => {
            format!("📊 Conversation mood: {}", mood.summary())
        }
        Some(_) => "📊 Mood unclear".to_string(),
        None => "📊 Ctrl+T to read the mood".to_string(),
    };

    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::LightCyan))
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
