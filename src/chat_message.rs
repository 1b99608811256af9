use crate::constants::{FRIEND_SPEAKER, YOU_SPEAKER};
use crate::models::{ChatMessage, Role};
use chrono::Local;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const BUBBLE_RATIO: f32 = 0.75;

fn base_style(role: Role) -> Style {
    Style::default().fg(match role {
        Role::Sent => Color::Rgb(255, 223, 128),
        Role::Received => Color::Rgb(144, 238, 144),
    })
}

/// Left pad so a sent bubble hugs the right edge.
fn pad_for(role: Role, line_width: usize, area_width: usize) -> String {
    match role {
        Role::Sent => " ".repeat(area_width.saturating_sub(line_width)),
        Role::Received => String::new(),
    }
}

/// Renders one message as a bubble: header, wrapped body, footer. Sent
/// messages are right-aligned, received ones left-aligned.
pub fn render_bubble(message: &ChatMessage, area_width: u16) -> Vec<Line<'static>> {
    let area_width = area_width as usize;
    let style = base_style(message.role);
    let wrap_width = ((area_width as f32 * BUBBLE_RATIO) as usize).saturating_sub(2).max(8);

    let speaker = match message.role {
        Role::Sent => YOU_SPEAKER,
        Role::Received => FRIEND_SPEAKER,
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M").to_string();

    let mut lines = Vec::new();

    let header = format!("┌─ {} · {}", speaker, time);
    lines.push(Line::from(vec![
        Span::raw(pad_for(message.role, header.width(), area_width)),
        Span::styled(header, style.add_modifier(Modifier::BOLD)),
    ]));

    let body: Vec<String> = wrap(&message.text, wrap_width)
        .into_iter()
        .map(|l| format!("│ {}", l))
        .collect();
    let body_width = body.iter().map(|l| l.width()).max().unwrap_or(0);

    for text in body {
        lines.push(Line::from(vec![
            Span::raw(pad_for(message.role, body_width, area_width)),
            Span::styled(text, style),
        ]));
    }

    let footer = "╰─".to_string();
    lines.push(Line::from(vec![
        Span::raw(pad_for(message.role, body_width, area_width)),
        Span::styled(footer, style.add_modifier(Modifier::DIM)),
    ]));

    lines
}

/// The draft as it will appear once sent, dimmed.
pub fn render_typing_preview(draft: &str, partner_mode: bool, area_width: u16) -> Vec<Line<'static>> {
    let speaker = if partner_mode { FRIEND_SPEAKER } else { YOU_SPEAKER };
    let text = format!("{} is typing… {}", speaker, draft);
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    wrap(&text, (area_width as usize).max(8))
        .into_iter()
        .map(|l| Line::from(Span::styled(l.into_owned(), style)))
        .collect()
}
