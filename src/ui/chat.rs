use crate::app::App;
use crate::chat_message::{render_bubble, render_typing_preview};
use crate::constants::WRITING_ASSIST_MIN_CHARS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("💬 Chat Simulation")
        .style(Style::default().fg(Color::LightYellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(inner);

    draw_messages(f, chunks[0], app);

    app.status_indicator.update_spinner();
    app.status_indicator.render(f, chunks[1]);

    draw_input(f, chunks[2], app);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let mut lines: Vec<Line> = Vec::new();
    for message in app.conversation.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_bubble(message, area.width));
    }

    if app.conversation.has_draft() {
        lines.push(Line::from(""));
        lines.extend(render_typing_preview(
            &app.conversation.draft,
            app.partner_mode,
            area.width,
        ));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }

    f.render_widget(Paragraph::new(lines).scroll((app.chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let (title, prefix_style) = if app.partner_mode {
        ("✏️ Typing as Friend", Style::default().fg(Color::LightGreen))
    } else {
        ("✏️ Compose Your Reply", Style::default().fg(Color::DarkGray))
    };

    let mut title = title.to_string();
    let stats = app.conversation.draft_stats();
    if stats.chars > WRITING_ASSIST_MIN_CHARS {
        title.push_str(&format!(" · {} words · {} chars", stats.words, stats.chars));
    }
    if let Some(tone) = app.conversation.draft_tone() {
        title.push_str(&format!(" · 🎭 {}", tone));
    }

    let input_block = Block::default().borders(Borders::ALL).title(title);
    let inner = input_block.inner(area);

    let prefix = "→ ";
    let draft = app.conversation.draft.as_str();
    let visible_width = inner.width.saturating_sub(prefix.width() as u16);
    let text_width = draft.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    let input = Line::from(vec![
        Span::styled(prefix, prefix_style),
        Span::styled(draft, Style::default().fg(Color::White)),
    ]);

    f.render_widget(
        Paragraph::new(input)
            .block(input_block)
            .scroll((0, scroll_offset)),
        area,
    );

    let cursor_x = inner.x + prefix.width() as u16 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x.min(inner.x + inner.width.saturating_sub(1)), inner.y));
}
