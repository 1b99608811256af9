use crate::app::App;
use crate::constants::HEADER_TITLE;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Title on the left, active settings on the right.
pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let title = Paragraph::new(HEADER_TITLE)
        .style(
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    let s = &app.settings;
    let autofix = if s.autocorrect_enabled { "✨ Auto-fix" } else { "Auto-fix off" };
    let settings_line = Line::from(vec![
        Span::styled(s.style.label(), Style::default().fg(Color::LightCyan)),
        Span::raw("  "),
        Span::styled(s.length.label(), Style::default().fg(Color::LightCyan)),
        Span::raw("  "),
        Span::styled(s.model.label(), Style::default().fg(Color::LightCyan)),
        Span::raw("  "),
        Span::styled(autofix, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(
        Paragraph::new(settings_line).alignment(Alignment::Right),
        chunks[1],
    );
}
