use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with key hints and chat statistics.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = match app.state {
        AppState::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.".to_string(),
        _ => {
            let stats = app.conversation.stats();
            format!(
                "Enter send · ^G help · ^F fix · ^E rephrase · ^A tone · ^Q quick · ^T mood · F1-F3 use · F9-F11 quick actions · ^X clear · ^P partner · ^L reset · F5-F8 settings  |  📊 {} msgs ({} sent, {} received)",
                stats.total, stats.sent, stats.received
            )
        }
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
