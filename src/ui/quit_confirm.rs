use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_quit_confirm(f: &mut Frame<'_>, area: Rect) {
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new("🚪 Leave this conversation?\n\nThe chat is not saved.\n'y' quit · 'n' stay")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Quit")
                .style(Style::default().fg(Color::LightYellow).bg(Color::Black)),
        )
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
