// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;
pub mod suggestions;

use crate::app::{App, AppState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Renders the whole screen.
pub fn draw(f: &mut Frame, app: &mut App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(f.area());

    header::draw_header(f, vertical[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(vertical[1]);

    chat::draw_chat(f, body[0], app);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(10),
        ])
        .split(body[1]);

    suggestions::draw_suggestions(f, side[0], app);
    suggestions::draw_mood(f, side[1], app);
    app.logs.render(f, side[2]);

    footer::draw_footer(f, vertical[2], app);

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, centered(f.area(), 40, 7));
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
