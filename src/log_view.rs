use crate::constants::LOG_VIEW_CAPACITY;
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::collections::VecDeque;

/// In-app activity feed shown in the side panel. Mirrors what goes to the
/// log file at `info`.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: VecDeque<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: String) {
        log::info!("{}", entry);
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry);
        self.entries.push_back(stamped);
        while self.entries.len() > LOG_VIEW_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Draws the most recent entries that fit, newest at the bottom.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(self.entries.len().saturating_sub(visible))
            .map(|entry| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.as_str()),
                ])
            })
            .collect();

        let para = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP).title("Activity"))
            .wrap(Wrap { trim: true });
        f.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_bounded() {
        let mut view = LogView::new();
        for i in 0..(LOG_VIEW_CAPACITY + 25) {
            view.add(format!("entry {}", i));
        }
        assert_eq!(view.entries.len(), LOG_VIEW_CAPACITY);
        assert!(view.entries.front().unwrap().ends_with("entry 25"));
    }
}
