use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationKind {
    Info,
    Warning,
    Alert,
}

/// A transient message shown in the corner until it expires.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    shown_at: Instant,
    ttl: Duration,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: NotificationKind, ttl: Duration) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }
}

pub struct Popup;

impl Popup {
    pub fn render(frame: &mut Frame, area: Rect, note: &Notification) {
        let w = area.width.min(44);
        let body_w = w.saturating_sub(2).max(1) as usize;
        let body_lines = note.message.chars().count().div_ceil(body_w).max(1) as u16;
        let h = (body_lines + 2).min(area.height.saturating_sub(1));
        let x = area.x + area.width.saturating_sub(w + 1);
        let popup_area = Rect::new(x, area.y + 1, w, h);

        frame.render_widget(Clear, popup_area);

        let t = theme::current();
        let accent = match note.kind {
            NotificationKind::Info => t.reminder,
            NotificationKind::Warning => t.error.bg.map(|c| Style::default().fg(c)).unwrap_or(t.alert),
            NotificationKind::Alert => t.alert,
        };

        let block = Block::default()
            .title(format!(" {} ", note.title))
            .title_style(accent.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(accent);

        let para = Paragraph::new(Line::from(note.message.clone()))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(para, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let note = Notification::new("Reminder Added", "Walk", NotificationKind::Info, Duration::from_secs(12));
        let shown = note.shown_at;
        assert!(!note.is_expired(shown + Duration::from_secs(11)));
        assert!(note.is_expired(shown + Duration::from_secs(12)));
    }
}
