use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::truncate;
use crate::calendar::Reminder;
use crate::theme;

/// Side panel with the reminders of the selected day.
pub struct DayView;

impl DayView {
    pub fn render(frame: &mut Frame, area: Rect, date: NaiveDate, reminders: &[&Reminder]) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let n = reminders.len();
        let count = if n == 0 {
            String::new()
        } else {
            format!(" {} reminder{} ", n, if n == 1 { "" } else { "s" })
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(count, t.dim)))
            .borders(Borders::ALL)
            .border_style(t.border);

        if reminders.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("No reminders").style(t.dim), inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = reminders
            .iter()
            .map(|r| {
                let title_style = if r.notified {
                    Style::default().add_modifier(Modifier::DIM)
                } else {
                    Style::default()
                };
                let mut spans = vec![
                    Span::styled(format!(" {} ", r.time), t.reminder),
                    Span::styled(truncate(&r.title, inner_w.saturating_sub(8)), title_style),
                ];
                if r.notified && inner_w >= r.title.chars().count() + 17 {
                    spans.push(Span::styled(" (alerted)", t.dim));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
