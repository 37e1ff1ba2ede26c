use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::truncate;
use crate::calendar::Reminder;
use crate::theme;

/// Every reminder, with edit/delete on the selected row.
pub struct ReminderList;

impl ReminderList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        reminders: &[&Reminder],
        selected_index: usize,
        focused: bool,
    ) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 25 {
            format!(" All Reminders ({}) ", reminders.len())
        } else {
            " Reminders ".to_string()
        };

        let border_style = if focused { t.alert } else { t.border };
        let hints = if focused && w >= 30 {
            " e:Edit d:Delete v:Close "
        } else {
            ""
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(hints, t.dim)))
            .borders(Borders::ALL)
            .border_style(border_style);

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
                let when = format!(" {} {} ", r.date_display(), r.time);
                let title_w = inner_w.saturating_sub(when.chars().count() + 1);
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {}", truncate(&r.title, title_w)), Style::default()),
                    Span::styled(when, t.dim),
                ]))
            })
            .collect();

        let highlight = if focused { t.selected } else { t.highlight };
        let list = List::new(items).block(block).highlight_style(highlight);

        let mut state = ListState::default().with_selected(Some(selected_index.min(reminders.len() - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
