use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let t = theme::current();
        let w = area.width as usize;

        let mode_str = match app.input_mode {
            InputMode::Normal => "[Month]",
            InputMode::List => "[List]",
            InputMode::Form => {
                if app.form_state.as_ref().is_some_and(|f| f.is_editing()) {
                    "[Edit Reminder]"
                } else {
                    "[New Reminder]"
                }
            }
        };

        let hints = match app.input_mode {
            InputMode::Normal if w >= 80 => {
                " hjkl:Nav [/]:Mon t:Today n:New v:List r:Refresh ?:Help q:Quit"
            }
            InputMode::Normal if w >= 50 => " [/]:Mon n:New v:List q:Quit",
            InputMode::List if w >= 60 => " jk:Select e:Edit d:Delete n:New v:Close q:Quit",
            InputMode::List if w >= 40 => " e:Edit d:Del v:Close",
            InputMode::Form if w >= 50 => " Tab:Next Enter:Save Esc:Cancel",
            _ => " ?:Help q:Quit",
        };

        let left = format!(" {} ", mode_str);
        let mut spans = vec![Span::styled(left.clone(), t.status)];
        let mut used = left.len();

        if let Some(err) = app.sync_error() {
            let banner = format!(" offline: {} ", err);
            let room = w.saturating_sub(used + hints.len());
            let banner = super::truncate(&banner, room);
            used += banner.chars().count();
            spans.push(Span::styled(banner, t.error));
        }

        let padding = " ".repeat(w.saturating_sub(used + hints.len()));
        spans.push(Span::styled(padding, t.status));
        spans.push(Span::styled(hints, t.status));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(t.status), area);
    }
}
