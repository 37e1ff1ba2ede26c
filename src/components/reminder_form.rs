use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered;
use crate::calendar::{Reminder, ReminderId, ReminderInput};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Day,
    Month,
    Year,
    Time,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Day,
            FormField::Day => FormField::Month,
            FormField::Month => FormField::Year,
            FormField::Year => FormField::Time,
            FormField::Time => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Time,
            FormField::Day => FormField::Title,
            FormField::Month => FormField::Day,
            FormField::Year => FormField::Month,
            FormField::Time => FormField::Year,
        }
    }
}

/// Form contents plus the reminder being edited, if any. The whole state is
/// handed to the submit handler, which decides between add and update.
#[derive(Debug, Clone)]
pub struct ReminderFormState {
    pub input: ReminderInput,
    pub editing: Option<ReminderId>,
    pub active_field: FormField,
}

impl ReminderFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            input: ReminderInput::for_date(date),
            editing: None,
            active_field: FormField::Title,
        }
    }

    pub fn edit(reminder: &Reminder) -> Self {
        Self {
            input: reminder.to_input(),
            editing: Some(reminder.id.clone()),
            active_field: FormField::Title,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Reminder"
        } else {
            "Add Event"
        }
    }

    fn active_value(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.input.title,
            FormField::Day => &mut self.input.day,
            FormField::Month => &mut self.input.month,
            FormField::Year => &mut self.input.year,
            FormField::Time => &mut self.input.time,
        }
    }

    /// Numeric fields only take digits, the time field also takes ':'.
    pub fn input_char(&mut self, c: char) {
        let accepted = match self.active_field {
            FormField::Title => !c.is_control(),
            FormField::Day | FormField::Month => c.is_ascii_digit() && self.input_len() < 2,
            FormField::Year => c.is_ascii_digit() && self.input_len() < 4,
            FormField::Time => (c.is_ascii_digit() || c == ':') && self.input_len() < 5,
        };
        if accepted {
            self.active_value().push(c);
        }
    }

    fn input_len(&mut self) -> usize {
        self.active_value().chars().count()
    }

    pub fn backspace(&mut self) {
        self.active_value().pop();
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &ReminderFormState) {
        let form_area = centered(area, area.width.clamp(30, 50), area.height.clamp(11, 13));

        frame.render_widget(Clear, form_area);

        let title = if state.is_editing() {
            " Edit Reminder "
        } else {
            " New Reminder "
        };
        let accent = theme::current().alert;
        let block = Block::default()
            .title(title)
            .title_style(accent)
            .borders(Borders::ALL)
            .border_style(accent.remove_modifier(Modifier::BOLD));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // day
            Constraint::Length(1), // month
            Constraint::Length(1), // year
            Constraint::Length(1), // time
            Constraint::Length(1),
            Constraint::Length(1), // submit
            Constraint::Length(1),
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let fields = [
            (FormField::Title, "Title:", &state.input.title, ""),
            (FormField::Day, "Day:", &state.input.day, ""),
            (FormField::Month, "Month:", &state.input.month, " (1-12)"),
            (FormField::Year, "Year:", &state.input.year, ""),
            (FormField::Time, "Time:", &state.input.time, " (HH:MM)"),
        ];
        for (i, (field, label, value, hint)) in fields.into_iter().enumerate() {
            render_field(frame, rows[i], label, value, hint, state.active_field == field);
        }

        let button = Line::from(Span::styled(
            format!("[ {} ]", state.submit_label()),
            theme::current().selected.add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(button), rows[6]);

        let dim = theme::current().dim;
        let key = Style::default().add_modifier(Modifier::BOLD);
        let help = Line::from(vec![
            Span::styled("Tab", key),
            Span::styled(":Next ", dim),
            Span::styled("Enter", key),
            Span::styled(":Save ", dim),
            Span::styled("Esc", key),
            Span::styled(":Cancel", dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[8]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, hint: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        theme::current().selected.remove_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
        Span::styled(hint.to_string(), theme::current().dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
