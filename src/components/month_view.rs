use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::calendar::grid::month_name;
use crate::calendar::MonthGrid;
use crate::theme;

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        selected_day: u32,
        today: NaiveDate,
        stale: bool,
    ) {
        let t = theme::current();

        let mut title = vec![Span::styled(
            format!(" {} {} ", month_name(grid.month), grid.year),
            t.header,
        )];
        if stale {
            title.push(Span::styled(" offline ", t.error));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if grid.weeks.is_empty() || inner.height < 2 {
            return;
        }

        let [header_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        let columns = || Layout::horizontal([Constraint::Ratio(1, 7); 7]);

        for (name, cell_area) in grid.week_start.day_names().iter().zip(columns().split(header_area).iter()) {
            let header = Line::from(Span::styled(*name, t.header)).centered();
            frame.render_widget(Paragraph::new(header), *cell_area);
        }

        let n = grid.weeks.len() as u32;
        let week_rows = Layout::vertical((0..n).map(|_| Constraint::Ratio(1, n))).split(body);

        for (week, row_area) in grid.weeks.iter().zip(week_rows.iter()) {
            for (cell, cell_area) in week.iter().zip(columns().split(*row_area).iter()) {
                if let Some(day) = cell.day() {
                    let date = NaiveDate::from_ymd_opt(grid.year, grid.month, day);
                    let state = CellState {
                        selected: day == selected_day,
                        today: date == Some(today),
                    };
                    render_day(frame, *cell_area, day, cell.labels(), state);
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
struct CellState {
    selected: bool,
    today: bool,
}

fn render_day(frame: &mut Frame, area: Rect, day: u32, labels: &[String], state: CellState) {
    let t = theme::current();
    let w = area.width as usize;
    let room = area.height.saturating_sub(1) as usize;

    let number_style = match (state.selected, state.today) {
        (true, true) => t.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        (true, false) => t.selected,
        (false, true) => t.today,
        (false, false) => Style::default(),
    };

    let mut first = vec![Span::styled(format!("{:>2}", day), number_style)];
    let hidden = labels.len().saturating_sub(room);
    if !labels.is_empty() && (room == 0 || w < 6) {
        first.push(Span::styled(format!(" {}*", labels.len()), t.reminder));
    }

    let mut lines = vec![Line::from(first)];
    if w >= 6 && room > 0 {
        let shown = if hidden > 0 { room - 1 } else { labels.len() };
        for label in labels.iter().take(shown) {
            lines.push(Line::from(Span::styled(truncate(label, w), t.reminder)));
        }
        if hidden > 0 {
            lines.push(Line::from(Span::styled(
                format!("+{} more", labels.len() - shown),
                t.dim,
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}
