pub mod day_view;
pub mod month_view;
pub mod popup;
pub mod reminder_form;
pub mod reminder_list;
pub mod status_bar;

pub use day_view::DayView;
pub use month_view::MonthView;
pub use popup::Popup;
pub use reminder_form::ReminderForm;
pub use reminder_list::ReminderList;
pub use status_bar::StatusBar;

use ratatui::layout::Rect;

/// Shorten `s` to at most `max` characters, ending in "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let mut out: String = s.chars().take(max - 3).collect();
        out.push_str("...");
        out
    } else {
        s.chars().take(max).collect()
    }
}

/// A `w` x `h` rectangle centered in `area`, clipped to it.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Dentist (09:30)", 20), "Dentist (09:30)");
        assert_eq!(truncate("Dentist (09:30)", 10), "Dentist...");
        assert_eq!(truncate("Café crème", 6), "Caf...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn centered_stays_inside() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered(area, 80, 40), area);
    }
}
