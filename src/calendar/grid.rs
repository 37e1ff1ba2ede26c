use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use super::reminder::Reminder;

/// First column of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn day_names(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    /// Column index of `weekday`.
    pub fn column(self, weekday: Weekday) -> usize {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday() as usize,
            WeekStart::Monday => weekday.num_days_from_monday() as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Blank,
    Day { day: u32, labels: Vec<String> },
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Day { day, .. } => Some(*day),
            GridCell::Blank => None,
        }
    }

    pub fn labels(&self) -> &[String] {
        match self {
            GridCell::Day { labels, .. } => labels,
            GridCell::Blank => &[],
        }
    }
}

/// A month laid out as week rows of seven cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_start: WeekStart,
    pub weeks: Vec<Vec<GridCell>>,
}

impl MonthGrid {
    /// Lay out `month` (1-12) of `year` and attach the labels of the
    /// reminders that fall on each day. An out-of-range month yields no rows.
    pub fn render(month: u32, year: i32, reminders: &[Reminder], week_start: WeekStart) -> Self {
        let weeks = match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(first) => build_weeks(first, reminders, week_start),
            None => Vec::new(),
        };

        Self {
            year,
            month,
            week_start,
            weeks,
        }
    }
}

fn build_weeks(first: NaiveDate, reminders: &[Reminder], week_start: WeekStart) -> Vec<Vec<GridCell>> {
    let (year, month) = (first.year(), first.month());
    let offset = week_start.column(first.weekday());
    let total_days = days_in_month(year, month);

    let mut cells: Vec<GridCell> = Vec::with_capacity(42);
    cells.extend(std::iter::repeat_n(GridCell::Blank, offset));

    for day in 1..=total_days {
        let labels = reminders
            .iter()
            .filter(|r| r.is_on(day, month, year))
            .map(Reminder::label)
            .collect();
        cells.push(GridCell::Day { day, labels });
    }

    let trailing = (7 - cells.len() % 7) % 7;
    cells.extend(std::iter::repeat_n(GridCell::Blank, trailing));

    cells.chunks(7).map(|week| week.to_vec()).collect()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (NaiveDate::from_ymd_opt(year, month, 1), next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::memory::reminder;
    use proptest::prelude::*;

    impl MonthGrid {
        pub fn day_cells(&self) -> impl Iterator<Item = &GridCell> {
            self.weeks.iter().flatten().filter(|c| c.day().is_some())
        }

        /// Row and column of `day`, if it is in this month.
        pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
            self.weeks.iter().enumerate().find_map(|(row, week)| {
                week.iter()
                    .position(|c| c.day() == Some(day))
                    .map(|col| (row, col))
            })
        }
    }

    #[test]
    fn february_2026_starts_on_sunday_and_fills_four_rows() {
        let grid = MonthGrid::render(2, 2026, &[], WeekStart::Sunday);
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.weeks[0][0].day(), Some(1));
        assert_eq!(grid.weeks[3][6].day(), Some(28));
    }

    #[test]
    fn monday_start_shifts_columns() {
        // 1 June 2025 is a Sunday.
        let sunday = MonthGrid::render(6, 2025, &[], WeekStart::Sunday);
        let monday = MonthGrid::render(6, 2025, &[], WeekStart::Monday);

        assert_eq!(sunday.position_of(1), Some((0, 0)));
        assert_eq!(monday.position_of(1), Some((0, 6)));
        assert_eq!(monday.weeks.len(), 6);
    }

    #[test]
    fn labels_attach_to_matching_day_only() {
        let reminders = vec![
            reminder("1", "Dentist", 14, 3, 2025, "09:30"),
            reminder("2", "Gym", 14, 3, 2025, "18:00"),
            reminder("3", "Wrong month", 14, 4, 2025, "09:30"),
            reminder("4", "Wrong year", 14, 3, 2024, "09:30"),
        ];
        let grid = MonthGrid::render(3, 2025, &reminders, WeekStart::Sunday);

        let (row, col) = grid.position_of(14).unwrap();
        assert_eq!(grid.weeks[row][col].labels(), ["Dentist (09:30)", "Gym (18:00)"]);

        let labelled = grid.day_cells().filter(|c| !c.labels().is_empty()).count();
        assert_eq!(labelled, 1);
    }

    #[test]
    fn invalid_month_renders_nothing() {
        let grid = MonthGrid::render(13, 2025, &[], WeekStart::Sunday);
        assert!(grid.weeks.is_empty());
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    fn week_start() -> impl Strategy<Value = WeekStart> {
        prop_oneof![Just(WeekStart::Sunday), Just(WeekStart::Monday)]
    }

    proptest! {
        #[test]
        fn grid_shape_matches_month(month in 1u32..=12, year in 1900i32..2200, start in week_start()) {
            let grid = MonthGrid::render(month, year, &[], start);
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let offset = start.column(first.weekday());
            let days = days_in_month(year, month) as usize;

            prop_assert_eq!(grid.weeks.len(), (offset + days).div_ceil(7));
            prop_assert!(grid.weeks.iter().all(|w| w.len() == 7));
            prop_assert_eq!(grid.day_cells().count(), days);

            let numbered: Vec<u32> = grid.day_cells().filter_map(GridCell::day).collect();
            let expected: Vec<u32> = (1..=days as u32).collect();
            prop_assert_eq!(numbered, expected);
        }

        #[test]
        fn label_present_iff_date_matches(
            month in 1u32..=12,
            year in 2000i32..2030,
            r_day in 1u32..=31,
            r_month in 1u32..=12,
            r_year in 1999i32..2031,
        ) {
            let r = reminder("x", "Probe", r_day, r_month, r_year, "12:00");
            let grid = MonthGrid::render(month, year, std::slice::from_ref(&r), WeekStart::Sunday);

            for cell in grid.weeks.iter().flatten() {
                let has_label = cell.labels().iter().any(|l| l == "Probe (12:00)");
                let should = cell.day() == Some(r_day) && r_month == month && r_year == year;
                prop_assert_eq!(has_label, should);
            }
        }
    }
}
