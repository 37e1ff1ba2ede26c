use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDateTime};
use log::info;

use super::reminder::{Reminder, ReminderId};

/// A reminder whose time has come.
#[derive(Debug, Clone, PartialEq)]
pub struct DueAlert {
    pub id: ReminderId,
    pub title: String,
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Slot {
    id: ReminderId,
    day: u32,
    month: u32,
    year: i32,
    time: String,
}

impl Slot {
    fn of(r: &Reminder) -> Self {
        Self {
            id: r.id.clone(),
            day: r.day,
            month: r.month,
            year: r.year,
            time: r.time.clone(),
        }
    }
}

/// Compares the wall clock with the reminder list at a fixed interval.
///
/// Fired slots are remembered for the whole session, so a reminder that is
/// fetched again after its alert does not alert twice. Editing the date or
/// time makes a new slot that can fire again.
pub struct DueWatcher {
    interval: Duration,
    last_check: Option<Instant>,
    fired: HashSet<Slot>,
}

impl DueWatcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_check: None,
            fired: HashSet::new(),
        }
    }

    /// Run `check` if the interval has elapsed since the previous run.
    pub fn poll(
        &mut self,
        now: Instant,
        clock: NaiveDateTime,
        reminders: &mut [Reminder],
    ) -> Vec<DueAlert> {
        match self.last_check {
            Some(last) if now.duration_since(last) < self.interval => Vec::new(),
            _ => {
                self.last_check = Some(now);
                self.check(clock, reminders)
            }
        }
    }

    pub fn check(&mut self, clock: NaiveDateTime, reminders: &mut [Reminder]) -> Vec<DueAlert> {
        let (day, month, year) = (clock.day(), clock.month(), clock.year());
        let time = clock.format("%H:%M").to_string();

        let mut alerts = Vec::new();
        for r in reminders.iter_mut() {
            if r.notified || !r.is_on(day, month, year) || r.time != time {
                continue;
            }
            r.notified = true;
            if !self.fired.insert(Slot::of(r)) {
                continue;
            }

            info!("Reminder {} due: {} at {}", r.id, r.title, r.time);
            alerts.push(DueAlert {
                id: r.id.clone(),
                title: r.title.clone(),
                when: format!("{}/{}/{} at {}", day, month, year, time),
            });
        }
        alerts
    }

    /// Mark freshly fetched reminders that already alerted this session.
    pub fn restore_notified(&self, reminders: &mut [Reminder]) {
        for r in reminders.iter_mut() {
            if self.fired.contains(&Slot::of(r)) {
                r.notified = true;
            }
        }
    }
}
