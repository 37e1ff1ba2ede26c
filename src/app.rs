use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use color_eyre::Result;
use log::info;

use crate::calendar::grid::days_in_month;
use crate::calendar::{
    DueWatcher, HttpStore, MonthGrid, Reminder, ReminderClient, ReminderStore, WeekStart,
};
use crate::components::popup::{Notification, NotificationKind};
use crate::components::reminder_form::ReminderFormState;
use crate::config::Config;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    List,
    Form,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub grid: MonthGrid,
    pub form_state: Option<ReminderFormState>,
    pub show_list: bool,
    pub list_index: usize,
    pub show_help: bool,
    pub notification: Option<Notification>,
    bell_pending: bool,
    client: ReminderClient,
    watcher: DueWatcher,
    week_start: WeekStart,
    popup_ttl: Duration,
}

impl App {
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = HttpStore::new(&config.api_url, config.request_timeout())?;
        Ok(Self::new(
            Arc::new(store),
            config,
            Local::now().date_naive(),
        ))
    }

    pub fn new(store: Arc<dyn ReminderStore>, config: &Config, today: NaiveDate) -> Self {
        let client = ReminderClient::new(store, config.update_strategy);
        let grid = MonthGrid::render(today.month(), today.year(), &[], config.week_start);

        Self {
            running: true,
            input_mode: InputMode::Normal,
            selected_date: today,
            today,
            grid,
            form_state: None,
            show_list: false,
            list_index: 0,
            show_help: false,
            notification: None,
            bell_pending: false,
            client,
            watcher: DueWatcher::new(config.watch_interval()),
            week_start: config.week_start,
            popup_ttl: config.popup_duration(),
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.client.reminders()
    }

    /// Cause of the last failed fetch, while the view shows stale data.
    pub fn sync_error(&self) -> Option<&str> {
        self.client.sync_error()
    }

    /// Refetch the reminder list and redraw the grid from it.
    pub async fn refresh(&mut self) {
        self.client.refresh().await;
        self.after_sync();
    }

    fn after_sync(&mut self) {
        self.watcher.restore_notified(self.client.reminders_mut());
        self.rebuild_grid();
        let len = self.list_entries().len();
        self.list_index = self.list_index.min(len.saturating_sub(1));
    }

    fn rebuild_grid(&mut self) {
        self.grid = MonthGrid::render(
            self.selected_date.month(),
            self.selected_date.year(),
            self.client.reminders(),
            self.week_start,
        );
    }

    /// Reminders of the selected day, earliest first.
    pub fn day_reminders(&self) -> Vec<&Reminder> {
        let d = self.selected_date;
        let mut day: Vec<&Reminder> = self
            .reminders()
            .iter()
            .filter(|r| r.is_on(d.day(), d.month(), d.year()))
            .collect();
        day.sort_by(|a, b| a.time.cmp(&b.time));
        day
    }

    /// All reminders in date order, as shown in the list view.
    pub fn list_entries(&self) -> Vec<&Reminder> {
        let mut all: Vec<&Reminder> = self.reminders().iter().collect();
        all.sort_by(|a, b| {
            (a.year, a.month, a.day, &a.time).cmp(&(b.year, b.month, b.day, &b.time))
        });
        all
    }

    pub fn notify(&mut self, title: &str, message: impl Into<String>, kind: NotificationKind) {
        self.notification = Some(Notification::new(title, message, kind, self.popup_ttl));
    }

    /// Whether a due alert asked for the bell since the last call.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Periodic work: due-reminder check and popup expiry.
    pub fn tick(&mut self, now: Instant, clock: NaiveDateTime) {
        if clock.date() != self.today {
            self.today = clock.date();
        }

        let alerts = self.watcher.poll(now, clock, self.client.reminders_mut());
        if let Some(alert) = alerts.last() {
            let extra = alerts.len() - 1;
            let message = if extra > 0 {
                format!("{} ({} more due)", alert.when, extra)
            } else {
                alert.when.clone()
            };
            self.notification = Some(Notification::new(
                alert.title.clone(),
                message,
                NotificationKind::Alert,
                self.popup_ttl,
            ));
            self.bell_pending = true;
        } else if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    // ── Navigation ──

    pub async fn next_day(&mut self) {
        if let Some(d) = self.selected_date.succ_opt() {
            self.select_date(d).await;
        }
    }

    pub async fn prev_day(&mut self) {
        if let Some(d) = self.selected_date.pred_opt() {
            self.select_date(d).await;
        }
    }

    pub async fn next_week(&mut self) {
        self.select_date(self.selected_date + chrono::Duration::weeks(1)).await;
    }

    pub async fn prev_week(&mut self) {
        self.select_date(self.selected_date - chrono::Duration::weeks(1)).await;
    }

    pub async fn next_month(&mut self) {
        let (y, m) = (self.selected_date.year(), self.selected_date.month());
        let (year, month) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
        self.select_date(clamp_day(year, month, self.selected_date.day())).await;
    }

    pub async fn prev_month(&mut self) {
        let (y, m) = (self.selected_date.year(), self.selected_date.month());
        let (year, month) = if m == 1 { (y - 1, 12) } else { (y, m - 1) };
        self.select_date(clamp_day(year, month, self.selected_date.day())).await;
    }

    pub async fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.select_date(self.today).await;
    }

    /// Moving into another month refetches the list.
    async fn select_date(&mut self, date: NaiveDate) {
        let month_changed = (date.year(), date.month()) != (self.grid.year, self.grid.month);
        self.selected_date = date;
        if month_changed {
            self.refresh().await;
        }
    }

    // ── List view ──

    pub fn toggle_list(&mut self) {
        self.show_list = !self.show_list;
        self.input_mode = if self.show_list {
            InputMode::List
        } else {
            InputMode::Normal
        };
    }

    pub fn list_down(&mut self) {
        let len = self.list_entries().len();
        if self.list_index + 1 < len {
            self.list_index += 1;
        }
    }

    pub fn list_up(&mut self) {
        self.list_index = self.list_index.saturating_sub(1);
    }

    fn selected_entry(&self) -> Option<&Reminder> {
        self.list_entries().get(self.list_index).copied()
    }

    pub fn edit_selected(&mut self) {
        let Some(form) = self.selected_entry().map(ReminderFormState::edit) else {
            return;
        };
        self.form_state = Some(form);
        self.input_mode = InputMode::Form;
        self.notify(
            "Edit Mode",
            "Make changes and press Enter to update the reminder",
            NotificationKind::Info,
        );
    }

    pub async fn delete_selected(&mut self) {
        let Some(id) = self.selected_entry().map(|r| r.id.clone()) else {
            return;
        };
        let result = self.client.delete(&id).await;
        self.after_sync();
        match result {
            Ok(()) => self.notify("Reminder Deleted", "Removed successfully.", NotificationKind::Info),
            Err(e) => self.notify("Delete Failed", e.to_string(), NotificationKind::Warning),
        }
    }

    // ── Form ──

    pub fn open_form(&mut self) {
        self.form_state = Some(ReminderFormState::new(self.selected_date));
        self.input_mode = InputMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = if self.show_list {
            InputMode::List
        } else {
            InputMode::Normal
        };
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.next_field();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.prev_field();
        }
    }

    /// Send the form. The edit target travels with the form state; on a
    /// validation error the form stays open untouched.
    pub async fn submit_form(&mut self) {
        let Some(mut form) = self.form_state.take() else {
            return;
        };

        let result = match &form.editing {
            Some(id) => self.client.update(id, &form.input).await,
            None => self.client.add(&form.input).await,
        };

        match result {
            Ok(draft) => {
                self.after_sync();
                let title = if form.is_editing() {
                    "Reminder Updated"
                } else {
                    "Reminder Added"
                };
                self.notify(title, draft.summary(), NotificationKind::Info);
                self.close_form();
            }
            Err(ClientError::Validation(e)) => {
                self.notify(e.title(), e.to_string(), NotificationKind::Warning);
                self.form_state = Some(form);
            }
            Err(ClientError::Store(e)) => {
                self.after_sync();
                // A half-applied edit may have removed the original; a retry
                // then has to create it again.
                if form.editing.as_ref().is_some_and(|id| self.client.find(id).is_none()) {
                    info!("Edited reminder no longer exists, retry will add it");
                    form.editing = None;
                }
                self.notify("Save Failed", e.to_string(), NotificationKind::Warning);
                self.form_state = Some(form);
            }
        }
    }
}

fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(days_in_month(year, month)).max(1);
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::memory::{reminder, Call, MemoryStore};
    use crate::calendar::UpdateStrategy;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn app_with(reminders: Vec<Reminder>, config: Config, today: NaiveDate) -> (Arc<MemoryStore>, App) {
        let store = Arc::new(MemoryStore::with(reminders));
        let mut app = App::new(store.clone(), &config, today);
        app.refresh().await;
        store.clear_calls();
        (store, app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form_input_char(c);
        }
    }

    #[tokio::test]
    async fn grid_shows_fetched_reminders() {
        let (_, app) = app_with(
            vec![reminder("1", "Dentist", 14, 10, 2026, "09:30")],
            Config::default(),
            date(2026, 10, 19),
        )
        .await;

        let (row, col) = app.grid.position_of(14).unwrap();
        assert_eq!(app.grid.weeks[row][col].labels(), ["Dentist (09:30)"]);
    }

    #[tokio::test]
    async fn month_navigation_wraps_year_and_refetches() {
        let (store, mut app) = app_with(vec![], Config::default(), date(2026, 12, 31)).await;

        app.next_month().await;
        assert_eq!(app.selected_date, date(2027, 1, 31));
        assert_eq!((app.grid.year, app.grid.month), (2027, 1));

        app.prev_month().await;
        app.prev_month().await;
        assert_eq!(app.selected_date, date(2026, 11, 30));

        assert_eq!(store.calls(), vec![Call::List, Call::List, Call::List]);
    }

    #[tokio::test]
    async fn moving_within_month_does_not_refetch() {
        let (store, mut app) = app_with(vec![], Config::default(), date(2026, 10, 19)).await;

        app.next_day().await;
        app.prev_week().await;
        assert_eq!(app.selected_date, date(2026, 10, 13));
        assert!(store.calls().is_empty());

        app.next_week().await;
        app.next_week().await;
        app.next_week().await;
        assert_eq!(app.selected_date.month(), 11);
        assert_eq!(store.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn submitting_blank_form_keeps_it_open() {
        let (store, mut app) = app_with(vec![], Config::default(), date(2026, 10, 19)).await;

        app.open_form();
        app.submit_form().await;

        assert!(store.calls().is_empty());
        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app.form_state.is_some());
        let note = app.notification.as_ref().unwrap();
        assert_eq!(note.title, "Missing Fields");
        assert_eq!(note.kind, NotificationKind::Warning);
    }

    #[tokio::test]
    async fn bad_time_is_reported_as_invalid_time() {
        let (store, mut app) = app_with(vec![], Config::default(), date(2026, 10, 19)).await;

        app.open_form();
        type_text(&mut app, "Walk");
        app.form_state.as_mut().unwrap().input.time = "25:00".to_string();
        app.submit_form().await;

        assert!(store.calls().is_empty());
        assert!(app.form_state.is_some());
        assert_eq!(app.notification.as_ref().unwrap().title, "Invalid Time");
    }

    #[tokio::test]
    async fn impossible_date_is_reported_as_invalid_date() {
        let (store, mut app) = app_with(vec![], Config::default(), date(2026, 10, 19)).await;

        app.open_form();
        let form = app.form_state.as_mut().unwrap();
        form.input.title = "Walk".to_string();
        form.input.day = "31".to_string();
        form.input.month = "2".to_string();
        form.input.time = "10:00".to_string();
        app.submit_form().await;

        assert!(store.calls().is_empty());
        assert_eq!(app.notification.as_ref().unwrap().title, "Invalid Date");
    }

    #[tokio::test]
    async fn new_reminder_lands_on_selected_day() {
        let (_, mut app) = app_with(vec![], Config::default(), date(2026, 10, 19)).await;

        app.open_form();
        type_text(&mut app, "Walk");
        app.form_tab();
        app.form_tab();
        app.form_tab();
        app.form_tab();
        type_text(&mut app, "18:45");
        app.submit_form().await;

        assert!(app.form_state.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        let day: Vec<String> = app.day_reminders().iter().map(|r| r.label()).collect();
        assert_eq!(day, ["Walk (18:45)"]);
        assert_eq!(app.notification.as_ref().unwrap().title, "Reminder Added");
    }

    #[tokio::test]
    async fn edit_from_list_replaces_reminder() {
        let (store, mut app) = app_with(
            vec![reminder("5", "Gym", 20, 10, 2026, "07:00")],
            Config::default(),
            date(2026, 10, 19),
        )
        .await;

        app.toggle_list();
        app.edit_selected();
        assert_eq!(app.form_state.as_ref().unwrap().submit_label(), "Update Reminder");

        app.form_state.as_mut().unwrap().input.time = "07:30".to_string();
        app.submit_form().await;

        assert_eq!(store.calls(), vec![Call::Replace("5".into()), Call::List]);
        assert_eq!(app.input_mode, InputMode::List);
        assert_eq!(app.reminders()[0].time, "07:30");
    }

    #[tokio::test]
    async fn failed_delete_then_add_edit_turns_retry_into_add() {
        let config = Config {
            update_strategy: UpdateStrategy::DeleteThenAdd,
            ..Config::default()
        };
        let (store, mut app) =
            app_with(vec![reminder("5", "Gym", 20, 10, 2026, "07:00")], config, date(2026, 10, 19)).await;

        app.toggle_list();
        app.edit_selected();
        store.fail_add(true);
        app.submit_form().await;

        assert!(app.reminders().is_empty());
        let form = app.form_state.as_ref().unwrap();
        assert!(form.editing.is_none());
        assert_eq!(form.submit_label(), "Add Event");

        store.fail_add(false);
        app.submit_form().await;
        assert_eq!(app.reminders().len(), 1);
        assert_eq!(app.reminders()[0].title, "Gym");
    }

    #[tokio::test]
    async fn delete_from_list_removes_selected() {
        let (_, mut app) = app_with(
            vec![
                reminder("a", "Later", 25, 10, 2026, "09:00"),
                reminder("b", "Sooner", 2, 10, 2026, "09:00"),
            ],
            Config::default(),
            date(2026, 10, 19),
        )
        .await;

        app.toggle_list();
        app.list_down();
        app.delete_selected().await;

        let titles: Vec<&str> = app.list_entries().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Sooner"]);
        assert_eq!(app.list_index, 0);
    }

    #[tokio::test]
    async fn tick_raises_alert_once_and_rings() {
        let (_, mut app) = app_with(
            vec![reminder("1", "Tea", 19, 10, 2026, "16:05")],
            Config::default(),
            date(2026, 10, 19),
        )
        .await;
        let clock = date(2026, 10, 19).and_hms_opt(16, 5, 3).unwrap();
        let start = Instant::now();

        app.tick(start, clock);
        assert!(app.take_bell());
        assert!(!app.take_bell());
        let note = app.notification.as_ref().unwrap();
        assert_eq!(note.kind, NotificationKind::Alert);
        assert_eq!(note.title, "Tea");

        app.refresh().await;
        app.tick(start + Duration::from_secs(10), clock);
        assert!(!app.take_bell());
    }

    #[tokio::test]
    async fn offline_fetch_keeps_grid_and_reports() {
        let (store, mut app) = app_with(
            vec![reminder("1", "Cached", 3, 10, 2026, "10:00")],
            Config::default(),
            date(2026, 10, 19),
        )
        .await;
        store.fail_list(true);

        app.refresh().await;

        assert!(app.sync_error().is_some());
        assert_eq!(app.grid.day_cells().filter(|c| !c.labels().is_empty()).count(), 1);
    }
}
