pub mod client;
pub mod grid;
pub mod http;
#[cfg(test)]
pub mod memory;
pub mod reminder;
pub mod store;
pub mod watcher;

pub use client::{ReminderClient, UpdateStrategy};
pub use grid::{MonthGrid, WeekStart};
pub use http::HttpStore;
pub use reminder::{Reminder, ReminderId, ReminderInput};
pub use store::ReminderStore;
pub use watcher::DueWatcher;
