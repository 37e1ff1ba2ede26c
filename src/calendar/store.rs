use async_trait::async_trait;

use super::reminder::{Reminder, ReminderDraft, ReminderId};
use crate::error::{StoreError, StoreResult};

/// Remote storage for reminders.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Reminder>>;

    async fn add(&self, draft: &ReminderDraft) -> StoreResult<()>;

    async fn delete(&self, id: &ReminderId) -> StoreResult<()>;

    /// Overwrite the reminder `id` in one call.
    async fn replace(&self, id: &ReminderId, draft: &ReminderDraft) -> StoreResult<()>;
}

/// Result of fetching the reminder list. A failure is kept distinct from an
/// empty list so the UI can tell "no reminders" from "server unreachable".
#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(Vec<Reminder>),
    Failed(StoreError),
}

impl From<StoreResult<Vec<Reminder>>> for FetchOutcome {
    fn from(result: StoreResult<Vec<Reminder>>) -> Self {
        match result {
            Ok(reminders) => FetchOutcome::Loaded(reminders),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}
