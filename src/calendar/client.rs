use std::sync::Arc;

use log::{info, warn};
use serde::Deserialize;

use super::reminder::{Reminder, ReminderDraft, ReminderId, ReminderInput};
use super::store::{FetchOutcome, ReminderStore};
use crate::error::{ClientError, StoreError};

/// How an edit reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// One `replace` call.
    #[default]
    Replace,
    /// `delete` followed by `add`. Not atomic: if the add fails after the
    /// delete went through, the reminder is gone.
    DeleteThenAdd,
}

/// Holds the local copy of the reminder list and keeps it in step with the
/// store. Every operation that reaches the store is followed by a refresh.
pub struct ReminderClient {
    store: Arc<dyn ReminderStore>,
    update_strategy: UpdateStrategy,
    reminders: Vec<Reminder>,
    sync_error: Option<String>,
}

impl ReminderClient {
    pub fn new(store: Arc<dyn ReminderStore>, update_strategy: UpdateStrategy) -> Self {
        Self {
            store,
            update_strategy,
            reminders: Vec::new(),
            sync_error: None,
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn reminders_mut(&mut self) -> &mut [Reminder] {
        &mut self.reminders
    }

    pub fn find(&self, id: &ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| &r.id == id)
    }

    /// Why the last refresh failed, while the cache is stale.
    pub fn sync_error(&self) -> Option<&str> {
        self.sync_error.as_deref()
    }

    pub async fn list(&self) -> FetchOutcome {
        self.store.list().await.into()
    }

    /// Fetch the list and replace the cache. On failure the previous list is
    /// kept and the cause recorded. Returns whether the cache was replaced.
    pub async fn refresh(&mut self) -> bool {
        match self.list().await {
            FetchOutcome::Loaded(reminders) => {
                self.reminders = reminders;
                self.sync_error = None;
                true
            }
            FetchOutcome::Failed(e) => {
                warn!("Could not fetch reminders: {e}");
                self.sync_error = Some(e.to_string());
                false
            }
        }
    }

    pub async fn add(&mut self, input: &ReminderInput) -> Result<ReminderDraft, ClientError> {
        let draft = input.validate()?;
        let result = self.store.add(&draft).await;
        self.after_mutation("add", result).await?;
        info!("Added reminder: {}", draft.summary());
        Ok(draft)
    }

    pub async fn update(
        &mut self,
        id: &ReminderId,
        input: &ReminderInput,
    ) -> Result<ReminderDraft, ClientError> {
        let draft = input.validate()?;
        let result = match self.update_strategy {
            UpdateStrategy::Replace => self.store.replace(id, &draft).await,
            UpdateStrategy::DeleteThenAdd => match self.store.delete(id).await {
                Ok(()) => self.store.add(&draft).await.inspect_err(|e| {
                    warn!("Reminder {id} was deleted but re-adding it failed: {e}");
                }),
                Err(e) => Err(e),
            },
        };
        self.after_mutation("update", result).await?;
        info!("Updated reminder {id}: {}", draft.summary());
        Ok(draft)
    }

    pub async fn delete(&mut self, id: &ReminderId) -> Result<(), ClientError> {
        let result = self.store.delete(id).await;
        self.after_mutation("delete", result).await?;
        info!("Deleted reminder {id}");
        Ok(())
    }

    async fn after_mutation(&mut self, op: &str, result: Result<(), StoreError>) -> Result<(), ClientError> {
        if let Err(e) = &result {
            warn!("Reminder {op} failed: {e}");
        }
        self.refresh().await;
        Ok(result?)
    }
}
