//! In-memory `ReminderStore` for tests. Records every call and can be told
//! to fail specific operations.

use std::sync::Mutex;

use async_trait::async_trait;

use super::reminder::{Reminder, ReminderDraft, ReminderId};
use super::store::ReminderStore;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Add(String),
    Delete(ReminderId),
    Replace(ReminderId),
}

#[derive(Default)]
struct Inner {
    reminders: Vec<Reminder>,
    next_id: u32,
    calls: Vec<Call>,
    fail_list: bool,
    fail_add: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn with(reminders: Vec<Reminder>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.next_id = reminders.len() as u32;
            inner.reminders = reminders;
        }
        store
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_add(&self, fail: bool) {
        self.inner.lock().unwrap().fail_add = fail;
    }

    pub fn stored(&self) -> Vec<Reminder> {
        self.inner.lock().unwrap().reminders.clone()
    }
}

pub fn reminder(id: &str, title: &str, day: u32, month: u32, year: i32, time: &str) -> Reminder {
    Reminder {
        id: id.into(),
        title: title.to_string(),
        day,
        month,
        year,
        time: time.to_string(),
        notified: false,
    }
}

fn from_draft(id: ReminderId, draft: &ReminderDraft) -> Reminder {
    Reminder {
        id,
        title: draft.title.clone(),
        day: draft.day,
        month: draft.month,
        year: draft.year,
        time: draft.time.clone(),
        notified: false,
    }
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Reminder>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::List);
        if inner.fail_list {
            return Err(StoreError::Connect("memory".to_string()));
        }
        Ok(inner.reminders.clone())
    }

    async fn add(&self, draft: &ReminderDraft) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Add(draft.title.clone()));
        if inner.fail_add {
            return Err(StoreError::Status(500));
        }
        inner.next_id += 1;
        let id = ReminderId(format!("m{}", inner.next_id));
        inner.reminders.push(from_draft(id, draft));
        Ok(())
    }

    async fn delete(&self, id: &ReminderId) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id.clone()));
        inner.reminders.retain(|r| &r.id != id);
        Ok(())
    }

    async fn replace(&self, id: &ReminderId, draft: &ReminderDraft) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Replace(id.clone()));
        match inner.reminders.iter_mut().find(|r| &r.id == id) {
            Some(slot) => {
                *slot = from_draft(id.clone(), draft);
                Ok(())
            }
            None => Err(StoreError::Status(404)),
        }
    }
}
