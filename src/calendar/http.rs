use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Serialize;

use super::reminder::{Reminder, ReminderDraft, ReminderId};
use super::store::ReminderStore;
use crate::error::{StoreError, StoreResult};

/// `ReminderStore` backed by the reminder HTTP API.
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    id: &'a ReminderId,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reminder-calendar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> StoreResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("Reminder API returned HTTP {status}");
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl ReminderStore for HttpStore {
    async fn list(&self) -> StoreResult<Vec<Reminder>> {
        let url = self.url("/api/reminders");
        debug!("GET {url}");

        let response = self.send(self.http.get(&url)).await?;
        let reminders = response
            .json::<Vec<Reminder>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        debug!("Fetched {} reminders", reminders.len());
        Ok(reminders)
    }

    async fn add(&self, draft: &ReminderDraft) -> StoreResult<()> {
        let url = self.url("/api/add");
        debug!("POST {url} ({})", draft.summary());

        self.send(self.http.post(&url).json(draft)).await?;
        Ok(())
    }

    async fn delete(&self, id: &ReminderId) -> StoreResult<()> {
        let url = self.url("/api/delete");
        debug!("POST {url} (id {id})");

        self.send(self.http.post(&url).json(&DeleteRequest { id })).await?;
        Ok(())
    }

    async fn replace(&self, id: &ReminderId, draft: &ReminderDraft) -> StoreResult<()> {
        let url = self.url(&format!("/api/reminders/{id}"));
        debug!("PUT {url} ({})", draft.summary());

        self.send(self.http.put(&url).json(draft)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let store = HttpStore::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.url("/api/add"), "http://localhost:3000/api/add");
    }

    #[test]
    fn delete_body_carries_only_the_id() {
        let id = ReminderId::from("65f1c2");
        let body = serde_json::to_value(DeleteRequest { id: &id }).unwrap();
        assert_eq!(body, serde_json::json!({ "id": "65f1c2" }));
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // Grab a free port, then release it so nothing listens there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let store = HttpStore::new(&format!("http://127.0.0.1:{port}"), Duration::from_millis(500)).unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Connect(_) | StoreError::Timeout));
    }
}
