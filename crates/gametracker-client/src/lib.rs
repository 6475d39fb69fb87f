//! HTTP client for the Gametracker store service
//!
//! Thin blocking wrapper over the store's `/games` surface. Any transport
//! or server failure maps onto [`ClientError`]; there is no retry logic,
//! the caller surfaces the message and moves on.

use gametracker_collection::{EntryDraft, GameEntry};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Client for one store service instance
pub struct StoreClient {
    base_url: String,
    http: Client,
}

impl StoreClient {
    /// Create a client for the store at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(format!("gametracker/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Persist a new entry; the store assigns an id when the draft has none
    pub fn create_entry(&self, draft: &EntryDraft) -> Result<GameEntry, ClientError> {
        let response = self
            .http
            .post(format!("{}/games", self.base_url))
            .json(draft)
            .send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    /// Fetch the full entry collection, newest first
    pub fn list_entries(&self) -> Result<Vec<GameEntry>, ClientError> {
        let response = self.http.get(format!("{}/games", self.base_url)).send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    /// Merge a draft into a stored entry
    ///
    /// `Ok(None)` when the store has no entry with that id.
    pub fn update_entry(
        &self,
        id: &str,
        draft: &EntryDraft,
    ) -> Result<Option<GameEntry>, ClientError> {
        let response = self
            .http
            .put(format!("{}/games/{}", self.base_url, id))
            .json(draft)
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response)?;
        Ok(Some(response.json()?))
    }

    /// Delete an entry; deleting an unknown id succeeds
    pub fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/games/{}", self.base_url, id))
            .send()?;
        check_status(response)?;
        Ok(())
    }
}

/// Map a non-success status onto `ClientError::Rejected`
fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = extract_error_message(&body);
    tracing::warn!(status = status.as_u16(), %message, "store request rejected");

    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Pull the message out of a `{"error": …}` body, falling back to the raw text
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "persistence failure".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = StoreClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:4000");
    }

    #[test]
    fn test_extract_error_message_from_json_body() {
        assert_eq!(
            extract_error_message(r#"{"error":"UNIQUE constraint failed"}"#),
            "UNIQUE constraint failed"
        );
    }

    #[test]
    fn test_extract_error_message_fallbacks() {
        assert_eq!(extract_error_message("plain failure"), "plain failure");
        assert_eq!(extract_error_message(""), "persistence failure");
        assert_eq!(extract_error_message(r#"{"other":1}"#), r#"{"other":1}"#);
    }
}
