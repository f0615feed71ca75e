//! Shelf backend abstraction
//!
//! Choosing an entry in an "add to shelf" dropdown moves a book onto the
//! chosen shelf on the server. [`ShelfBackend`] is that one asynchronous
//! call; [`HttpShelfBackend`] implements it as a form post through any
//! [`HttpClient`].

use async_trait::async_trait;
use bridge_traits::{
    error::BridgeError,
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse},
    platform::PlatformSendSync,
};
use core_runtime::config::ShelfUiConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::BackendError;
use crate::models::ShelfStatus;

/// Longest server message carried into a [`BackendError::Rejected`].
const MAX_MESSAGE_LEN: usize = 200;

/// Request to place `book_id` on the `status` shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub book_id: String,
    pub status: ShelfStatus,
}

impl StatusChange {
    pub fn new(book_id: impl Into<String>, status: impl Into<ShelfStatus>) -> Self {
        Self {
            book_id: book_id.into(),
            status: status.into(),
        }
    }
}

/// Successful outcome of a [`StatusChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReceipt {
    pub book_id: String,
    pub status: ShelfStatus,
    /// Optional confirmation text from the server (`{"message": "..."}`)
    pub message: Option<String>,
}

/// Backend collaborator notified of shelf status changes.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ShelfBackend: PlatformSendSync {
    async fn submit_status(&self, change: &StatusChange) -> Result<StatusReceipt, BackendError>;
}

/// [`ShelfBackend`] posting `book_id` and `status` as form fields.
pub struct HttpShelfBackend {
    client: Arc<dyn HttpClient>,
    url: String,
    timeout: Duration,
}

impl HttpShelfBackend {
    pub fn new(client: Arc<dyn HttpClient>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(client: Arc<dyn HttpClient>, config: &ShelfUiConfig) -> Self {
        Self::new(client, config.status_url(), config.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request(&self, change: &StatusChange) -> HttpRequest {
        HttpRequest::new(HttpMethod::Post, self.url.clone())
            .header("Accept", "application/json")
            .form(&[
                ("book_id", change.book_id.as_str()),
                ("status", change.status.as_str()),
            ])
            .timeout(self.timeout)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ShelfBackend for HttpShelfBackend {
    async fn submit_status(&self, change: &StatusChange) -> Result<StatusReceipt, BackendError> {
        debug!(book = %change.book_id, status = %change.status, url = %self.url, "Submitting status change");

        let response = self
            .client
            .execute(self.build_request(change))
            .await
            .map_err(|err| match err {
                BridgeError::Timeout(_) => BackendError::Timeout,
                other => BackendError::Network(other.to_string()),
            })?;

        match classify(&response) {
            Ok(()) => {
                info!(book = %change.book_id, status = %change.status, "Status change accepted");
                Ok(StatusReceipt {
                    book_id: change.book_id.clone(),
                    status: change.status.clone(),
                    message: confirmation_message(&response),
                })
            }
            Err(err) => {
                warn!(book = %change.book_id, http_status = response.status, error = %err, "Status change failed");
                Err(err)
            }
        }
    }
}

fn classify(response: &HttpResponse) -> Result<(), BackendError> {
    match response.status {
        _ if response.is_success() || response.is_redirect() => Ok(()),
        401 | 403 => Err(BackendError::Unauthorized),
        status if response.is_client_error() => Err(BackendError::Rejected {
            status,
            message: error_message(response),
        }),
        status => Err(BackendError::Server { status }),
    }
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(alias = "detail")]
    message: String,
}

fn confirmation_message(response: &HttpResponse) -> Option<String> {
    response.json::<MessageBody>().ok().map(|body| body.message)
}

fn error_message(response: &HttpResponse) -> String {
    let message = confirmation_message(response)
        .or_else(|| response.text().ok())
        .unwrap_or_default();
    let message = message.trim();
    match message.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((cut, _)) => format!("{}…", &message[..cut]),
        None => message.to_string(),
    }
}
