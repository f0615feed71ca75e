//! Transient notification shown after a shelf update.

use core_shelf::backend::StatusReceipt;
use core_shelf::error::BackendError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }

    /// Toast for a finished status change. The server's own confirmation
    /// text is preferred when it sent one.
    pub fn for_outcome(outcome: &Result<StatusReceipt, BackendError>) -> Self {
        match outcome {
            Ok(receipt) => match &receipt.message {
                Some(message) if !message.trim().is_empty() => Self::info(message.trim()),
                _ => Self::info(format!("Added to \"{}\"", receipt.status.label())),
            },
            Err(err) => Self::error(err.user_message()),
        }
    }
}
