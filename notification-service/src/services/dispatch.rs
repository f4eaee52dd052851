//! Outbound notification dispatch.
//!
//! Delivery in this service is a logged side effect; the trait keeps the
//! seam open so tests can observe or fail dispatches.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Receipt for a dispatched notification.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub notification_id: String,
}

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<DispatchReceipt, DispatchError>;
}

/// Production dispatcher: delivery is a structured log line.
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        let notification_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(
            notification_id = %notification_id,
            user_id = %user_id,
            message = %message,
            "Notification delivered"
        );
        Ok(DispatchReceipt { notification_id })
    }
}

/// Dispatcher that records every delivery and can be told to fail them all.
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn dispatch(
        &self,
        user_id: &str,
        message: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        if self.fail {
            return Err(DispatchError::DeliveryFailed(
                "dispatcher configured to fail".to_string(),
            ));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((user_id.to_string(), message.to_string()));
        Ok(DispatchReceipt {
            notification_id: uuid::Uuid::new_v4().to_string(),
        })
    }
}
