//! Queued log entry structure

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Delivery outcome of a queued entry.
///
/// A failed attempt does not move the entry anywhere; it stays `Pending` and
/// is eligible again on the next scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        DeliveryStatus::Pending
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Pending => write!(f, "Pending"),
            DeliveryStatus::Delivered => write!(f, "Delivered"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Sequence number assigned by the queue, unique per dispatcher
    pub id: u64,
    pub application_key: String,
    pub system_key: String,
    pub payload: Value,
    pub raise_on_failure: bool,
    pub status: DeliveryStatus,
    pub enqueued_at: DateTime<Utc>,
    /// Attempts made during the current drain session
    pub session_attempts: u32,
    /// Attempts made over the lifetime of the entry
    pub total_attempts: u32,
}

impl LogEntry {
    pub fn new(
        application_key: impl Into<String>,
        system_key: impl Into<String>,
        payload: Value,
        raise_on_failure: bool,
    ) -> Self {
        Self {
            id: 0,
            application_key: application_key.into(),
            system_key: system_key.into(),
            payload,
            raise_on_failure,
            status: DeliveryStatus::Pending,
            enqueued_at: Utc::now(),
            session_attempts: 0,
            total_attempts: 0,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pending
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.status == DeliveryStatus::Delivered
    }
}
