use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a party currently stands in the waitlist lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    /// Checked in and waiting for a table.
    Waiting,
    /// Seated at a table.
    Seated,
    /// Left the queue without being seated.
    Cancelled,
}

impl QueueStatus {
    /// Returns the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Waiting => "waiting",
            QueueStatus::Seated => "seated",
            QueueStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(QueueStatus::Waiting),
            "seated" => Some(QueueStatus::Seated),
            "cancelled" => Some(QueueStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One party's waitlist record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: Uuid,
    pub name: String,
    pub party_size: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_request: String,
    pub status: QueueStatus,
    /// Server-assigned at creation, immutable afterwards.
    pub check_in_time: DateTime<Utc>,
    /// Estimated wait in minutes, computed at creation.
    pub estimated_wait_time: u32,
    /// Display number shown to the customer.
    pub queue_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seated_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Epoch seconds after which the store expires the item.
    pub ttl: i64,
}

/// Aggregate statistics over the entries returned by a list call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub total_waiting: usize,
    pub total_seated: usize,
    /// Mean `estimated_wait_time` over waiting entries, 0.0 when none wait.
    pub average_wait_time: f64,
}
