use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Responded,
}

/// An out-of-policy request escalated to the human manager.
///
/// The only legal transition is pending -> responded, exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerMessage {
    pub id: MessageId,
    pub client_request: String,
    pub reason: String,
    pub priority: Priority,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl ManagerMessage {
    pub fn new(
        client_request: impl Into<String>,
        reason: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            client_request: client_request.into(),
            reason: reason.into(),
            priority,
            status: MessageStatus::Pending,
            created_at: Utc::now(),
            response: None,
            responded_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    /// Records the manager's reply. A second call is rejected, not ignored.
    pub fn record_response(&mut self, response: impl Into<String>) -> Result<(), ScheduleError> {
        if self.status == MessageStatus::Responded {
            return Err(ScheduleError::AlreadyResponded(self.id.0.clone()));
        }
        self.status = MessageStatus::Responded;
        self.response = Some(response.into());
        self.responded_at = Some(Utc::now());
        Ok(())
    }
}
