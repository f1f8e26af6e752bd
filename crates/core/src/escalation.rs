//! Manager escalation channel.
//!
//! Out-of-policy requests are queued for a human operator. Priority is
//! caller-declared; no routing logic lives here.

use crate::domain::message::{ManagerMessage, Priority};
use crate::errors::ScheduleError;

#[derive(Clone, Debug, Default)]
pub struct EscalationQueue {
    messages: Vec<ManagerMessage>,
}

impl EscalationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a pending message with a fresh id. Always succeeds.
    pub fn escalate(
        &mut self,
        client_request: impl Into<String>,
        reason: impl Into<String>,
        priority: Priority,
    ) -> ManagerMessage {
        let message = ManagerMessage::new(client_request, reason, priority);
        self.messages.push(message.clone());
        message
    }

    /// Records the manager's reply on a pending message. Unknown ids and
    /// already-responded messages are rejected, never silently ignored.
    pub fn respond(
        &mut self,
        message_id: &str,
        response: impl Into<String>,
    ) -> Result<ManagerMessage, ScheduleError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id.0 == message_id)
            .ok_or_else(|| ScheduleError::NotFound(format!("manager message {message_id}")))?;
        message.record_response(response)?;
        Ok(message.clone())
    }

    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_pending()).count()
    }

    pub fn messages(&self) -> &[ManagerMessage] {
        &self.messages
    }
}
