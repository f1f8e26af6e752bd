use thiserror::Error;

/// Failure taxonomy for scheduling operations.
///
/// Every variant is recovered at the `SchedulingService` boundary and turned
/// into a structured `success: false` response; none of these terminate the
/// caller's session.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("slot {time} on {date} is already booked")]
    Conflict { date: String, time: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{count} appointments match an under-specified query")]
    AmbiguousMatch { count: usize },
    #[error("no effective changes were requested")]
    NoChange,
    #[error("message `{0}` has already been responded to")]
    AlreadyResponded(String),
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ScheduleError {
    /// Stable label for log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "conflict",
            Self::NotFound(_) => "not_found",
            Self::AmbiguousMatch { .. } => "ambiguous_match",
            Self::NoChange => "no_change",
            Self::AlreadyResponded(_) => "already_responded",
            Self::Validation(_) => "validation",
        }
    }
}
