use std::fmt;

use crate::TrackerError;

/// Opaque identifier of one backend job. Only non-emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, TrackerError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TrackerError::Validation);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Business-level status reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Done,
    Error,
    Unknown(String),
}

impl TaskStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "in_progress" => TaskStatus::Pending,
            "done" => TaskStatus::Done,
            "error" => TaskStatus::Error,
            other => TaskStatus::Unknown(other.to_string()),
        }
    }
}

/// A successfully decoded status response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReply {
    Status(TaskStatus),
    /// The payload carried an `error` field.
    Rejected { message: String },
}

/// Why a status query produced no usable reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    Transport { message: String },
    Decode { message: String },
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::Transport { message } => write!(f, "transport failure: {message}"),
            QueryFailure::Decode { message } => write!(f, "decode failure: {message}"),
        }
    }
}
