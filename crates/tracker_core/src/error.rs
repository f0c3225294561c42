use thiserror::Error;

/// Caller contract violations. These are reported to the caller and never
/// mutate tracker state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("task id must not be empty")]
    Validation,
    #[error("no task is being tracked")]
    NoActiveTask,
}
