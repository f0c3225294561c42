use crate::TaskId;

/// Toolkit-neutral description of what the status area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewDescriptor {
    Checking,
    /// Task finished; the result artifact for `task_id` can be fetched.
    Success { task_id: TaskId },
    /// Server-reported error text, shown verbatim.
    Error { message: String },
    GenericFailure { reason: FailureReason },
    Progress { can_retry: bool },
    /// Unrecognised status, passed through as-is.
    Raw { status: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Backend reported `status == "error"` without further detail.
    TaskFailed,
    /// The status query itself failed (transport or decode).
    CheckFailed,
}
