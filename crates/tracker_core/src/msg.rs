use crate::{Generation, QueryFailure, StatusReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin tracking `task_id`, or re-check it immediately.
    StartOrRefresh(String),
    /// Re-check the active task (manual "check again").
    CheckAgain,
    /// Drop the active task and any pending work.
    Reset,
    /// The submission form started a brand-new job.
    NewSubmission,
    /// The host came up already knowing a task id (e.g. after a redirect).
    PageLoaded { known_task_id: Option<String> },
    /// A status query finished, successfully or not.
    StatusResolved {
        generation: Generation,
        result: Result<StatusReply, QueryFailure>,
    },
    /// The re-check timer armed for `generation` elapsed.
    TimerFired { generation: Generation },
}
