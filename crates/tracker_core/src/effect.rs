use std::time::Duration;

use crate::{Generation, TaskId, ViewDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand a view to the render callback.
    Render(ViewDescriptor),
    /// Issue one status query; the reply must come back tagged with `generation`.
    QueryStatus {
        generation: Generation,
        task_id: TaskId,
    },
    /// Arm the single re-check timer. Any previous timer is released first.
    ArmTimer {
        generation: Generation,
        delay: Duration,
    },
    CancelTimer,
}
