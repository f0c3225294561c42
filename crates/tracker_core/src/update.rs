use crate::{
    Effect, FailureReason, Msg, Phase, QueryFailure, StatusReply, TaskId, TaskStatus,
    TrackerError, TrackerState, ViewDescriptor,
};

/// Applies a message to the tracker state and returns the effects to run, in order.
///
/// Contract violations are returned as errors and leave `state` untouched.
pub fn update(state: &mut TrackerState, msg: Msg) -> Result<Vec<Effect>, TrackerError> {
    let effects = match msg {
        Msg::StartOrRefresh(raw) => {
            let task_id = TaskId::parse(raw)?;
            start_check(state, task_id)
        }
        Msg::CheckAgain => {
            let task_id = state
                .active_task_id()
                .cloned()
                .ok_or(TrackerError::NoActiveTask)?;
            start_check(state, task_id)
        }
        Msg::PageLoaded { known_task_id } => match known_task_id {
            Some(raw) if !raw.is_empty() => start_check(state, TaskId::parse(raw)?),
            _ => Vec::new(),
        },
        Msg::Reset | Msg::NewSubmission => {
            if state.reset() {
                vec![Effect::CancelTimer]
            } else {
                Vec::new()
            }
        }
        Msg::StatusResolved { generation, result } => {
            if generation != state.generation()
                || !state.is_in_flight()
                || state.phase() != Phase::Checking
            {
                // Superseded or reset while the query was out.
                return Ok(Vec::new());
            }
            apply_result(state, result)
        }
        Msg::TimerFired { generation } => {
            if state.pending_timer() != Some(generation) {
                return Ok(Vec::new());
            }
            state.clear_timer();
            match state.active_task_id().cloned() {
                Some(task_id) => start_check(state, task_id),
                None => Vec::new(),
            }
        }
    };

    Ok(effects)
}

fn start_check(state: &mut TrackerState, task_id: TaskId) -> Vec<Effect> {
    let (generation, had_timer) = state.begin_check(task_id.clone());
    let mut effects = Vec::with_capacity(3);
    if had_timer {
        effects.push(Effect::CancelTimer);
    }
    effects.push(Effect::Render(ViewDescriptor::Checking));
    effects.push(Effect::QueryStatus {
        generation,
        task_id,
    });
    effects
}

fn apply_result(
    state: &mut TrackerState,
    result: Result<StatusReply, QueryFailure>,
) -> Vec<Effect> {
    let view = match result {
        Ok(StatusReply::Status(TaskStatus::Pending)) => {
            let generation = state.settle_pending();
            return vec![
                Effect::Render(ViewDescriptor::Progress { can_retry: true }),
                Effect::ArmTimer {
                    generation,
                    delay: state.recheck_delay(),
                },
            ];
        }
        Ok(StatusReply::Rejected { message }) => ViewDescriptor::Error { message },
        Ok(StatusReply::Status(TaskStatus::Done)) => match state.active_task_id() {
            Some(task_id) => ViewDescriptor::Success {
                task_id: task_id.clone(),
            },
            // In flight implies an active id; treat the impossible case as a failed check.
            None => ViewDescriptor::GenericFailure {
                reason: FailureReason::CheckFailed,
            },
        },
        Ok(StatusReply::Status(TaskStatus::Error)) => ViewDescriptor::GenericFailure {
            reason: FailureReason::TaskFailed,
        },
        Ok(StatusReply::Status(TaskStatus::Unknown(status))) => ViewDescriptor::Raw { status },
        Err(_) => ViewDescriptor::GenericFailure {
            reason: FailureReason::CheckFailed,
        },
    };

    let mut effects = Vec::with_capacity(2);
    if state.settle_terminal() {
        effects.push(Effect::CancelTimer);
    }
    effects.push(Effect::Render(view));
    effects
}
