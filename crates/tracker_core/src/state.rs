use std::time::Duration;

use crate::TaskId;

/// Monotonic request counter used to discard superseded replies.
pub type Generation = u64;

/// Delay before an in-progress task is checked again.
pub const RECHECK_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Checking,
    PendingRetry,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    active_task_id: Option<TaskId>,
    in_flight: bool,
    /// Generation the pending re-check timer was armed for.
    pending_timer: Option<Generation>,
    generation: Generation,
    phase: Phase,
    recheck_delay: Duration,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::with_recheck_delay(RECHECK_DELAY)
    }
}

/// Read-only view of the tracker for hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub phase: Phase,
    pub active_task_id: Option<TaskId>,
    pub in_flight: bool,
    pub timer_pending: bool,
    pub generation: Generation,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recheck_delay(recheck_delay: Duration) -> Self {
        Self {
            active_task_id: None,
            in_flight: false,
            pending_timer: None,
            generation: 0,
            phase: Phase::Idle,
            recheck_delay,
        }
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            phase: self.phase,
            active_task_id: self.active_task_id.clone(),
            in_flight: self.in_flight,
            timer_pending: self.pending_timer.is_some(),
            generation: self.generation,
        }
    }

    pub fn active_task_id(&self) -> Option<&TaskId> {
        self.active_task_id.as_ref()
    }

    pub fn recheck_delay(&self) -> Duration {
        self.recheck_delay
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn pending_timer(&self) -> Option<Generation> {
        self.pending_timer
    }

    /// Starts a new check for `task_id`. Returns the new generation and
    /// whether a pending timer had to be released.
    pub(crate) fn begin_check(&mut self, task_id: TaskId) -> (Generation, bool) {
        let had_timer = self.pending_timer.take().is_some();
        self.generation += 1;
        self.active_task_id = Some(task_id);
        self.in_flight = true;
        self.phase = Phase::Checking;
        (self.generation, had_timer)
    }

    pub(crate) fn settle_terminal(&mut self) -> bool {
        self.in_flight = false;
        self.phase = Phase::Terminal;
        self.pending_timer.take().is_some()
    }

    pub(crate) fn settle_pending(&mut self) -> Generation {
        self.in_flight = false;
        self.phase = Phase::PendingRetry;
        self.pending_timer = Some(self.generation);
        self.generation
    }

    pub(crate) fn clear_timer(&mut self) {
        self.pending_timer = None;
    }

    /// Back to `Idle`. Bumps the generation so replies still in flight are
    /// ignored when they land.
    pub(crate) fn reset(&mut self) -> bool {
        let had_timer = self.pending_timer.take().is_some();
        self.generation += 1;
        self.active_task_id = None;
        self.in_flight = false;
        self.phase = Phase::Idle;
        had_timer
    }
}
