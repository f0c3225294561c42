use std::sync::Arc;

use tokio::sync::mpsc;
use tracker_core::{
    update, Effect, Generation, Msg, QueryFailure, StatusReply, TrackerError, TrackerSnapshot,
    TrackerState, ViewDescriptor,
};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::{cache_buster, RecheckTimer, StatusClient, StatusQueryError};

/// Render callback supplied by the host. Receives one descriptor per view change.
pub trait Renderer {
    fn render(&mut self, view: ViewDescriptor);
}

impl<F> Renderer for F
where
    F: FnMut(ViewDescriptor),
{
    fn render(&mut self, view: ViewDescriptor) {
        self(view)
    }
}

/// Completion signals produced by spawned work and fed back into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    StatusResolved {
        generation: Generation,
        result: Result<StatusReply, StatusQueryError>,
    },
    TimerFired {
        generation: Generation,
    },
}

/// Drives the polling lifecycle of one task id at a time.
///
/// All state changes happen on the caller's task: queries and the timer run
/// as spawned tasks that only report back through an event channel, which the
/// host drains with [`TaskStatusTracker::next_event`]. Operations that spawn
/// work must be called from within a tokio runtime.
pub struct TaskStatusTracker {
    state: TrackerState,
    client: Arc<dyn StatusClient>,
    renderer: Box<dyn Renderer>,
    timer: RecheckTimer,
    event_tx: mpsc::UnboundedSender<TrackerEvent>,
    event_rx: mpsc::UnboundedReceiver<TrackerEvent>,
}

impl TaskStatusTracker {
    pub fn new(client: Arc<dyn StatusClient>, renderer: impl Renderer + 'static) -> Self {
        Self::with_state(TrackerState::new(), client, renderer)
    }

    pub fn with_state(
        state: TrackerState,
        client: Arc<dyn StatusClient>,
        renderer: impl Renderer + 'static,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            renderer: Box::new(renderer),
            timer: RecheckTimer::new(),
            event_tx,
            event_rx,
        }
    }

    pub fn start_or_refresh(&mut self, task_id: &str) -> Result<(), TrackerError> {
        self.dispatch(Msg::StartOrRefresh(task_id.to_string()))
    }

    pub fn check_again(&mut self) -> Result<(), TrackerError> {
        self.dispatch(Msg::CheckAgain)
    }

    pub fn reset(&mut self) {
        self.dispatch_infallible(Msg::Reset);
    }

    pub fn on_new_submission(&mut self) {
        self.dispatch_infallible(Msg::NewSubmission);
    }

    pub fn on_page_load(&mut self, known_task_id: Option<&str>) -> Result<(), TrackerError> {
        self.dispatch(Msg::PageLoaded {
            known_task_id: known_task_id.map(ToOwned::to_owned),
        })
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        self.state.snapshot()
    }

    /// Waits for the next query completion or timer firing and applies it.
    ///
    /// Cancel-safe: if the future is dropped before an event arrives, nothing
    /// is lost.
    pub async fn next_event(&mut self) -> Option<TrackerEvent> {
        let event = self.event_rx.recv().await?;
        self.apply_event(event.clone());
        Some(event)
    }

    /// Applies an already-delivered event, if any, without waiting.
    pub fn try_next_event(&mut self) -> Option<TrackerEvent> {
        let event = self.event_rx.try_recv().ok()?;
        self.apply_event(event.clone());
        Some(event)
    }

    fn apply_event(&mut self, event: TrackerEvent) {
        let msg = match event {
            TrackerEvent::StatusResolved { generation, result } => Msg::StatusResolved {
                generation,
                result: result.map_err(QueryFailure::from),
            },
            TrackerEvent::TimerFired { generation } => {
                tracker_debug!("Re-check timer fired generation={}", generation);
                Msg::TimerFired { generation }
            }
        };
        self.dispatch_infallible(msg);
    }

    fn dispatch_infallible(&mut self, msg: Msg) {
        if let Err(err) = self.dispatch(msg) {
            tracker_warn!("Tracker rejected internal message: {}", err);
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Result<(), TrackerError> {
        let effects = update(&mut self.state, msg)?;
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Render(view) => self.renderer.render(view),
            Effect::QueryStatus {
                generation,
                task_id,
            } => {
                tracker_info!(
                    "Checking status task_id={} generation={}",
                    task_id,
                    generation
                );
                let client = self.client.clone();
                let event_tx = self.event_tx.clone();
                let cache_buster = cache_buster(generation);
                tokio::spawn(async move {
                    let result = client.query_status(&task_id, &cache_buster).await;
                    if let Err(err) = &result {
                        tracker_warn!("Status check for {} failed: {}", task_id, err);
                    }
                    // The receiver only goes away with the tracker itself.
                    let _ = event_tx.send(TrackerEvent::StatusResolved { generation, result });
                });
            }
            Effect::ArmTimer { generation, delay } => {
                tracker_debug!(
                    "Arming re-check timer generation={} delay={:?}",
                    generation,
                    delay
                );
                let event_tx = self.event_tx.clone();
                self.timer.arm(delay, move || {
                    let _ = event_tx.send(TrackerEvent::TimerFired { generation });
                });
            }
            Effect::CancelTimer => {
                if self.timer.cancel() {
                    tracker_debug!("Cancelled pending re-check timer");
                }
            }
        }
    }
}
