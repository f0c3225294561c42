//! Tracker core: pure task-status polling state machine and view descriptors.
mod effect;
mod error;
mod msg;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::TrackerError;
pub use msg::Msg;
pub use state::{Generation, Phase, TrackerSnapshot, TrackerState, RECHECK_DELAY};
pub use status::{QueryFailure, StatusReply, TaskId, TaskStatus};
pub use update::update;
pub use view_model::{FailureReason, ViewDescriptor};
