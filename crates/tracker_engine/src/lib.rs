//! Tracker engine: status queries, the re-check timer and effect execution.
mod client;
mod decode;
mod endpoints;
mod timer;
mod tracker;
mod types;

pub use client::{cache_buster, ClientSettings, ReqwestStatusClient, StatusClient};
pub use decode::decode_status_body;
pub use endpoints::Endpoints;
pub use timer::RecheckTimer;
pub use tracker::{Renderer, TaskStatusTracker, TrackerEvent};
pub use types::{FailureKind, StatusQueryError};
