use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracker_core::{Phase, TrackerError, TrackerState};
use tracker_engine::{Endpoints, ReqwestStatusClient, TaskStatusTracker};
use tracker_logging::{tracker_info, tracker_warn};

use super::commands::{self, Command, HELP};
use super::config::AppConfig;
use super::persistence::SessionStore;
use super::ui::render::TerminalRenderer;

pub struct RunOptions {
    pub task_id: Option<String>,
    pub watch: bool,
    pub config: AppConfig,
}

enum Step {
    Event,
    Input(std::io::Result<Option<String>>),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    let config = &options.config;
    let endpoints = Endpoints::parse(&config.server_url)
        .with_context(|| format!("invalid server url {:?}", config.server_url))?;
    let client = ReqwestStatusClient::new(endpoints.clone(), config.client_settings())
        .context("failed to build HTTP client")?;
    let state = TrackerState::with_recheck_delay(config.recheck_delay());
    let mut tracker =
        TaskStatusTracker::with_state(state, Arc::new(client), TerminalRenderer::new(endpoints));
    let store = SessionStore::new(config.state_dir.clone());

    let tracking = begin_tracking(&mut tracker, &store, options.task_id.as_deref())?;
    if !tracking && !options.watch {
        bail!("no task id given and none remembered; pass TASK_ID or use --watch");
    }
    if options.watch {
        println!("{HELP}");
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        let snapshot = tracker.snapshot();
        if !options.watch && snapshot.phase == Phase::Terminal {
            break;
        }
        if !stdin_open && !snapshot.in_flight && !snapshot.timer_pending {
            break;
        }

        // The tracker holds its own sender, so its event channel never closes.
        let step = tokio::select! {
            _ = tracker.next_event() => Step::Event,
            line = input.next_line(), if stdin_open => Step::Input(line),
        };

        match step {
            Step::Event => {}
            Step::Input(Ok(Some(line))) => {
                if handle_line(&mut tracker, &store, &line) == Flow::Quit {
                    break;
                }
            }
            Step::Input(Ok(None)) => stdin_open = false,
            Step::Input(Err(err)) => {
                tracker_warn!("Stopped reading commands: {}", err);
                stdin_open = false;
            }
        }
    }

    Ok(())
}

/// Starts tracking the id given on the command line, or else the remembered
/// one. Returns whether a task is now being tracked.
fn begin_tracking(
    tracker: &mut TaskStatusTracker,
    store: &SessionStore,
    explicit_task_id: Option<&str>,
) -> Result<bool, TrackerError> {
    match explicit_task_id {
        Some(task_id) => {
            tracker_info!("Tracking task {}", task_id);
            tracker.start_or_refresh(task_id)?;
            store.save_task_id(task_id);
            Ok(true)
        }
        None => {
            let Some(task_id) = store.load_task_id() else {
                return Ok(false);
            };
            tracker_info!("Resuming remembered task {}", task_id);
            tracker.on_page_load(Some(&task_id))?;
            store.save_task_id(&task_id);
            Ok(true)
        }
    }
}

fn handle_line(tracker: &mut TaskStatusTracker, store: &SessionStore, line: &str) -> Flow {
    let Some(command) = commands::parse(line) else {
        return Flow::Continue;
    };
    match command {
        Command::Check => report(tracker.check_again()),
        Command::Task(task_id) => match tracker.start_or_refresh(&task_id) {
            Ok(()) => store.save_task_id(&task_id),
            Err(err) => report(Err(err)),
        },
        Command::NewSubmission => {
            tracker.on_new_submission();
            store.clear();
            println!("No task is being tracked.");
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
        Command::Unknown(word) => println!("Unknown command `{word}`. Type `help`."),
    }
    Flow::Continue
}

fn report(result: Result<(), TrackerError>) {
    if let Err(err) = result {
        tracker_warn!("Rejected command: {}", err);
        println!("Cannot do that: {err}.");
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::Phase;

    use super::*;

    fn tracker() -> TaskStatusTracker {
        let endpoints = Endpoints::parse("http://127.0.0.1:9").unwrap();
        let settings = AppConfig::default().client_settings();
        let client = ReqwestStatusClient::new(endpoints.clone(), settings).unwrap();
        TaskStatusTracker::new(Arc::new(client), TerminalRenderer::new(endpoints))
    }

    #[tokio::test]
    async fn empty_task_id_argument_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        store.save_task_id("remembered");
        let mut tracker = tracker();

        let err = begin_tracking(&mut tracker, &store, Some("")).unwrap_err();

        assert_eq!(err, TrackerError::Validation);
        assert_eq!(tracker.snapshot().phase, Phase::Idle);
        assert_eq!(store.load_task_id().as_deref(), Some("remembered"));
    }

    #[tokio::test]
    async fn explicit_task_id_is_tracked_and_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        let mut tracker = tracker();

        assert!(begin_tracking(&mut tracker, &store, Some("abc")).unwrap());

        assert_eq!(tracker.snapshot().phase, Phase::Checking);
        assert_eq!(store.load_task_id().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn remembered_task_id_is_resumed() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        let mut tracker = tracker();
        assert!(!begin_tracking(&mut tracker, &store, None).unwrap());

        store.save_task_id("xyz");
        assert!(begin_tracking(&mut tracker, &store, None).unwrap());

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.phase, Phase::Checking);
        assert_eq!(
            snapshot.active_task_id.map(|id| id.to_string()).as_deref(),
            Some("xyz")
        );
    }
}
