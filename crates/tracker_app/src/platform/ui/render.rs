use tracker_core::{FailureReason, ViewDescriptor};
use tracker_engine::{Endpoints, Renderer};

/// Text lines for one view. Pure so it can be tested without a terminal.
pub fn render_lines(view: &ViewDescriptor, endpoints: &Endpoints) -> Vec<String> {
    match view {
        ViewDescriptor::Checking => vec!["Checking status...".to_string()],
        ViewDescriptor::Success { task_id } => vec![
            "Task status: done".to_string(),
            format!("Download result: {}", endpoints.result_url(task_id)),
        ],
        ViewDescriptor::Error { message } => vec![format!("Error: {message}")],
        ViewDescriptor::GenericFailure {
            reason: FailureReason::TaskFailed,
        } => vec![
            "Task status: error".to_string(),
            "Processing failed. Try submitting different files.".to_string(),
        ],
        ViewDescriptor::GenericFailure {
            reason: FailureReason::CheckFailed,
        } => vec!["Status check failed. Type `check` to try again.".to_string()],
        ViewDescriptor::Progress { can_retry } => {
            let mut lines = vec![
                "Task status: in progress".to_string(),
                "Processing can take several minutes depending on the upload size.".to_string(),
            ];
            if *can_retry {
                lines.push("Type `check` to check again now.".to_string());
            }
            lines
        }
        ViewDescriptor::Raw { status } => vec![format!("Task status: {status}")],
    }
}

/// Prints each view to stdout.
pub struct TerminalRenderer {
    endpoints: Endpoints,
}

impl TerminalRenderer {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: ViewDescriptor) {
        for line in render_lines(&view, &self.endpoints) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracker_core::TaskId;

    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::parse("http://127.0.0.1:8000").unwrap()
    }

    #[test]
    fn success_links_to_result_download() {
        let lines = render_lines(
            &ViewDescriptor::Success {
                task_id: TaskId::parse("abc").unwrap(),
            },
            &endpoints(),
        );
        assert_eq!(
            lines,
            vec![
                "Task status: done".to_string(),
                "Download result: http://127.0.0.1:8000/download/abc".to_string(),
            ]
        );
    }

    #[test]
    fn error_and_raw_are_shown_verbatim() {
        assert_eq!(
            render_lines(
                &ViewDescriptor::Error {
                    message: "bad id".to_string()
                },
                &endpoints()
            ),
            vec!["Error: bad id".to_string()]
        );
        assert_eq!(
            render_lines(
                &ViewDescriptor::Raw {
                    status: "queued".to_string()
                },
                &endpoints()
            ),
            vec!["Task status: queued".to_string()]
        );
    }

    #[test]
    fn progress_offers_manual_check_only_when_allowed() {
        let with_retry = render_lines(&ViewDescriptor::Progress { can_retry: true }, &endpoints());
        let without = render_lines(&ViewDescriptor::Progress { can_retry: false }, &endpoints());
        assert_eq!(with_retry.len(), without.len() + 1);
        assert!(with_retry.last().unwrap().contains("check"));
    }
}
