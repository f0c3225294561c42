use tracker_core::TaskId;
use url::Url;

use crate::{FailureKind, StatusQueryError};

/// Server routes the tracker talks to, rooted at a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn parse(base: &str) -> Result<Self, StatusQueryError> {
        let base = Url::parse(base)
            .map_err(|err| StatusQueryError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(StatusQueryError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot carry path segments"),
            ));
        }
        Ok(Self { base })
    }

    /// `{base}/status/{task_id}?_={cache_buster}`
    pub fn status_url(&self, task_id: &TaskId, cache_buster: &str) -> Url {
        let mut url = self.join(&["status", task_id.as_str()]);
        url.query_pairs_mut().append_pair("_", cache_buster);
        url
    }

    /// `{base}/download/{task_id}`
    pub fn result_url(&self, task_id: &TaskId) -> Url {
        self.join(&["download", task_id.as_str()])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Always Ok: `parse` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
