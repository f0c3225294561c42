use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracker_logging::{tracker_debug, tracker_error, tracker_warn};

const STATE_FILENAME: &str = ".task_tracker_state.ron";

#[derive(Debug, Error)]
enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedSession {
    last_task_id: Option<String>,
}

/// Remembers the task being tracked so a later run can pick it up again.
/// Failures are logged and otherwise ignored.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILENAME)
    }

    pub fn load_task_id(&self) -> Option<String> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracker_warn!("Failed to read remembered task from {:?}: {}", path, err);
                return None;
            }
        };

        match ron::from_str::<PersistedSession>(&content) {
            Ok(session) => session.last_task_id.filter(|id| !id.is_empty()),
            Err(err) => {
                tracker_warn!("Failed to parse remembered task from {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn save_task_id(&self, task_id: &str) {
        self.store(PersistedSession {
            last_task_id: Some(task_id.to_string()),
        });
    }

    pub fn clear(&self) {
        self.store(PersistedSession::default());
    }

    fn store(&self, session: PersistedSession) {
        match write_atomically(&self.dir, &session) {
            Ok(path) => tracker_debug!("Saved tracker session to {:?}", path),
            Err(err) => tracker_error!("Failed to save tracker session in {:?}: {}", self.dir, err),
        }
    }
}

/// Writes to a temp file in `dir`, then renames it over the state file.
fn write_atomically(dir: &Path, session: &PersistedSession) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir)?;
    let content = ron::ser::to_string_pretty(session, ron::ser::PrettyConfig::new())?;

    let target = dir.join(STATE_FILENAME);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|err| PersistError::Io(err.error))?;
    Ok(target)
}
