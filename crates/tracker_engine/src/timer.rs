use std::time::Duration;

use tokio::task::JoinHandle;

/// Owner of the single re-check timer. Arming always releases the previous
/// timer first, so at most one is ever outstanding.
#[derive(Debug, Default)]
pub struct RecheckTimer {
    handle: Option<JoinHandle<()>>,
}

impl RecheckTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        }));
    }

    /// Returns true if a timer was outstanding.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for RecheckTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
