//! Starts and stops the watcher subprocess.
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::errors::Result;

/// The watcher binary installed next to the host binary.
const WATCHER_FILE: &str = "tartwm-watcher";

/// A running watcher session.
#[derive(Debug)]
pub struct WatcherProcess {
    child: Child,
}

impl WatcherProcess {
    /// Starts the watcher session as a sibling of the current executable,
    /// so a host run from a build tree finds the watcher built next to it.
    ///
    /// # Errors
    ///
    /// Will error if the watcher binary cannot be spawned.
    pub fn spawn() -> Result<Self> {
        let watcher_file = std::env::current_exe()?.with_file_name(WATCHER_FILE);
        let child = Command::new(watcher_file).stdin(Stdio::null()).spawn()?;
        Ok(Self { child })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Collects the watcher's exit status if it has ended, without blocking.
    pub fn try_reap(&mut self) -> Option<ExitStatus> {
        self.child.try_wait().ok().flatten()
    }

    /// Kills the watcher session and reaps it.
    pub fn stop(mut self) {
        if self.child.kill().is_ok() {
            self.child.wait().ok();
        }
    }
}
