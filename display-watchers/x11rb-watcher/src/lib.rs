//! x11rb watcher for TartWM
//!
//! Bridges window-system events into the command protocol: it keeps event
//! registrations in step with the root window's children and writes one
//! protocol line per translated event to the host socket, in the order the
//! server delivered them.
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::Path;

use tartwm_core::command::Command;
use tartwm_core::models::WindowHandle;

use crate::event_translate::{translate, Action};
use crate::tracker::WindowTracker;
use crate::xwrap::{root_event_mask, window_event_mask, XWrap};

pub mod error;
mod event_translate;
pub mod tracker;
mod xwrap;

pub use error::Error;

use error::Result;

/// A connected watcher: the X server on one side, the host on the other.
pub struct Watcher {
    xw: XWrap,
    tracker: WindowTracker,
    host: UnixStream,
}

impl Watcher {
    /// Connects to the X server and to the host socket. Both ends are
    /// required: without the X server there is nothing to watch, without the
    /// host there is nowhere to report.
    ///
    /// # Errors
    ///
    /// Will error if either end is unreachable; [`Error::Io`] means the host
    /// socket, anything else the X server.
    pub fn connect(socket_file: &Path) -> Result<Self> {
        let xw = XWrap::new()?;
        let host = UnixStream::connect(socket_file)?;
        Ok(Self {
            xw,
            tracker: WindowTracker::new(),
            host,
        })
    }

    /// Forwards window-system events to the host until one side goes away.
    ///
    /// The root registration goes on before the existing children are
    /// enumerated, so a window created while we enumerate still produces a
    /// creation notification instead of slipping through unseen.
    ///
    /// # Errors
    ///
    /// Will error if the X connection drops. A failed send to the host is
    /// terminal but deliberate: the watcher just stops.
    pub fn run(&mut self) -> Result<()> {
        self.xw.subscribe_to_event(self.xw.root(), root_event_mask())?;
        if !self.enumerate_existing()? {
            return Ok(());
        }

        tracing::info!("Watching for X events.");
        loop {
            let event = self.xw.wait_for_event()?;
            let Some(action) = translate(&event, &mut self.tracker, self.xw.root()) else {
                continue;
            };
            let command = match action {
                Action::Register(window, command) => {
                    if let Err(err) = self.xw.subscribe_to_event(window, window_event_mask()) {
                        // The id can already be dead; forget it and move on.
                        tracing::warn!("Failed to register window {}: {}", window, err);
                        self.tracker.untrack(window);
                        continue;
                    }
                    command
                }
                Action::Notify(command) => command,
            };
            if !self.send(&command) {
                return Ok(());
            }
        }
    }

    /// Registers on the windows that already exist and reports each one to
    /// the host. Returns false once the host is gone.
    fn enumerate_existing(&mut self) -> Result<bool> {
        for window in self.xw.child_windows()? {
            if !self.tracker.track(window, window_event_mask()) {
                continue;
            }
            if let Err(err) = self.xw.subscribe_to_event(window, window_event_mask()) {
                tracing::warn!("Failed to register window {}: {}", window, err);
                self.tracker.untrack(window);
                continue;
            }
            // A window can die between the enumeration and this query.
            let rect = match self.xw.window_geometry(window) {
                Ok(rect) => rect,
                Err(err) => {
                    tracing::warn!("Failed to measure window {}: {}", window, err);
                    self.tracker.untrack(window);
                    continue;
                }
            };
            let command = Command::WindowCreated {
                window: WindowHandle(window),
                rect,
            };
            if !self.send(&command) {
                return Ok(false);
            }
        }
        self.xw.flush()?;
        tracing::info!("Reported {} existing windows.", self.tracker.len());
        Ok(true)
    }

    /// Writes one protocol line. Returns false once the host is gone.
    fn send(&mut self, command: &Command) -> bool {
        if let Err(err) = writeln!(self.host, "{command}") {
            tracing::info!("Host went away ({}), stopping.", err);
            return false;
        }
        true
    }
}
