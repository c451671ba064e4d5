//! Bookkeeping for windows with an active event-mask registration.

use x11rb::protocol::xproto;

/// A window id paired with the event mask registered on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedWindow {
    pub window: xproto::Window,
    pub mask: xproto::EventMask,
}

/// The set of windows the watcher has registered on.
///
/// Mirrors the live children of the root window: enumeration and creation
/// notifications insert, destroy notifications remove. Insertion is
/// idempotent, so a creation notification replayed for a window found during
/// enumeration cannot add a duplicate entry.
#[derive(Debug, Default)]
pub struct WindowTracker {
    windows: Vec<TrackedWindow>,
}

impl WindowTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a registration. Returns false if the window was already
    /// tracked; the existing entry and its mask stay as they are.
    pub fn track(&mut self, window: xproto::Window, mask: xproto::EventMask) -> bool {
        if self.contains(window) {
            return false;
        }
        self.windows.push(TrackedWindow { window, mask });
        true
    }

    /// Drops a window the window system destroyed. Returns whether it was
    /// tracked at all.
    pub fn untrack(&mut self, window: xproto::Window) -> bool {
        let count_before = self.windows.len();
        self.windows.retain(|t| t.window != window);
        self.windows.len() != count_before
    }

    #[must_use]
    pub fn contains(&self, window: xproto::Window) -> bool {
        self.windows.iter().any(|t| t.window == window)
    }

    #[must_use]
    pub fn mask_of(&self, window: xproto::Window) -> Option<xproto::EventMask> {
        self.windows
            .iter()
            .find(|t| t.window == window)
            .map(|t| t.mask)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
