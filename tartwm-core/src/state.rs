//! The host's authoritative window state, updated only by applying commands.
use crate::models::{Window, WindowHandle};

#[derive(Debug, Default)]
pub struct State {
    /// Windows in creation order, oldest first.
    pub windows: Vec<Window>,
    /// The window the pointer last entered, if it is still tracked.
    pub focused_window: Option<WindowHandle>,
}

impl State {
    #[must_use]
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    pub(crate) fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    #[must_use]
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.iter().any(|w| w.handle == handle)
    }
}
