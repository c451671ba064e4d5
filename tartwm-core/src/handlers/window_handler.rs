use crate::models::{Manager, Rect, Window, WindowHandle};

impl Manager {
    /// Starts tracking a window a watcher reported.
    /// Returns true if changes were made to the state.
    pub fn window_created_handler(&mut self, handle: WindowHandle, rect: Rect) -> bool {
        // don't add the window if the manager already knows about it
        if self.state.contains(handle) {
            return false;
        }
        self.state.windows.push(Window::new(handle, rect));
        true
    }

    /// Focuses the window under the pointer.
    /// Returns true if changes were made to the state.
    pub fn window_entered_handler(&mut self, handle: WindowHandle) -> bool {
        if !self.state.contains(handle) {
            tracing::debug!("enter for unknown window {}", handle);
            return false;
        }
        if self.state.focused_window == Some(handle) {
            return false;
        }
        self.state.focused_window = Some(handle);
        true
    }

    /// Forgets a window the window system destroyed.
    /// Returns true if changes were made to the state.
    pub fn window_destroyed_handler(&mut self, handle: WindowHandle) -> bool {
        let count_before = self.state.windows.len();
        self.state.windows.retain(|w| w.handle != handle);
        let mut changed = self.state.windows.len() != count_before;
        if self.state.focused_window == Some(handle) {
            self.state.focused_window = None;
            changed = true;
        }
        changed
    }
}
