use crate::command::Command;
use crate::models::{Manager, WindowHandle};
use crate::state::State;

impl Manager {
    /// Processes a command and invokes the associated function.
    /// Returns true if the layout state changed.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        process_internal(self, command).unwrap_or(false)
    }
}

fn process_internal(manager: &mut Manager, command: &Command) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::MoveWindow {
            window,
            relative,
            x,
            y,
        } => move_window(state, *window, *relative, *x, *y),
        Command::ResizeWindow {
            window,
            width,
            height,
        } => resize_window(state, *window, *width, *height),

        Command::WindowCreated { window, rect } => {
            Some(manager.window_created_handler(*window, *rect))
        }
        Command::WindowEntered { window } => Some(manager.window_entered_handler(*window)),
        Command::WindowDestroyed { window } => Some(manager.window_destroyed_handler(*window)),

        Command::Unhandled { code } => {
            tracing::trace!("unhandled window-system event: {}", code);
            None
        }
    }
}

fn move_window(state: &mut State, handle: WindowHandle, relative: bool, x: i32, y: i32) -> Option<bool> {
    let Some(window) = state.window_mut(handle) else {
        tracing::debug!("move for unknown window {}", handle);
        return None;
    };
    if relative {
        window.rect.x += x;
        window.rect.y += y;
    } else {
        window.rect.x = x;
        window.rect.y = y;
    }
    Some(true)
}

fn resize_window(state: &mut State, handle: WindowHandle, width: u32, height: u32) -> Option<bool> {
    let Some(window) = state.window_mut(handle) else {
        tracing::debug!("size for unknown window {}", handle);
        return None;
    };
    window.rect.w = width;
    window.rect.h = height;
    Some(true)
}
