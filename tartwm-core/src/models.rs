//! Objects (such as windows) shared by the host and its watchers.
mod manager;
mod rect;
mod window;

pub use manager::Manager;
pub use rect::Rect;
pub use window::Window;
pub use window::WindowHandle;
