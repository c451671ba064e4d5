//! The TartWM host and the command protocol it speaks.
// We deny clippy pedantic lints, primarily to keep code as correct as possible
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
pub mod command;
pub mod config;
pub mod errors;
mod event_loop;
mod handlers;
pub mod models;
pub mod state;
pub mod utils;

pub use command::{join_line, Command, ControlMessage};
pub use config::{Color, Config};
pub use models::Manager;
pub use models::Rect;
pub use models::Window;
pub use models::WindowHandle;
pub use state::State;
pub use utils::child_process;
pub use utils::command_socket::CommandSocket;
