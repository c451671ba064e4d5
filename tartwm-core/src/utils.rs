//! Plumbing shared by the host: the command socket and the watcher process.
pub mod child_process;
pub mod command_socket;
