//! Applies parsed commands to the host state.
mod command_handler;
mod window_handler;
