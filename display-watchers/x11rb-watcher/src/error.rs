//! Error handling and reporting for this watcher

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Errors from x11rb
    #[error("Unable to connect to the X server: {0}")]
    Connect(#[from] ConnectError),

    #[error("Connection error occurred: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Unable to parse reply: {0}")]
    Reply(#[from] ReplyError),
}
