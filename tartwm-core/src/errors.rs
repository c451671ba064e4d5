use thiserror::Error;

pub type Result<T> = std::result::Result<T, TartError>;

#[derive(Debug, Error)]
pub enum TartError {
    #[error("DISPLAY not set")]
    DisplayNotSet,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
