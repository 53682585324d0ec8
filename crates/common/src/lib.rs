use thiserror::Error;

pub mod types;
pub mod dates;
pub mod overview;
pub mod utils;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid service type: {0}")]
    InvalidKind(String),
    #[error("invalid service status: {0}")]
    InvalidStatus(String),
}
