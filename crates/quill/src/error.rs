use thiserror::Error;

use crate::config::ConfigError;

pub const EXIT_IO: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_LOGGING: i32 = 3;

#[derive(Debug, Error)]
pub enum QuillError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuillError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::Logging(_) => EXIT_LOGGING,
            Self::Io(_) => EXIT_IO,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuillError>;
