use thiserror::Error;

use crate::{config::ConfigError, logger::LoggerError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Logger(#[from] LoggerError),
    #[error("Invalid arguments: {0}")]
    Args(String),
    #[error("Unknown signup product '{0}'")]
    UnknownProduct(String),
}
