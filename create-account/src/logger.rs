use std::{error::Error, fmt, fs::File, path::Path, str::FromStr, sync::Arc};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::writer::BoxMakeWriter,
    prelude::*,
    util::TryInitError,
};

#[derive(Debug)]
pub enum LoggerError {
    Io(std::io::Error),
    SetGlobal(TryInitError),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to open log file: {}", e),
            Self::SetGlobal(e) => write!(f, "Failed to install logger: {}", e),
        }
    }
}

impl Error for LoggerError {}

impl From<std::io::Error> for LoggerError {
    fn from(e: std::io::Error) -> LoggerError {
        LoggerError::Io(e)
    }
}

impl From<TryInitError> for LoggerError {
    fn from(e: TryInitError) -> LoggerError {
        LoggerError::SetGlobal(e)
    }
}

/// Install the global subscriber: pretty logs on stdout and, if a path is
/// given, plain logs in that file.
pub fn setup_logger(log_level: LevelFilter, log_file: Option<&Path>) -> Result<(), LoggerError> {
    let file_log = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BoxMakeWriter::new(Arc::new(file));
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(false),
            )
        }
        None => None,
    };

    let stdout_log = tracing_subscriber::fmt::layer().pretty().with_file(false);

    tracing_subscriber::registry()
        .with(
            stdout_log
                .and_then(file_log)
                .with_filter(log_level),
        )
        .try_init()?;

    Ok(())
}

/// Parse LOG_LEVEL environment variable.
pub fn parse_log_level() -> Result<Option<LevelFilter>, Box<dyn Error>> {
    if let Ok(l) = std::env::var("LOG_LEVEL") {
        Ok(Some(LevelFilter::from_str(&l)?))
    } else {
        Ok(None)
    }
}
