//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("cli error: {0}")]
    Cli(String),

    /// The host cannot present a modal alert (e.g. stdin is not a terminal).
    #[error("alert error: {0}")]
    Alert(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
