use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid state error: {0}")]
    InvalidStateError(String),
}
