use thiserror::Error;

/// Errors surfaced by the inbound chart operations.
///
/// Body, house and time-zone failures are recovered inside chart assembly
/// and never show up here; a failed lunar phase query does, as
/// `Computation`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Error calculating chart: {0}")]
    Computation(String),
}

impl ChartError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ChartError::InvalidInput(message.into())
    }

    pub fn computation(message: impl Into<String>) -> Self {
        ChartError::Computation(message.into())
    }
}
