use thiserror::Error;

/// Failure reported by an external adapter.
///
/// Adapter failures are transient: the run records them and moves on, and the unadvanced
/// high-water mark makes the next scheduled run fetch the same range again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Network failure, timeout or remote 5xx.
    #[error("Failed to reach external service: {0}")]
    Connectivity(String),
    /// The service answered with a payload that could not be understood.
    #[error("External service returned an invalid response: {0}")]
    Protocol(String),
}
