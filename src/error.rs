//! Error types shared across the crate.

use thiserror::Error;

/// Errors produced while setting up or driving a rotator.
///
/// None of these are transient: each one marks either bad input at setup
/// time or a broken internal invariant, so callers should surface them
/// rather than retry.
#[derive(Debug, Error)]
pub enum Error {
    /// A sentence handed to the tokenizer was empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The configured mount point does not exist in the layout.
    #[error("container `{0}` not found")]
    MissingContainer(String),

    /// A tick tried to dequeue a plan while the queue was empty.
    #[error("plan queue is empty")]
    EmptyQueue,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Terminal I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::MissingContainer("hero".to_string()).to_string(),
            "container `hero` not found"
        );
        assert_eq!(Error::EmptyQueue.to_string(), "plan queue is empty");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "pipe closed");
    }
}
