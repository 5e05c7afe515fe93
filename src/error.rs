//! Errors raised by printer invocations.

use std::fmt;
use std::io;

/// Error type for a print call.
#[derive(Debug)]
pub enum PrintError {
    /// The printer was configured for both the error sink and the echo sink.
    ConflictingSink,
    /// Writing to the sink failed.
    Io(io::Error),
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingSink => {
                write!(f, "stderr and echo cannot be enabled at the same time")
            }
            Self::Io(err) => write!(f, "Sink write failed: {err}"),
        }
    }
}

impl std::error::Error for PrintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConflictingSink => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for PrintError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
