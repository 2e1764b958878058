//! CLI error types.

use commentmark_config::ConfigError;

/// Exit code for failures while reading the input document.
pub(crate) const EXIT_READ_FAILURE: i32 = 5;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The input document could not be read.
    #[error("I/O errors found while reading input: {0}")]
    Read(std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Read(_) => EXIT_READ_FAILURE,
            Self::Config(_) | Self::Io(_) => 1,
        }
    }
}
