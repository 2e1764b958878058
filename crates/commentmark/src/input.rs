//! Input loader.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use crate::error::CliError;

/// Where the markdown document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Input source for an optional path argument.
    pub(crate) fn from_arg(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdin, Self::File)
    }

    /// Read the whole document into memory.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Read` if opening or reading the input fails.
    pub(crate) fn read(&self) -> Result<String, CliError> {
        let mut buffer = Vec::with_capacity(1024);
        let read = match self {
            Self::Stdin => std::io::stdin().lock().read_to_end(&mut buffer),
            Self::File(path) => {
                std::fs::File::open(path).and_then(|mut file| file.read_to_end(&mut buffer))
            }
        };
        read.map_err(CliError::Read)?;

        Ok(match String::from_utf8(buffer) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
