//! Errors reported by the `rsa` command.

use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The key file could not be read or does not hold a usable key.
    #[error("error reading key file {}: {}", .path.display(), .source)]
    KeyFile {
        path: PathBuf,
        source: textbook_rsa::Error,
    },

    #[error("could not parse ciphertext")]
    Ciphertext(#[source] textbook_rsa::Error),

    /// Writing command output to stdout failed.
    #[error("error writing {what}")]
    Output {
        what: &'static str,
        source: io::Error,
    },

    #[error(transparent)]
    Crypto(#[from] textbook_rsa::Error),
}

impl CliError {
    pub fn key_file(path: impl Into<PathBuf>) -> impl FnOnce(textbook_rsa::Error) -> Self {
        let path = path.into();
        move |source| CliError::KeyFile { path, source }
    }

    pub fn output(what: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| CliError::Output { what, source }
    }
}
