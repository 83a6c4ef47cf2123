//! Error types for object store, tree, commit and revision operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the repository core.
///
/// The command layer wraps these in `anyhow::Error`; nothing in the core
/// converts them into exit codes or printed text.
#[derive(Debug, Error)]
pub enum Error {
    /// No metadata directory was found walking up from the starting path.
    #[error("not a git repository (or any of the parent directories): {}", .0.display())]
    NotARepository(PathBuf),

    /// Repository creation was pointed at an occupied directory.
    #[error("work tree {} is not empty", .0.display())]
    NonEmptyWorkTree(PathBuf),

    /// Bad header framing, bad tree mode, declared/actual size mismatch and friends.
    #[error("malformed object: {0}")]
    Malformed(String),

    /// An exact object address or ref name is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A revision matched zero or several candidates. Both cases read the same.
    #[error("ambiguous argument '{0}': unknown revision or path not in the working tree")]
    Ambiguous(String),

    /// Filesystem or compression failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a human readable context to `std::io` failures.
pub(crate) trait IoContext<T> {
    fn io_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| Error::Io {
            context: context().into(),
            source,
        })
    }
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::Malformed(reason.into())
    }
}
