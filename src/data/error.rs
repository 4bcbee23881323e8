use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the data layer.
///
/// `Load` and `MissingColumns` are both load failures: the session cannot
/// continue without a dataset. `InvalidArgument` is a programming error on
/// the caller's side (bad `n`, unknown column name).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("{} is missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DataError {
    pub(crate) fn load(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        DataError::Load {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DataError::InvalidArgument(msg.into())
    }

    /// True for every variant that means "no dataset could be produced".
    pub fn is_load_error(&self) -> bool {
        matches!(self, DataError::Load { .. } | DataError::MissingColumns { .. })
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
