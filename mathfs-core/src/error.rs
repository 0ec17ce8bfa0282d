//! Error types for the arithmetic filesystem.

use thiserror::Error;

/// Errors a driver operation can fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathFsError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl MathFsError {
    /// POSIX error number reported to the host runtime.
    pub fn errno(&self) -> i32 {
        match self {
            MathFsError::NotFound(_) => libc::ENOENT,
            MathFsError::PermissionDenied(_) => libc::EPERM,
        }
    }
}

/// Result type for filesystem operations.
pub type MathFsResult<T> = Result<T, MathFsError>;
