use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum InspectError {
    FileNotFound {
        path: PathBuf,
    },
    PermissionDenied {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Decode {
        path: PathBuf,
        encoding: &'static str,
        /// Byte offset of the first byte that could not be decoded
        offset: usize,
        /// 1-based line holding that byte
        line: usize,
    },
    InvalidRange {
        start: usize,
        end: usize,
        reason: &'static str,
    },
    UnknownEncoding {
        label: String,
    },
    Output(io::Error),
}

impl InspectError {
    /// Classify an error from opening or mapping `path`.
    pub fn from_open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => InspectError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => InspectError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => InspectError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl std::error::Error for InspectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InspectError::Io { source, .. } => Some(source),
            InspectError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectError::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            InspectError::PermissionDenied { path } => {
                write!(f, "Permission denied: {}", path.display())
            }
            InspectError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            InspectError::Decode {
                path,
                encoding,
                offset,
                line,
            } => write!(
                f,
                "Cannot decode {} as {}: invalid byte at offset {} (line {})",
                path.display(),
                encoding,
                offset,
                line
            ),
            InspectError::InvalidRange { start, end, reason } => {
                write!(f, "Invalid line range {}-{}: {}", start, end, reason)
            }
            InspectError::UnknownEncoding { label } => {
                write!(f, "Unknown encoding: {}", label)
            }
            InspectError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl From<io::Error> for InspectError {
    fn from(err: io::Error) -> Self {
        InspectError::Output(err)
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
