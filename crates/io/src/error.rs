use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    /// Any other read failure.
    Io { path: PathBuf, source: std::io::Error },
    /// The header row could not be parsed.
    Csv(String),
}

impl LoadError {
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "file '{}' not found", path.display()),
            Self::PermissionDenied(path) => {
                write!(f, "permission denied reading file '{}'", path.display())
            }
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
