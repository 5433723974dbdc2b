//! FileSystem port - abstraction over definition-file I/O
//!
//! Read operations are used while planning; mutating operations only by
//! the executor. Mutations take a `privileged` flag: implementations must
//! escalate when it is set.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Escalated command failed or could not run
    #[error("{0}")]
    Command(String),
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - local disk, `sudo` for privileged mutations
/// - `MemoryFs` - in-memory, for tests
pub trait FileSystem {
    /// Entries of a directory (full paths, any file type)
    fn list_dir(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;

    /// Whether anything (including a dangling symlink) exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Target of the symlink at `path`
    fn read_link(&self, path: &Path) -> FsResult<PathBuf>;

    /// Raw contents of the file at `path`, following symlinks
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Make `destination` a symlink to `source`, replacing whatever is there
    fn symlink(&self, source: &Path, destination: &Path, privileged: bool) -> FsResult<()>;

    /// Copy `source` to `destination`, replacing whatever is there
    fn copy(&self, source: &Path, destination: &Path, privileged: bool) -> FsResult<()>;

    /// Remove the file or symlink at `path`
    fn remove(&self, path: &Path, privileged: bool) -> FsResult<()>;
}
