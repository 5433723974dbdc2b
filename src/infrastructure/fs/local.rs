//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations. Unprivileged
//! mutations happen in-process; privileged ones are delegated to
//! `sudo -- ln|cp|rm` through a [`CommandRunner`].

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::command_line::{CP, LN, RM};
use crate::domain::value_objects::CommandLine;
use crate::infrastructure::shell::{CommandRunner, ProcessRunner};

/// Local file system implementation
///
/// Copies are atomic (temp file in the destination directory, then
/// rename). Symlinks replace whatever is at the destination.
#[derive(Debug, Clone, Default)]
pub struct LocalFs<R = ProcessRunner> {
    runner: R,
}

impl LocalFs {
    pub fn new() -> Self {
        Self::with_runner(ProcessRunner)
    }
}

impl<R: CommandRunner> LocalFs<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn escalate(&self, command: CommandLine) -> FsResult<()> {
        self.runner
            .run(&command.with_sudo(true))
            .map_err(|e| FsError::Command(e.to_string()))
    }

    fn ensure_parent(path: &Path) -> FsResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))
            }
            _ => Ok(()),
        }
    }

    fn copy_atomic(source: &Path, destination: &Path) -> FsResult<()> {
        let contents = std::fs::read(source).map_err(|e| FsError::from_io(source, e))?;
        let permissions = std::fs::metadata(source)
            .map_err(|e| FsError::from_io(source, e))?
            .permissions();
        let dir = destination.parent().unwrap_or_else(|| Path::new("."));

        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(dir, e))?;
        temp.write_all(&contents)
            .map_err(|e| FsError::from_io(temp.path(), e))?;
        std::fs::set_permissions(temp.path(), permissions)
            .map_err(|e| FsError::from_io(destination, e))?;
        temp.persist(destination)
            .map_err(|e| FsError::from_io(destination, e.error))?;
        Ok(())
    }
}

impl<R: CommandRunner> FileSystem for LocalFs<R> {
    fn list_dir(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;
        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FsError::from_io(dir, e))?;
        paths.sort();
        Ok(paths)
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn read_link(&self, path: &Path) -> FsResult<PathBuf> {
        std::fs::read_link(path).map_err(|e| FsError::from_io(path, e))
    }

    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn symlink(&self, source: &Path, destination: &Path, privileged: bool) -> FsResult<()> {
        let command = CommandLine::new(
            LN,
            [
                "-fs".to_string(),
                source.display().to_string(),
                destination.display().to_string(),
            ],
        );
        if privileged {
            return self.escalate(command);
        }

        log::info!("+ {}", command);
        Self::ensure_parent(destination)?;
        if self.exists(destination) {
            std::fs::remove_file(destination).map_err(|e| FsError::from_io(destination, e))?;
        }
        std::os::unix::fs::symlink(source, destination)
            .map_err(|e| FsError::from_io(destination, e))
    }

    fn copy(&self, source: &Path, destination: &Path, privileged: bool) -> FsResult<()> {
        let command = CommandLine::new(
            CP,
            [
                source.display().to_string(),
                destination.display().to_string(),
            ],
        );
        // A symlink at the destination must be replaced, not written through
        let over_symlink =
            std::fs::symlink_metadata(destination).is_ok_and(|m| m.file_type().is_symlink());
        if privileged {
            if over_symlink {
                self.escalate(CommandLine::new(
                    RM,
                    ["-f".to_string(), destination.display().to_string()],
                ))?;
            }
            return self.escalate(command);
        }

        log::info!("+ {}", command);
        Self::ensure_parent(destination)?;
        if over_symlink {
            std::fs::remove_file(destination).map_err(|e| FsError::from_io(destination, e))?;
        }
        Self::copy_atomic(source, destination)
    }

    fn remove(&self, path: &Path, privileged: bool) -> FsResult<()> {
        let command = CommandLine::new(RM, [path.display().to_string()]);
        if privileged {
            return self.escalate(command);
        }

        log::info!("+ {}", command);
        std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }
}
