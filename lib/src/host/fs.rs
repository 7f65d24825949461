use std::{
    fs::{
        self,
        DirEntry,
    },
    io,
    path::{
        Path,
        PathBuf,
    },
};

use async_trait::async_trait;
use chrono::{
    DateTime,
    Utc,
};
use tokio::task;
use tokio_util::sync::CancellationToken;

use crate::{
    context::FileSystem,
    path::wildcard_match,
    DomainError,
    FilePath,
    FileSize,
    Outcome,
};

pub(crate) struct DirWalker {
    pending_entries: Vec<DirEntry>,
}

impl DirWalker {
    pub fn new() -> Self {
        Self {
            pending_entries: Vec::with_capacity(1024),
        }
    }

    pub fn next_item(&mut self) -> Option<DirEntry> {
        self.pending_entries.pop()
    }

    pub fn insert_entries(&mut self, path: &Path) -> io::Result<()> {
        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_err) => continue,
            };

            self.pending_entries.push(entry);
        }

        Ok(())
    }
}

pub(crate) trait DirEntryEx {
    fn is_file(&self) -> bool;
    fn is_dir(&self) -> bool;
}

impl DirEntryEx for DirEntry {
    fn is_file(&self) -> bool {
        self.file_type()
            .map_or(false, |file_type| file_type.is_file())
    }

    fn is_dir(&self) -> bool {
        self.file_type()
            .map_or(false, |file_type| file_type.is_dir())
    }
}

/// Total size of all files below `dir`. Unreadable entries are skipped, symlinks are not followed.
pub(crate) fn directory_size(dir: &Path) -> u64 {
    let mut walker = DirWalker::new();
    if let Err(error) = walker.insert_entries(dir) {
        log::debug!("Failed to read {}: {:#}", dir.display(), error);
        return 0;
    }

    let mut size_total = 0;
    while let Some(entry) = walker.next_item() {
        if entry.is_file() {
            size_total += entry.metadata().map_or(0, |meta| meta.len());
        } else if entry.is_dir() {
            let _ = walker.insert_entries(&entry.path());
        }
    }

    size_total
}

fn io_error(action: &str, path: &Path, error: io::Error) -> DomainError {
    if error.kind() == io::ErrorKind::NotFound {
        DomainError::not_found("Path", path.to_string_lossy())
    } else {
        DomainError::invalid_operation(format!(
            "Failed to {} {}: {}",
            action,
            path.display(),
            error
        ))
    }
}

fn cancelled(action: &str, path: &FilePath) -> DomainError {
    DomainError::invalid_operation(format!("Cancelled before {} {}", action, path))
}

async fn blocking<T, F>(job: F) -> Outcome<T>
where
    F: FnOnce() -> Outcome<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(job).await.map_err(|error| {
        DomainError::invalid_operation(format!("Filesystem task failed: {}", error))
    })?
}

fn matching_children(base: &Path, pattern: &str, directories: bool) -> Outcome<Vec<FilePath>> {
    let entries = fs::read_dir(base).map_err(|error| io_error("read", base, error))?;

    let mut result = Vec::new();
    for entry in entries.filter_map(|entry| entry.ok()) {
        let matches_kind = if directories {
            entry.is_dir()
        } else {
            !entry.is_dir()
        };
        if !matches_kind || !wildcard_match(pattern, &entry.file_name().to_string_lossy()) {
            continue;
        }

        match FilePath::from_path(&entry.path()) {
            Ok(path) => result.push(path),
            Err(error) => log::warn!("Skipping {}: {}", entry.path().display(), error),
        }
    }

    result.sort();
    Ok(result)
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    fn directory_exists(&self, path: &FilePath) -> bool {
        path.as_path().is_dir()
    }

    fn file_exists(&self, path: &FilePath) -> bool {
        path.as_path().is_file()
    }

    fn is_directory_not_empty(&self, path: &FilePath) -> bool {
        path.as_path()
            .read_dir()
            .map_or(false, |mut entries| entries.next().is_some())
    }

    async fn size(&self, path: &FilePath, cancel: &CancellationToken) -> Outcome<FileSize> {
        if cancel.is_cancelled() {
            return Err(cancelled("sizing", path));
        }

        let target: PathBuf = path.as_path().to_owned();
        blocking(move || {
            let meta = fs::symlink_metadata(&target)
                .map_err(|error| io_error("inspect", &target, error))?;

            let bytes = if meta.is_dir() {
                directory_size(&target)
            } else {
                meta.len()
            };
            Ok(FileSize::from_bytes(bytes))
        })
        .await
    }

    fn last_write_time(&self, path: &FilePath) -> Outcome<DateTime<Utc>> {
        let modified = fs::symlink_metadata(path.as_path())
            .and_then(|meta| meta.modified())
            .map_err(|error| io_error("inspect", path.as_path(), error))?;

        Ok(DateTime::<Utc>::from(modified))
    }

    async fn delete_directory(
        &self,
        path: &FilePath,
        cancel: &CancellationToken,
    ) -> Outcome<()> {
        if cancel.is_cancelled() {
            return Err(cancelled("deleting", path));
        }

        let target: PathBuf = path.as_path().to_owned();
        blocking(move || {
            fs::remove_dir_all(&target).map_err(|error| io_error("delete", &target, error))
        })
        .await
    }

    async fn delete_file(&self, path: &FilePath, cancel: &CancellationToken) -> Outcome<()> {
        if cancel.is_cancelled() {
            return Err(cancelled("deleting", path));
        }

        let target: PathBuf = path.as_path().to_owned();
        blocking(move || fs::remove_file(&target).map_err(|error| io_error("delete", &target, error)))
            .await
    }

    async fn find_directories(
        &self,
        base: &FilePath,
        pattern: &str,
        cancel: &CancellationToken,
    ) -> Outcome<Vec<FilePath>> {
        if cancel.is_cancelled() {
            return Err(cancelled("searching", base));
        }

        let (base, pattern) = (base.as_path().to_owned(), pattern.to_string());
        blocking(move || matching_children(&base, &pattern, true)).await
    }

    async fn find_files(
        &self,
        base: &FilePath,
        pattern: &str,
        cancel: &CancellationToken,
    ) -> Outcome<Vec<FilePath>> {
        if cancel.is_cancelled() {
            return Err(cancelled("searching", base));
        }

        let (base, pattern) = (base.as_path().to_owned(), pattern.to_string());
        blocking(move || matching_children(&base, &pattern, false)).await
    }
}
