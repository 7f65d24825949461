use async_trait::async_trait;
use chrono::{
    DateTime,
    Utc,
};
use tokio_util::sync::CancellationToken;

use crate::{
    FilePath,
    FileSize,
    Outcome,
};

/// Filesystem access available to cleanup modules.
#[async_trait]
pub trait FileSystem: Send + Sync {
    fn directory_exists(&self, path: &FilePath) -> bool;
    fn file_exists(&self, path: &FilePath) -> bool;

    /// True if the path is a directory holding at least one entry.
    fn is_directory_not_empty(&self, path: &FilePath) -> bool;

    /// Size of a file, or the recursive size of a directory.
    async fn size(&self, path: &FilePath, cancel: &CancellationToken) -> Outcome<FileSize>;
    fn last_write_time(&self, path: &FilePath) -> Outcome<DateTime<Utc>>;

    /// Recursively delete a directory.
    async fn delete_directory(&self, path: &FilePath, cancel: &CancellationToken)
        -> Outcome<()>;
    async fn delete_file(&self, path: &FilePath, cancel: &CancellationToken) -> Outcome<()>;

    /// Directories directly below `base` whose name matches `pattern` (`*` and `?` wildcards).
    async fn find_directories(
        &self,
        base: &FilePath,
        pattern: &str,
        cancel: &CancellationToken,
    ) -> Outcome<Vec<FilePath>>;

    /// Non-directory entries (files, sockets, links) directly below `base` whose name matches `pattern` (`*` and `?` wildcards).
    async fn find_files(
        &self,
        base: &FilePath,
        pattern: &str,
        cancel: &CancellationToken,
    ) -> Outcome<Vec<FilePath>>;
}
