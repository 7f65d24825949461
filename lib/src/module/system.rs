use async_trait::async_trait;
use chrono::{
    DateTime,
    Duration,
    Utc,
};
use tokio_util::sync::CancellationToken;

use super::{
    cache_entries,
    delete_items,
    CleanupModule,
    ModuleName,
};
use crate::{
    path::wildcard_match,
    CleanableItem,
    CleanupContext,
    CleanupResult,
    FilePath,
    FileSize,
    ModuleAnalysis,
    OperatingSystem,
    Outcome,
};

/// Names of files held by running programs.
const IN_USE_MARKERS: [&str; 4] = ["*.pid", "*.lock", "*.sock", "*.socket"];

fn is_in_use_marker(name: &str) -> bool {
    IN_USE_MARKERS
        .iter()
        .any(|pattern| wildcard_match(pattern, name))
}

/// A system directory whose entries expire after `retention`.
struct ScratchLocation {
    path: FilePath,
    retention: Duration,
}

/// Temporary files and logs which have not been touched for a while.
pub struct SystemModule;

impl SystemModule {
    pub fn new() -> Self {
        Self
    }

    fn locations(context: &CleanupContext) -> [ScratchLocation; 2] {
        let environment = context.environment();
        [
            ScratchLocation {
                path: environment.system_temp_path(),
                retention: Duration::days(3),
            },
            ScratchLocation {
                path: environment.system_logs_path(),
                retention: Duration::days(7),
            },
        ]
    }

    /// Most recent modification of `path` and its immediate children.
    /// `None` once `path` itself is gone.
    fn last_activity(
        context: &CleanupContext,
        path: &FilePath,
        children: &[FilePath],
    ) -> Outcome<Option<DateTime<Utc>>> {
        let fs = context.file_system();
        let mut newest = match fs.last_write_time(path) {
            Ok(modified) => modified,
            Err(error) if error.is_not_found() => return Ok(None),
            Err(error) => return Err(error),
        };

        for child in children {
            match fs.last_write_time(child) {
                Ok(modified) => newest = newest.max(modified),
                Err(error) if error.is_not_found() => continue,
                Err(error) => return Err(error),
            }
        }

        Ok(Some(newest))
    }

    async fn classify(
        &self,
        context: &CleanupContext,
        path: FilePath,
        size: FileSize,
        retention: Duration,
        cancel: &CancellationToken,
    ) -> Outcome<Option<CleanableItem>> {
        let fs = context.file_system();
        let mut children = Vec::new();
        if fs.directory_exists(&path) {
            if !fs.is_directory_not_empty(&path) {
                return Ok(Some(CleanableItem::create_safe(
                    path,
                    size,
                    self.name(),
                    "Empty directory",
                )));
            }

            let listed: Outcome<Vec<FilePath>> = async {
                let mut entries = fs.find_directories(&path, "*", cancel).await?;
                entries.extend(fs.find_files(&path, "*", cancel).await?);
                Ok(entries)
            }
            .await;
            children = match listed {
                Ok(entries) => entries,
                Err(error) if error.is_not_found() => {
                    log::debug!("{} vanished before it could be inspected", path);
                    return Ok(None);
                }
                Err(error) => return Err(error),
            };
        }

        let held = std::iter::once(&path)
            .chain(children.iter())
            .any(|entry| is_in_use_marker(entry.file_name()));
        if held {
            return Ok(Some(CleanableItem::create_unsafe(
                path,
                size,
                self.name(),
                "Holds a lock file or socket",
            )));
        }

        let Some(modified) = Self::last_activity(context, &path, &children)? else {
            log::debug!("{} vanished before it could be inspected", path);
            return Ok(None);
        };

        let age = Utc::now() - modified;
        let item = if age < retention {
            CleanableItem::create_unsafe(
                path,
                size,
                self.name(),
                format!("Modified {} hours ago", age.num_hours().max(0)),
            )
        } else {
            CleanableItem::create_safe(
                path,
                size,
                self.name(),
                format!("Not modified for {} days", age.num_days()),
            )
        };
        Ok(Some(item))
    }
}

#[async_trait]
impl CleanupModule for SystemModule {
    fn name(&self) -> ModuleName {
        ModuleName::System
    }

    fn description(&self) -> &str {
        "Stale temporary files and logs"
    }

    fn is_destructive(&self) -> bool {
        true
    }

    fn is_available_on_platform(&self, _os: OperatingSystem) -> bool {
        true
    }

    async fn analyze(
        &self,
        context: &CleanupContext,
        cancel: &CancellationToken,
    ) -> Outcome<ModuleAnalysis> {
        let mut items = Vec::new();
        for location in Self::locations(context) {
            for (path, size) in cache_entries(context, &location.path, cancel).await? {
                let item = self
                    .classify(context, path, size, location.retention, cancel)
                    .await?;
                items.extend(item);
            }
        }

        ModuleAnalysis::create(self.name(), Some(items))
    }

    async fn clean(
        &self,
        context: &CleanupContext,
        items: &[CleanableItem],
        cancel: &CancellationToken,
    ) -> Outcome<CleanupResult> {
        delete_items(context, items, cancel).await
    }
}
