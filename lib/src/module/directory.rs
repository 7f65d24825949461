use tokio_util::sync::CancellationToken;

use super::ModuleName;
use crate::{
    CleanableItem,
    CleanupContext,
    CleanupResult,
    FilePath,
    FileSize,
    ModuleAnalysis,
    Outcome,
};

/// Entries (files and directories) directly below `base` together with their size.
/// A missing base directory has no entries. Entries which disappear while being sized are skipped.
pub(crate) async fn cache_entries(
    context: &CleanupContext,
    base: &FilePath,
    cancel: &CancellationToken,
) -> Outcome<Vec<(FilePath, FileSize)>> {
    let fs = context.file_system();
    if !fs.directory_exists(base) {
        log::debug!("Cache directory {} does not exist", base);
        return Ok(vec![]);
    }

    let mut paths = fs.find_directories(base, "*", cancel).await?;
    paths.extend(fs.find_files(base, "*", cancel).await?);
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        match fs.size(&path, cancel).await {
            Ok(size) => entries.push((path, size)),
            Err(error) if error.is_not_found() => {
                log::debug!("{} vanished before it could be sized", path);
            }
            Err(error) => return Err(error),
        }
    }

    Ok(entries)
}

/// The first of the given processes which is currently running.
pub(crate) async fn running_process<'a>(
    context: &CleanupContext,
    names: &[&'a str],
) -> Option<&'a str> {
    for name in names {
        if context.process_manager().is_process_running(name).await {
            return Some(*name);
        }
    }

    None
}

/// Analysis of a cache directory whose entries must not be touched
/// while one of the `guards` processes is running.
pub(crate) async fn analyze_guarded_cache(
    context: &CleanupContext,
    module: ModuleName,
    base: &FilePath,
    guards: &[&str],
    cancel: &CancellationToken,
) -> Outcome<ModuleAnalysis> {
    let entries = cache_entries(context, base, cancel).await?;
    if entries.is_empty() {
        return Ok(ModuleAnalysis::empty(module));
    }

    let running = running_process(context, guards).await;
    let items = entries
        .into_iter()
        .map(|(path, size)| match running {
            Some(process) => CleanableItem::create_unsafe(
                path,
                size,
                module,
                format!("{} is currently running", process),
            ),
            None => CleanableItem::create_safe(path, size, module, "Regenerable cache"),
        })
        .collect();

    ModuleAnalysis::create(module, Some(items))
}

/// Delete the items one after another through the context's filesystem.
///
/// Items which are not safe to delete or fail to be deleted are recorded
/// as errors. Cancellation stops before the next item, already deleted items stay deleted.
pub(crate) async fn delete_items(
    context: &CleanupContext,
    items: &[CleanableItem],
    cancel: &CancellationToken,
) -> Outcome<CleanupResult> {
    let fs = context.file_system();
    let mut result = CleanupResult::zero();

    for (index, item) in items.iter().enumerate() {
        if cancel.is_cancelled() {
            log::debug!("Cleanup cancelled with {} items left", items.len() - index);
            break;
        }

        if let Err(error) = item.mark_for_deletion() {
            result = result.combine(&CleanupResult::failed(format!(
                "{}: {}",
                item.path(),
                error.message()
            )));
            continue;
        }

        let deleted = if fs.directory_exists(item.path()) {
            fs.delete_directory(item.path(), cancel).await
        } else {
            fs.delete_file(item.path(), cancel).await
        };

        let outcome = match deleted {
            Ok(()) => {
                log::trace!("Deleted {} ({})", item.path(), item.size());
                CleanupResult::deleted(item.size())
            }
            Err(error) => {
                log::warn!("Failed to delete {}: {:#}", item.path(), error);
                CleanupResult::failed(format!(
                    "Failed to delete {}: {}",
                    item.path(),
                    error.message()
                ))
            }
        };
        result = result.combine(&outcome);
    }

    Ok(result)
}
