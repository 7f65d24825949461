use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{
    delete_items,
    CleanupModule,
    ModuleName,
};
use crate::{
    CleanableItem,
    CleanupContext,
    CleanupResult,
    FilePath,
    ModuleAnalysis,
    OperatingSystem,
    Outcome,
};

/// A JetBrains IDE cache directory like `IntelliJIdea2023.2`.
#[derive(Debug, PartialEq, Eq)]
struct ProductDirectory {
    product: String,
    version: String,
    version_parts: Vec<u32>,
}

impl ProductDirectory {
    fn parse(name: &str) -> Option<Self> {
        let split = name.find(|c: char| c.is_ascii_digit())?;
        let (product, version) = name.split_at(split);
        if product.is_empty() || !product.chars().all(char::is_alphanumeric) {
            return None;
        }

        let version_parts = version
            .split('.')
            .map(|part| part.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            product: product.to_string(),
            version: version.to_string(),
            version_parts,
        })
    }
}

/// Caches of JetBrains IDEs. Every update leaves the cache of the previous
/// version behind, only the newest one per product is still in use.
pub struct JetBrainsModule;

impl JetBrainsModule {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CleanupModule for JetBrainsModule {
    fn name(&self) -> ModuleName {
        ModuleName::JetBrains
    }

    fn description(&self) -> &str {
        "Caches of superseded JetBrains IDE versions"
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
        let fs = context.file_system();
        let base = context.environment().jetbrains_base_path();
        if !fs.directory_exists(&base) {
            log::debug!("JetBrains directory {} does not exist", base);
            return Ok(ModuleAnalysis::empty(self.name()));
        }

        let mut products = BTreeMap::<String, Vec<(ProductDirectory, FilePath)>>::new();
        for path in fs.find_directories(&base, "*", cancel).await? {
            let Some(directory) = ProductDirectory::parse(path.file_name()) else {
                log::trace!("Ignoring {}", path);
                continue;
            };

            products
                .entry(directory.product.clone())
                .or_default()
                .push((directory, path));
        }

        let mut items = Vec::new();
        for (product, mut versions) in products {
            versions.sort_by(|(a, _), (b, _)| b.version_parts.cmp(&a.version_parts));

            let mut latest: Option<String> = None;
            for (directory, path) in versions {
                let size = match fs.size(&path, cancel).await {
                    Ok(size) => size,
                    Err(error) if error.is_not_found() => {
                        log::debug!("{} vanished before it could be sized", path);
                        continue;
                    }
                    Err(error) => return Err(error),
                };

                let item = match &latest {
                    None => {
                        latest = Some(directory.version);
                        CleanableItem::create_unsafe(
                            path,
                            size,
                            self.name(),
                            format!("Latest {} version in use", product),
                        )
                    }
                    Some(latest) => CleanableItem::create_safe(
                        path,
                        size,
                        self.name(),
                        format!("Superseded by {}{}", product, latest),
                    ),
                };
                items.push(item);
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
