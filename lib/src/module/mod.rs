use std::{
    fmt,
    str::FromStr,
};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    CleanableItem,
    CleanupContext,
    CleanupResult,
    DomainError,
    ModuleAnalysis,
    OperatingSystem,
    Outcome,
};

/// Identity of a cache source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleName {
    Docker,
    Homebrew,
    JetBrains,
    Maven,
    Gradle,
    Node,
    Python,
    Sdkman,
    System,
}

impl ModuleName {
    pub const ALL: [ModuleName; 9] = [
        ModuleName::Docker,
        ModuleName::Homebrew,
        ModuleName::JetBrains,
        ModuleName::Maven,
        ModuleName::Gradle,
        ModuleName::Node,
        ModuleName::Python,
        ModuleName::Sdkman,
        ModuleName::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Homebrew => "homebrew",
            Self::JetBrains => "jetbrains",
            Self::Maven => "maven",
            Self::Gradle => "gradle",
            Self::Node => "node",
            Self::Python => "python",
            Self::Sdkman => "sdkman",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| DomainError::not_found("CleanupModule", value))
    }
}

/// Advertised metadata of a registered module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: ModuleName,
    description: String,
    destructive: bool,
}

impl ModuleDescriptor {
    pub fn create(name: ModuleName, description: &str, destructive: bool) -> Outcome<Self> {
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "Description cannot be null or whitespace",
            ));
        }

        Ok(Self {
            name,
            description: description.to_string(),
            destructive,
        })
    }

    pub fn name(&self) -> ModuleName {
        self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_destructive(&self) -> bool {
        self.destructive
    }
}

/// A cleanup module knows where one developer tool keeps its caches
/// and how to get rid of them.
#[async_trait]
pub trait CleanupModule: Send + Sync {
    /// Name of the module
    fn name(&self) -> ModuleName;

    fn description(&self) -> &str;

    /// Whether a cleanup might remove data which can not easily be rebuilt.
    /// Destructive modules require a confirmation before anything is deleted.
    fn is_destructive(&self) -> bool;

    /// Checked by the caller before [`CleanupModule::analyze`] or [`CleanupModule::clean`] get invoked.
    fn is_available_on_platform(&self, os: OperatingSystem) -> bool;

    /// Locate the module's artefacts and decide which of them are safe to delete.
    /// Must not delete anything.
    async fn analyze(
        &self,
        context: &CleanupContext,
        cancel: &CancellationToken,
    ) -> Outcome<ModuleAnalysis>;

    /// Delete the given items. Failing items are recorded inside the result
    /// and do not stop the remaining deletions.
    async fn clean(
        &self,
        context: &CleanupContext,
        items: &[CleanableItem],
        cancel: &CancellationToken,
    ) -> Outcome<CleanupResult>;
}

mod directory;
pub(crate) use directory::*;

mod docker;
pub use docker::*;

mod gradle;
pub use gradle::*;

mod homebrew;
pub use homebrew::*;

mod jetbrains;
pub use jetbrains::*;

mod maven;
pub use maven::*;

mod node;
pub use node::*;

mod python;
pub use python::*;

mod sdkman;
pub use sdkman::*;

mod system;
pub use system::*;
