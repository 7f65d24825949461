use std::{
    env,
    path::{
        Path,
        PathBuf,
    },
};

use crate::{
    context::EnvironmentProvider,
    DomainError,
    FilePath,
    OperatingSystem,
    Outcome,
};

/// Locations of the current host, resolved through the `dirs` crate.
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    os: OperatingSystem,
    home: FilePath,
    jetbrains: FilePath,
    docker: FilePath,
    maven: FilePath,
    gradle: FilePath,
    node: FilePath,
    python: FilePath,
    sdkman: FilePath,
    homebrew: FilePath,
    temp: FilePath,
    logs: FilePath,
    cache: FilePath,
}

impl HostEnvironment {
    /// Resolve the well known paths of the current user.
    /// Fails if the home directory can not be determined.
    pub fn detect() -> Outcome<Self> {
        let home = dirs::home_dir().ok_or_else(|| DomainError::not_found("Directory", "home"))?;
        Self::resolve(OperatingSystem::current(), &home, dirs::cache_dir())
    }

    fn resolve(os: OperatingSystem, home: &Path, cache: Option<PathBuf>) -> Outcome<Self> {
        let cache = cache.unwrap_or_else(|| home.join(".cache"));
        let node = match os {
            OperatingSystem::Windows => cache.join("npm-cache"),
            _ => home.join(".npm"),
        };
        let logs = match os {
            OperatingSystem::MacOs => home.join("Library").join("Logs"),
            _ => dirs::state_dir().unwrap_or_else(|| home.join(".local").join("state")),
        };

        Ok(Self {
            os,
            home: FilePath::from_path(home)?,
            jetbrains: FilePath::from_path(&cache.join("JetBrains"))?,
            docker: FilePath::from_path(&home.join(".docker"))?,
            maven: FilePath::from_path(&home.join(".m2").join("repository"))?,
            gradle: FilePath::from_path(&home.join(".gradle").join("caches"))?,
            node: FilePath::from_path(&node)?,
            python: FilePath::from_path(&cache.join("pip"))?,
            sdkman: FilePath::from_path(&home.join(".sdkman"))?,
            homebrew: FilePath::from_path(&cache.join("Homebrew"))?,
            temp: FilePath::from_path(&env::temp_dir())?,
            logs: FilePath::from_path(&logs)?,
            cache: FilePath::from_path(&cache)?,
        })
    }
}

impl EnvironmentProvider for HostEnvironment {
    fn current_os(&self) -> OperatingSystem {
        self.os
    }

    fn home_path(&self) -> FilePath {
        self.home.clone()
    }

    fn jetbrains_base_path(&self) -> FilePath {
        self.jetbrains.clone()
    }

    fn docker_config_path(&self) -> FilePath {
        self.docker.clone()
    }

    fn maven_repository_path(&self) -> FilePath {
        self.maven.clone()
    }

    fn gradle_cache_path(&self) -> FilePath {
        self.gradle.clone()
    }

    fn node_cache_path(&self) -> FilePath {
        self.node.clone()
    }

    fn python_cache_path(&self) -> FilePath {
        self.python.clone()
    }

    fn sdkman_path(&self) -> FilePath {
        self.sdkman.clone()
    }

    fn homebrew_cache_path(&self) -> FilePath {
        self.homebrew.clone()
    }

    fn system_temp_path(&self) -> FilePath {
        self.temp.clone()
    }

    fn system_logs_path(&self) -> FilePath {
        self.logs.clone()
    }

    fn system_cache_path(&self) -> FilePath {
        self.cache.clone()
    }
}
