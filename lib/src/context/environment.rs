use crate::{
    FilePath,
    OperatingSystem,
};

/// Well known locations of the host, resolved once per run.
pub trait EnvironmentProvider: Send + Sync {
    fn current_os(&self) -> OperatingSystem;
    fn home_path(&self) -> FilePath;

    fn jetbrains_base_path(&self) -> FilePath;
    fn docker_config_path(&self) -> FilePath;
    fn maven_repository_path(&self) -> FilePath;
    fn gradle_cache_path(&self) -> FilePath;
    fn node_cache_path(&self) -> FilePath;
    fn python_cache_path(&self) -> FilePath;
    fn sdkman_path(&self) -> FilePath;
    fn homebrew_cache_path(&self) -> FilePath;

    fn system_temp_path(&self) -> FilePath;
    fn system_logs_path(&self) -> FilePath;
    fn system_cache_path(&self) -> FilePath;
}
