use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{
    CleanupModule,
    ModuleName,
};
use crate::{
    CleanableItem,
    CleanupContext,
    CleanupResult,
    FilePath,
    FileSize,
    ModuleAnalysis,
    OperatingSystem,
    Outcome,
};

const DOCKER: &str = "docker";
const DF_FORMAT: &str = "{{.Type}}|{{.Reclaimable}}";
const PATH_SCHEME: &str = "docker://";

struct Resource {
    /// Type column of `docker system df`
    kind: &'static str,
    slug: &'static str,
    prune: &'static [&'static str],
}

static RESOURCES: [Resource; 4] = [
    Resource {
        kind: "Images",
        slug: "images",
        prune: &["image", "prune", "--all", "--force"],
    },
    Resource {
        kind: "Containers",
        slug: "containers",
        prune: &["container", "prune", "--force"],
    },
    Resource {
        kind: "Local Volumes",
        slug: "volumes",
        prune: &["volume", "prune", "--force"],
    },
    Resource {
        kind: "Build Cache",
        slug: "build-cache",
        prune: &["builder", "prune", "--all", "--force"],
    },
];

/// Parse the leading size of a `docker system df` column, e.g. `1.2GB (45%)`.
/// Docker reports decimal units.
fn parse_docker_size(column: &str) -> Option<u64> {
    let token = column.split_whitespace().next()?;
    let split = token.find(|c: char| c.is_ascii_alphabetic())?;
    let (number, unit) = token.split_at(split);
    let number = number.parse::<f64>().ok()?;

    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "B" => 1.0,
        "KB" => 1e3,
        "MB" => 1e6,
        "GB" => 1e9,
        "TB" => 1e12,
        _ => return None,
    };

    Some((number * multiplier).round() as u64)
}

/// Images, containers, volumes and build cache of the local docker daemon.
pub struct DockerModule;

impl DockerModule {
    pub fn new() -> Self {
        Self
    }

    async fn running_containers(&self, context: &CleanupContext, cancel: &CancellationToken) -> usize {
        match context
            .command_runner()
            .run(DOCKER, &["ps", "--quiet"], cancel)
            .await
        {
            Ok(output) if output.is_successful() => output
                .standard_output()
                .lines()
                .filter(|line| !line.trim().is_empty())
                .count(),
            _ => 0,
        }
    }

    async fn prune(
        &self,
        context: &CleanupContext,
        item: &CleanableItem,
        cancel: &CancellationToken,
    ) -> CleanupResult {
        if let Err(error) = item.mark_for_deletion() {
            return CleanupResult::failed(format!("{}: {}", item.path(), error.message()));
        }

        let resource = item
            .path()
            .as_str()
            .strip_prefix(PATH_SCHEME)
            .and_then(|slug| RESOURCES.iter().find(|resource| resource.slug == slug));
        let Some(resource) = resource else {
            return CleanupResult::failed(format!("Unknown docker resource {}", item.path()));
        };

        match context
            .command_runner()
            .run(DOCKER, resource.prune, cancel)
            .await
        {
            Ok(output) if output.is_successful() => CleanupResult::deleted(item.size()),
            Ok(output) => CleanupResult::failed(format!(
                "docker {} failed: {}",
                resource.prune.join(" "),
                output.standard_error().trim()
            )),
            Err(error) => CleanupResult::failed(format!(
                "docker {} failed: {}",
                resource.prune.join(" "),
                error.message()
            )),
        }
    }
}

#[async_trait]
impl CleanupModule for DockerModule {
    fn name(&self) -> ModuleName {
        ModuleName::Docker
    }

    fn description(&self) -> &str {
        "Docker images, stopped containers, volumes and build cache"
    }

    fn is_destructive(&self) -> bool {
        true
    }

    fn is_available_on_platform(&self, os: OperatingSystem) -> bool {
        os != OperatingSystem::Unknown
    }

    async fn analyze(
        &self,
        context: &CleanupContext,
        cancel: &CancellationToken,
    ) -> Outcome<ModuleAnalysis> {
        let runner = context.command_runner();
        if !runner.is_command_available(DOCKER) {
            log::debug!("docker is not installed");
            return Ok(ModuleAnalysis::empty(self.name()));
        }

        let output = runner
            .run(DOCKER, &["system", "df", "--format", DF_FORMAT], cancel)
            .await?;
        if !output.is_successful() {
            log::warn!("docker system df failed: {}", output.standard_error().trim());
            context
                .output()
                .warning("Docker daemon is not reachable, skipping docker resources");
            return Ok(ModuleAnalysis::empty(self.name()));
        }

        let running_containers = self.running_containers(context, cancel).await;

        let mut items = Vec::new();
        for line in output.standard_output().lines() {
            let Some((kind, reclaimable)) = line.split_once('|') else {
                continue;
            };
            let Some(resource) = RESOURCES.iter().find(|resource| resource.kind == kind.trim())
            else {
                log::trace!("Ignoring docker resource type {}", kind);
                continue;
            };

            let size = match parse_docker_size(reclaimable) {
                Some(0) => continue,
                Some(bytes) => FileSize::from_bytes(bytes),
                None => {
                    log::warn!("Unexpected docker size {:?} for {}", reclaimable, kind);
                    continue;
                }
            };

            let path = FilePath::create(format!("{}{}", PATH_SCHEME, resource.slug))?;
            let item = match resource.slug {
                "volumes" => CleanableItem::create_unsafe(
                    path,
                    size,
                    self.name(),
                    "Volumes may hold persistent data",
                ),
                "containers" if running_containers > 0 => CleanableItem::create_unsafe(
                    path,
                    size,
                    self.name(),
                    format!("{} containers are running", running_containers),
                ),
                _ => CleanableItem::create_safe(
                    path,
                    size,
                    self.name(),
                    format!("Reclaimable {}", resource.kind.to_lowercase()),
                ),
            };
            items.push(item);
        }

        ModuleAnalysis::create(self.name(), Some(items))
    }

    async fn clean(
        &self,
        context: &CleanupContext,
        items: &[CleanableItem],
        cancel: &CancellationToken,
    ) -> Outcome<CleanupResult> {
        let mut result = CleanupResult::zero();
        for item in items {
            if cancel.is_cancelled() {
                break;
            }

            result = result.combine(&self.prune(context, item, cancel).await);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::CommandOutput,
        testing::TestContext,
    };

    const DF: &str = "docker system df --format {{.Type}}|{{.Reclaimable}}";

    fn docker_host(df_output: &str, running: &str) -> TestContext {
        let test = TestContext::new();
        test.commands.make_available("docker");
        test.commands
            .respond(DF, CommandOutput::create(0, df_output, ""));
        test.commands
            .respond("docker ps --quiet", CommandOutput::create(0, running, ""));
        test
    }

    #[test]
    fn parses_docker_sizes() {
        assert_eq!(parse_docker_size("1.2GB (45%)"), Some(1_200_000_000));
        assert_eq!(parse_docker_size("512kB"), Some(512_000));
        assert_eq!(parse_docker_size("0B (0%)"), Some(0));
        assert_eq!(parse_docker_size("n/a"), None);
        assert_eq!(parse_docker_size(""), None);
    }

    #[tokio::test]
    async fn missing_docker_yields_an_empty_analysis() {
        let test = TestContext::new();
        let analysis = DockerModule::new()
            .analyze(&test.context, &CancellationToken::new())
            .await
            .unwrap();
        assert!(analysis.is_empty());
        assert!(test.commands.invocations().is_empty());
    }

    #[tokio::test]
    async fn unreachable_daemon_yields_an_empty_analysis() {
        let test = TestContext::new();
        test.commands.make_available("docker");
        test.commands
            .respond(DF, CommandOutput::create(1, "", "Cannot connect to the Docker daemon"));

        let analysis = DockerModule::new()
            .analyze(&test.context, &CancellationToken::new())
            .await
            .unwrap();

        assert!(analysis.is_empty());
        assert!(test
            .output
            .messages()
            .iter()
            .any(|message| message.starts_with("warning:")));
    }

    #[tokio::test]
    async fn classifies_reclaimable_resources() {
        let test = docker_host(
            "Images|1.5GB (80%)\nContainers|20MB (100%)\nLocal Volumes|300MB (50%)\nBuild Cache|0B\n",
            "",
        );

        let analysis = DockerModule::new()
            .analyze(&test.context, &CancellationToken::new())
            .await
            .unwrap();

        let paths = analysis
            .items()
            .iter()
            .map(|item| (item.path().as_str(), item.is_safe_to_delete()))
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                ("docker://images", true),
                ("docker://containers", true),
                ("docker://volumes", false),
            ]
        );
        assert_eq!(analysis.total_size(), FileSize::from_bytes(1_820_000_000));
    }

    #[tokio::test]
    async fn containers_are_unsafe_while_running() {
        let test = docker_host("Containers|20MB (10%)\n", "abc123\ndef456\n");

        let analysis = DockerModule::new()
            .analyze(&test.context, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(analysis.unsafe_item_count(), 1);
        assert_eq!(analysis.items()[0].reason(), "2 containers are running");
    }

    #[tokio::test]
    async fn clean_prunes_each_resource_and_records_failures() {
        let test = docker_host("Images|1GB\nBuild Cache|2GB\n", "");
        test.commands.respond(
            "docker image prune --all --force",
            CommandOutput::create(0, "Total reclaimed space: 1GB", ""),
        );
        test.commands.respond(
            "docker builder prune --all --force",
            CommandOutput::create(1, "", "permission denied"),
        );

        let module = DockerModule::new();
        let cancel = CancellationToken::new();
        let analysis = module.analyze(&test.context, &cancel).await.unwrap();
        let result = module
            .clean(&test.context, &analysis.safe_items(), &cancel)
            .await
            .unwrap();

        assert_eq!(result.total_files_deleted(), 1);
        assert_eq!(result.total_space_freed(), FileSize::from_bytes(1_000_000_000));
        assert_eq!(result.error_messages().len(), 1);
        assert!(result.error_messages()[0].contains("permission denied"));
    }
}
