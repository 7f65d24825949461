//! In-memory capabilities for exercising modules and use cases without touching the host.

use std::{
    collections::{
        BTreeMap,
        HashMap,
        HashSet,
    },
    path::Path,
    sync::{
        atomic::{
            AtomicUsize,
            Ordering,
        },
        Arc,
        Mutex,
    },
};

use async_trait::async_trait;
use chrono::{
    DateTime,
    Utc,
};
use tokio_util::sync::CancellationToken;

use crate::{
    context::{
        CommandOutput,
        CommandRunner,
        EnvironmentProvider,
        FileSystem,
        OutputFormatter,
        ProcessManager,
        UserInteraction,
    },
    module::{
        CleanupModule,
        ModuleName,
    },
    path::wildcard_match,
    AnalysisReport,
    CleanableItem,
    CleanupContext,
    CleanupResult,
    CleanupSummary,
    DomainError,
    FilePath,
    FileSize,
    ModuleAnalysis,
    OperatingSystem,
    Outcome,
};

pub fn path(value: &str) -> FilePath {
    FilePath::create(value).unwrap()
}

pub fn item(value: &str, bytes: u64, safe: bool) -> CleanableItem {
    if safe {
        CleanableItem::create_safe(
            path(value),
            FileSize::from_bytes(bytes),
            ModuleName::Docker,
            "Safe for deletion",
        )
    } else {
        CleanableItem::create_unsafe(
            path(value),
            FileSize::from_bytes(bytes),
            ModuleName::Docker,
            "Currently in use",
        )
    }
}

#[derive(Debug, Clone)]
enum Node {
    File(u64),
    Directory,
}

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    modified: DateTime<Utc>,
}

#[derive(Default)]
pub struct FakeFileSystem {
    entries: Mutex<BTreeMap<String, Entry>>,
    failing: Mutex<HashSet<String>>,
    vanished: Mutex<HashSet<String>>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_parents(entries: &mut BTreeMap<String, Entry>, path: &str) {
        for parent in Path::new(path).ancestors().skip(1) {
            if parent.parent().is_none() {
                break;
            }
            entries
                .entry(parent.to_string_lossy().into_owned())
                .or_insert(Entry {
                    node: Node::Directory,
                    modified: Utc::now(),
                });
        }
    }

    pub fn add_dir(&self, path: &str) {
        let mut entries = self.entries.lock().unwrap();
        Self::insert_parents(&mut entries, path);
        entries.insert(
            path.to_string(),
            Entry {
                node: Node::Directory,
                modified: Utc::now(),
            },
        );
    }

    pub fn add_file(&self, path: &str, bytes: u64) {
        let mut entries = self.entries.lock().unwrap();
        Self::insert_parents(&mut entries, path);
        entries.insert(
            path.to_string(),
            Entry {
                node: Node::File(bytes),
                modified: Utc::now(),
            },
        );
    }

    pub fn set_modified(&self, path: &str, modified: DateTime<Utc>) {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(path) {
            entry.modified = modified;
        }
    }

    pub fn fail_deletion_of(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    /// Keep `path` listed but let every lookup of it fail as if it had just been deleted.
    pub fn vanish_after_listing(&self, path: &str) {
        self.vanished.lock().unwrap().insert(path.to_string());
    }

    fn check_present(&self, path: &FilePath) -> Outcome<()> {
        if self.vanished.lock().unwrap().contains(path.as_str()) {
            return Err(DomainError::not_found("Path", path.as_str()));
        }
        Ok(())
    }

    pub fn exists(&self, path: &str) -> bool {
        self.entries.lock().unwrap().contains_key(path)
    }

    fn children_prefix(path: &FilePath) -> String {
        format!("{}/", path.as_str().trim_end_matches('/'))
    }

    fn remove(&self, path: &FilePath, directory: bool) -> Outcome<()> {
        if self.failing.lock().unwrap().contains(path.as_str()) {
            return Err(DomainError::invalid_operation(format!(
                "Permission denied: {}",
                path
            )));
        }

        let mut entries = self.entries.lock().unwrap();
        match entries.get(path.as_str()).map(|entry| &entry.node) {
            Some(Node::Directory) if directory => {}
            Some(Node::File(_)) if !directory => {}
            _ => return Err(DomainError::not_found("Path", path.as_str())),
        }

        let prefix = Self::children_prefix(path);
        entries.retain(|key, _| key != path.as_str() && !key.starts_with(&prefix));
        Ok(())
    }

    fn children(&self, base: &FilePath, pattern: &str, directories: bool) -> Vec<FilePath> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .filter(|(key, entry)| {
                let key = Path::new(key.as_str());
                key.parent() == Some(base.as_path())
                    && matches!(entry.node, Node::Directory) == directories
                    && wildcard_match(
                        pattern,
                        &key.file_name().unwrap_or_default().to_string_lossy(),
                    )
            })
            .map(|(key, _)| path(key))
            .collect()
    }
}

#[async_trait]
impl FileSystem for FakeFileSystem {
    fn directory_exists(&self, path: &FilePath) -> bool {
        matches!(
            self.entries.lock().unwrap().get(path.as_str()),
            Some(Entry {
                node: Node::Directory,
                ..
            })
        )
    }

    fn file_exists(&self, path: &FilePath) -> bool {
        matches!(
            self.entries.lock().unwrap().get(path.as_str()),
            Some(Entry {
                node: Node::File(_),
                ..
            })
        )
    }

    fn is_directory_not_empty(&self, path: &FilePath) -> bool {
        let prefix = Self::children_prefix(path);
        self.directory_exists(path)
            && self
                .entries
                .lock()
                .unwrap()
                .keys()
                .any(|key| key.starts_with(&prefix))
    }

    async fn size(&self, path: &FilePath, _cancel: &CancellationToken) -> Outcome<FileSize> {
        self.check_present(path)?;
        let entries = self.entries.lock().unwrap();
        match entries.get(path.as_str()) {
            Some(Entry {
                node: Node::File(bytes),
                ..
            }) => Ok(FileSize::from_bytes(*bytes)),
            Some(_) => {
                let prefix = Self::children_prefix(path);
                Ok(entries
                    .iter()
                    .filter(|(key, _)| key.starts_with(&prefix))
                    .map(|(_, entry)| match entry.node {
                        Node::File(bytes) => FileSize::from_bytes(bytes),
                        Node::Directory => FileSize::ZERO,
                    })
                    .sum())
            }
            None => Err(DomainError::not_found("Path", path.as_str())),
        }
    }

    fn last_write_time(&self, path: &FilePath) -> Outcome<DateTime<Utc>> {
        self.check_present(path)?;
        self.entries
            .lock()
            .unwrap()
            .get(path.as_str())
            .map(|entry| entry.modified)
            .ok_or_else(|| DomainError::not_found("Path", path.as_str()))
    }

    async fn delete_directory(
        &self,
        path: &FilePath,
        _cancel: &CancellationToken,
    ) -> Outcome<()> {
        self.remove(path, true)
    }

    async fn delete_file(&self, path: &FilePath, _cancel: &CancellationToken) -> Outcome<()> {
        self.remove(path, false)
    }

    async fn find_directories(
        &self,
        base: &FilePath,
        pattern: &str,
        _cancel: &CancellationToken,
    ) -> Outcome<Vec<FilePath>> {
        Ok(self.children(base, pattern, true))
    }

    async fn find_files(
        &self,
        base: &FilePath,
        pattern: &str,
        _cancel: &CancellationToken,
    ) -> Outcome<Vec<FilePath>> {
        Ok(self.children(base, pattern, false))
    }
}

#[derive(Default)]
pub struct FakeProcessManager {
    running: Mutex<HashSet<String>>,
}

impl FakeProcessManager {
    pub fn start(&self, name: &str) {
        self.running.lock().unwrap().insert(name.to_string());
    }
}

#[async_trait]
impl ProcessManager for FakeProcessManager {
    async fn is_process_running(&self, process_name: &str) -> bool {
        self.running.lock().unwrap().contains(process_name)
    }

    async fn kill_process(
        &self,
        process_name: &str,
        _cancel: &CancellationToken,
    ) -> Outcome<bool> {
        Ok(self.running.lock().unwrap().remove(process_name))
    }
}

#[derive(Default)]
pub struct FakeCommandRunner {
    available: Mutex<HashSet<String>>,
    responses: Mutex<HashMap<String, CommandOutput>>,
    invocations: Mutex<Vec<String>>,
}

impl FakeCommandRunner {
    pub fn make_available(&self, command: &str) {
        self.available.lock().unwrap().insert(command.to_string());
    }

    /// Answer `command_line` (command and arguments joined by spaces) with `output`.
    pub fn respond(&self, command_line: &str, output: CommandOutput) {
        self.responses
            .lock()
            .unwrap()
            .insert(command_line.to_string(), output);
    }

    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    fn is_command_available(&self, command: &str) -> bool {
        self.available.lock().unwrap().contains(command)
    }

    async fn run(
        &self,
        command: &str,
        arguments: &[&str],
        _cancel: &CancellationToken,
    ) -> Outcome<CommandOutput> {
        let command_line = std::iter::once(command)
            .chain(arguments.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.invocations.lock().unwrap().push(command_line.clone());

        match self.responses.lock().unwrap().get(&command_line) {
            Some(output) => Ok(output.clone()),
            None => CommandOutput::failed(format!("unexpected command: {}", command_line)),
        }
    }
}

pub struct FakeEnvironment {
    os: OperatingSystem,
}

impl FakeEnvironment {
    pub fn with_os(os: OperatingSystem) -> Self {
        Self { os }
    }

    pub fn linux() -> Self {
        Self::with_os(OperatingSystem::Linux)
    }
}

impl EnvironmentProvider for FakeEnvironment {
    fn current_os(&self) -> OperatingSystem {
        self.os
    }

    fn home_path(&self) -> FilePath {
        path("/home/dev")
    }

    fn jetbrains_base_path(&self) -> FilePath {
        path("/home/dev/.cache/JetBrains")
    }

    fn docker_config_path(&self) -> FilePath {
        path("/home/dev/.docker")
    }

    fn maven_repository_path(&self) -> FilePath {
        path("/home/dev/.m2/repository")
    }

    fn gradle_cache_path(&self) -> FilePath {
        path("/home/dev/.gradle/caches")
    }

    fn node_cache_path(&self) -> FilePath {
        path("/home/dev/.npm")
    }

    fn python_cache_path(&self) -> FilePath {
        path("/home/dev/.cache/pip")
    }

    fn sdkman_path(&self) -> FilePath {
        path("/home/dev/.sdkman")
    }

    fn homebrew_cache_path(&self) -> FilePath {
        path("/home/dev/.cache/Homebrew")
    }

    fn system_temp_path(&self) -> FilePath {
        path("/tmp")
    }

    fn system_logs_path(&self) -> FilePath {
        path("/home/dev/.local/state")
    }

    fn system_cache_path(&self) -> FilePath {
        path("/home/dev/.cache")
    }
}

pub struct ScriptedInteraction {
    answer: bool,
    prompts: Mutex<Vec<(String, bool)>>,
}

impl ScriptedInteraction {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, bool)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserInteraction for ScriptedInteraction {
    async fn confirm(&self, message: &str, destructive: bool, _cancel: &CancellationToken) -> bool {
        self.prompts
            .lock()
            .unwrap()
            .push((message.to_string(), destructive));
        self.answer
    }
}

#[derive(Default)]
pub struct RecordingOutput {
    messages: Mutex<Vec<String>>,
}

impl RecordingOutput {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    fn record(&self, level: &str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{}: {}", level, message));
    }
}

impl OutputFormatter for RecordingOutput {
    fn info(&self, message: &str) {
        self.record("info", message)
    }

    fn success(&self, message: &str) {
        self.record("success", message)
    }

    fn warning(&self, message: &str) {
        self.record("warning", message)
    }

    fn error(&self, message: &str) {
        self.record("error", message)
    }

    fn debug(&self, message: &str) {
        self.record("debug", message)
    }

    fn section(&self, title: &str) {
        self.record("section", title)
    }

    fn display_banner(&self, version: &str) {
        self.record("banner", version)
    }

    fn display_analysis_report(&self, report: &AnalysisReport) {
        self.record("report", &report.total_item_count().to_string())
    }

    fn display_completion(&self, summaries: &[CleanupSummary]) {
        self.record("completion", &summaries.len().to_string())
    }
}

/// A context wired to fakes, with handles to inspect and script them.
pub struct TestContext {
    pub context: CleanupContext,
    pub fs: Arc<FakeFileSystem>,
    pub processes: Arc<FakeProcessManager>,
    pub commands: Arc<FakeCommandRunner>,
    pub interaction: Arc<ScriptedInteraction>,
    pub output: Arc<RecordingOutput>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(FakeEnvironment::linux(), true)
    }

    pub fn on(os: OperatingSystem) -> Self {
        Self::build(FakeEnvironment::with_os(os), true)
    }

    pub fn answering(answer: bool) -> Self {
        Self::build(FakeEnvironment::linux(), answer)
    }

    fn build(environment: FakeEnvironment, answer: bool) -> Self {
        let fs = Arc::new(FakeFileSystem::new());
        let processes = Arc::new(FakeProcessManager::default());
        let commands = Arc::new(FakeCommandRunner::default());
        let interaction = Arc::new(ScriptedInteraction::answering(answer));
        let output = Arc::new(RecordingOutput::default());

        let context = CleanupContext::builder()
            .file_system(fs.clone())
            .process_manager(processes.clone())
            .command_runner(commands.clone())
            .environment(Arc::new(environment))
            .user_interaction(interaction.clone())
            .output(output.clone())
            .build()
            .unwrap();

        Self {
            context,
            fs,
            processes,
            commands,
            interaction,
            output,
        }
    }
}

/// A module returning a scripted analysis and recording what it has been asked to clean.
pub struct StubModule {
    name: ModuleName,
    destructive: bool,
    platforms: Vec<OperatingSystem>,
    analysis: Outcome<Vec<CleanableItem>>,
    analyze_calls: AtomicUsize,
    cleaned: Mutex<Vec<Vec<FilePath>>>,
    cancel_on_clean: Option<CancellationToken>,
}

impl StubModule {
    pub fn new(name: ModuleName, items: Vec<CleanableItem>) -> Self {
        Self {
            name,
            destructive: false,
            platforms: vec![
                OperatingSystem::MacOs,
                OperatingSystem::Linux,
                OperatingSystem::Windows,
            ],
            analysis: Ok(items),
            analyze_calls: AtomicUsize::new(0),
            cleaned: Mutex::new(Vec::new()),
            cancel_on_clean: None,
        }
    }

    pub fn failing(name: ModuleName, error: DomainError) -> Self {
        Self {
            analysis: Err(error),
            ..Self::new(name, Vec::new())
        }
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    pub fn only_on(mut self, os: OperatingSystem) -> Self {
        self.platforms = vec![os];
        self
    }

    /// Cancel `token` once the module has cleaned its items.
    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_clean = Some(token);
        self
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn cleaned(&self) -> Vec<Vec<FilePath>> {
        self.cleaned.lock().unwrap().clone()
    }
}

#[async_trait]
impl CleanupModule for StubModule {
    fn name(&self) -> ModuleName {
        self.name
    }

    fn description(&self) -> &str {
        "Stubbed module"
    }

    fn is_destructive(&self) -> bool {
        self.destructive
    }

    fn is_available_on_platform(&self, os: OperatingSystem) -> bool {
        self.platforms.contains(&os)
    }

    async fn analyze(
        &self,
        _context: &CleanupContext,
        _cancel: &CancellationToken,
    ) -> Outcome<ModuleAnalysis> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.analysis.clone()?;
        ModuleAnalysis::create(self.name, Some(items))
    }

    async fn clean(
        &self,
        _context: &CleanupContext,
        items: &[CleanableItem],
        _cancel: &CancellationToken,
    ) -> Outcome<CleanupResult> {
        self.cleaned
            .lock()
            .unwrap()
            .push(items.iter().map(|item| item.path().clone()).collect());

        if let Some(token) = &self.cancel_on_clean {
            token.cancel();
        }

        let bytes = items.iter().map(CleanableItem::size).sum();
        CleanupResult::create(items.len() as i64, bytes)
    }
}
