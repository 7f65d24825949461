use std::{
    process::ExitCode,
    sync::Arc,
};

use args::Args;
use clap::Parser;
use console::{
    ConsoleOutput,
    ConsolePrompt,
};
use devsweep::{
    context::OutputFormatter,
    host::{
        HostEnvironment,
        LocalFileSystem,
        ShellCommandRunner,
        SystemProcessManager,
    },
    AnalysisReport,
    AnalyzeUseCase,
    CleanupContext,
    CleanupUseCase,
    ModuleAnalysis,
    ModuleDiscoveryUseCase,
    ModuleName,
    ModuleRegistry,
    Outcome,
    OutcomeExt,
};
use tokio_util::sync::CancellationToken;

mod args;
mod console;

/// Exit code used when the run has been interrupted with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

fn list_modules(registry: Arc<ModuleRegistry>, output: &ConsoleOutput) -> anyhow::Result<()> {
    output.section("Available modules");
    for descriptor in ModuleDiscoveryUseCase::new(registry).available_modules()? {
        let destructive = if descriptor.is_destructive() {
            " (asks for confirmation)"
        } else {
            ""
        };
        println!(
            "  --{:<10} {}{}",
            descriptor.name().as_str(),
            descriptor.description(),
            destructive
        );
    }

    Ok(())
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            log::warn!("Failed to listen for Ctrl-C: {:#}", error);
            return;
        }

        log::info!("Interrupted, finishing the current item");
        cancel.cancel();
    });
}

/// Analyze, show the report and clean the modules which found something.
async fn run_cleanup(
    registry: Arc<ModuleRegistry>,
    context: CleanupContext,
    output: &ConsoleOutput,
    modules: &[ModuleName],
    cancel: &CancellationToken,
) -> Outcome<()> {
    let report = AnalyzeUseCase::new(registry.clone(), context.clone())
        .execute(modules, cancel)
        .await?;
    output.display_analysis_report(&report);

    let pending = report
        .analyses()
        .iter()
        .filter(|analysis| !analysis.is_empty())
        .cloned()
        .collect::<Vec<ModuleAnalysis>>();
    if pending.is_empty() {
        return Ok(());
    }

    let summaries = CleanupUseCase::new(registry, context)
        .clean_report(&AnalysisReport::create(Some(pending))?, cancel)
        .await?;
    output.display_completion(&summaries);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();

    let output = Arc::new(ConsoleOutput::new(args.verbose));
    output.display_banner(env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(ModuleRegistry::with_default_modules());
    if args.list {
        list_modules(registry, &output)?;
        return Ok(ExitCode::SUCCESS);
    }

    let context = CleanupContext::builder()
        .file_system(Arc::new(LocalFileSystem::new()))
        .process_manager(Arc::new(SystemProcessManager::new()))
        .command_runner(Arc::new(ShellCommandRunner::new()))
        .environment(Arc::new(HostEnvironment::detect()?))
        .user_interaction(Arc::new(ConsolePrompt::new(args.yes)))
        .output(output.clone())
        .build()?;

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let modules = args.selected_modules();
    log::debug!("Selected modules: {:?}", modules);

    let outcome = if args.dry_run {
        AnalyzeUseCase::new(registry, context)
            .execute(&modules, &cancel)
            .await
            .map(|report| output.display_analysis_report(&report))
    } else {
        run_cleanup(registry, context, &output, &modules, &cancel).await
    };

    if cancel.is_cancelled() {
        output.warning("Interrupted");
        /* A pending confirmation prompt would keep the runtime from shutting down. */
        std::process::exit(EXIT_INTERRUPTED);
    }

    Ok(outcome.fold(
        |_| ExitCode::SUCCESS,
        |error| {
            log::debug!("Run failed: {:?}", error);
            output.error(&error.to_string());
            ExitCode::FAILURE
        },
    ))
}
