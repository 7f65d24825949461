use clap::Parser;
use devsweep::ModuleName;

/// Reclaim disk space from developer tool caches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Only analyze and report what could be cleaned. Nothing gets deleted.
    #[arg(short, long)]
    pub dry_run: bool,

    /// List all available cleanup modules and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Run all modules. This is the default when no module has been selected.
    #[arg(short, long)]
    pub all: bool,

    /// Docker images, stopped containers, volumes and build cache
    #[arg(long)]
    pub docker: bool,

    /// Homebrew download cache
    #[arg(long)]
    pub homebrew: bool,

    /// Caches of superseded JetBrains IDE versions
    #[arg(long)]
    pub jetbrains: bool,

    /// Maven local repository
    #[arg(long)]
    pub maven: bool,

    /// Gradle caches
    #[arg(long)]
    pub gradle: bool,

    /// npm cache
    #[arg(long)]
    pub node: bool,

    /// pip cache
    #[arg(long)]
    pub python: bool,

    /// SDKMAN archives and temporary files
    #[arg(long)]
    pub sdkman: bool,

    /// Stale temporary files and logs
    #[arg(long)]
    pub system: bool,

    /// Answer all confirmations with yes.
    #[arg(short, long)]
    pub yes: bool,

    /// Print debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Modules selected on the command line, in their canonical order.
    /// Selecting nothing selects everything.
    pub fn selected_modules(&self) -> Vec<ModuleName> {
        let flags = [
            (ModuleName::Docker, self.docker),
            (ModuleName::Homebrew, self.homebrew),
            (ModuleName::JetBrains, self.jetbrains),
            (ModuleName::Maven, self.maven),
            (ModuleName::Gradle, self.gradle),
            (ModuleName::Node, self.node),
            (ModuleName::Python, self.python),
            (ModuleName::Sdkman, self.sdkman),
            (ModuleName::System, self.system),
        ];

        let selected = flags
            .iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();

        if self.all || selected.is_empty() {
            ModuleName::ALL.to_vec()
        } else {
            selected
        }
    }
}
