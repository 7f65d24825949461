use std::sync::Arc;

use crate::{
    DomainError,
    Outcome,
};

mod command;
pub use command::*;

mod environment;
pub use environment::*;

mod filesystem;
pub use filesystem::*;

mod interaction;
pub use interaction::*;

mod output;
pub use output::*;

mod process;
pub use process::*;

/// The capabilities a cleanup module may use to reach the outside world.
///
/// Modules never touch the host directly. Everything goes through the
/// context so that tests can swap in fakes.
#[derive(Clone)]
pub struct CleanupContext {
    file_system: Arc<dyn FileSystem>,
    process_manager: Arc<dyn ProcessManager>,
    command_runner: Arc<dyn CommandRunner>,
    environment: Arc<dyn EnvironmentProvider>,
    user_interaction: Arc<dyn UserInteraction>,
    output: Arc<dyn OutputFormatter>,
}

impl CleanupContext {
    pub fn builder() -> CleanupContextBuilder {
        CleanupContextBuilder::default()
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    pub fn process_manager(&self) -> &dyn ProcessManager {
        self.process_manager.as_ref()
    }

    pub fn command_runner(&self) -> &dyn CommandRunner {
        self.command_runner.as_ref()
    }

    pub fn environment(&self) -> &dyn EnvironmentProvider {
        self.environment.as_ref()
    }

    pub fn user_interaction(&self) -> &dyn UserInteraction {
        self.user_interaction.as_ref()
    }

    pub fn output(&self) -> &dyn OutputFormatter {
        self.output.as_ref()
    }
}

#[derive(Default)]
pub struct CleanupContextBuilder {
    file_system: Option<Arc<dyn FileSystem>>,
    process_manager: Option<Arc<dyn ProcessManager>>,
    command_runner: Option<Arc<dyn CommandRunner>>,
    environment: Option<Arc<dyn EnvironmentProvider>>,
    user_interaction: Option<Arc<dyn UserInteraction>>,
    output: Option<Arc<dyn OutputFormatter>>,
}

impl CleanupContextBuilder {
    pub fn file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    pub fn process_manager(mut self, process_manager: Arc<dyn ProcessManager>) -> Self {
        self.process_manager = Some(process_manager);
        self
    }

    pub fn command_runner(mut self, command_runner: Arc<dyn CommandRunner>) -> Self {
        self.command_runner = Some(command_runner);
        self
    }

    pub fn environment(mut self, environment: Arc<dyn EnvironmentProvider>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn user_interaction(mut self, user_interaction: Arc<dyn UserInteraction>) -> Self {
        self.user_interaction = Some(user_interaction);
        self
    }

    pub fn output(mut self, output: Arc<dyn OutputFormatter>) -> Self {
        self.output = Some(output);
        self
    }

    /// Fails with a validation error naming the first missing capability.
    pub fn build(self) -> Outcome<CleanupContext> {
        Ok(CleanupContext {
            file_system: required(self.file_system, "fileSystem")?,
            process_manager: required(self.process_manager, "processManager")?,
            command_runner: required(self.command_runner, "commandRunner")?,
            environment: required(self.environment, "environmentProvider")?,
            user_interaction: required(self.user_interaction, "userInteraction")?,
            output: required(self.output, "outputFormatter")?,
        })
    }
}

fn required<T: ?Sized>(capability: Option<Arc<T>>, name: &str) -> Outcome<Arc<T>> {
    capability.ok_or_else(|| DomainError::validation(format!("{} is required", name)))
}
