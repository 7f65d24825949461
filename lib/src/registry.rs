use std::{
    collections::HashMap,
    sync::Arc,
};

use crate::{
    module::{
        CleanupModule,
        DockerModule,
        GradleModule,
        HomebrewModule,
        JetBrainsModule,
        MavenModule,
        ModuleName,
        NodeModule,
        PythonModule,
        SdkmanModule,
        SystemModule,
    },
    DomainError,
    Outcome,
};

/// All known cleanup modules, keyed by their name.
///
/// Registering a module under a name which is already taken replaces
/// the previous module.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: HashMap<ModuleName, Arc<dyn CleanupModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing every module this crate ships.
    pub fn with_default_modules() -> Self {
        let mut registry = Self::new();
        registry.register(DockerModule::new());
        registry.register(HomebrewModule::new());
        registry.register(JetBrainsModule::new());
        registry.register(MavenModule::new());
        registry.register(GradleModule::new());
        registry.register(NodeModule::new());
        registry.register(PythonModule::new());
        registry.register(SdkmanModule::new());
        registry.register(SystemModule::new());
        registry
    }

    pub fn register<T: CleanupModule + 'static>(&mut self, module: T) {
        self.register_shared(Arc::new(module))
    }

    pub fn register_shared(&mut self, module: Arc<dyn CleanupModule>) {
        if self.modules.insert(module.name(), module).is_some() {
            log::debug!("Replaced a previously registered module");
        }
    }

    /// Register a module which might be absent.
    pub fn try_register(&mut self, module: Option<Arc<dyn CleanupModule>>) -> Outcome<()> {
        let module = module.ok_or_else(|| DomainError::validation("module is required"))?;
        self.register_shared(module);
        Ok(())
    }

    pub fn for_name(&self, name: ModuleName) -> Outcome<Arc<dyn CleanupModule>> {
        self.modules
            .get(&name)
            .cloned()
            .ok_or_else(|| DomainError::not_found("CleanupModule", name.as_str()))
    }

    /// Currently registered modules in no particular order.
    pub fn modules(&self) -> Vec<Arc<dyn CleanupModule>> {
        self.modules.values().cloned().collect()
    }
}
