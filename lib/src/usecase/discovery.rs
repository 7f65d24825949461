use std::sync::Arc;

use crate::{
    module::ModuleDescriptor,
    ModuleRegistry,
    Outcome,
};

/// Describes the registered modules.
pub struct ModuleDiscoveryUseCase {
    registry: Arc<ModuleRegistry>,
}

impl ModuleDiscoveryUseCase {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    /// Descriptors of all registered modules, ordered by module name.
    pub fn available_modules(&self) -> Outcome<Vec<ModuleDescriptor>> {
        let mut descriptors = self
            .registry
            .modules()
            .iter()
            .map(|module| {
                ModuleDescriptor::create(
                    module.name(),
                    module.description(),
                    module.is_destructive(),
                )
            })
            .collect::<Outcome<Vec<_>>>()?;

        descriptors.sort_by_key(|descriptor| descriptor.name().as_str());
        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        module::ModuleName,
        testing::StubModule,
    };

    #[test]
    fn describes_registered_modules() {
        let mut registry = ModuleRegistry::new();
        registry.register(StubModule::new(ModuleName::Maven, vec![]));
        registry.register(StubModule::new(ModuleName::Docker, vec![]).destructive());

        let descriptors = ModuleDiscoveryUseCase::new(Arc::new(registry))
            .available_modules()
            .unwrap();

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name(), ModuleName::Docker);
        assert!(descriptors[0].is_destructive());
        assert_eq!(descriptors[1].name(), ModuleName::Maven);
        assert_eq!(descriptors[1].description(), "Stubbed module");
    }

    #[test]
    fn default_modules_have_valid_descriptors() {
        let descriptors = ModuleDiscoveryUseCase::new(Arc::new(ModuleRegistry::with_default_modules()))
            .available_modules()
            .unwrap();

        let names = descriptors
            .iter()
            .map(|descriptor| descriptor.name().as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "docker", "gradle", "homebrew", "jetbrains", "maven", "node", "python", "sdkman",
                "system"
            ]
        );
    }
}
