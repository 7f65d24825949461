mod analysis;
mod cleanup;
pub mod context;
mod error;
pub mod host;
mod item;
pub mod module;
pub mod path;
mod platform;
mod registry;
mod size;
pub mod usecase;

#[cfg(test)]
mod testing;

pub use analysis::*;
pub use cleanup::*;
pub use context::CleanupContext;
pub use error::*;
pub use item::*;
pub use module::{
    CleanupModule,
    ModuleDescriptor,
    ModuleName,
};
pub use path::FilePath;
pub use platform::*;
pub use registry::*;
pub use size::*;
pub use usecase::*;
