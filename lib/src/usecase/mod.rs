//! Entry points driving a cleanup run. Each use case resolves modules through the
//! [`ModuleRegistry`](crate::ModuleRegistry) and talks to the host only through the
//! [`CleanupContext`](crate::CleanupContext).

mod analyze;
mod cleanup;
mod discovery;

pub use analyze::*;
pub use cleanup::*;
pub use discovery::*;
