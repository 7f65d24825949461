//! Capabilities backed by the real host: disk, process table, shell and user directories.

mod command;
pub use command::*;

mod environment;
pub use environment::*;

mod fs;
pub use fs::LocalFileSystem;

mod process;
pub use process::*;
