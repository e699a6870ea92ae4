pub mod config;
pub mod diff;
pub mod error;
pub mod patch;
pub mod runner;
pub mod text_file;
pub mod version;
pub mod walker;

#[cfg(test)]
mod tests;

pub use config::{Cli, Configuration, OutputFormat};
pub use diff::{generate_unified_diff, DiffStats};
pub use error::{Result, UpdaterError};
pub use patch::{patch_project, patch_solution, LangVersion, Patched};
pub use runner::{list_versions, run, run_with_output, FileKind, RunReport};
pub use version::{resolve, VisualStudioVersion};
pub use walker::FileWalker;
