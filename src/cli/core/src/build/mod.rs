/* src/cli/core/src/build/mod.rs */

pub mod artifacts;
pub mod assets;
pub mod builder;
pub mod collab;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod join;
pub mod library;
pub mod report;
pub mod run;
pub mod stage;
pub mod tasks;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{BuildOptions, Builder, ProdBuilder};
pub use collab::Collaborators;
pub use config::BuildConfig;
pub use error::{BuildError, BuildOutcome};
pub use join::JoinPolicy;
pub use report::{BuildReporter, ConsoleReporter};
