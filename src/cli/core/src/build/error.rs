/* src/cli/core/src/build/error.rs */

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Terminal failure of a build. A build either succeeds with no payload or
/// fails with exactly one of these.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("invalid build configuration: {0}")]
  Configuration(String),

  #[error("failed to {action} {}: {source}", .path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("render bundle build failed: {0}")]
  RenderBuild(String),

  #[error("bundle build failed: {0}")]
  BundleBuild(String),

  #[error("failed to generate {artifact}: {message}")]
  Artifact { artifact: &'static str, message: String },

  #[error("{} {group} tasks failed, first: {}", .errors.len(), first_message(.errors))]
  Aggregate { group: String, errors: Vec<BuildError> },
}

pub type BuildOutcome = Result<(), BuildError>;

fn first_message(errors: &[BuildError]) -> String {
  errors.first().map(ToString::to_string).unwrap_or_default()
}

impl BuildError {
  pub fn io(action: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
    Self::Io { action, path: path.as_ref().to_path_buf(), source }
  }

  pub fn config(msg: impl Into<String>) -> Self {
    Self::Configuration(msg.into())
  }

  pub fn is_configuration(&self) -> bool {
    matches!(self, Self::Configuration(_))
  }
}

/// Attach an action and path to a raw `io::Result`, like `anyhow::Context`
/// does for the CLI surface.
pub(crate) trait IoContext<T> {
  fn io_context(self, action: &'static str, path: &Path) -> Result<T, BuildError>;
}

impl<T> IoContext<T> for std::io::Result<T> {
  fn io_context(self, action: &'static str, path: &Path) -> Result<T, BuildError> {
    self.map_err(|e| BuildError::io(action, path, e))
  }
}
