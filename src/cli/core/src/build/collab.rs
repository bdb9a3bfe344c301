/* src/cli/core/src/build/collab.rs */

// Capabilities the orchestrator delegates to. Each one produces its output
// without knowing about the others; the builder owns the ordering.

use futures_util::future::BoxFuture;

use super::artifacts::{PagesRouteBuilder, ProjectArtifacts};
use super::command::{CommandBundler, CommandRenderer};
use super::config::BuildConfig;
use super::error::BuildError;
use super::library::LocalLibrary;
use super::types::BundlePlan;

pub type StepFuture<'a> = BoxFuture<'a, Result<(), BuildError>>;

/// Compiles one bundle from a plan.
pub trait Bundler: Send + Sync {
  fn bundle<'a>(&'a self, config: &'a BuildConfig, plan: &'a BundlePlan) -> StepFuture<'a>;
}

/// Compiles the client and server bundles into a render-capable bundle.
pub trait RendererBuilder: Send + Sync {
  fn build<'a>(
    &'a self,
    config: &'a BuildConfig,
    client: &'a BundlePlan,
    server: &'a BundlePlan,
  ) -> StepFuture<'a>;
}

pub trait RouteBuilder: Send + Sync {
  fn build_routes<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a>;
}

/// Generators for the per-build artifacts. Each method writes exactly one
/// file and may run concurrently with the others.
pub trait ArtifactWriter: Send + Sync {
  fn write_runtime_config<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a>;
  fn write_middleware<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a>;
  fn write_store<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a>;
  fn write_entry_link<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a>;
}

/// Offline-caching runtime library installer.
pub trait OfflineLibrary: Send + Sync {
  /// Copy the current library version into `config.assets_path()` and
  /// return the name of the version directory it created.
  fn install<'a>(&'a self, config: &'a BuildConfig) -> BoxFuture<'a, Result<String, BuildError>>;
}

pub struct Collaborators {
  pub bundler: Box<dyn Bundler>,
  pub renderer: Box<dyn RendererBuilder>,
  pub routes: Box<dyn RouteBuilder>,
  pub artifacts: Box<dyn ArtifactWriter>,
  pub library: Box<dyn OfflineLibrary>,
}

impl Default for Collaborators {
  /// Shell out to `build.bundler_command`, scan the project for routes and
  /// store modules, and copy the library from node_modules.
  fn default() -> Self {
    Self {
      bundler: Box::new(CommandBundler),
      renderer: Box::new(CommandRenderer),
      routes: Box::new(PagesRouteBuilder),
      artifacts: Box::new(ProjectArtifacts),
      library: Box::new(LocalLibrary),
    }
  }
}
