/* src/cli/core/src/build/builder.rs */

// Production build: validate, stage the output, refresh the offline library,
// build routes, write artifacts, then hand off to exactly one pipeline.


use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use futures_util::future::BoxFuture;

use super::assets::refresh_offline_library;
use super::collab::Collaborators;
use super::config::BuildConfig;
use super::error::BuildOutcome;
use super::join::JoinPolicy;
use super::report::{BuildReporter, Stage};
use super::run::{BuildContext, dispatch};
use super::stage::stage_output;
use super::tasks::run_write_tasks;
use super::types::BuildMode;
use crate::config::SeamConfig;

/// Something that can produce a build. The CLI composes `ProdBuilder`.
pub trait Builder {
  fn build(&self) -> BoxFuture<'_, BuildOutcome>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
  /// Aggregation policy for every fan-out in the build.
  pub join_policy: JoinPolicy,
}

pub struct ProdBuilder {
  config: SeamConfig,
  base_dir: PathBuf,
  collaborators: Collaborators,
  reporter: Box<dyn BuildReporter>,
  options: BuildOptions,
}

impl ProdBuilder {
  pub fn new(
    config: SeamConfig,
    base_dir: impl Into<PathBuf>,
    collaborators: Collaborators,
    reporter: Box<dyn BuildReporter>,
  ) -> Self {
    Self {
      config,
      base_dir: base_dir.into(),
      collaborators,
      reporter,
      options: BuildOptions::default(),
    }
  }

  pub fn with_options(mut self, options: BuildOptions) -> Self {
    self.options = options;
    self
  }

  async fn run(&self) -> BuildOutcome {
    // Nothing below may run if validation fails.
    let config = BuildConfig::from_seam_config(&self.config, &self.base_dir)?;
    let reporter = self.reporter.as_ref();
    let collab = &self.collaborators;
    let policy = self.options.join_policy;

    timed(reporter, Stage::StageOutput, stage_output(&config)).await?;

    if config.service_worker {
      timed(reporter, Stage::AssetVersions, self.version_assets(&config)).await?;
    } else {
      reporter.stage_skipped(Stage::AssetVersions, "service_worker.enable = false");
    }

    timed(reporter, Stage::Routes, collab.routes.build_routes(&config)).await?;

    let writes = run_write_tasks(&config, collab.artifacts.as_ref(), policy);
    timed(reporter, Stage::WriteTasks, writes).await?;

    let ctx = BuildContext { config: &config, collab, reporter, policy };
    timed(reporter, Stage::Pipeline(BuildMode::of(&config)), dispatch(&ctx)).await
  }

  async fn version_assets(&self, config: &BuildConfig) -> BuildOutcome {
    let library = self.collaborators.library.as_ref();
    let installed = refresh_offline_library(config, library, self.options.join_policy).await?;
    self.reporter.detail(&format!("installed {installed}"));
    Ok(())
  }
}

impl Builder for ProdBuilder {
  fn build(&self) -> BoxFuture<'_, BuildOutcome> {
    Box::pin(async move {
      let started = Instant::now();
      self.reporter.build_start(&self.config.project.name);
      let outcome = self.run().await;
      self.reporter.build_end(&outcome, started.elapsed());
      outcome
    })
  }
}

async fn timed<F>(reporter: &dyn BuildReporter, stage: Stage, step: F) -> BuildOutcome
where
  F: Future<Output = BuildOutcome>,
{
  reporter.stage_start(stage);
  let started = Instant::now();
  step.await?;
  reporter.stage_end(stage, started.elapsed());
  Ok(())
}
