/* src/cli/core/src/build/command.rs */

// Bundler and renderer backed by the user's `build.bundler_command`. The plan
// travels through SEAM_* environment variables, one process per bundle.

use super::collab::{Bundler, RendererBuilder, StepFuture};
use super::config::BuildConfig;
use super::error::BuildError;
use super::types::BundlePlan;
use crate::shell::run_command;

pub struct CommandBundler;

impl CommandBundler {
  async fn run(config: &BuildConfig, plan: &BundlePlan) -> Result<(), String> {
    let Some(command) = config.bundler_command.as_deref() else {
      return Err("build.bundler_command is not set in seam.toml".to_string());
    };
    let out_dir = plan.output_path.to_string_lossy().into_owned();
    let entries = plan.entries.join(",");
    let env: Vec<(&str, &str)> = vec![
      ("SEAM_BUILD_TARGET", plan.target.as_str()),
      ("SEAM_SSR", if plan.ssr { "1" } else { "0" }),
      ("SEAM_SINGLE_PAGE", if plan.single_page { "1" } else { "0" }),
      ("SEAM_OUT_DIR", &out_dir),
      ("SEAM_PUBLIC_PATH", &plan.public_path),
      ("SEAM_ENTRIES", &entries),
    ];
    let label = format!("{} bundler", plan.target.as_str());
    run_command(&config.root_dir, command, &label, &env).await.map_err(|e| format!("{e:#}"))
  }
}

impl Bundler for CommandBundler {
  fn bundle<'a>(&'a self, config: &'a BuildConfig, plan: &'a BundlePlan) -> StepFuture<'a> {
    Box::pin(async move { Self::run(config, plan).await.map_err(BuildError::BundleBuild) })
  }
}

/// Runs the client plan, then the server plan, then checks that both
/// renderer inputs landed in the output directory.
pub struct CommandRenderer;

impl CommandRenderer {
  async fn run(
    config: &BuildConfig,
    client: &BundlePlan,
    server: &BundlePlan,
  ) -> Result<(), String> {
    CommandBundler::run(config, client).await?;
    CommandBundler::run(config, server).await?;
    for file in [&config.server_bundle, &config.client_manifest] {
      let path = config.output_path.join(file);
      let exists = tokio::fs::try_exists(&path).await.map_err(|e| e.to_string())?;
      if !exists {
        return Err(format!("bundler did not produce {}", path.display()));
      }
    }
    Ok(())
  }
}

impl RendererBuilder for CommandRenderer {
  fn build<'a>(
    &'a self,
    config: &'a BuildConfig,
    client: &'a BundlePlan,
    server: &'a BundlePlan,
  ) -> StepFuture<'a> {
    Box::pin(async move {
      Self::run(config, client, server).await.map_err(BuildError::RenderBuild)
    })
  }
}
