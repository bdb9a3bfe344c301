/* src/cli/core/src/build/run/mod.rs */

// Terminal pipelines: SSR (client + server render bundle) or SPA/MPA (one
// client bundle). `dispatch` is the only place that picks between them.

mod spa;
mod ssr;


use super::collab::Collaborators;
use super::config::BuildConfig;
use super::error::{BuildError, BuildOutcome};
use super::join::JoinPolicy;
use super::report::BuildReporter;

pub struct BuildContext<'a> {
  pub config: &'a BuildConfig,
  pub collab: &'a Collaborators,
  pub reporter: &'a dyn BuildReporter,
  pub policy: JoinPolicy,
}

// -- Entry point --

pub async fn dispatch(ctx: &BuildContext<'_>) -> BuildOutcome {
  if ctx.config.ssr {
    ssr::run_ssr_build(ctx).await
  } else {
    spa::run_spa_build(ctx).await
  }
}

/// Announce the shell command the default collaborators are about to run.
fn report_command(ctx: &BuildContext<'_>) {
  if let Some(command) = ctx.config.bundler_command.as_deref() {
    ctx.reporter.detail(&format!("$ {}", command.trim()));
  }
}

// -- Error normalization --

/// Whatever the renderer reports, the build fails with a render error.
fn into_render_error(err: BuildError) -> BuildError {
  match err {
    BuildError::RenderBuild(_) => err,
    other => BuildError::RenderBuild(other.to_string()),
  }
}

fn into_bundle_error(err: BuildError) -> BuildError {
  match err {
    BuildError::BundleBuild(_) => err,
    other => BuildError::BundleBuild(other.to_string()),
  }
}
