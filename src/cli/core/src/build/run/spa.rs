/* src/cli/core/src/build/run/spa.rs */

use super::super::types::BundlePlan;
use super::{BuildContext, into_bundle_error, report_command};
use crate::build::error::BuildOutcome;

// -- SPA / MPA build --

/// One client bundle, no render bundle, no manifest copy.
pub(super) async fn run_spa_build(ctx: &BuildContext<'_>) -> BuildOutcome {
  let config = ctx.config;
  let plan = BundlePlan::client(config, false, config.is_single_page());
  report_command(ctx);
  ctx.collab.bundler.bundle(config, &plan).await.map_err(into_bundle_error)?;
  if !plan.entries.is_empty() {
    ctx.reporter.detail(&format!("entries: {}", plan.entries.join(", ")));
  }
  Ok(())
}
