/* src/cli/core/src/build/run/ssr.rs */

use super::super::fs::copy_path;
use super::super::join::JoinGroup;
use super::super::types::BundlePlan;
use super::{BuildContext, into_render_error, report_command};
use crate::build::error::BuildOutcome;
use crate::config::CopyOptions;

// -- SSR build --

pub(super) async fn run_ssr_build(ctx: &BuildContext<'_>) -> BuildOutcome {
  let config = ctx.config;

  let client = BundlePlan::client(config, true, true);
  let server = BundlePlan::server(config);
  report_command(ctx);
  ctx.collab.renderer.build(config, &client, &server).await.map_err(into_render_error)?;
  ctx.reporter.detail("client and server bundles built");

  // The online renderer only sees the output dir, so the manifest written
  // under the project root has to travel with it.
  let manifest = config.runtime_manifest_path();
  let dist_manifest = config.dist_runtime_manifest_path();
  copy_path(&manifest, &dist_manifest, CopyOptions::default()).await?;
  ctx.reporter.detail(&format!("runtime manifest -> {}", dist_manifest.display()));

  if config.ssr_copy.is_empty() {
    return Ok(());
  }
  let mut copies = JoinGroup::new("ssr copy", ctx.policy);
  for rule in &config.ssr_copy {
    copies.push(async move {
      let src = config.root_dir.join(&rule.src);
      let dest = config.output_path.join(&rule.dest);
      copy_path(&src, &dest, rule.options).await
    });
  }
  let count = copies.len();
  copies.join().await?;
  ctx.reporter.detail(&format!("{count} extra files copied"));
  Ok(())
}
