/* src/cli/core/src/main.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seam_build::build::types::{BuildMode, read_runtime_manifest};
use seam_build::build::{
  BuildConfig, BuildOptions, Builder, Collaborators, ConsoleReporter, JoinPolicy, ProdBuilder,
};
use seam_build::config::{SeamConfig, find_seam_config, load_seam_config};
use seam_build::ui;

#[derive(Parser)]
#[command(name = "seam-build", about = "SeamJS production build")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build the project for production (SSR or SPA/MPA)
  Build {
    /// Path to seam.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fail a concurrent step at its first error instead of letting siblings finish
    #[arg(long)]
    fail_fast: bool,
  },
}

/// Warn if `.seam/` is not covered by any gitignore rule
fn warn_seam_not_gitignored(base_dir: &Path) {
  use std::process::Command;
  let output =
    Command::new("git").args(["check-ignore", "-q", ".seam"]).current_dir(base_dir).output();
  // exit 1 = not ignored; 0 = ignored; other = not a git repo or git missing
  if let Ok(o) = output
    && o.status.code() == Some(1)
  {
    ui::warn(".seam/ is not in .gitignore -- generated build artifacts would be tracked");
  }
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, SeamConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_seam_config(&cwd)?
    }
  };
  let config = load_seam_config(&path)?;
  Ok((path, config))
}

async fn print_summary(config: &BuildConfig) {
  let out = config.output_path.display();
  let mode = BuildMode::of(config).label();
  if !config.ssr {
    ui::detail(&format!("{mode} \u{00b7} {out}"));
    return;
  }
  match read_runtime_manifest(&config.dist_runtime_manifest_path()).await {
    Ok(manifest) => ui::detail(&format!(
      "{mode} \u{00b7} {out} \u{00b7} {} \u{00b7} {}",
      manifest.server_bundle, manifest.client_manifest,
    )),
    Err(e) => ui::warn(&format!("runtime manifest unreadable after build: {e}")),
  }
}

async fn run_build(explicit: Option<PathBuf>, fail_fast: bool) -> Result<()> {
  let (config_path, seam_config) = resolve_config(explicit)?;
  let base_dir = config_path
    .parent()
    .filter(|dir| !dir.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));
  let base_dir = std::path::absolute(base_dir)
    .with_context(|| format!("failed to resolve {}", base_dir.display()))?;
  warn_seam_not_gitignored(&base_dir);

  // Only used for the summary line; the builder reports validation errors.
  let summary = BuildConfig::from_seam_config(&seam_config, &base_dir).ok();
  let join_policy = if fail_fast { JoinPolicy::FailFast } else { JoinPolicy::SettleAll };
  let builder =
    ProdBuilder::new(seam_config, &base_dir, Collaborators::default(), Box::new(ConsoleReporter))
      .with_options(BuildOptions { join_policy });

  builder.build().await.context("production build failed")?;
  if let Some(config) = summary {
    print_summary(&config).await;
  }
  Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Build { config, fail_fast } => run_build(config, fail_fast).await?,
  }

  Ok(())
}
