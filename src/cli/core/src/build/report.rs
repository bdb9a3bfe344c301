/* src/cli/core/src/build/report.rs */

// Lifecycle observer for a build. The builder never prints on its own; the
// CLI plugs in `ConsoleReporter`, tests plug in a recorder.

use std::time::Duration;

use super::error::BuildOutcome;
use super::types::BuildMode;
use crate::ui::{self, DIM, RESET};

/// Numbered stages reported after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  StageOutput,
  AssetVersions,
  Routes,
  WriteTasks,
  Pipeline(BuildMode),
}

impl Stage {
  pub const TOTAL: u32 = 5;

  pub fn number(self) -> u32 {
    match self {
      Self::StageOutput => 1,
      Self::AssetVersions => 2,
      Self::Routes => 3,
      Self::WriteTasks => 4,
      Self::Pipeline(_) => 5,
    }
  }

  pub fn title(self) -> String {
    match self {
      Self::StageOutput => "Staging output directory".to_string(),
      Self::AssetVersions => "Versioning offline assets".to_string(),
      Self::Routes => "Building routes".to_string(),
      Self::WriteTasks => "Writing build artifacts".to_string(),
      Self::Pipeline(mode) => format!("Bundling {} app", mode.label()),
    }
  }
}

/// Every hook defaults to a no-op so a reporter only implements what it
/// shows.
pub trait BuildReporter: Send + Sync {
  fn build_start(&self, _project: &str) {}
  fn stage_start(&self, _stage: Stage) {}
  fn stage_end(&self, _stage: Stage, _elapsed: Duration) {}
  fn stage_skipped(&self, _stage: Stage, _reason: &str) {}
  fn detail(&self, _msg: &str) {}
  fn build_end(&self, _outcome: &BuildOutcome, _elapsed: Duration) {}
}

/// Reporter that discards everything.
pub struct SilentReporter;

impl BuildReporter for SilentReporter {}

/// Terminal sink built on the `ui` status lines.
pub struct ConsoleReporter;

impl BuildReporter for ConsoleReporter {
  fn build_start(&self, project: &str) {
    ui::banner("build", Some(project));
  }

  fn stage_start(&self, stage: Stage) {
    ui::step(stage.number(), Stage::TOTAL, &stage.title());
    if let Stage::Pipeline(mode) = stage {
      ui::detail(&format!("{} build starting", mode.label()));
    }
  }

  fn stage_end(&self, stage: Stage, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    match stage {
      Stage::Pipeline(mode) => {
        ui::detail_ok(&format!("{} build completed {DIM}({secs:.1}s){RESET}", mode.label()));
      }
      _ => ui::detail_ok(&format!("done {DIM}({secs:.1}s){RESET}")),
    }
    ui::blank();
  }

  fn stage_skipped(&self, stage: Stage, reason: &str) {
    ui::step(stage.number(), Stage::TOTAL, &stage.title());
    ui::detail(&format!("{DIM}skipped: {reason}{RESET}"));
    ui::blank();
  }

  fn detail(&self, msg: &str) {
    ui::detail(msg);
  }

  fn build_end(&self, outcome: &BuildOutcome, elapsed: Duration) {
    match outcome {
      Ok(()) => ui::ok(&format!("build complete in {:.1}s", elapsed.as_secs_f64())),
      Err(e) => ui::fail(&format!("build failed: {e}")),
    }
  }
}
