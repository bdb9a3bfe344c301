/* src/cli/core/src/build/tasks.rs */

// Per-build artifact generation. The tasks share no outputs, so they are
// launched together and joined once.

use super::collab::{ArtifactWriter, StepFuture};
use super::config::BuildConfig;
use super::error::BuildOutcome;
use super::join::{JoinGroup, JoinPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTask {
  RuntimeConfig,
  Middleware,
  Store,
  EntryLink,
}

impl WriteTask {
  pub fn name(self) -> &'static str {
    match self {
      Self::RuntimeConfig => "write-runtime-config",
      Self::Middleware => "write-middleware",
      Self::Store => "write-store",
      Self::EntryLink => "write-entry-link",
    }
  }

  /// The task set for `config`: the entry link only exists for multi-entry
  /// projects.
  pub fn planned(config: &BuildConfig) -> Vec<Self> {
    let mut tasks = vec![Self::RuntimeConfig, Self::Middleware, Self::Store];
    if !config.entries.is_empty() {
      tasks.push(Self::EntryLink);
    }
    tasks
  }

  pub fn run<'a>(self, config: &'a BuildConfig, writer: &'a dyn ArtifactWriter) -> StepFuture<'a> {
    match self {
      Self::RuntimeConfig => writer.write_runtime_config(config),
      Self::Middleware => writer.write_middleware(config),
      Self::Store => writer.write_store(config),
      Self::EntryLink => writer.write_entry_link(config),
    }
  }
}

/// Launch every planned task and wait for all of them to settle.
///
/// A lone failure comes back unchanged; several come back as
/// `BuildError::Aggregate`. `JoinPolicy::FailFast` (`--fail-fast`) returns
/// the first error instead.
pub async fn run_write_tasks(
  config: &BuildConfig,
  writer: &dyn ArtifactWriter,
  policy: JoinPolicy,
) -> BuildOutcome {
  let mut group = JoinGroup::new("write", policy);
  for task in WriteTask::planned(config) {
    group.push(task.run(config, writer));
  }
  group.join().await
}

#[cfg(test)]
mod tests {
  use std::path::Path;
  use std::sync::Mutex;

  use super::*;
  use crate::build::error::BuildError;
  use crate::config::SeamConfig;

  fn build_config(extra: &str) -> BuildConfig {
    let config: SeamConfig =
      toml::from_str(&format!("[project]\nname = \"t\"\n{extra}")).unwrap();
    BuildConfig::from_seam_config(&config, Path::new("/srv/app")).unwrap()
  }

  #[derive(Default)]
  struct RecordingWriter {
    calls: Mutex<Vec<&'static str>>,
    fail: &'static [&'static str],
  }

  impl RecordingWriter {
    fn record<'a>(&'a self, name: &'static str) -> StepFuture<'a> {
      Box::pin(async move {
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(name);
        if self.fail.contains(&name) {
          return Err(BuildError::Artifact { artifact: name, message: "disk full".into() });
        }
        Ok(())
      })
    }
  }

  impl ArtifactWriter for RecordingWriter {
    fn write_runtime_config<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
      self.record("write-runtime-config")
    }
    fn write_middleware<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
      self.record("write-middleware")
    }
    fn write_store<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
      self.record("write-store")
    }
    fn write_entry_link<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
      self.record("write-entry-link")
    }
  }

  #[test]
  fn single_page_plans_three_tasks() {
    let planned = WriteTask::planned(&build_config(""));
    assert_eq!(planned, vec![WriteTask::RuntimeConfig, WriteTask::Middleware, WriteTask::Store]);
  }

  #[test]
  fn entries_add_entry_link() {
    let planned = WriteTask::planned(&build_config("[[entries]]\nname = \"admin\"\n"));
    assert_eq!(planned.len(), 4);
    assert_eq!(planned.last(), Some(&WriteTask::EntryLink));
  }

  #[tokio::test]
  async fn every_task_runs_once() {
    let config = build_config("[[entries]]\nname = \"admin\"\n");
    let writer = RecordingWriter::default();
    run_write_tasks(&config, &writer, JoinPolicy::SettleAll).await.unwrap();

    let mut calls = writer.calls.lock().unwrap().clone();
    calls.sort_unstable();
    assert_eq!(
      calls,
      vec!["write-entry-link", "write-middleware", "write-runtime-config", "write-store"]
    );
  }

  #[tokio::test]
  async fn failing_task_fails_with_its_error() {
    let config = build_config("");
    let writer = RecordingWriter { fail: &["write-store"], ..Default::default() };
    let err = run_write_tasks(&config, &writer, JoinPolicy::SettleAll).await.unwrap_err();

    assert!(matches!(err, BuildError::Artifact { artifact: "write-store", .. }));
    // siblings still settle under SettleAll
    assert_eq!(writer.calls.lock().unwrap().len(), 3);
  }

  #[tokio::test]
  async fn several_failures_aggregate_unless_fail_fast() {
    const FAILING: &[&str] = &["write-store", "write-middleware"];
    let config = build_config("");
    let writer = RecordingWriter { fail: FAILING, ..Default::default() };
    let err = run_write_tasks(&config, &writer, JoinPolicy::SettleAll).await.unwrap_err();
    match err {
      BuildError::Aggregate { group, errors } => {
        assert_eq!(group, "write");
        assert_eq!(errors.len(), 2);
      }
      other => panic!("expected aggregate, got {other}"),
    }

    let writer = RecordingWriter { fail: FAILING, ..Default::default() };
    let err = run_write_tasks(&config, &writer, JoinPolicy::FailFast).await.unwrap_err();
    assert!(matches!(err, BuildError::Artifact { artifact, .. } if FAILING.contains(&artifact)));
  }
}
