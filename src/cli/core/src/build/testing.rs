/* src/cli/core/src/build/testing.rs */

// Recording fakes shared by the pipeline and builder tests. Every call is
// logged as one event string; `Recorder::failing` makes the first collaborator
// whose event starts with the given prefix fail.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;

use super::artifacts::ProjectArtifacts;
use super::collab::{
  ArtifactWriter, Bundler, Collaborators, OfflineLibrary, RendererBuilder, RouteBuilder,
  StepFuture,
};
use super::config::BuildConfig;
use super::error::{BuildError, BuildOutcome};
use super::report::{BuildReporter, Stage};
use super::types::BundlePlan;
use crate::config::SeamConfig;

pub(crate) const FAKE_LIBRARY: &str = "workbox-v9.9.9";

pub(crate) fn seam_config(toml_str: &str) -> SeamConfig {
  toml::from_str(&format!("[project]\nname = \"t\"\n{toml_str}")).unwrap()
}

pub(crate) fn build_config(root: &Path, toml_str: &str) -> BuildConfig {
  BuildConfig::from_seam_config(&seam_config(toml_str), root).unwrap()
}

#[derive(Clone, Default)]
pub(crate) struct Recorder {
  events: Arc<Mutex<Vec<String>>>,
  fail_on: Option<&'static str>,
}

impl Recorder {
  pub(crate) fn failing(prefix: &'static str) -> Self {
    Self { fail_on: Some(prefix), ..Self::default() }
  }

  pub(crate) fn events(&self) -> Vec<String> {
    self.events.lock().unwrap().clone()
  }

  pub(crate) fn count(&self, prefix: &str) -> usize {
    self.events().iter().filter(|e| e.starts_with(prefix)).count()
  }

  /// Log `event`; true when this call is the one configured to fail.
  fn record(&self, event: String) -> bool {
    let fails = self.fail_on.is_some_and(|prefix| event.starts_with(prefix));
    self.events.lock().unwrap().push(event);
    fails
  }

  pub(crate) fn collaborators(&self) -> Collaborators {
    Collaborators {
      bundler: Box::new(FakeBundler(self.clone())),
      renderer: Box::new(FakeRenderer(self.clone())),
      routes: Box::new(FakeRoutes(self.clone())),
      artifacts: Box::new(FakeArtifacts(self.clone())),
      library: Box::new(FakeLibrary(self.clone())),
    }
  }
}

fn plan_event(plan: &BundlePlan) -> String {
  format!("{} ssr={} single_page={}", plan.target.as_str(), plan.ssr, plan.single_page)
}

struct FakeBundler(Recorder);

impl Bundler for FakeBundler {
  fn bundle<'a>(&'a self, _: &'a BuildConfig, plan: &'a BundlePlan) -> StepFuture<'a> {
    Box::pin(async move {
      if self.0.record(format!("bundle {}", plan_event(plan))) {
        return Err(BuildError::BundleBuild("bundler crashed".into()));
      }
      Ok(())
    })
  }
}

struct FakeRenderer(Recorder);

impl RendererBuilder for FakeRenderer {
  fn build<'a>(
    &'a self,
    _: &'a BuildConfig,
    client: &'a BundlePlan,
    server: &'a BundlePlan,
  ) -> StepFuture<'a> {
    Box::pin(async move {
      if self.0.record(format!("render {} + {}", plan_event(client), plan_event(server))) {
        return Err(BuildError::RenderBuild("renderer crashed".into()));
      }
      Ok(())
    })
  }
}

struct FakeRoutes(Recorder);

impl RouteBuilder for FakeRoutes {
  fn build_routes<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      if self.0.record("routes".into()) {
        return Err(BuildError::Artifact { artifact: "routes", message: "bad page".into() });
      }
      Ok(())
    })
  }
}

/// Logs every write. The runtime config is also written for real since the
/// SSR pipeline copies it into the output.
struct FakeArtifacts(Recorder);

impl FakeArtifacts {
  fn write<'a>(&'a self, name: &'static str) -> StepFuture<'a> {
    Box::pin(async move {
      tokio::task::yield_now().await;
      if self.0.record(name.into()) {
        return Err(BuildError::Artifact { artifact: name, message: "disk full".into() });
      }
      Ok(())
    })
  }
}

impl ArtifactWriter for FakeArtifacts {
  fn write_runtime_config<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      self.write("write-runtime-config").await?;
      ProjectArtifacts.write_runtime_config(config).await
    })
  }
  fn write_middleware<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
    self.write("write-middleware")
  }
  fn write_store<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
    self.write("write-store")
  }
  fn write_entry_link<'a>(&'a self, _: &'a BuildConfig) -> StepFuture<'a> {
    self.write("write-entry-link")
  }
}

struct FakeLibrary(Recorder);

impl OfflineLibrary for FakeLibrary {
  fn install<'a>(&'a self, config: &'a BuildConfig) -> BoxFuture<'a, Result<String, BuildError>> {
    Box::pin(async move {
      if self.0.record("install".into()) {
        return Err(BuildError::Artifact { artifact: "offline library", message: "gone".into() });
      }
      let dir = config.assets_path().join(FAKE_LIBRARY);
      tokio::fs::create_dir_all(&dir).await.map_err(|e| BuildError::io("create", &dir, e))?;
      Ok(FAKE_LIBRARY.to_string())
    })
  }
}

/// Reporter that keeps lifecycle calls as strings. Clones share the log, so
/// a test can hand one to the builder and read the other.
#[derive(Clone, Default)]
pub(crate) struct RecordingReporter {
  calls: Arc<Mutex<Vec<String>>>,
  details: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
  pub(crate) fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  pub(crate) fn details(&self) -> Vec<String> {
    self.details.lock().unwrap().clone()
  }
}

impl BuildReporter for RecordingReporter {
  fn build_start(&self, project: &str) {
    self.calls.lock().unwrap().push(format!("start {project}"));
  }
  fn stage_start(&self, stage: Stage) {
    self.calls.lock().unwrap().push(format!("begin {}", stage.title()));
  }
  fn stage_end(&self, stage: Stage, _: Duration) {
    self.calls.lock().unwrap().push(format!("end {}", stage.title()));
  }
  fn stage_skipped(&self, stage: Stage, _: &str) {
    self.calls.lock().unwrap().push(format!("skip {}", stage.title()));
  }
  fn detail(&self, msg: &str) {
    self.details.lock().unwrap().push(msg.to_string());
  }
  fn build_end(&self, outcome: &BuildOutcome, _: Duration) {
    let status = if outcome.is_ok() { "ok" } else { "failed" };
    self.calls.lock().unwrap().push(format!("finish {status}"));
  }
}
