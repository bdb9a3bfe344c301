/* src/cli/core/src/config/types.rs */

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SeamConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub entries: Vec<EntrySection>,
  #[serde(default)]
  pub service_worker: ServiceWorkerSection,
  #[serde(default)]
  pub globals: GlobalsSection,
  #[serde(default)]
  pub router: RouterSection,
  #[serde(default)]
  pub store: StoreSection,
  #[serde(default)]
  pub middleware: MiddlewareSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSection {
  #[serde(default)]
  pub ssr: bool,
  pub path: Option<String>,
  pub assets_dir: Option<String>,
  pub public_path: Option<String>,
  pub bundler_command: Option<String>,
  pub server_bundle: Option<String>,
  pub client_manifest: Option<String>,
  #[serde(default)]
  pub ssr_copy: Vec<CopyRuleSection>,
}

/// One `[[build.ssr_copy]]` rule. `dest` falls back to `src`.
#[derive(Debug, Clone, Deserialize)]
pub struct CopyRuleSection {
  pub src: String,
  pub dest: Option<String>,
  #[serde(default)]
  pub options: CopyOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CopyOptions {
  /// Replace files that already exist at the destination.
  #[serde(default = "default_true")]
  pub overwrite: bool,
  /// Fail instead of skipping when `overwrite` is off and the destination exists.
  #[serde(default)]
  pub error_on_exist: bool,
}

impl Default for CopyOptions {
  fn default() -> Self {
    Self { overwrite: true, error_on_exist: false }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntrySection {
  pub name: String,
  pub base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceWorkerSection {
  /// Left unset means enabled; only an explicit `false` turns versioning off.
  pub enable: Option<bool>,
  pub library_dir: Option<String>,
  pub library_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalsSection {
  pub root_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterSection {
  pub pages_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSection {
  pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiddlewareSection {
  #[serde(default)]
  pub all: Vec<String>,
  #[serde(default)]
  pub client: Vec<String>,
  #[serde(default)]
  pub server: Vec<String>,
}

fn default_true() -> bool {
  true
}
