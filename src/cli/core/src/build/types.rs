/* src/cli/core/src/build/types.rs */

// Shared types for the build pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::config::BuildConfig;
use super::error::{BuildError, IoContext};

/// Metadata directory name, used both under the project root (generated
/// artifacts) and under the output dir (serve-time runtime manifest).
pub const META_DIR: &str = ".seam";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
  Client,
  Server,
}

impl BuildTarget {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Client => "client",
      Self::Server => "server",
    }
  }
}

/// Everything a bundler needs to produce one bundle, derived from the
/// validated config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePlan {
  pub target: BuildTarget,
  pub ssr: bool,
  pub single_page: bool,
  pub entries: Vec<String>,
  pub output_path: PathBuf,
  pub public_path: String,
}

impl BundlePlan {
  pub fn client(config: &BuildConfig, ssr: bool, single_page: bool) -> Self {
    Self {
      target: BuildTarget::Client,
      ssr,
      single_page,
      entries: config.entries.iter().map(|e| e.name.clone()).collect(),
      output_path: config.output_path.clone(),
      public_path: config.public_path.clone(),
    }
  }

  pub fn server(config: &BuildConfig) -> Self {
    Self { target: BuildTarget::Server, ..Self::client(config, true, true) }
  }
}

/// Build mode label reported at pipeline start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
  Ssr,
  SinglePage,
  MultiPage,
}

impl BuildMode {
  pub fn of(config: &BuildConfig) -> Self {
    if config.ssr {
      Self::Ssr
    } else if config.is_single_page() {
      Self::SinglePage
    } else {
      Self::MultiPage
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Ssr => "SSR",
      Self::SinglePage => "single-page",
      Self::MultiPage => "multi-page",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
  pub name: String,
  pub base: String,
}

/// Subset of the build config the online renderer needs at serve time:
/// where the assets live and which bundles to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeManifest {
  pub project: String,
  pub ssr: bool,
  pub public_path: String,
  pub assets_dir: String,
  pub server_bundle: String,
  pub client_manifest: String,
  pub service_worker: bool,
  #[serde(default)]
  pub entries: Vec<ManifestEntry>,
}

impl From<&BuildConfig> for RuntimeManifest {
  fn from(config: &BuildConfig) -> Self {
    Self {
      project: config.project.clone(),
      ssr: config.ssr,
      public_path: config.public_path.clone(),
      assets_dir: config.assets_dir.clone(),
      server_bundle: config.server_bundle.clone(),
      client_manifest: config.client_manifest.clone(),
      service_worker: config.service_worker,
      entries: config
        .entries
        .iter()
        .map(|e| ManifestEntry { name: e.name.clone(), base: e.base.clone() })
        .collect(),
    }
  }
}

pub async fn read_runtime_manifest(path: &Path) -> Result<RuntimeManifest, BuildError> {
  let content = tokio::fs::read_to_string(path).await.io_context("read", path)?;
  serde_json::from_str(&content).map_err(|e| BuildError::Artifact {
    artifact: "runtime manifest",
    message: format!("{}: {e}", path.display()),
  })
}
