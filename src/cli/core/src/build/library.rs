/* src/cli/core/src/build/library.rs */

// Offline runtime library installed from node_modules, e.g.
// node_modules/workbox-sw/build -> dist/static/workbox-v3.6.3

use std::path::Path;

use futures_util::future::BoxFuture;
use serde::Deserialize;

use super::collab::OfflineLibrary;
use super::config::BuildConfig;
use super::error::{BuildError, IoContext};
use super::fs::copy_path;
use crate::config::CopyOptions;

#[derive(Debug, Deserialize)]
struct PackageJson {
  version: String,
}

pub fn version_dir_name(prefix: &str, version: &str) -> String {
  format!("{prefix}-v{version}")
}

pub struct LocalLibrary;

impl LocalLibrary {
  /// Version from the package.json one level above the build directory.
  async fn version(library_dir: &Path) -> Result<String, BuildError> {
    let pkg = library_dir.parent().unwrap_or(library_dir).join("package.json");
    let content = tokio::fs::read_to_string(&pkg).await.io_context("read", &pkg)?;
    let parsed: PackageJson = serde_json::from_str(&content).map_err(|e| BuildError::Artifact {
      artifact: "offline library version",
      message: format!("{}: {e}", pkg.display()),
    })?;
    // The version becomes a directory name under the assets dir.
    let version = parsed.version.trim();
    if version.is_empty() || version.contains(['/', '\\']) {
      return Err(BuildError::Artifact {
        artifact: "offline library version",
        message: format!("{}: unusable version {:?}", pkg.display(), parsed.version),
      });
    }
    Ok(version.to_string())
  }
}

impl OfflineLibrary for LocalLibrary {
  fn install<'a>(&'a self, config: &'a BuildConfig) -> BoxFuture<'a, Result<String, BuildError>> {
    Box::pin(async move {
      let version = Self::version(&config.library_dir).await?;
      let name = version_dir_name(&config.library_prefix, &version);
      let dest = config.assets_path().join(&name);
      copy_path(&config.library_dir, &dest, CopyOptions::default()).await?;
      Ok(name)
    })
  }
}
