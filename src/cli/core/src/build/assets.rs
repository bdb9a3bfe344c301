/* src/cli/core/src/build/assets.rs */

// Keeps exactly one version of the offline runtime library under the output
// assets dir: stale `<prefix>-v*` dirs go first, then the current one is
// installed.

use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::collab::OfflineLibrary;
use super::config::BuildConfig;
use super::error::{BuildError, IoContext};
use super::join::{JoinGroup, JoinPolicy};

pub fn version_dir_pattern(prefix: &str) -> Result<Regex, BuildError> {
  Regex::new(&format!("^{}-v", regex::escape(prefix)))
    .map_err(|e| BuildError::config(format!("invalid service_worker.library_prefix: {e}")))
}

/// Directories directly under `assets` whose name matches `pattern`, sorted.
/// A missing assets dir has no versions.
pub async fn find_version_dirs(
  assets: &Path,
  pattern: &Regex,
) -> Result<Vec<PathBuf>, BuildError> {
  let mut entries = match tokio::fs::read_dir(assets).await {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(e) => return Err(BuildError::io("read", assets, e)),
  };
  let mut found = Vec::new();
  while let Some(entry) = entries.next_entry().await.io_context("read", assets)? {
    let path = entry.path();
    if !entry.file_type().await.io_context("stat", &path)?.is_dir() {
      continue;
    }
    if entry.file_name().to_str().is_some_and(|name| pattern.is_match(name)) {
      found.push(path);
    }
  }
  found.sort();
  Ok(found)
}

/// Remove every stale library version, then install the current one.
/// Returns the installed version directory name.
pub async fn refresh_offline_library(
  config: &BuildConfig,
  library: &dyn OfflineLibrary,
  policy: JoinPolicy,
) -> Result<String, BuildError> {
  let assets = config.assets_path();
  let pattern = version_dir_pattern(&config.library_prefix)?;
  let stale = find_version_dirs(&assets, &pattern).await?;

  if !stale.is_empty() {
    let mut removals = JoinGroup::new("stale library removal", policy);
    for dir in &stale {
      removals.push(async move {
        tokio::fs::remove_dir_all(dir).await.io_context("remove", dir)
      });
    }
    // Install must not start before every removal has settled.
    removals.join().await?;
  }

  library.install(config).await
}
