/* src/cli/core/src/build/config.rs */

// Validated, read-only build configuration. Every check here runs before the
// build touches the filesystem.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use super::error::BuildError;
use super::types::{CONFIG_FILE, META_DIR};
use crate::config::{CopyOptions, SeamConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
  pub name: String,
  pub base: String,
}

/// A verbatim SSR copy: `src` is relative to the root dir, `dest` to the
/// output dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRule {
  pub src: PathBuf,
  pub dest: PathBuf,
  pub options: CopyOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Middleware {
  pub all: Vec<String>,
  pub client: Vec<String>,
  pub server: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
  pub project: String,
  pub ssr: bool,
  pub root_dir: PathBuf,
  pub output_path: PathBuf,
  pub assets_dir: String,
  pub public_path: String,
  pub ssr_copy: Vec<CopyRule>,
  pub entries: Vec<EntryDescriptor>,
  pub service_worker: bool,
  pub library_dir: PathBuf,
  pub library_prefix: String,
  pub bundler_command: Option<String>,
  pub server_bundle: String,
  pub client_manifest: String,
  pub pages_dir: PathBuf,
  pub store_dir: PathBuf,
  pub middleware: Middleware,
}

impl BuildConfig {
  /// Validate `config` and resolve its paths against `base_dir` (the
  /// directory holding seam.toml). A relative `base_dir` is taken from the
  /// working directory; nothing is read from or written to disk.
  pub fn from_seam_config(config: &SeamConfig, base_dir: &Path) -> Result<Self, BuildError> {
    let build = &config.build;

    if build.ssr && !config.entries.is_empty() {
      return Err(BuildError::config(
        "multiple entries cannot use SSR mode, set build.ssr = false or remove [[entries]]",
      ));
    }

    let base_dir = if base_dir.as_os_str().is_empty() { Path::new(".") } else { base_dir };
    let base_dir =
      std::path::absolute(base_dir).map_err(|e| BuildError::io("resolve", base_dir, e))?;
    let root_dir = match &config.globals.root_dir {
      Some(dir) => normalize(&base_dir.join(dir)),
      None => normalize(&base_dir),
    };

    let out = build.path.as_deref().unwrap_or("dist");
    if out.trim().is_empty() {
      return Err(BuildError::config("build.path must not be empty"));
    }
    let output_path = normalize(&root_dir.join(out));
    // Staging empties the output dir, so it must never be or contain the project.
    if root_dir.starts_with(&output_path) {
      return Err(BuildError::config(format!(
        "build.path {} must not contain the project root",
        output_path.display()
      )));
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(config.entries.len());
    for entry in &config.entries {
      let name = entry.name.trim();
      if name.is_empty() {
        return Err(BuildError::config("entries[].name must not be empty"));
      }
      if !seen.insert(name.to_string()) {
        return Err(BuildError::config(format!("duplicate entry name: {name}")));
      }
      let base = entry.base.clone().unwrap_or_else(|| format!("/{name}"));
      entries.push(EntryDescriptor { name: name.to_string(), base });
    }

    let mut ssr_copy = Vec::with_capacity(build.ssr_copy.len());
    for rule in &build.ssr_copy {
      if rule.src.trim().is_empty() {
        return Err(BuildError::config("build.ssr_copy[].src must not be empty"));
      }
      let src = contained("build.ssr_copy[].src", &rule.src)?;
      if src.as_os_str().is_empty() {
        return Err(BuildError::config(format!("build.ssr_copy[].src {} names no file", rule.src)));
      }
      let dest = match rule.dest.as_deref() {
        Some(dest) => contained("build.ssr_copy[].dest", dest)?,
        None => src.clone(),
      };
      ssr_copy.push(CopyRule { src, dest, options: rule.options });
    }

    let sw = &config.service_worker;
    let library_dir =
      root_dir.join(sw.library_dir.as_deref().unwrap_or("node_modules/workbox-sw/build"));
    let pages_dir = root_dir.join(config.router.pages_dir.as_deref().unwrap_or("pages"));
    let store_dir = root_dir.join(config.store.dir.as_deref().unwrap_or("store"));

    Ok(Self {
      project: config.project.name.clone(),
      ssr: build.ssr,
      output_path,
      assets_dir: build.assets_dir.clone().unwrap_or_else(|| "static".to_string()),
      public_path: build.public_path.clone().unwrap_or_else(|| "/".to_string()),
      ssr_copy,
      entries,
      service_worker: sw.enable != Some(false),
      library_dir,
      library_prefix: sw.library_prefix.clone().unwrap_or_else(|| "workbox".to_string()),
      bundler_command: build.bundler_command.clone(),
      server_bundle: build
        .server_bundle
        .clone()
        .unwrap_or_else(|| "server-bundle.json".to_string()),
      client_manifest: build
        .client_manifest
        .clone()
        .unwrap_or_else(|| "client-manifest.json".to_string()),
      pages_dir,
      store_dir,
      middleware: Middleware {
        all: config.middleware.all.clone(),
        client: config.middleware.client.clone(),
        server: config.middleware.server.clone(),
      },
      root_dir,
    })
  }

  pub fn is_single_page(&self) -> bool {
    self.entries.is_empty()
  }

  /// `<output>/<assets_dir>`, home of the versioned offline library.
  pub fn assets_path(&self) -> PathBuf {
    self.output_path.join(&self.assets_dir)
  }

  /// Project-side directory holding generated artifacts.
  pub fn meta_dir(&self) -> PathBuf {
    self.root_dir.join(META_DIR)
  }

  pub fn runtime_manifest_path(&self) -> PathBuf {
    self.meta_dir().join(CONFIG_FILE)
  }

  /// Reserved location read by the online renderer at serve time.
  pub fn dist_runtime_manifest_path(&self) -> PathBuf {
    self.output_path.join(META_DIR).join(CONFIG_FILE)
  }
}

// -- Path helpers --

/// Resolve `.` and `..` lexically; `..` never climbs above the root.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other),
    }
  }
  out
}

/// A copy-rule path that stays inside its base directory. Leading `/` or a
/// drive prefix is dropped, so `/robots.txt` means `<base>/robots.txt`.
fn contained(key: &str, raw: &str) -> Result<PathBuf, BuildError> {
  let mut out = PathBuf::new();
  for component in Path::new(raw).components() {
    match component {
      Component::Normal(part) => out.push(part),
      Component::ParentDir => {
        return Err(BuildError::config(format!("{key} {raw} must not contain `..`")));
      }
      Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
    }
  }
  Ok(out)
}
