/* src/cli/core/src/build/artifacts.rs */

// Default generators for the files the runtime imports from `<root>/.seam/`:
// config.json, middleware.js, store.js, link.js and routes.json.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::collab::{ArtifactWriter, RouteBuilder, StepFuture};
use super::config::BuildConfig;
use super::error::{BuildError, IoContext};
use super::types::RuntimeManifest;

const GENERATED_HEADER: &str = "// Generated by seam-build. Do not edit.\n";
const MODULE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "vue"];

async fn write_artifact(path: &Path, contents: &str) -> Result<(), BuildError> {
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await.io_context("create", parent)?;
  }
  tokio::fs::write(path, contents).await.io_context("write", path)
}

fn to_json<T: Serialize>(artifact: &'static str, value: &T) -> Result<String, BuildError> {
  serde_json::to_string_pretty(value)
    .map_err(|e| BuildError::Artifact { artifact, message: e.to_string() })
}

/// JS string literal with JSON escaping.
fn js_string(s: &str) -> String {
  serde_json::Value::String(s.to_string()).to_string()
}

/// Turn a module name like `user-profile` into a usable import binding.
fn js_ident(prefix: &str, name: &str) -> String {
  let mut out = String::from(prefix);
  for c in name.chars() {
    out.push(if c.is_ascii_alphanumeric() { c } else { '_' });
  }
  out
}

/// Module files directly or recursively under `dir`, relative to it, sorted.
/// A missing directory yields nothing.
async fn list_modules(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
  let mut found = Vec::new();
  let mut stack = vec![dir.to_path_buf()];
  while let Some(current) = stack.pop() {
    let mut entries = match tokio::fs::read_dir(&current).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
      Err(e) => return Err(BuildError::io("read", &current, e)),
    };
    while let Some(entry) = entries.next_entry().await.io_context("read", &current)? {
      let path = entry.path();
      if entry.file_type().await.io_context("stat", &path)?.is_dir() {
        stack.push(path);
        continue;
      }
      let is_module = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MODULE_EXTENSIONS.contains(&ext));
      if is_module && let Ok(rel) = path.strip_prefix(dir) {
        found.push(rel.to_path_buf());
      }
    }
  }
  found.sort();
  Ok(found)
}

/// `a/b/c.vue` -> `a/b/c` with forward slashes.
fn module_key(rel: &Path) -> String {
  rel
    .with_extension("")
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

// -- Routes --

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
  pub path: String,
  pub name: String,
  pub component: String,
}

/// Map a page file to its route: `index` segments collapse, `_id` becomes
/// `:id`.
pub fn route_for_page(rel: &Path) -> RouteRecord {
  let key = module_key(rel);
  let segments: Vec<String> = key
    .split('/')
    .filter(|seg| *seg != "index")
    .map(|seg| match seg.strip_prefix('_') {
      Some(param) => format!(":{param}"),
      None => seg.to_string(),
    })
    .collect();
  let path = format!("/{}", segments.join("/"));
  let name = if segments.is_empty() {
    "index".to_string()
  } else {
    segments.iter().map(|s| s.trim_start_matches(':')).collect::<Vec<_>>().join("-")
  };
  let component = format!("@/pages/{}", rel.to_string_lossy().replace('\\', "/"));
  RouteRecord { path, name, component }
}

/// Static routes sort before dynamic ones so `/detail/new` wins over
/// `/detail/:id`.
pub fn sort_routes(routes: &mut [RouteRecord]) {
  routes.sort_by(|a, b| {
    let dyn_a = a.path.contains(':');
    let dyn_b = b.path.contains(':');
    dyn_a.cmp(&dyn_b).then_with(|| a.path.cmp(&b.path))
  });
}

/// Scans `router.pages_dir` and writes `<root>/.seam/routes.json`.
pub struct PagesRouteBuilder;

impl RouteBuilder for PagesRouteBuilder {
  fn build_routes<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      let pages = list_modules(&config.pages_dir).await?;
      let mut routes: Vec<RouteRecord> = pages.iter().map(|p| route_for_page(p)).collect();
      sort_routes(&mut routes);
      let json = to_json("routes", &routes)?;
      write_artifact(&config.meta_dir().join("routes.json"), &json).await
    })
  }
}

// -- Runtime artifacts --

pub fn render_middleware(config: &BuildConfig) -> String {
  let mw = &config.middleware;
  let mut names: Vec<&String> = mw.all.iter().chain(&mw.client).chain(&mw.server).collect();
  names.sort();
  names.dedup();

  let mut out = String::from(GENERATED_HEADER);
  for name in &names {
    let source = format!("@/middlewares/{name}");
    let _ = writeln!(out, "import {} from {};", js_ident("mw_", name), js_string(&source));
  }
  out.push_str("\nexport default {\n");
  for (key, list) in [("all", &mw.all), ("client", &mw.client), ("server", &mw.server)] {
    let items: Vec<String> = list.iter().map(|n| js_ident("mw_", n)).collect();
    let _ = writeln!(out, "  {key}: [{}],", items.join(", "));
  }
  out.push_str("};\n");
  out
}

pub fn render_store(modules: &[PathBuf]) -> String {
  let mut out = String::from(GENERATED_HEADER);
  let keys: Vec<String> = modules.iter().map(|m| module_key(m)).collect();
  for (key, rel) in keys.iter().zip(modules) {
    let source = format!("@/store/{}", rel.to_string_lossy().replace('\\', "/"));
    let _ = writeln!(out, "import {} from {};", js_ident("store_", key), js_string(&source));
  }
  out.push_str("\nexport const modules = {\n");
  for key in &keys {
    let _ = writeln!(out, "  {}: {},", js_string(key), js_ident("store_", key));
  }
  out.push_str("};\n");
  out
}

pub fn render_entry_link(config: &BuildConfig) -> String {
  let mut out = String::from(GENERATED_HEADER);
  out.push_str("export const entries = [\n");
  for entry in &config.entries {
    let name = js_string(&entry.name);
    let base = js_string(&entry.base);
    let _ = writeln!(out, "  {{ name: {name}, base: {base} }},");
  }
  out.push_str("];\n\n");
  out.push_str("export function entryOf(path) {\n");
  out.push_str("  return entries.find(e => path === e.base || path.startsWith(e.base + '/'));\n");
  out.push_str("}\n");
  out
}

/// Writes each artifact into `<root>/.seam/`.
pub struct ProjectArtifacts;

impl ArtifactWriter for ProjectArtifacts {
  fn write_runtime_config<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      let json = to_json("runtime manifest", &RuntimeManifest::from(config))?;
      write_artifact(&config.runtime_manifest_path(), &json).await
    })
  }

  fn write_middleware<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      write_artifact(&config.meta_dir().join("middleware.js"), &render_middleware(config)).await
    })
  }

  fn write_store<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      let modules = list_modules(&config.store_dir).await?;
      write_artifact(&config.meta_dir().join("store.js"), &render_store(&modules)).await
    })
  }

  fn write_entry_link<'a>(&'a self, config: &'a BuildConfig) -> StepFuture<'a> {
    Box::pin(async move {
      write_artifact(&config.meta_dir().join("link.js"), &render_entry_link(config)).await
    })
  }
}
