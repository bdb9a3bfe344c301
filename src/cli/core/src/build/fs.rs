/* src/cli/core/src/build/fs.rs */

// Async filesystem helpers shared by staging, asset versioning and SSR copy.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::error::{BuildError, IoContext};
use crate::config::CopyOptions;

/// Empty `dir` in place, creating it when missing. The directory itself is
/// kept so watchers and open handles on it stay valid.
pub async fn empty_dir(dir: &Path) -> Result<(), BuildError> {
  let mut entries = match fs::read_dir(dir).await {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return fs::create_dir_all(dir).await.io_context("create", dir);
    }
    Err(e) => return Err(BuildError::io("read", dir, e)),
  };
  while let Some(entry) = entries.next_entry().await.io_context("read", dir)? {
    let path = entry.path();
    let file_type = entry.file_type().await.io_context("stat", &path)?;
    if file_type.is_dir() {
      fs::remove_dir_all(&path).await.io_context("remove", &path)?;
    } else {
      fs::remove_file(&path).await.io_context("remove", &path)?;
    }
  }
  Ok(())
}

/// Copy a file or a directory tree from `src` to `dest`, creating parent
/// directories as needed.
pub async fn copy_path(src: &Path, dest: &Path, options: CopyOptions) -> Result<(), BuildError> {
  let meta = fs::metadata(src).await.io_context("copy", src)?;
  if !meta.is_dir() {
    return copy_file(src, dest, options).await;
  }

  let mut stack: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dest.to_path_buf())];
  while let Some((from, to)) = stack.pop() {
    fs::create_dir_all(&to).await.io_context("create", &to)?;
    let mut entries = fs::read_dir(&from).await.io_context("read", &from)?;
    while let Some(entry) = entries.next_entry().await.io_context("read", &from)? {
      let path = entry.path();
      let target = to.join(entry.file_name());
      if entry.file_type().await.io_context("stat", &path)?.is_dir() {
        stack.push((path, target));
      } else {
        copy_file(&path, &target, options).await?;
      }
    }
  }
  Ok(())
}

async fn copy_file(src: &Path, dest: &Path, options: CopyOptions) -> Result<(), BuildError> {
  if !options.overwrite && fs::try_exists(dest).await.io_context("stat", dest)? {
    if options.error_on_exist {
      return Err(BuildError::io(
        "copy to",
        dest,
        io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
      ));
    }
    return Ok(());
  }
  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent).await.io_context("create", parent)?;
  }
  fs::copy(src, dest).await.io_context("copy", src)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn empty_dir_creates_missing_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("dist/nested");
    empty_dir(&out).await.unwrap();
    assert!(out.is_dir());
  }

  #[tokio::test]
  async fn empty_dir_clears_previous_build() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("dist");
    std::fs::create_dir_all(out.join("static/js")).unwrap();
    std::fs::write(out.join("index.html"), "<html>").unwrap();
    std::fs::write(out.join("static/js/app.js"), "//").unwrap();

    empty_dir(&out).await.unwrap();
    assert!(out.is_dir());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);

    // Second run on an already empty dir is a no-op
    empty_dir(&out).await.unwrap();
    assert!(out.is_dir());
  }

  #[tokio::test]
  async fn empty_dir_on_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("dist");
    std::fs::write(&file, "not a dir").unwrap();
    let err = empty_dir(&file).await.unwrap_err();
    assert!(matches!(err, BuildError::Io { .. }));
  }

  #[tokio::test]
  async fn copy_file_creates_parents() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("robots.txt");
    std::fs::write(&src, "User-agent: *").unwrap();
    let dest = tmp.path().join("dist/meta/robots.txt");

    copy_path(&src, &dest, CopyOptions::default()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "User-agent: *");
  }

  #[tokio::test]
  async fn copy_tree_recurses() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("server");
    std::fs::create_dir_all(src.join("lib/deep")).unwrap();
    std::fs::write(src.join("index.js"), "a").unwrap();
    std::fs::write(src.join("lib/deep/util.js"), "b").unwrap();
    let dest = tmp.path().join("dist/server");

    copy_path(&src, &dest, CopyOptions::default()).await.unwrap();
    assert_eq!(std::fs::read_to_string(dest.join("index.js")).unwrap(), "a");
    assert_eq!(std::fs::read_to_string(dest.join("lib/deep/util.js")).unwrap(), "b");
  }

  #[tokio::test]
  async fn copy_respects_overwrite_options() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("a.txt");
    let dest = tmp.path().join("b.txt");
    std::fs::write(&src, "new").unwrap();
    std::fs::write(&dest, "old").unwrap();

    let keep = CopyOptions { overwrite: false, error_on_exist: false };
    copy_path(&src, &dest, keep).await.unwrap();
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "old");

    let strict = CopyOptions { overwrite: false, error_on_exist: true };
    assert!(copy_path(&src, &dest, strict).await.is_err());

    copy_path(&src, &dest, CopyOptions::default()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
  }

  #[tokio::test]
  async fn copy_missing_source_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = copy_path(&tmp.path().join("nope"), &tmp.path().join("x"), CopyOptions::default())
      .await
      .unwrap_err();
    assert!(matches!(err, BuildError::Io { action: "copy", .. }));
  }
}
