//! Dependency path discovery.
//!
//! Locates an MSYS2 installation whose MinGW headers and libraries should be
//! added to the compiler search paths.

use std::path::{Path, PathBuf};

/// Environment variable overriding the MSYS2 installation root on any platform.
pub const MSYS2_ROOT_ENV: &str = "CBUILD_MSYS2_ROOT";

/// Include and link directories contributed by a dependency root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepPaths {
  pub include_paths: Vec<String>,
  pub link_paths: Vec<String>,
}

/// Returns the MSYS2 root: `CBUILD_MSYS2_ROOT`, else `%LOCALAPPDATA%\msys64` on Windows.
#[cfg(windows)]
pub fn msys2_root() -> Option<PathBuf> {
  if let Some(root) = root_override() {
    return Some(root);
  }
  std::env::var_os("LOCALAPPDATA").map(|local| PathBuf::from(local).join("msys64"))
}

/// Returns the MSYS2 root from `CBUILD_MSYS2_ROOT`; there is no default outside Windows.
#[cfg(not(windows))]
pub fn msys2_root() -> Option<PathBuf> {
  root_override()
}

fn root_override() -> Option<PathBuf> {
  std::env::var_os(MSYS2_ROOT_ENV)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
}

/// Search paths below an MSYS2 root, MinGW first.
pub fn msys2_paths(root: &Path) -> DepPaths {
  let dir = |parts: &[&str]| {
    parts
      .iter()
      .fold(root.to_path_buf(), |acc, part| acc.join(part))
      .to_string_lossy()
      .into_owned()
  };

  DepPaths {
    include_paths: vec![dir(&["mingw64", "include"]), dir(&["usr", "include"])],
    link_paths: vec![dir(&["mingw64", "lib"]), dir(&["usr", "lib"])],
  }
}
