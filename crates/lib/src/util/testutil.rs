//! Test utilities for cbuild-lib.
//!
//! Scratch projects with a `src/` and `build/` directory plus helpers to pin
//! source modification times.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tempfile::TempDir;

use crate::config::BuildConfig;

/// Compiler that exits 0 without doing anything.
#[cfg(unix)]
pub const SUCCEEDING_COMPILER: &str = "true";

/// Compiler that exits 1 without doing anything.
#[cfg(unix)]
pub const FAILING_COMPILER: &str = "false";

/// Compiler that cannot be launched; any attempt to invoke it is a spawn error.
pub const MISSING_COMPILER: &str = "cbuild-test-no-such-compiler";

/// Temporary project with sources under `src/` and output under `build/`.
pub struct TestProject {
  pub temp: TempDir,
}

impl TestProject {
  /// Create a project containing `sources`, each with an mtime of `base_secs`.
  pub fn with_sources(sources: &[&str], base_secs: u64) -> Self {
    let temp = TempDir::new().unwrap();
    let project = Self { temp };
    for source in sources {
      project.write_source(source, "int x;\n");
      project.set_mtime(source, base_secs);
    }
    project
  }

  pub fn source_root(&self) -> PathBuf {
    self.temp.path().join("src")
  }

  pub fn output_root(&self) -> PathBuf {
    self.temp.path().join("build")
  }

  pub fn write_source(&self, source: &str, content: &str) {
    let path = self.source_root().join(source);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
  }

  /// Pin the modification time of a source to `secs` after the epoch.
  pub fn set_mtime(&self, source: &str, secs: u64) {
    set_mtime(&self.source_root().join(source), UNIX_EPOCH + Duration::from_secs(secs));
  }

  /// Config named `main` with the given compiler and sources.
  pub fn config(&self, compiler: &str, sources: &[&str]) -> BuildConfig {
    let mut config = BuildConfig::new(self.source_root(), self.output_root());
    config.set_compiler(compiler).set_opt_level("2").set_exe_name("main");
    for source in sources {
      config.add_source(*source);
    }
    config
  }

  pub fn manifest_bytes(&self) -> Option<Vec<u8>> {
    std::fs::read(crate::fingerprint::store::manifest_path(&self.output_root())).ok()
  }
}

pub fn set_mtime(path: &Path, time: SystemTime) {
  File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
}
