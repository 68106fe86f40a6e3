//! Source fingerprints.
//!
//! A [`Fingerprint`] maps each configured source (as written in the config) to
//! its modification time in seconds since the Unix epoch. The fingerprint of the
//! last successful build is persisted under the output root as the manifest.
//!
//! # Submodules
//!
//! - [`store`] - Manifest persistence
//! - [`detect`] - Rebuild decision

pub mod detect;
pub mod store;

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::debug;

use crate::config::BuildConfig;

pub use detect::{changed_sources, should_rebuild};

/// Source path (relative to the source root) to modification time in seconds.
pub type Fingerprint = BTreeMap<String, f64>;

#[derive(Debug, Error)]
pub enum FingerprintError {
  #[error("source file not found: {0}")]
  MissingSource(PathBuf),

  #[error("failed to stat source {path}: {source}")]
  Stat {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read manifest {path}: {source}")]
  ManifestRead {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("malformed manifest {path}: {source}")]
  ManifestParse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to write manifest {path}: {source}")]
  ManifestWrite {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Stat every configured source and record its modification time.
///
/// Fails if any declared source is missing.
pub fn compute_current(config: &BuildConfig) -> Result<Fingerprint, FingerprintError> {
  let mut fingerprint = Fingerprint::new();

  for source in &config.sources {
    let path = config.source_root.join(source);
    let metadata = std::fs::metadata(&path).map_err(|e| stat_error(&path, e))?;
    let modified = metadata.modified().map_err(|e| stat_error(&path, e))?;
    let mtime = unix_seconds(modified);

    debug!(source = %source, mtime, "fingerprinted source");
    fingerprint.insert(source.clone(), mtime);
  }

  Ok(fingerprint)
}

fn stat_error(path: &std::path::Path, err: io::Error) -> FingerprintError {
  if err.kind() == io::ErrorKind::NotFound {
    FingerprintError::MissingSource(path.to_path_buf())
  } else {
    FingerprintError::Stat {
      path: path.to_path_buf(),
      source: err,
    }
  }
}

/// Seconds since the epoch with sub-second precision; negative before 1970.
pub fn unix_seconds(time: SystemTime) -> f64 {
  match time.duration_since(UNIX_EPOCH) {
    Ok(after) => after.as_secs_f64(),
    Err(before) => -before.duration().as_secs_f64(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs::File;
  use std::time::Duration;
  use tempfile::TempDir;

  fn config_in(temp: &TempDir, sources: &[&str]) -> BuildConfig {
    let mut config = BuildConfig::new(temp.path().join("src"), temp.path().join("build"));
    config.set_exe_name("main");
    for source in sources {
      config.add_source(*source);
    }
    config
  }

  #[test]
  fn records_every_source_by_relative_name() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("src").join("sub")).unwrap();
    std::fs::write(temp.path().join("src").join("a.c"), "int a;").unwrap();
    std::fs::write(temp.path().join("src").join("sub").join("b.c"), "int b;").unwrap();

    let sub_b = format!("sub{}b.c", std::path::MAIN_SEPARATOR);
    let config = config_in(&temp, &["a.c", sub_b.as_str()]);
    let fingerprint = compute_current(&config).unwrap();

    assert_eq!(fingerprint.len(), 2);
    assert!(fingerprint.contains_key("a.c"));
    assert!(fingerprint.contains_key(&sub_b));
  }

  #[test]
  fn records_observed_mtime() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    let path = temp.path().join("src").join("a.c");
    std::fs::write(&path, "int a;").unwrap();

    let when = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    File::options().write(true).open(&path).unwrap().set_modified(when).unwrap();

    let fingerprint = compute_current(&config_in(&temp, &["a.c"])).unwrap();
    assert_eq!(fingerprint["a.c"], 1_700_000_000.0);
  }

  #[test]
  fn missing_source_is_an_error() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    std::fs::write(temp.path().join("src").join("a.c"), "").unwrap();

    let result = compute_current(&config_in(&temp, &["a.c", "gone.c"]));

    match result {
      Err(FingerprintError::MissingSource(path)) => assert!(path.ends_with("gone.c")),
      other => panic!("expected MissingSource, got {:?}", other),
    }
  }

  #[test]
  fn unix_seconds_handles_pre_epoch() {
    let before = UNIX_EPOCH - Duration::from_millis(1500);
    assert_eq!(unix_seconds(before), -1.5);
    assert_eq!(unix_seconds(UNIX_EPOCH + Duration::from_millis(250)), 0.25);
  }
}
