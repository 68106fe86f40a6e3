use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::fingerprint::{Fingerprint, FingerprintError};
use crate::invocation::Invocation;
use crate::lock::BuildLockError;

/// Errors that stop a build before or while the toolchain is launched.
///
/// A toolchain that runs and exits non-zero is not an error; see [`BuildStatus::Failed`].
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Fingerprint(#[from] FingerprintError),

  #[error(transparent)]
  Lock(#[from] BuildLockError),

  #[error("failed to create output directory {path}: {source}")]
  CreateOutputDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to launch {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
}

/// Why a rebuild was scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
  /// The caller asked for it; change detection was skipped.
  Forced,
  /// No manifest from a previous successful build.
  NoManifest,
  /// These sources are new or newer than the manifest records.
  SourcesChanged(Vec<String>),
}

impl fmt::Display for RebuildReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RebuildReason::Forced => write!(f, "forced"),
      RebuildReason::NoManifest => write!(f, "no previous build"),
      RebuildReason::SourcesChanged(sources) => write!(f, "changed: {}", sources.join(", ")),
    }
  }
}

/// Outcome of the decision step.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildPlan {
  UpToDate,
  Rebuild {
    command: Invocation,
    reason: RebuildReason,
    /// Fingerprint to persist on success. `None` for forced builds.
    fingerprint: Option<Fingerprint>,
  },
}

impl BuildPlan {
  pub fn needs_rebuild(&self) -> bool {
    matches!(self, BuildPlan::Rebuild { .. })
  }

  pub fn command(&self) -> Option<&Invocation> {
    match self {
      BuildPlan::UpToDate => None,
      BuildPlan::Rebuild { command, .. } => Some(command),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
  /// Nothing changed; the toolchain was not launched.
  UpToDate,
  /// The toolchain exited with code 0.
  Succeeded,
  /// The toolchain exited non-zero, or was killed by a signal (`code` is `None`).
  Failed { code: Option<i32> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
  pub status: BuildStatus,
  /// Whether the manifest was replaced by this build.
  pub manifest_written: bool,
}

impl BuildResult {
  pub fn succeeded(&self) -> bool {
    matches!(self.status, BuildStatus::UpToDate | BuildStatus::Succeeded)
  }
}
