//! The build orchestrator.
//!
//! [`Builder`] owns one [`BuildConfig`] and drives it through planning,
//! toolchain execution, manifest bookkeeping and running the artifact.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::build::types::{BuildError, BuildPlan, BuildResult, BuildStatus, RebuildReason};
use crate::config::BuildConfig;
use crate::fingerprint::{self, changed_sources, should_rebuild, store};
use crate::invocation;
use crate::lock::BuildLock;

#[derive(Debug, Clone)]
pub struct Builder {
  config: BuildConfig,
}

impl Builder {
  pub fn new(config: BuildConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Lock the output root for the duration of a build.
  ///
  /// `command` is recorded in the lock file so a competing build can name the holder.
  pub fn lock(&self, command: &str) -> Result<BuildLock, BuildError> {
    Ok(BuildLock::acquire(&self.config.output_root, command)?)
  }

  /// Decide whether the toolchain has to run.
  ///
  /// With `force` the sources are not even stat'd. Otherwise the current
  /// fingerprint is compared against the manifest; a missing source or an
  /// unreadable manifest is an error.
  pub fn plan(&self, force: bool) -> Result<BuildPlan, BuildError> {
    self.config.validate()?;

    if force {
      info!("forced build, skipping change detection");
      return Ok(BuildPlan::Rebuild {
        command: invocation::command(&self.config)?,
        reason: RebuildReason::Forced,
        fingerprint: None,
      });
    }

    let current = fingerprint::compute_current(&self.config)?;
    let previous = store::read(&self.config.output_root)?;

    if !should_rebuild(previous.as_ref(), &current) {
      info!(sources = current.len(), "sources unchanged, nothing to build");
      return Ok(BuildPlan::UpToDate);
    }

    let reason = match &previous {
      None => RebuildReason::NoManifest,
      Some(previous) => RebuildReason::SourcesChanged(
        changed_sources(Some(previous), &current)
          .into_iter()
          .map(str::to_string)
          .collect(),
      ),
    };

    if let Some(previous) = &previous {
      let stale = previous.keys().filter(|source| !current.contains_key(*source)).count();
      if stale > 0 {
        warn!(stale, "manifest lists sources that are no longer configured");
      }
    }

    info!(reason = %reason, "rebuild required");

    Ok(BuildPlan::Rebuild {
      command: invocation::command(&self.config)?,
      reason,
      fingerprint: Some(current),
    })
  }

  /// Carry out a plan produced by [`Builder::plan`].
  pub async fn execute(&self, plan: BuildPlan) -> Result<BuildResult, BuildError> {
    let (command, fingerprint) = match plan {
      BuildPlan::UpToDate => {
        return Ok(BuildResult {
          status: BuildStatus::UpToDate,
          manifest_written: false,
        });
      }
      BuildPlan::Rebuild {
        command, fingerprint, ..
      } => (command, fingerprint),
    };

    let output_root = &self.config.output_root;
    tokio::fs::create_dir_all(output_root)
      .await
      .map_err(|source| BuildError::CreateOutputDir {
        path: output_root.clone(),
        source,
      })?;

    info!(program = %command.program, args = command.args.len(), "invoking toolchain");
    debug!(command = %command, "toolchain command");

    let status = Command::new(&command.program)
      .args(&command.args)
      .status()
      .await
      .map_err(|source| BuildError::Spawn {
        program: command.program.clone(),
        source,
      })?;

    if !status.success() {
      warn!(code = ?status.code(), "toolchain failed, manifest left untouched");
      return Ok(BuildResult {
        status: BuildStatus::Failed { code: status.code() },
        manifest_written: false,
      });
    }

    let manifest_written = match fingerprint {
      Some(fingerprint) => {
        store::write(output_root, &fingerprint)?;
        true
      }
      None => {
        debug!("forced build, manifest not updated");
        false
      }
    };

    info!("build succeeded");
    Ok(BuildResult {
      status: BuildStatus::Succeeded,
      manifest_written,
    })
  }

  /// Plan and execute under the output-root lock.
  pub async fn build(&self, force: bool) -> Result<BuildResult, BuildError> {
    let _lock = self.lock(if force { "build (forced)" } else { "build" })?;
    let plan = self.plan(force)?;
    self.execute(plan).await
  }

  /// Path of the artifact this config produces.
  pub fn artifact_path(&self) -> PathBuf {
    invocation::artifact_path(&self.config)
  }

  /// Launch the artifact with inherited stdio and wait for it.
  ///
  /// The exit status is returned as-is; a non-zero exit is not an error.
  pub async fn run(&self) -> Result<ExitStatus, BuildError> {
    let artifact = runnable_path(&self.artifact_path());
    info!(artifact = %artifact.display(), "running artifact");

    let status = Command::new(&artifact)
      .status()
      .await
      .map_err(|source| BuildError::Spawn {
        program: artifact.to_string_lossy().into_owned(),
        source,
      })?;

    debug!(code = ?status.code(), "artifact exited");
    Ok(status)
  }
}

/// A bare file name would be looked up on `PATH`; anchor it to the working directory.
fn runnable_path(path: &Path) -> PathBuf {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
    _ => Path::new(".").join(path),
  }
}
