//! Implementation of the default `cbuild` command.
//!
//! Loads the config, rebuilds the artifact if any source changed (or always,
//! with `force`) and optionally runs it.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use cbuild_lib::{BuildConfig, BuildStatus, Builder};

use crate::args::Actions;
use crate::output::{format_duration, print_error, print_header, print_info, print_success, print_warning};

/// Execute a build.
///
/// - Holds the output-directory lock while deciding, compiling and recording
/// - Prints a `BUILD` banner and the full command line before invoking the toolchain
/// - Runs the artifact under a `RUN` banner only if the build succeeded
///
/// Returns a failing exit code when the toolchain fails; the artifact's own
/// exit code is reported but does not change it.
pub fn cmd_build(config_path: &Path, actions: Actions) -> Result<ExitCode> {
  let config = BuildConfig::load(config_path).context("Failed to load build config")?;
  debug!(config = ?config, "loaded build config");
  let builder = Builder::new(config);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

  let succeeded = rt.block_on(build(&builder, actions))?;
  if !succeeded {
    return Ok(ExitCode::FAILURE);
  }

  if actions.run {
    print_header("RUN");
    let status = rt.block_on(builder.run()).context("Failed to run artifact")?;
    if !status.success() {
      match status.code() {
        Some(code) => print_warning(&format!("Artifact exited with code {}", code)),
        None => print_warning("Artifact terminated by signal"),
      }
    }
  }

  Ok(ExitCode::SUCCESS)
}

async fn build(builder: &Builder, actions: Actions) -> Result<bool> {
  let _lock = builder.lock(&actions.label())?;
  let start = Instant::now();

  let plan = builder.plan(actions.force).context("Build failed")?;

  if let Some(command) = plan.command() {
    print_header("BUILD");
    println!("{}", command);
    println!();
  }

  let result = builder.execute(plan).await.context("Build failed")?;

  match result.status {
    BuildStatus::UpToDate => {
      print_info("Up to date");
    }
    BuildStatus::Succeeded => {
      print_success(&format!(
        "Built {} in {}",
        builder.artifact_path().display(),
        format_duration(start.elapsed())
      ));
    }
    BuildStatus::Failed { code } => {
      match code {
        Some(code) => print_error(&format!("Build failed: toolchain exited with code {}", code)),
        None => print_error("Build failed: toolchain terminated by signal"),
      }
      return Ok(false);
    }
  }

  Ok(true)
}
