mod args;
mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use cbuild_lib::consts::CONFIG_FILENAME;

use crate::args::Actions;
use crate::cmd::cmd_build;

/// cbuild - incremental single-unit native build driver
#[derive(Parser)]
#[command(name = "cbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the build config
  #[arg(short, long, default_value = CONFIG_FILENAME)]
  config: PathBuf,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,

  /// `force` to rebuild unconditionally, then `run` to execute the artifact
  #[arg(value_name = "ACTION")]
  actions: Vec<String>,
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let actions = match Actions::from_tokens(&cli.actions) {
    Ok(actions) => actions,
    Err(leftover) => Cli::command()
      .error(
        ErrorKind::UnknownArgument,
        format!(
          "unexpected action(s): {} (expected `[force] [run]` in that order)",
          leftover.join(" ")
        ),
      )
      .exit(),
  };

  cmd_build(&cli.config, actions)
}
