//! Toolchain command rendering.
//!
//! Turns a [`BuildConfig`] into the exact argument vector passed to the
//! compiler. The token order is fixed:
//!
//! ```text
//! <compiler> -O<opt> -D<defines>... <sources>... -o <output> -I<inc>... -L<lib>... -l<lib>... <linker options>
//! ```
//!
//! Two renders of the same config always produce identical tokens.

use std::fmt;
use std::path::PathBuf;

use crate::config::{BuildConfig, ConfigError};
use crate::platform::Os;

/// A rendered toolchain command, split into the program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn into_tokens(self) -> Vec<String> {
    let mut tokens = Vec::with_capacity(1 + self.args.len());
    tokens.push(self.program);
    tokens.extend(self.args);
    tokens
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Render the full toolchain command line, compiler first.
pub fn render(config: &BuildConfig) -> Result<Vec<String>, ConfigError> {
  command(config).map(Invocation::into_tokens)
}

/// Render the command with the compiler held apart from its arguments.
pub fn command(config: &BuildConfig) -> Result<Invocation, ConfigError> {
  config.validate()?;

  let mut command = Vec::with_capacity(
    4 + config.defines.len()
      + config.sources.len()
      + config.include_paths.len()
      + config.link_paths.len()
      + config.libraries.len(),
  );

  command.push(format!("-O{}", config.opt_level));

  for (name, value) in config.defines.iter() {
    if value.is_empty() {
      command.push(format!("-D{}", name));
    } else {
      command.push(format!("-D{}={}", name, value));
    }
  }

  command.extend(
    config
      .source_paths()
      .iter()
      .map(|path| path.to_string_lossy().into_owned()),
  );

  command.push("-o".to_string());
  command.push(output_stem(config).to_string_lossy().into_owned());

  command.extend(config.include_paths.iter().map(|path| format!("-I{}", path)));
  command.extend(config.link_paths.iter().map(|path| format!("-L{}", path)));
  command.extend(config.libraries.iter().map(|lib| format!("-l{}", lib)));

  command.push(config.linker_options.clone());

  Ok(Invocation {
    program: config.compiler.clone(),
    args: command,
  })
}

/// Output path handed to `-o`: `output_root/exe_name` with any extension removed.
pub fn output_stem(config: &BuildConfig) -> PathBuf {
  config.output_root.join(&config.exe_name).with_extension("")
}

/// Path of the produced artifact on the current platform.
pub fn artifact_path(config: &BuildConfig) -> PathBuf {
  artifact_path_for(config, Os::current())
}

/// Path of the produced artifact when targeting `os`.
pub fn artifact_path_for(config: &BuildConfig, os: Os) -> PathBuf {
  let mut path = output_stem(config).into_os_string();
  path.push(os.exe_suffix());
  PathBuf::from(path)
}
