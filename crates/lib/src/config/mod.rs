//! Build configuration.
//!
//! A [`BuildConfig`] describes one compilation unit. It is either assembled in
//! code through its builder-style setters or loaded from a TOML file:
//!
//! ```toml
//! compiler = "clang"
//! opt_level = "2"
//! exe_name = "main"
//! sources = ["main.c", "vec.c"]
//! libraries = ["jansson"]
//!
//! [defines]
//! DEBUG = ""
//! LEVEL = "2"
//!
//! [deps]
//! msys2 = true
//! ```
//!
//! Relative `source_root` / `output_root` values are resolved against the
//! directory containing the config file.

mod types;

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_COMPILER, DEFAULT_OUTPUT_ROOT, DEFAULT_SOURCE_ROOT};
use crate::platform::deps;

pub use types::{BuildConfig, Defines};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("no sources configured")]
  EmptySources,

  #[error("no executable name configured")]
  EmptyExeName,
}

/// On-disk shape of a config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  #[serde(default = "default_compiler")]
  compiler: String,
  #[serde(default)]
  opt_level: String,
  #[serde(default)]
  defines: Defines,
  #[serde(default)]
  sources: Vec<String>,
  #[serde(default)]
  include_paths: Vec<String>,
  #[serde(default)]
  link_paths: Vec<String>,
  #[serde(default)]
  libraries: Vec<String>,
  #[serde(default)]
  linker_options: String,
  #[serde(default)]
  exe_name: String,
  #[serde(default = "default_source_root")]
  source_root: PathBuf,
  #[serde(default = "default_output_root")]
  output_root: PathBuf,
  #[serde(default)]
  deps: DepsConfig,
}

/// Optional dependency discovery switches.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DepsConfig {
  /// Append the include/link directories of a discovered MSYS2 installation.
  #[serde(default)]
  msys2: bool,
}

fn default_compiler() -> String {
  DEFAULT_COMPILER.to_string()
}

fn default_source_root() -> PathBuf {
  PathBuf::from(DEFAULT_SOURCE_ROOT)
}

fn default_output_root() -> PathBuf {
  PathBuf::from(DEFAULT_OUTPUT_ROOT)
}

impl BuildConfig {
  /// Load and validate a config file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let config = Self::from_toml_str(&content, base_dir).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Parse a config document, resolving relative roots against `base_dir`.
  ///
  /// Does not validate; see [`BuildConfig::validate`].
  pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, toml::de::Error> {
    let file: ConfigFile = toml::from_str(content)?;

    let mut config = BuildConfig::new(base_dir.join(&file.source_root), base_dir.join(&file.output_root));
    config.compiler = file.compiler;
    config.opt_level = file.opt_level;
    config.defines = file.defines;
    config.sources = file.sources;
    config.include_paths = file.include_paths;
    config.link_paths = file.link_paths;
    config.libraries = file.libraries;
    config.linker_options = file.linker_options;
    config.exe_name = file.exe_name;

    if file.deps.msys2 {
      match deps::msys2_root() {
        Some(root) => {
          let found = deps::msys2_paths(&root);
          debug!(root = %root.display(), "using MSYS2 dependency paths");
          config.include_paths.extend(found.include_paths);
          config.link_paths.extend(found.link_paths);
        }
        None => debug!("MSYS2 discovery requested but no installation root is known"),
      }
    }

    Ok(config)
  }
}
