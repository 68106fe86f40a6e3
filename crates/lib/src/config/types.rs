use std::fmt;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::config::ConfigError;
use crate::consts::DEFAULT_COMPILER;

/// Preprocessor defines in insertion order.
///
/// An empty value means the symbol is defined without a value (`-DNAME`).
/// Redefining an existing name replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defines(Vec<(String, String)>);

impl Defines {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    match self.0.iter_mut().find(|(existing, _)| *existing == name) {
      Some(entry) => entry.1 = value,
      None => self.0.push((name, value)),
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|(existing, _)| existing == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'de> Deserialize<'de> for Defines {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct DefinesVisitor;

    impl<'de> Visitor<'de> for DefinesVisitor {
      type Value = Defines;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a table of preprocessor defines")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut defines = Defines::new();
        while let Some((name, DefineValue(value))) = access.next_entry::<String, DefineValue>()? {
          defines.insert(name, value);
        }
        Ok(defines)
      }
    }

    deserializer.deserialize_map(DefinesVisitor)
  }
}

/// A define value as written in a config file: strings verbatim, integers in decimal.
struct DefineValue(String);

impl<'de> Deserialize<'de> for DefineValue {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct ValueVisitor;

    impl Visitor<'_> for ValueVisitor {
      type Value = DefineValue;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or integer define value")
      }

      fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(DefineValue(v.to_string()))
      }

      fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(DefineValue(v))
      }

      fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(DefineValue(v.to_string()))
      }

      fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(DefineValue(v.to_string()))
      }
    }

    deserializer.deserialize_any(ValueVisitor)
  }
}

/// Declarative description of one compilation unit.
///
/// Sources and search paths are stored as written and only joined with
/// `source_root` / `output_root` when a command line or fingerprint is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
  pub compiler: String,
  pub opt_level: String,
  pub defines: Defines,
  pub sources: Vec<String>,
  pub include_paths: Vec<String>,
  pub link_paths: Vec<String>,
  pub libraries: Vec<String>,
  pub linker_options: String,
  pub exe_name: String,
  pub source_root: PathBuf,
  pub output_root: PathBuf,
}

impl BuildConfig {
  pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
    Self {
      compiler: DEFAULT_COMPILER.to_string(),
      opt_level: String::new(),
      defines: Defines::new(),
      sources: Vec::new(),
      include_paths: Vec::new(),
      link_paths: Vec::new(),
      libraries: Vec::new(),
      linker_options: String::new(),
      exe_name: String::new(),
      source_root: source_root.into(),
      output_root: output_root.into(),
    }
  }

  pub fn set_compiler(&mut self, compiler: impl Into<String>) -> &mut Self {
    self.compiler = compiler.into();
    self
  }

  pub fn set_opt_level(&mut self, opt_level: impl Into<String>) -> &mut Self {
    self.opt_level = opt_level.into();
    self
  }

  pub fn set_exe_name(&mut self, exe_name: impl Into<String>) -> &mut Self {
    self.exe_name = exe_name.into();
    self
  }

  pub fn add_define(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.defines.insert(name, value);
    self
  }

  pub fn add_source(&mut self, source: impl Into<String>) -> &mut Self {
    self.sources.push(source.into());
    self
  }

  pub fn add_include_path(&mut self, path: impl Into<String>) -> &mut Self {
    self.include_paths.push(path.into());
    self
  }

  pub fn add_link_path(&mut self, path: impl Into<String>) -> &mut Self {
    self.link_paths.push(path.into());
    self
  }

  pub fn add_library(&mut self, library: impl Into<String>) -> &mut Self {
    self.libraries.push(library.into());
    self
  }

  pub fn set_linker_options(&mut self, options: impl Into<String>) -> &mut Self {
    self.linker_options = options.into();
    self
  }

  /// Absolute-or-relative paths of every source, joined onto `source_root`.
  pub fn source_paths(&self) -> Vec<PathBuf> {
    self.sources.iter().map(|source| self.source_root.join(source)).collect()
  }

  /// Check the fields every build needs.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.sources.is_empty() {
      return Err(ConfigError::EmptySources);
    }
    if self.exe_name.is_empty() {
      return Err(ConfigError::EmptyExeName);
    }
    Ok(())
  }
}
