//! Shared test helpers for CLI integration tests.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated project directory with a `cbuild.toml`, `src/` and `build/`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create a project whose config uses `compiler` and lists `sources`.
  ///
  /// Every source is written with a fixed modification time.
  pub fn with_compiler(compiler: &str, sources: &[&str]) -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };

    let quoted: Vec<String> = sources.iter().map(|s| format!("\"{}\"", s)).collect();
    let config = format!(
      "compiler = \"{compiler}\"\nopt_level = \"2\"\nexe_name = \"main\"\nsources = [{}]\n\n[defines]\nDEBUG = \"\"\nLEVEL = \"2\"\n",
      quoted.join(", ")
    );
    env.write_file("cbuild.toml", &config);

    for source in sources {
      env.write_file(&format!("src/{}", source), "int main(void) { return 0; }\n");
      env.set_mtime(source, 1_000);
    }
    env
  }

  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn set_mtime(&self, source: &str, secs: u64) {
    let path = self.temp.path().join("src").join(source);
    File::options()
      .write(true)
      .open(path)
      .unwrap()
      .set_modified(UNIX_EPOCH + Duration::from_secs(secs))
      .unwrap();
  }

  pub fn output_path(&self) -> PathBuf {
    self.root().join("build")
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.output_path().join(".last_modified.json")
  }

  pub fn manifest(&self) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(self.manifest_path()).ok()?;
    Some(serde_json::from_str(&content).unwrap())
  }

  /// Get a cbuild Command running inside the project directory.
  pub fn cbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("cbuild");
    cmd.current_dir(self.root());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
