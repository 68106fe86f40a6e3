//! Build command integration tests.
//!
//! `true` and `false` stand in for the compiler; a missing program proves that
//! no toolchain was launched.

#![cfg(unix)]

use predicates::prelude::*;

use super::common::TestEnv;

const MISSING_COMPILER: &str = "cbuild-test-no-such-compiler";

#[test]
fn first_build_prints_command_and_records_manifest() {
  let env = TestEnv::with_compiler("true", &["a.c", "b.c"]);

  env
    .cbuild_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("BUILD"))
    .stdout(predicate::str::contains("true -O2 -DDEBUG -DLEVEL=2"))
    .stdout(predicate::str::contains("-o"))
    .stdout(predicate::str::contains("Built"));

  let manifest = env.manifest().unwrap();
  let entries = manifest.as_object().unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries["a.c"].as_f64(), Some(1_000.0));
  assert_eq!(entries["b.c"].as_f64(), Some(1_000.0));
}

#[test]
fn second_build_is_up_to_date() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  env.cbuild_cmd().assert().success();

  env
    .cbuild_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Up to date"))
    .stdout(predicate::str::contains("BUILD").not());
}

#[test]
fn default_logging_reports_rebuild_decisions() {
  let env = TestEnv::with_compiler("true", &["a.c"]);

  env
    .cbuild_cmd()
    .assert()
    .success()
    .stderr(predicate::str::contains("rebuild required"))
    .stderr(predicate::str::contains("no previous build"));

  env
    .cbuild_cmd()
    .assert()
    .success()
    .stderr(predicate::str::contains("sources unchanged"));
}

#[test]
fn unchanged_sources_never_launch_the_toolchain() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  env.cbuild_cmd().assert().success();

  let config = std::fs::read_to_string(env.root().join("cbuild.toml")).unwrap();
  env.write_file("cbuild.toml", &config.replace("\"true\"", &format!("\"{}\"", MISSING_COMPILER)));

  env.cbuild_cmd().assert().success().stdout(predicate::str::contains("Up to date"));
}

#[test]
fn force_rebuilds_without_touching_manifest() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  env.cbuild_cmd().assert().success();
  let before = std::fs::read(env.manifest_path()).unwrap();

  env.set_mtime("a.c", 2_000);
  env
    .cbuild_cmd()
    .arg("force")
    .assert()
    .success()
    .stdout(predicate::str::contains("BUILD"));

  assert_eq!(std::fs::read(env.manifest_path()).unwrap(), before);
}

#[test]
fn toolchain_failure_exits_non_zero() {
  let env = TestEnv::with_compiler("false", &["a.c"]);

  env
    .cbuild_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("toolchain exited with code 1"));

  assert!(env.manifest().is_none());
}

#[test]
fn failed_build_does_not_run_artifact() {
  let env = TestEnv::with_compiler("false", &["a.c"]);

  env
    .cbuild_cmd()
    .arg("run")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("RUN").not());
}

#[test]
fn run_executes_artifact_after_build() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  std::fs::create_dir_all(env.output_path()).unwrap();
  std::os::unix::fs::symlink("/bin/echo", env.output_path().join("main")).unwrap();

  env
    .cbuild_cmd()
    .args(["force", "run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("RUN"));
}

#[test]
fn missing_source_aborts_before_invocation() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  std::fs::remove_file(env.root().join("src").join("a.c")).unwrap();

  env
    .cbuild_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("source file not found"))
    .stdout(predicate::str::contains("BUILD").not());
}

#[test]
fn malformed_manifest_is_reported() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  env.write_file("build/.last_modified.json", "{ broken");

  env
    .cbuild_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("malformed manifest"));
}

#[test]
fn explicit_config_path_resolves_roots_next_to_it() {
  let env = TestEnv::with_compiler("true", &["a.c"]);
  let elsewhere = tempfile::TempDir::new().unwrap();

  env
    .cbuild_cmd()
    .current_dir(elsewhere.path())
    .arg("--config")
    .arg(env.root().join("cbuild.toml"))
    .assert()
    .success();

  assert!(env.manifest().is_some());
}
