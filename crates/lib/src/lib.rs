//! cbuild-lib: Core types and logic for cbuild
//!
//! This crate provides everything needed to drive a single native compilation unit:
//! - `BuildConfig`: declarative description of the sources, flags and output
//! - `invocation`: renders a `BuildConfig` into an exact toolchain command line
//! - `Fingerprint`: source modification times, persisted as the build manifest
//! - `Builder`: decides whether to rebuild, runs the toolchain and the artifact

pub mod build;
pub mod config;
pub mod consts;
pub mod fingerprint;
pub mod invocation;
pub mod lock;
pub mod platform;

#[cfg(test)]
pub(crate) mod util;

pub use build::{BuildError, BuildPlan, BuildResult, BuildStatus, Builder, RebuildReason};
pub use config::{BuildConfig, ConfigError, Defines};
pub use fingerprint::{Fingerprint, FingerprintError};
