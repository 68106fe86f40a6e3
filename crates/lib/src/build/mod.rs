//! Build orchestration.
//!
//! A build has two steps:
//!
//! 1. **Plan** - fingerprint the sources, compare them with the manifest of the
//!    last successful build and render the toolchain command if anything changed.
//!    Forced builds skip the comparison entirely.
//! 2. **Execute** - launch the toolchain with inherited stdio, wait for it, and on
//!    success persist the fingerprint taken during planning.
//!
//! Forced builds never touch the manifest, and failed builds leave it exactly
//! as it was, so the next build sees the same state and tries again.
//!
//! # Submodules
//!
//! - [`execute`] - The [`Builder`] orchestrator

pub mod execute;
mod types;

pub use execute::Builder;
pub use types::*;
