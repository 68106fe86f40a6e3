//! Platform inspection.
//!
//! Nothing in here is consulted by the build engine itself: the config loader
//! uses [`deps`] to extend search paths, and [`os`] decides how artifacts are
//! named on disk.

pub mod deps;
pub mod os;

pub use os::Os;
