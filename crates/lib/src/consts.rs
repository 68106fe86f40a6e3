/// Default config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "cbuild.toml";

/// Manifest of the last successful build, stored under the output root.
pub const MANIFEST_FILENAME: &str = ".last_modified.json";

/// Advisory lock guarding the output root.
pub const LOCK_FILENAME: &str = ".lock";

pub const DEFAULT_COMPILER: &str = "clang++";
pub const DEFAULT_SOURCE_ROOT: &str = "src";
pub const DEFAULT_OUTPUT_ROOT: &str = "build";
