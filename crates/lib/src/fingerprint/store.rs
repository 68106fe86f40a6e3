//! Manifest persistence.
//!
//! The manifest is a single JSON object stored at
//! `<output_root>/.last_modified.json`, mapping each source to the modification
//! time it had when the last successful build started. Writes go to a temporary
//! sibling first and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Fingerprint, FingerprintError};
use crate::consts::MANIFEST_FILENAME;

pub fn manifest_path(output_root: &Path) -> PathBuf {
  output_root.join(MANIFEST_FILENAME)
}

/// Load the manifest of the last successful build.
///
/// Returns `Ok(None)` only if the file does not exist.
pub fn read(output_root: &Path) -> Result<Option<Fingerprint>, FingerprintError> {
  let path = manifest_path(output_root);

  let content = match fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "no manifest");
      return Ok(None);
    }
    Err(source) => return Err(FingerprintError::ManifestRead { path, source }),
  };

  let fingerprint: Fingerprint =
    serde_json::from_str(&content).map_err(|source| FingerprintError::ManifestParse { path, source })?;

  Ok(Some(fingerprint))
}

/// Replace the manifest with `fingerprint`.
pub fn write(output_root: &Path, fingerprint: &Fingerprint) -> Result<(), FingerprintError> {
  let path = manifest_path(output_root);
  let temp_path = output_root.join(format!("{}.tmp", MANIFEST_FILENAME));

  fs::create_dir_all(output_root).map_err(|source| FingerprintError::ManifestWrite {
    path: path.clone(),
    source,
  })?;

  let content = serde_json::to_string(fingerprint).map_err(FingerprintError::Serialize)?;
  fs::write(&temp_path, &content).map_err(|source| FingerprintError::ManifestWrite {
    path: temp_path.clone(),
    source,
  })?;
  fs::rename(&temp_path, &path).map_err(|source| FingerprintError::ManifestWrite {
    path: path.clone(),
    source,
  })?;

  debug!(path = %path.display(), entries = fingerprint.len(), "manifest written");
  Ok(())
}
