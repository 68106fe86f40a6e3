//! Rebuild decision.
//!
//! Only additions and modifications count: a source whose timestamp is newer
//! than the recorded one, or a source the manifest has never seen. Entries left
//! in the manifest for sources that are no longer configured are ignored, and
//! equal timestamps count as unchanged.

use super::Fingerprint;

/// Decide whether `current` differs from the last successful build.
///
/// A missing previous fingerprint always requires a rebuild.
pub fn should_rebuild(previous: Option<&Fingerprint>, current: &Fingerprint) -> bool {
  match previous {
    None => true,
    Some(previous) => current
      .iter()
      .any(|(source, mtime)| is_changed(previous, source, *mtime)),
  }
}

/// Sources in `current` that are new or newer than in `previous`.
pub fn changed_sources<'a>(previous: Option<&Fingerprint>, current: &'a Fingerprint) -> Vec<&'a str> {
  current
    .iter()
    .filter(|(source, mtime)| previous.is_none_or(|previous| is_changed(previous, source, **mtime)))
    .map(|(source, _)| source.as_str())
    .collect()
}

fn is_changed(previous: &Fingerprint, source: &str, mtime: f64) -> bool {
  match previous.get(source) {
    None => true,
    Some(recorded) => *recorded < mtime,
  }
}
