//! Positional action tokens.
//!
//! `cbuild [force] [run]`: each token may appear once and only in that order.

/// What the user asked for after the options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
  /// Skip change detection and always invoke the toolchain.
  pub force: bool,
  /// Execute the artifact after a successful build.
  pub run: bool,
}

impl Actions {
  /// Consume an optional leading `force`, then an optional `run`.
  ///
  /// Returns the tokens left over when anything else remains.
  pub fn from_tokens(tokens: &[String]) -> Result<Self, Vec<String>> {
    let mut rest = tokens;
    let mut actions = Actions::default();

    if let Some((first, tail)) = rest.split_first()
      && first == "force"
    {
      actions.force = true;
      rest = tail;
    }

    if let Some((first, tail)) = rest.split_first()
      && first == "run"
    {
      actions.run = true;
      rest = tail;
    }

    if rest.is_empty() { Ok(actions) } else { Err(rest.to_vec()) }
  }

  /// Short description recorded in the output-directory lock.
  pub fn label(&self) -> String {
    let mut label = String::from("cbuild");
    if self.force {
      label.push_str(" force");
    }
    if self.run {
      label.push_str(" run");
    }
    label
  }
}
