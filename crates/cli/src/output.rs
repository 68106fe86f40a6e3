//! CLI output formatting utilities.
//!
//! Section banners, colored status lines and human-readable durations.

use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
}

/// Width of section banners, walls included.
pub const BANNER_WIDTH: usize = 60;

/// Render a three-line banner with `text` centered between `|` walls.
///
/// Odd leftover padding goes to the right. Text wider than the banner gets no padding.
pub fn banner(text: &str, width: usize) -> String {
  let corner = "=".repeat(width);
  let padding = width.saturating_sub(text.chars().count() + 2);
  let left = padding / 2;
  let right = padding - left;

  format!(
    "{corner}\n|{}{}{}|\n{corner}",
    " ".repeat(left),
    text,
    " ".repeat(right)
  )
}

pub fn print_header(text: &str) {
  println!(
    "{}",
    banner(text, BANNER_WIDTH).if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}
