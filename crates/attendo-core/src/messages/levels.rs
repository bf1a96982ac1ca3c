//! Message level definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Message levels (similar to Django)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Debug = 10,
	Info = 20,
	Success = 25,
	Warning = 30,
	Error = 40,
}

impl Level {
	/// Returns the string representation of the level
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::messages::Level;
	///
	/// assert_eq!(Level::Success.as_str(), "success");
	/// assert_eq!(Level::Error.as_str(), "error");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Debug => "debug",
			Level::Info => "info",
			Level::Success => "success",
			Level::Warning => "warning",
			Level::Error => "error",
		}
	}

	/// Returns the numeric value of the level
	pub fn value(&self) -> i32 {
		*self as i32
	}

	/// CSS class of the banner rendered for this level.
	///
	/// Errors map to `alert-danger`, matching the Bootstrap markup the
	/// server templates emit.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::messages::Level;
	///
	/// assert_eq!(Level::Error.css_class(), "alert-danger");
	/// assert_eq!(Level::Success.css_class(), "alert-success");
	/// ```
	pub fn css_class(&self) -> &'static str {
		match self {
			Level::Debug => "alert-secondary",
			Level::Info => "alert-info",
			Level::Success => "alert-success",
			Level::Warning => "alert-warning",
			Level::Error => "alert-danger",
		}
	}

	/// Recovers the level from a banner CSS class
	pub fn from_css_class(class: &str) -> Option<Self> {
		match class {
			"alert-secondary" => Some(Level::Debug),
			"alert-info" => Some(Level::Info),
			"alert-success" => Some(Level::Success),
			"alert-warning" => Some(Level::Warning),
			"alert-danger" | "alert-error" => Some(Level::Error),
			_ => None,
		}
	}
}

impl Default for Level {
	fn default() -> Self {
		Level::Info
	}
}

impl FromStr for Level {
	type Err = String;

	/// Parses a level from a string (case-insensitive)
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"debug" => Ok(Level::Debug),
			"info" => Ok(Level::Info),
			"success" => Ok(Level::Success),
			"warning" => Ok(Level::Warning),
			"error" | "danger" => Ok(Level::Error),
			other => Err(format!("Unknown message level: {}", other)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_level() {
		assert_eq!(Level::default(), Level::Info);
	}

	#[rstest]
	fn test_level_ordering() {
		assert!(Level::Debug < Level::Info);
		assert!(Level::Info < Level::Success);
		assert!(Level::Warning < Level::Error);
		assert_eq!(Level::Success.value(), 25);
	}

	#[rstest]
	#[case("debug", Level::Debug)]
	#[case("INFO", Level::Info)]
	#[case("Success", Level::Success)]
	#[case("danger", Level::Error)]
	fn test_level_from_str(#[case] input: &str, #[case] expected: Level) {
		assert_eq!(input.parse::<Level>(), Ok(expected));
	}

	#[rstest]
	fn test_level_from_str_unknown() {
		assert!("critical".parse::<Level>().is_err());
	}

	#[rstest]
	fn test_css_class_round_trip() {
		for level in [
			Level::Debug,
			Level::Info,
			Level::Success,
			Level::Warning,
			Level::Error,
		] {
			assert_eq!(Level::from_css_class(level.css_class()), Some(level));
		}
	}
}
