//! Page runtime settings
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! ```toml
//! dismiss_after_ms = 5000
//! processing_label = "Processing..."
//! strength_fields = ["password1", "new_password1"]
//! messages_container = "messages"
//!
//! [classes]
//! valid = "is-valid"
//! invalid = "is-invalid"
//!
//! # Layered over the standard rule table
//! [rules.fields]
//! new_password1 = [{ type = "password_length", min = 8 }]
//! ```

use crate::error::{SettingsError, SettingsResult};
use crate::render::FEEDBACK_CLASS;
use attendo_forms::RuleSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default banner lifetime
pub const DEFAULT_DISMISS_AFTER_MS: u64 = 5_000;

/// CSS classes the controller toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
	/// Input passed validation
	pub valid: String,
	/// Input failed validation
	pub invalid: String,
	/// Set on the field wrapper while its input has focus
	pub focused: String,
	/// Set on the label of a select that has a value
	pub has_value: String,
	/// Element holding the inline error
	pub feedback: String,
}

impl Default for ClassNames {
	fn default() -> Self {
		Self {
			valid: "is-valid".to_string(),
			invalid: "is-invalid".to_string(),
			focused: "focused".to_string(),
			has_value: "has-value".to_string(),
			feedback: FEEDBACK_CLASS.to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
	/// Banner lifetime in milliseconds
	pub dismiss_after_ms: u64,
	/// Submit button label while a submission is in flight
	pub processing_label: String,
	/// Password fields that get a strength class
	pub strength_fields: Vec<String>,
	/// Id of the element new banners are appended to; falls back to `body`
	pub messages_container: String,
	pub classes: ClassNames,
	/// Overlay for [`RuleSet::standard`]
	pub rules: RuleSet,
}

impl Default for PageSettings {
	fn default() -> Self {
		Self {
			dismiss_after_ms: DEFAULT_DISMISS_AFTER_MS,
			processing_label: "Processing...".to_string(),
			strength_fields: vec!["password1".to_string()],
			messages_container: "messages".to_string(),
			classes: ClassNames::default(),
			rules: RuleSet::empty(),
		}
	}
}

impl PageSettings {
	/// Parses and validates settings from TOML
	///
	/// # Examples
	///
	/// ```
	/// use attendo_pages::PageSettings;
	/// use std::time::Duration;
	///
	/// let settings = PageSettings::from_toml_str("dismiss_after_ms = 3000").unwrap();
	/// assert_eq!(settings.dismiss_after(), Duration::from_secs(3));
	/// assert_eq!(settings.processing_label, "Processing...");
	/// ```
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "loading page settings");
		Self::from_toml_str(&content)
	}

	pub fn validate(&self) -> SettingsResult<()> {
		if self.dismiss_after_ms == 0 {
			return Err(SettingsError::Invalid(
				"dismiss_after_ms must be greater than zero".to_string(),
			));
		}
		if self.processing_label.trim().is_empty() {
			return Err(SettingsError::Invalid(
				"processing_label must not be empty".to_string(),
			));
		}
		let classes = [
			("valid", &self.classes.valid),
			("invalid", &self.classes.invalid),
			("focused", &self.classes.focused),
			("has_value", &self.classes.has_value),
			("feedback", &self.classes.feedback),
		];
		for (key, class) in classes {
			if class.is_empty() || class.contains(char::is_whitespace) {
				return Err(SettingsError::Invalid(format!(
					"classes.{} must be a single class name",
					key
				)));
			}
		}
		Ok(())
	}

	pub fn dismiss_after(&self) -> Duration {
		Duration::from_millis(self.dismiss_after_ms)
	}

	/// The standard rule table with this overlay applied
	pub fn rule_set(&self) -> RuleSet {
		RuleSet::standard().merge(self.rules.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use attendo_forms::{FieldType, Rule};
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = PageSettings::default();
		assert_eq!(settings.dismiss_after(), Duration::from_secs(5));
		assert_eq!(settings.classes.invalid, "is-invalid");
		assert_eq!(settings.rule_set(), RuleSet::standard());
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_empty_toml_is_default() {
		assert_eq!(PageSettings::from_toml_str("").unwrap(), PageSettings::default());
	}

	#[rstest]
	fn test_rules_overlay() {
		let settings = PageSettings::from_toml_str(
			r#"
			strength_fields = ["new_password1"]

			[rules.fields]
			new_password1 = [{ type = "password_length", min = 10 }]

			[rules.types]
			tel = [{ type = "phone_format" }]
			"#,
		)
		.unwrap();

		let rules = settings.rule_set();
		assert_eq!(
			rules.rules_for_name("new_password1"),
			&[Rule::PasswordLength { min: 10 }]
		);
		assert_eq!(rules.rules_for_type(FieldType::Tel), &[Rule::PhoneFormat]);
		assert_eq!(rules.rules_for_name("employee_id"), &[Rule::IdentifierFormat]);
		assert_eq!(settings.strength_fields, vec!["new_password1"]);
	}

	#[rstest]
	#[case("dismiss_after_ms = 0")]
	#[case("processing_label = \"  \"")]
	#[case("[classes]\ninvalid = \"is invalid\"")]
	fn test_invalid_settings(#[case] source: &str) {
		assert!(matches!(
			PageSettings::from_toml_str(source),
			Err(SettingsError::Invalid(_))
		));
	}

	#[rstest]
	fn test_malformed_toml() {
		assert!(matches!(
			PageSettings::from_toml_str("dismiss_after_ms = \"soon\""),
			Err(SettingsError::Toml(_))
		));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "processing_label = \"Saving...\"").unwrap();

		let settings = PageSettings::from_file(file.path()).unwrap();

		assert_eq!(settings.processing_label, "Saving...");
	}

	#[rstest]
	fn test_from_missing_file() {
		assert!(matches!(
			PageSettings::from_file("/nonexistent/attendo.toml"),
			Err(SettingsError::Io(_))
		));
	}
}
