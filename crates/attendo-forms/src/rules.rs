//! Client-side validation rule table
//!
//! Rules are looked up by field type and by field name. For one field the
//! checks run in a fixed order and stop at the first failure, so a field
//! shows one message at a time:
//!
//! 1. `required` (from the field itself)
//! 2. rules registered for the field's type (e.g. `email` → email format)
//! 3. rules registered for the field's name (e.g. `password1` → length)
//!
//! Type and name rules only run on non-empty values. An empty optional
//! field is valid.
//!
//! ## Security Note
//!
//! Client-side validation is for UX only. The server re-validates every
//! submission.
//!
//! ## Configuration
//!
//! A [`RuleSet`] deserializes from TOML, so the table can be extended
//! without code changes:
//!
//! ```
//! use attendo_forms::RuleSet;
//!
//! let rules = RuleSet::from_toml_str(r#"
//!     [fields]
//!     new_password1 = [{ type = "password_length", min = 8 }]
//!     new_password2 = [{ type = "password_match", field = "new_password1" }]
//!
//!     [messages]
//!     password_mismatch = "New passwords don't match."
//! "#).unwrap();
//!
//! let merged = RuleSet::default().merge(rules);
//! assert_eq!(merged.rules_for_name("new_password2").len(), 1);
//! assert_eq!(merged.rules_for_name("password1").len(), 1);
//! ```

use crate::error::{FieldErrorKind, FormResult};
use crate::field::{FieldType, FormField};
use attendo_core::validators::{
	EmailValidator, MinLengthValidator, RegexValidator, ValidationError, Validator,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Minimum password length enforced by the default table
pub const MIN_PASSWORD_LENGTH: usize = 8;

// Uppercase letters and digits only, no separators.
static IDENTIFIER_VALIDATOR: LazyLock<RegexValidator> = LazyLock::new(|| {
	RegexValidator::new(r"^[A-Z0-9]+$").expect("IDENTIFIER_VALIDATOR: invalid regex pattern")
});

// Optional `+`, optional leading `1`, then 9 to 15 digits. Applied after
// whitespace is stripped.
static PHONE_VALIDATOR: LazyLock<RegexValidator> = LazyLock::new(|| {
	RegexValidator::new(r"^\+?1?[0-9]{9,15}$").expect("PHONE_VALIDATOR: invalid regex pattern")
});

/// A named predicate over a non-empty field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
	/// `local@domain.tld`: one `@`, no whitespace, a `.` after the `@`
	EmailFormat,
	/// At least `min` characters
	PasswordLength { min: usize },
	/// Equal to the current value of another field
	PasswordMatch { field: String },
	/// `[A-Z0-9]+`, case-sensitive
	IdentifierFormat,
	/// `^\+?1?\d{9,15}$` once whitespace is removed
	PhoneFormat,
}

impl Rule {
	/// Checks `value` against this rule.
	///
	/// `lookup` resolves the current value of other fields in the same form;
	/// a missing partner field is treated as an empty value.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldErrorKind, Rule};
	///
	/// let rule = Rule::PasswordMatch { field: "password1".to_string() };
	/// let lookup = |_: &str| Some("Secret123".to_string());
	///
	/// assert!(rule.check("Secret123", &lookup).is_ok());
	/// assert_eq!(rule.check("Secret124", &lookup), Err(FieldErrorKind::PasswordMismatch));
	/// ```
	pub fn check(
		&self,
		value: &str,
		lookup: &dyn Fn(&str) -> Option<String>,
	) -> Result<(), FieldErrorKind> {
		match self {
			Rule::EmailFormat => EmailValidator::new()
				.validate(value)
				.map_err(|_| FieldErrorKind::InvalidEmailFormat),
			Rule::PasswordLength { min } => MinLengthValidator::new(*min)
				.validate(value)
				.map_err(|e| match e {
					ValidationError::TooShort { min, .. } => FieldErrorKind::PasswordTooShort { min },
					_ => FieldErrorKind::PasswordTooShort { min: *min },
				}),
			Rule::PasswordMatch { field } => {
				let other = lookup(field).unwrap_or_default();
				if value == other {
					Ok(())
				} else {
					Err(FieldErrorKind::PasswordMismatch)
				}
			}
			Rule::IdentifierFormat => IDENTIFIER_VALIDATOR
				.validate(value)
				.map_err(|_| FieldErrorKind::InvalidIdentifierFormat),
			Rule::PhoneFormat => {
				let stripped: String = value.chars().filter(|c| !c.is_whitespace()).collect();
				PHONE_VALIDATOR
					.validate(stripped.as_str())
					.map_err(|_| FieldErrorKind::InvalidPhoneFormat)
			}
		}
	}

	/// Name of the field this rule reads besides its own
	pub fn depends_on(&self) -> Option<&str> {
		match self {
			Rule::PasswordMatch { field } => Some(field.as_str()),
			_ => None,
		}
	}
}

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
	pub valid: bool,
	pub kind: Option<FieldErrorKind>,
	pub message: Option<String>,
}

impl ValidationResult {
	pub fn valid() -> Self {
		Self {
			valid: true,
			kind: None,
			message: None,
		}
	}

	pub fn invalid(kind: FieldErrorKind, message: impl Into<String>) -> Self {
		Self {
			valid: false,
			kind: Some(kind),
			message: Some(message.into()),
		}
	}
}

/// Rule table keyed by field type and field name
///
/// [`RuleSet::default`] is [`RuleSet::standard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
	/// Rules keyed by field type name (`"email"`, `"tel"`, ...)
	#[serde(default)]
	types: HashMap<String, Vec<Rule>>,
	/// Rules keyed by field name
	#[serde(default)]
	fields: HashMap<String, Vec<Rule>>,
	/// Message overrides keyed by [`FieldErrorKind::code`]
	#[serde(default)]
	messages: HashMap<String, String>,
}

impl RuleSet {
	/// An empty table: only `required` is checked
	pub fn empty() -> Self {
		Self {
			types: HashMap::new(),
			fields: HashMap::new(),
			messages: HashMap::new(),
		}
	}

	/// The attendance application's rule table
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldType, Rule, RuleSet};
	///
	/// let rules = RuleSet::standard();
	/// assert_eq!(rules.rules_for_type(FieldType::Email), &[Rule::EmailFormat]);
	/// assert_eq!(rules.rules_for_name("employee_id"), &[Rule::IdentifierFormat]);
	/// ```
	pub fn standard() -> Self {
		Self::empty()
			.with_type_rule(FieldType::Email, Rule::EmailFormat)
			.with_field_rule(
				"password1",
				Rule::PasswordLength {
					min: MIN_PASSWORD_LENGTH,
				},
			)
			.with_field_rule(
				"password2",
				Rule::PasswordMatch {
					field: "password1".to_string(),
				},
			)
			.with_field_rule("employee_id", Rule::IdentifierFormat)
			.with_field_rule("phone_number", Rule::PhoneFormat)
	}

	/// Parses a rule table from TOML
	pub fn from_toml_str(source: &str) -> FormResult<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn with_type_rule(mut self, field_type: FieldType, rule: Rule) -> Self {
		self.types
			.entry(field_type.as_str().to_string())
			.or_default()
			.push(rule);
		self
	}

	pub fn with_field_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
		self.fields.entry(name.into()).or_default().push(rule);
		self
	}

	pub fn with_message(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
		self.messages.insert(code.into(), message.into());
		self
	}

	/// Layers `other` on top of `self`.
	///
	/// Rule lists in `other` replace the list for the same key; keys only
	/// present in `self` are kept. Message overrides merge the same way.
	pub fn merge(mut self, other: RuleSet) -> Self {
		self.types.extend(other.types);
		self.fields.extend(other.fields);
		self.messages.extend(other.messages);
		self
	}

	pub fn rules_for_type(&self, field_type: FieldType) -> &[Rule] {
		self.types
			.get(field_type.as_str())
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn rules_for_name(&self, name: &str) -> &[Rule] {
		self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	/// All rules for a field, in evaluation order
	pub fn rules_for<'a>(&'a self, field: &FormField) -> impl Iterator<Item = &'a Rule> + 'a {
		self.rules_for_type(field.field_type())
			.iter()
			.chain(self.rules_for_name(field.name()).iter())
	}

	/// Whether validating this field can ever fail
	pub fn applies_to(&self, field: &FormField) -> bool {
		field.is_required() || self.rules_for(field).next().is_some()
	}

	/// Names of fields whose rules read `name`
	pub fn dependents_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.fields.iter().filter_map(move |(field, rules)| {
			rules
				.iter()
				.any(|rule| rule.depends_on() == Some(name))
				.then_some(field.as_str())
		})
	}

	/// Message for an error, honouring overrides
	pub fn message_for(&self, kind: &FieldErrorKind) -> String {
		self.messages
			.get(kind.code())
			.cloned()
			.unwrap_or_else(|| kind.to_string())
	}

	/// Runs the checks for `field`, stopping at the first failure.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldErrorKind, FieldType, FormField, RuleSet};
	///
	/// let rules = RuleSet::standard();
	/// let field = FormField::new("email", FieldType::Email).required();
	///
	/// let result = rules.evaluate(&field, &|_| None);
	/// assert!(!result.valid);
	/// assert_eq!(result.kind, Some(FieldErrorKind::RequiredFieldEmpty));
	/// ```
	pub fn evaluate(
		&self,
		field: &FormField,
		lookup: &dyn Fn(&str) -> Option<String>,
	) -> ValidationResult {
		let value = field.value();

		if value.is_empty() {
			return if field.is_required() {
				let kind = FieldErrorKind::RequiredFieldEmpty;
				let message = self.message_for(&kind);
				ValidationResult::invalid(kind, message)
			} else {
				ValidationResult::valid()
			};
		}

		for rule in self.rules_for(field) {
			if let Err(kind) = rule.check(value, lookup) {
				let message = self.message_for(&kind);
				return ValidationResult::invalid(kind, message);
			}
		}

		ValidationResult::valid()
	}
}

impl Default for RuleSet {
	fn default() -> Self {
		Self::standard()
	}
}
