//! String validators

use crate::validators::{ValidationError, ValidationResult, Validator};
use regex::Regex;

/// Minimum length validator
///
/// Length is measured in characters, not bytes, so multi-byte input is
/// not penalised.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
}

impl MinLengthValidator {
	/// Creates a new MinLengthValidator with the specified minimum length.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::validators::{MinLengthValidator, Validator};
	///
	/// let validator = MinLengthValidator::new(8);
	/// assert!(validator.validate("longenough1").is_ok());
	/// assert!(validator.validate("short1").is_err());
	/// ```
	pub fn new(min: usize) -> Self {
		Self { min }
	}

	pub fn min(&self) -> usize {
		self.min
	}
}

impl Validator<str> for MinLengthValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let length = value.chars().count();
		if length >= self.min {
			Ok(())
		} else {
			Err(ValidationError::TooShort {
				length,
				min: self.min,
			})
		}
	}
}

impl Validator<String> for MinLengthValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		<Self as Validator<str>>::validate(self, value.as_str())
	}
}

/// Regex validator
#[derive(Debug, Clone)]
pub struct RegexValidator {
	regex: Regex,
	message: String,
}

impl RegexValidator {
	/// Creates a new RegexValidator with the specified regex pattern.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::validators::{RegexValidator, Validator};
	///
	/// let validator = RegexValidator::new(r"^[A-Z0-9]+$").unwrap();
	/// assert!(validator.validate("EMP001").is_ok());
	/// assert!(validator.validate("EMP-001").is_err());
	/// ```
	///
	/// # Errors
	///
	/// Returns [`ValidationError::InvalidPattern`] if the pattern does not compile.
	pub fn new(pattern: &str) -> ValidationResult<Self> {
		let regex =
			Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern(e.to_string()))?;
		Ok(Self {
			regex,
			message: format!("Value must match pattern: {}", pattern),
		})
	}

	/// Sets a custom error message for the validator.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::validators::{RegexValidator, ValidationError, Validator};
	///
	/// let validator = RegexValidator::new(r"^\d+$")
	///     .unwrap()
	///     .with_message("Value must contain only digits");
	///
	/// assert_eq!(
	///     validator.validate("abc"),
	///     Err(ValidationError::PatternMismatch("Value must contain only digits".to_string()))
	/// );
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}

	pub fn is_match(&self, value: &str) -> bool {
		self.regex.is_match(value)
	}
}

impl Validator<str> for RegexValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if self.regex.is_match(value) {
			Ok(())
		} else {
			Err(ValidationError::PatternMismatch(self.message.clone()))
		}
	}
}

impl Validator<String> for RegexValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		<Self as Validator<str>>::validate(self, value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_min_length_validator_invalid() {
		let validator = MinLengthValidator::new(8);
		let result = validator.validate("short1");
		assert_eq!(result, Err(ValidationError::TooShort { length: 6, min: 8 }));
	}

	#[rstest]
	fn test_min_length_validator_edge_cases() {
		let validator = MinLengthValidator::new(0);
		assert!(validator.validate("").is_ok());

		let validator = MinLengthValidator::new(8);
		assert!(validator.validate("12345678").is_ok());
		assert!(validator.validate("1234567").is_err());
	}

	#[rstest]
	fn test_min_length_counts_characters() {
		// 8 characters, 16 bytes
		let validator = MinLengthValidator::new(8);
		assert!(validator.validate("пароль12").is_ok());
	}

	#[rstest]
	fn test_regex_validator_default_message() {
		let validator = RegexValidator::new(r"^\d+$").unwrap();
		match validator.validate("abc") {
			Err(ValidationError::PatternMismatch(msg)) => {
				assert_eq!(msg, r"Value must match pattern: ^\d+$");
			}
			other => panic!("Expected PatternMismatch, got {:?}", other),
		}
	}

	#[rstest]
	fn test_regex_validator_invalid_pattern() {
		let result = RegexValidator::new(r"([unclosed");
		assert!(matches!(result, Err(ValidationError::InvalidPattern(_))));
	}
}
