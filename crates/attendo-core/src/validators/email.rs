//! Email validator

use crate::validators::{ValidationError, ValidationResult, Validator};
use regex::Regex;
use std::sync::LazyLock;

// One `@`, no whitespace, at least one `.` after the `@`.
//
// Deliberately lighter than RFC 5322; the server performs the full check.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Email address validator
///
/// # Examples
///
/// ```
/// use attendo_core::validators::{EmailValidator, Validator};
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("a@b.com").is_ok());
/// assert!(validator.validate("a@b").is_err());
/// assert!(validator.validate("ab.com").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator<str> for EmailValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			Err(ValidationError::InvalidEmail(value.to_string()))
		}
	}
}

impl Validator<String> for EmailValidator {
	fn validate(&self, value: &String) -> ValidationResult<()> {
		<Self as Validator<str>>::validate(self, value.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("a@b.com")]
	#[case("jane.doe@company.co.uk")]
	#[case("first+tag@sub.example.org")]
	fn test_valid_emails(#[case] email: &str) {
		assert!(EmailValidator::new().validate(email).is_ok());
	}

	#[rstest]
	#[case("")]
	#[case("a@b")]
	#[case("ab.com")]
	#[case("a b@c.com")]
	#[case("a@@b.com")]
	#[case("@b.com")]
	#[case("a@b.")]
	fn test_invalid_emails(#[case] email: &str) {
		let result = EmailValidator::new().validate(email);
		assert_eq!(result, Err(ValidationError::InvalidEmail(email.to_string())));
	}

	proptest! {
		#[test]
		fn accepts_local_domain_tld(
			local in "[a-z0-9._+-]{1,12}",
			domain in "[a-z0-9-]{1,12}",
			tld in "[a-z]{2,6}",
		) {
			let email = format!("{}@{}.{}", local, domain, tld);
			prop_assert!(EmailValidator::new().validate(email.as_str()).is_ok());
		}

		#[test]
		fn rejects_strings_without_at(value in "[^@]{0,24}") {
			prop_assert!(EmailValidator::new().validate(value.as_str()).is_err());
		}

		#[test]
		fn rejects_strings_without_dot_after_at(
			local in "[a-z0-9]{1,12}",
			domain in "[a-z0-9]{1,12}",
		) {
			let email = format!("{}@{}", local, domain);
			prop_assert!(EmailValidator::new().validate(email.as_str()).is_err());
		}
	}
}
