//! Error types for the form model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a field failed validation.
///
/// Every variant is user-correctable and is rendered inline next to its
/// field; none of them abort anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldErrorKind {
	#[error("This field is required.")]
	RequiredFieldEmpty,

	#[error("Please enter a valid email address.")]
	InvalidEmailFormat,

	#[error("Password must be at least {min} characters long.")]
	PasswordTooShort { min: usize },

	#[error("Passwords do not match.")]
	PasswordMismatch,

	#[error("Employee ID must contain only uppercase letters and numbers.")]
	InvalidIdentifierFormat,

	#[error("Phone number must be entered in the format: \"+999999999\". Up to 15 digits allowed.")]
	InvalidPhoneFormat,
}

impl FieldErrorKind {
	/// Stable identifier used to look up message overrides
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::FieldErrorKind;
	///
	/// assert_eq!(FieldErrorKind::PasswordTooShort { min: 8 }.code(), "password_too_short");
	/// assert_eq!(FieldErrorKind::RequiredFieldEmpty.code(), "required_field_empty");
	/// ```
	pub fn code(&self) -> &'static str {
		match self {
			FieldErrorKind::RequiredFieldEmpty => "required_field_empty",
			FieldErrorKind::InvalidEmailFormat => "invalid_email_format",
			FieldErrorKind::PasswordTooShort { .. } => "password_too_short",
			FieldErrorKind::PasswordMismatch => "password_mismatch",
			FieldErrorKind::InvalidIdentifierFormat => "invalid_identifier_format",
			FieldErrorKind::InvalidPhoneFormat => "invalid_phone_format",
		}
	}
}

/// The single inline error attached to an invalid field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	pub field: String,
	pub kind: FieldErrorKind,
	pub message: String,
}

impl FieldError {
	pub fn new(field: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			kind,
			message: message.into(),
		}
	}
}

#[derive(Debug, Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),

	#[error("Duplicate field: {0}")]
	DuplicateField(String),

	#[error("Invalid rule configuration: {0}")]
	Config(#[from] toml::de::Error),

	#[error("Invalid form metadata: {0}")]
	Metadata(#[from] serde_json::Error),
}

pub type FormResult<T> = Result<T, FormError>;
