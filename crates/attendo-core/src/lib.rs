//! Core building blocks for attendo
//!
//! This crate holds the pieces shared by the form model and the page runtime:
//!
//! - **Validators**: reusable string validators (`EmailValidator`,
//!   `MinLengthValidator`, `RegexValidator`) behind the [`validators::Validator`] trait
//! - **Messages**: Django-style message levels used by notification banners
//!
//! ## Example
//!
//! ```
//! use attendo_core::validators::{EmailValidator, Validator};
//!
//! let validator = EmailValidator::new();
//! assert!(validator.validate("jane@company.com").is_ok());
//! assert!(validator.validate("jane@company").is_err());
//! ```

pub mod messages;
pub mod validators;

pub use messages::{Level, Message};
pub use validators::{
	EmailValidator, MinLengthValidator, RegexValidator, ValidationError, ValidationResult,
	Validator,
};
