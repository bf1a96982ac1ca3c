//! String validators
//!
//! Validators are small, stateless predicates over a value. They report
//! failures through [`ValidationError`] and never panic on user input.

pub mod email;
pub mod errors;
pub mod string;

pub use email::EmailValidator;
pub use errors::{ValidationError, ValidationResult};
pub use string::{MinLengthValidator, RegexValidator};

/// Trait for validators
pub trait Validator<T: ?Sized> {
	fn validate(&self, value: &T) -> ValidationResult<()>;
}
