//! Validation error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("Invalid email: {0}")]
	InvalidEmail(String),

	#[error("Value too short: {length} (minimum: {min})")]
	TooShort { length: usize, min: usize },

	#[error("Pattern mismatch: {0}")]
	PatternMismatch(String),

	#[error("Invalid pattern: {0}")]
	InvalidPattern(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
