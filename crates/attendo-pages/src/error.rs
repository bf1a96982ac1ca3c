//! Error types for the page runtime

use attendo_forms::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting: {0}")]
	Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum ControllerError {
	#[error("Unknown form: {0}")]
	UnknownForm(String),

	#[error("Controller is not attached to a document")]
	NotAttached,

	#[error(transparent)]
	Form(#[from] FormError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
