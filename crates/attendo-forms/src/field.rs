//! Form fields
//!
//! A [`FormField`] mirrors one input element of a server-rendered form: its
//! identity (`name`, [`FieldType`]), whether it is required, its current
//! value and the outcome of the last validation.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input kinds the rule table distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	#[default]
	Text,
	Email,
	Password,
	Tel,
	Select,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::Email => "email",
			FieldType::Password => "password",
			FieldType::Tel => "tel",
			FieldType::Select => "select",
		}
	}

	/// Maps an element to a field type from its tag and `type` attribute.
	///
	/// Unknown input types (`date`, `number`, `hidden`, ...) fall back to
	/// [`FieldType::Text`]; they carry no type-specific rule.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::FieldType;
	///
	/// assert_eq!(FieldType::from_element("input", Some("email")), FieldType::Email);
	/// assert_eq!(FieldType::from_element("select", None), FieldType::Select);
	/// assert_eq!(FieldType::from_element("input", Some("date")), FieldType::Text);
	/// assert_eq!(FieldType::from_element("input", None), FieldType::Text);
	/// ```
	pub fn from_element(tag: &str, input_type: Option<&str>) -> Self {
		if tag.eq_ignore_ascii_case("select") {
			return FieldType::Select;
		}
		match input_type.map(|t| t.to_ascii_lowercase()).as_deref() {
			Some("email") => FieldType::Email,
			Some("password") => FieldType::Password,
			Some("tel") => FieldType::Tel,
			_ => FieldType::Text,
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of the most recent validation of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationState {
	#[default]
	Untouched,
	Valid,
	Invalid,
}

/// One input of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
	name: String,
	field_type: FieldType,
	label: Option<String>,
	help_text: Option<String>,
	required: bool,
	initial: String,
	value: String,
	state: ValidationState,
	error: Option<FieldError>,
}

impl FormField {
	/// Create a new optional field
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldType, FormField, ValidationState};
	///
	/// let field = FormField::new("email", FieldType::Email).required();
	/// assert_eq!(field.name(), "email");
	/// assert!(field.is_required());
	/// assert_eq!(field.state(), ValidationState::Untouched);
	/// ```
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			label: None,
			help_text: None,
			required: false,
			initial: String::new(),
			value: String::new(),
			state: ValidationState::Untouched,
			error: None,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	/// Sets the value the field starts with; reset leaves the field blank
	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = initial.into();
		self.value = self.initial.clone();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn field_type(&self) -> FieldType {
		self.field_type
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn initial(&self) -> &str {
		&self.initial
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn state(&self) -> ValidationState {
		self.state
	}

	pub fn error(&self) -> Option<&FieldError> {
		self.error.as_ref()
	}

	pub fn is_empty(&self) -> bool {
		self.value.is_empty()
	}

	/// Replaces the value. The caller is responsible for re-validating.
	pub(crate) fn set_value(&mut self, value: impl Into<String>) {
		self.value = value.into();
	}

	pub(crate) fn mark_valid(&mut self) {
		self.state = ValidationState::Valid;
		self.error = None;
	}

	/// Replaces any previous error; a field never holds more than one.
	pub(crate) fn mark_invalid(&mut self, error: FieldError) {
		self.state = ValidationState::Invalid;
		self.error = Some(error);
	}

	/// Clears value, state and error.
	///
	/// A reset form is blank, so the initial value is not restored.
	pub(crate) fn clear(&mut self) {
		self.value.clear();
		self.state = ValidationState::Untouched;
		self.error = None;
	}
}
