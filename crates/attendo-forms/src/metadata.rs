//! Serializable form descriptions
//!
//! The server emits one [`FormMetadata`] per form on the page. The page
//! runtime renders it into markup and builds the matching [`Form`] model from
//! it, so both sides agree on field names, types and `required` flags.
//!
//! ```
//! use attendo_forms::{FieldType, FormMetadata};
//!
//! let metadata = FormMetadata::from_json(r#"{
//!     "id": "login-form",
//!     "action": "/auth/login/",
//!     "fields": [
//!         { "name": "username", "widget": "text", "required": true },
//!         { "name": "password", "widget": "password", "required": true }
//!     ]
//! }"#).unwrap();
//!
//! let form = metadata.to_form().unwrap();
//! assert_eq!(form.fields().len(), 2);
//! assert_eq!(form.field("password").unwrap().field_type(), FieldType::Password);
//! ```

use crate::error::FormResult;
use crate::field::{FieldType, FormField};
use crate::form::Form;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Description of one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMetadata {
	/// Element id, also the key for `reset_form`
	pub id: String,

	/// Submission URL
	#[serde(default)]
	pub action: String,

	/// Field metadata list, in document order
	pub fields: Vec<FieldMetadata>,

	/// Form-level initial values; a field's own `initial` takes precedence
	#[serde(default)]
	pub initial: HashMap<String, String>,

	/// Submit button label
	#[serde(default = "default_submit_label")]
	pub submit_label: String,
}

fn default_submit_label() -> String {
	"Submit".to_string()
}

/// Description of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
	/// Field name
	pub name: String,

	/// Input kind used for rendering and type rules
	#[serde(default)]
	pub widget: FieldType,

	/// Human-readable label (optional)
	#[serde(default)]
	pub label: Option<String>,

	#[serde(default)]
	pub required: bool,

	#[serde(default)]
	pub help_text: Option<String>,

	#[serde(default)]
	pub initial: Option<String>,

	/// `(value, label)` pairs for select widgets
	#[serde(default)]
	pub choices: Vec<(String, String)>,
}

impl FieldMetadata {
	pub fn new(name: impl Into<String>, widget: FieldType) -> Self {
		Self {
			name: name.into(),
			widget,
			label: None,
			required: false,
			help_text: None,
			initial: None,
			choices: vec![],
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(initial.into());
		self
	}

	pub fn choices<I, V, L>(mut self, choices: I) -> Self
	where
		I: IntoIterator<Item = (V, L)>,
		V: Into<String>,
		L: Into<String>,
	{
		self.choices = choices
			.into_iter()
			.map(|(value, label)| (value.into(), label.into()))
			.collect();
		self
	}

	/// Label to render, defaulting to the humanized field name
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldMetadata, FieldType};
	///
	/// let field = FieldMetadata::new("first_name", FieldType::Text);
	/// assert_eq!(field.display_label(), "First name");
	///
	/// let field = field.label("Given name");
	/// assert_eq!(field.display_label(), "Given name");
	/// ```
	pub fn display_label(&self) -> String {
		if let Some(label) = &self.label {
			return label.clone();
		}
		let spaced = self.name.replace('_', " ");
		let mut chars = spaced.chars();
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}
}

impl FormMetadata {
	pub fn new(id: impl Into<String>, action: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			action: action.into(),
			fields: vec![],
			initial: HashMap::new(),
			submit_label: default_submit_label(),
		}
	}

	pub fn field(mut self, field: FieldMetadata) -> Self {
		self.fields.push(field);
		self
	}

	pub fn submit_label(mut self, label: impl Into<String>) -> Self {
		self.submit_label = label.into();
		self
	}

	/// Parses metadata from the JSON the server embeds in the page
	pub fn from_json(source: &str) -> FormResult<Self> {
		Ok(serde_json::from_str(source)?)
	}

	pub fn to_json(&self) -> FormResult<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Initial value of a field, field-level first
	pub fn initial_for<'a>(&'a self, field: &'a FieldMetadata) -> Option<&'a str> {
		field
			.initial
			.as_deref()
			.or_else(|| self.initial.get(&field.name).map(String::as_str))
	}

	/// Builds the client-side model
	///
	/// # Errors
	///
	/// Returns [`FormError::DuplicateField`](crate::FormError::DuplicateField)
	/// if two fields share a name.
	pub fn to_form(&self) -> FormResult<Form> {
		let mut form = Form::new(&self.id).with_action(&self.action);
		for meta in &self.fields {
			let mut field = FormField::new(&meta.name, meta.widget)
				.with_required(meta.required)
				.with_label(meta.display_label());
			if let Some(help_text) = &meta.help_text {
				field = field.with_help_text(help_text);
			}
			if let Some(initial) = self.initial_for(meta) {
				field = field.with_initial(initial);
			}
			form.add_field(field)?;
		}
		Ok(form)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FormError;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_when_deserializing() {
		let metadata = FormMetadata::from_json(
			r#"{"id": "dept", "fields": [{"name": "name"}]}"#,
		)
		.unwrap();

		assert_eq!(metadata.action, "");
		assert_eq!(metadata.submit_label, "Submit");
		let field = &metadata.fields[0];
		assert_eq!(field.widget, FieldType::Text);
		assert!(!field.required);
		assert!(field.choices.is_empty());
	}

	#[rstest]
	fn test_initial_precedence() {
		let mut metadata = FormMetadata::new("register", "/auth/register/")
			.field(FieldMetadata::new("role", FieldType::Select).initial("employee"))
			.field(FieldMetadata::new("department", FieldType::Select));
		metadata
			.initial
			.insert("role".to_string(), "manager".to_string());
		metadata
			.initial
			.insert("department".to_string(), "3".to_string());

		let form = metadata.to_form().unwrap();
		assert_eq!(form.value("role"), Some("employee"));
		assert_eq!(form.value("department"), Some("3"));
	}

	#[rstest]
	fn test_initial_for_prefers_field_level() {
		let role = FieldMetadata::new("role", FieldType::Select).initial("employee");
		let department = FieldMetadata::new("department", FieldType::Select);
		let phone = FieldMetadata::new("phone_number", FieldType::Tel);
		let mut metadata = FormMetadata::new("register", "/auth/register/");
		metadata
			.initial
			.insert("role".to_string(), "manager".to_string());
		metadata
			.initial
			.insert("department".to_string(), "3".to_string());

		assert_eq!(metadata.initial_for(&role), Some("employee"));
		assert_eq!(metadata.initial_for(&department), Some("3"));
		assert_eq!(metadata.initial_for(&phone), None);
	}

	#[rstest]
	fn test_to_form_rejects_duplicates() {
		let metadata = FormMetadata::new("login", "/auth/login/")
			.field(FieldMetadata::new("username", FieldType::Text))
			.field(FieldMetadata::new("username", FieldType::Text));

		assert!(matches!(
			metadata.to_form(),
			Err(FormError::DuplicateField(name)) if name == "username"
		));
	}

	#[rstest]
	fn test_from_json_invalid() {
		let result = FormMetadata::from_json(r#"{"fields": []}"#);
		assert!(matches!(result, Err(FormError::Metadata(_))));
	}

	#[rstest]
	fn test_choices_serialize_as_pairs() {
		let field = FieldMetadata::new("role", FieldType::Select)
			.choices([("admin", "Administrator"), ("employee", "Employee")]);
		let json = serde_json::to_value(&field).unwrap();
		assert_eq!(
			json["choices"],
			serde_json::json!([["admin", "Administrator"], ["employee", "Employee"]])
		);
	}
}
