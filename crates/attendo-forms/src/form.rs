use crate::error::{FieldError, FormError, FormResult};
use crate::field::{FormField, ValidationState};
use crate::rules::{RuleSet, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle stage of a form
///
/// ```text
/// idle ──submit──▶ validating ──ok──▶ submitting
///                      │
///                      └──invalid──▶ blocked ──submit──▶ validating ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
	#[default]
	Idle,
	Validating,
	Submitting,
	Blocked,
}

/// Client-side model of one form on the page
#[derive(Debug, Clone)]
pub struct Form {
	id: String,
	action: String,
	fields: Vec<FormField>,
	state: SubmissionState,
}

impl Form {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{Form, SubmissionState};
	///
	/// let form = Form::new("register-form");
	/// assert_eq!(form.id(), "register-form");
	/// assert!(form.fields().is_empty());
	/// assert_eq!(form.submission_state(), SubmissionState::Idle);
	/// ```
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			action: String::new(),
			fields: vec![],
			state: SubmissionState::Idle,
		}
	}

	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.action = action.into();
		self
	}

	/// Add a field to the form
	///
	/// # Errors
	///
	/// Returns [`FormError::DuplicateField`] if a field with the same name
	/// already exists.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldType, Form, FormField};
	///
	/// let mut form = Form::new("login");
	/// form.add_field(FormField::new("username", FieldType::Text)).unwrap();
	/// assert!(form.add_field(FormField::new("username", FieldType::Text)).is_err());
	/// assert_eq!(form.fields().len(), 1);
	/// ```
	pub fn add_field(&mut self, field: FormField) -> FormResult<()> {
		if self.field(field.name()).is_some() {
			return Err(FormError::DuplicateField(field.name().to_string()));
		}
		self.fields.push(field);
		Ok(())
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn action(&self) -> &str {
		&self.action
	}

	pub fn fields(&self) -> &[FormField] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FormField> {
		self.fields.iter().find(|f| f.name() == name)
	}

	fn field_mut(&mut self, name: &str) -> FormResult<&mut FormField> {
		self.fields
			.iter_mut()
			.find(|f| f.name() == name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))
	}

	pub fn value(&self, name: &str) -> Option<&str> {
		self.field(name).map(FormField::value)
	}

	/// Current values keyed by field name
	pub fn values(&self) -> HashMap<String, String> {
		self.fields
			.iter()
			.map(|f| (f.name().to_string(), f.value().to_string()))
			.collect()
	}

	pub fn submission_state(&self) -> SubmissionState {
		self.state
	}

	/// Errors currently attached, in field order
	pub fn errors(&self) -> Vec<&FieldError> {
		self.fields.iter().filter_map(FormField::error).collect()
	}

	/// Whether all fields the rule table can reject are currently valid
	pub fn is_valid(&self, rules: &RuleSet) -> bool {
		self.fields
			.iter()
			.filter(|f| rules.applies_to(f))
			.all(|f| f.state() == ValidationState::Valid)
	}

	/// Updates a value and re-validates synchronously.
	///
	/// Fields whose rules read this one (e.g. `password2` for `password1`)
	/// are re-validated too, unless they are still untouched.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::{FieldType, Form, FormField, RuleSet, ValidationState};
	///
	/// let rules = RuleSet::standard();
	/// let mut form = Form::new("register");
	/// form.add_field(FormField::new("password1", FieldType::Password).required()).unwrap();
	/// form.add_field(FormField::new("password2", FieldType::Password).required()).unwrap();
	///
	/// form.set_value("password1", "Secret123", &rules).unwrap();
	/// form.set_value("password2", "Secret123", &rules).unwrap();
	/// assert_eq!(form.field("password2").unwrap().state(), ValidationState::Valid);
	///
	/// // Changing the first password invalidates the confirmation
	/// form.set_value("password1", "Secret1234", &rules).unwrap();
	/// assert_eq!(form.field("password2").unwrap().state(), ValidationState::Invalid);
	/// ```
	pub fn set_value(
		&mut self,
		name: &str,
		value: impl Into<String>,
		rules: &RuleSet,
	) -> FormResult<ValidationResult> {
		self.field_mut(name)?.set_value(value);
		let result = self.validate_field(name, rules)?;

		let dependents: Vec<String> = rules
			.dependents_of(name)
			.filter(|dependent| {
				self.field(dependent)
					.is_some_and(|f| f.state() != ValidationState::Untouched)
			})
			.map(str::to_string)
			.collect();
		for dependent in dependents {
			self.validate_field(&dependent, rules)?;
		}

		Ok(result)
	}

	/// Validates one field and records the outcome on it.
	///
	/// A valid outcome removes the field's error; an invalid one replaces it.
	pub fn validate_field(&mut self, name: &str, rules: &RuleSet) -> FormResult<ValidationResult> {
		let field = self
			.field(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		let result = rules.evaluate(field, &|other| self.value(other).map(str::to_string));

		let field = self.field_mut(name)?;
		match (&result.kind, &result.message) {
			(Some(kind), Some(message)) => {
				field.mark_invalid(FieldError::new(name, kind.clone(), message.clone()));
			}
			_ => field.mark_valid(),
		}

		tracing::trace!(
			form = %self.id,
			field = name,
			valid = result.valid,
			"validated field"
		);
		Ok(result)
	}

	/// Validates every field the rule table can reject and AND-reduces.
	///
	/// Every such field is visited, so each one shows its own outcome even
	/// after an earlier field failed.
	pub fn validate(&mut self, rules: &RuleSet) -> bool {
		let names: Vec<String> = self
			.fields
			.iter()
			.filter(|f| rules.applies_to(f))
			.map(|f| f.name().to_string())
			.collect();

		let mut all_valid = true;
		for name in names {
			// Names come from `self.fields`, so lookup cannot fail
			if let Ok(result) = self.validate_field(&name, rules) {
				all_valid &= result.valid;
			}
		}
		all_valid
	}

	/// Runs the submit transition.
	///
	/// Moves through `validating` to `submitting` when every field passes,
	/// or to `blocked` otherwise. Returns whether submission may proceed.
	pub fn begin_submit(&mut self, rules: &RuleSet) -> bool {
		self.state = SubmissionState::Validating;
		let valid = self.validate(rules);
		self.state = if valid {
			SubmissionState::Submitting
		} else {
			SubmissionState::Blocked
		};
		tracing::debug!(form = %self.id, state = ?self.state, "submit requested");
		valid
	}

	/// Clears every value and error and returns to `idle`
	pub fn reset(&mut self) {
		for field in &mut self.fields {
			field.clear();
		}
		self.state = SubmissionState::Idle;
	}
}
