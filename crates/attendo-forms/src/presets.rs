//! The attendance application's forms
//!
//! Each function returns the metadata the server renders for one of its
//! forms. Select choices that come from the database (departments) are left
//! empty; callers fill them in.

use crate::field::FieldType;
use crate::metadata::{FieldMetadata, FormMetadata};
use crate::rules::{MIN_PASSWORD_LENGTH, Rule, RuleSet};

/// Roles a user can register with, as `(value, label)`
pub const ROLE_CHOICES: [(&str, &str); 4] = [
	("admin", "Administrator"),
	("manager", "Manager"),
	("employee", "Employee"),
	("security", "Security Personnel"),
];

/// Account registration
pub fn registration() -> FormMetadata {
	FormMetadata::new("register-form", "/accounts/register/")
		.field(FieldMetadata::new("first_name", FieldType::Text).required())
		.field(FieldMetadata::new("last_name", FieldType::Text).required())
		.field(FieldMetadata::new("email", FieldType::Email).required())
		.field(FieldMetadata::new("username", FieldType::Text).required())
		.field(
			FieldMetadata::new("employee_id", FieldType::Text)
				.required()
				.label("Employee ID")
				.help_text("Uppercase letters and numbers only"),
		)
		.field(FieldMetadata::new("department", FieldType::Select).required())
		.field(
			FieldMetadata::new("role", FieldType::Select)
				.required()
				.choices(ROLE_CHOICES)
				.initial("employee"),
		)
		.field(
			FieldMetadata::new("phone_number", FieldType::Tel)
				.help_text("Format: +999999999, up to 15 digits"),
		)
		.field(
			FieldMetadata::new("password1", FieldType::Password)
				.required()
				.label("Password"),
		)
		.field(
			FieldMetadata::new("password2", FieldType::Password)
				.required()
				.label("Confirm password"),
		)
		.submit_label("Register")
}

/// Sign-in by username or employee ID
pub fn login() -> FormMetadata {
	FormMetadata::new("login-form", "/accounts/login/")
		.field(
			FieldMetadata::new("username", FieldType::Text)
				.required()
				.label("Username or Employee ID"),
		)
		.field(FieldMetadata::new("password", FieldType::Password).required())
		.submit_label("Sign in")
}

/// Password change for a signed-in user
///
/// Its fields are not covered by [`RuleSet::standard`]; validate it with
/// [`password_change_rules`].
pub fn password_change() -> FormMetadata {
	FormMetadata::new("password-change-form", "/accounts/password/change/")
		.field(FieldMetadata::new("current_password", FieldType::Password).required())
		.field(
			FieldMetadata::new("new_password1", FieldType::Password)
				.required()
				.label("New password"),
		)
		.field(
			FieldMetadata::new("new_password2", FieldType::Password)
				.required()
				.label("Confirm new password"),
		)
		.submit_label("Change password")
}

/// The standard table extended with the password-change fields
///
/// # Examples
///
/// ```
/// use attendo_forms::presets::{password_change, password_change_rules};
///
/// let rules = password_change_rules();
/// let mut form = password_change().to_form().unwrap();
/// form.set_value("new_password1", "Secret123", &rules).unwrap();
/// let result = form.set_value("new_password2", "Secret12", &rules).unwrap();
///
/// assert_eq!(result.message.as_deref(), Some("New passwords don't match."));
/// ```
pub fn password_change_rules() -> RuleSet {
	RuleSet::standard()
		.with_field_rule(
			"new_password1",
			Rule::PasswordLength {
				min: MIN_PASSWORD_LENGTH,
			},
		)
		.with_field_rule(
			"new_password2",
			Rule::PasswordMatch {
				field: "new_password1".to_string(),
			},
		)
		.with_message("password_mismatch", "New passwords don't match.")
}

/// Profile details of the signed-in user
pub fn profile() -> FormMetadata {
	FormMetadata::new("profile-form", "/accounts/profile/")
		.field(FieldMetadata::new("first_name", FieldType::Text).required())
		.field(FieldMetadata::new("last_name", FieldType::Text).required())
		.field(FieldMetadata::new("email", FieldType::Email).required())
		.field(FieldMetadata::new("phone_number", FieldType::Tel))
		.field(FieldMetadata::new("date_of_birth", FieldType::Text))
		.field(FieldMetadata::new("address", FieldType::Text))
		.field(FieldMetadata::new("emergency_contact_name", FieldType::Text))
		.field(FieldMetadata::new("emergency_contact_phone", FieldType::Tel))
		.submit_label("Update profile")
}

/// Department create/edit
pub fn department() -> FormMetadata {
	FormMetadata::new("department-form", "/departments/new/")
		.field(FieldMetadata::new("name", FieldType::Text).required())
		.field(FieldMetadata::new("description", FieldType::Text))
		.submit_label("Save")
}
