//! Form Validation Integration Tests
//!
//! Exercises the form model against the application's presets and the
//! standard rule table.
//!
//! Test Categories:
//! - Category 1: Field rules
//! - Category 2: Whole-form validation and submission
//! - Category 3: Rule configuration

use attendo_forms::{
	FieldErrorKind, Form, RuleSet, StrengthTier, SubmissionState, ValidationState,
	password_strength, presets,
};
use rstest::{fixture, rstest};

#[fixture]
fn rules() -> RuleSet {
	RuleSet::standard()
}

#[fixture]
fn registration() -> Form {
	presets::registration().to_form().unwrap()
}

fn fill_registration(form: &mut Form, rules: &RuleSet) {
	for (name, value) in [
		("first_name", "Jane"),
		("last_name", "Doe"),
		("email", "jane@company.com"),
		("username", "jdoe"),
		("employee_id", "EMP002"),
		("department", "2"),
		("phone_number", "+1 555 123 4567"),
		("password1", "Secret123"),
		("password2", "Secret123"),
	] {
		form.set_value(name, value, rules).unwrap();
	}
}

// ============================================================================
// Category 1: Field rules
// ============================================================================

#[rstest]
#[case("email", "a@b.com", None)]
#[case("email", "a@b", Some(FieldErrorKind::InvalidEmailFormat))]
#[case("email", "ab.com", Some(FieldErrorKind::InvalidEmailFormat))]
#[case("password1", "short1", Some(FieldErrorKind::PasswordTooShort { min: 8 }))]
#[case("password1", "longenough1", None)]
#[case("employee_id", "EMP002", None)]
#[case("employee_id", "emp002", Some(FieldErrorKind::InvalidIdentifierFormat))]
#[case("employee_id", "EMP-002", Some(FieldErrorKind::InvalidIdentifierFormat))]
#[case("phone_number", "+15551234567", None)]
#[case("phone_number", "+1 555 123 4567", None)]
#[case("phone_number", "123", Some(FieldErrorKind::InvalidPhoneFormat))]
fn test_registration_field_rules(
	rules: RuleSet,
	mut registration: Form,
	#[case] name: &str,
	#[case] value: &str,
	#[case] expected: Option<FieldErrorKind>,
) {
	let result = registration.set_value(name, value, &rules).unwrap();

	assert_eq!(result.kind, expected);
	let state = registration.field(name).unwrap().state();
	if expected.is_some() {
		assert_eq!(state, ValidationState::Invalid);
	} else {
		assert_eq!(state, ValidationState::Valid);
	}
}

#[rstest]
fn test_required_empty(rules: RuleSet, mut registration: Form) {
	let result = registration.set_value("first_name", "", &rules).unwrap();
	assert!(!result.valid);
	assert_eq!(result.kind, Some(FieldErrorKind::RequiredFieldEmpty));
}

#[rstest]
fn test_password_confirmation_follows_password(rules: RuleSet, mut registration: Form) {
	registration.set_value("password1", "Secret123", &rules).unwrap();
	let result = registration.set_value("password2", "Secret123", &rules).unwrap();
	assert!(result.valid);

	let result = registration.set_value("password2", "Secret124", &rules).unwrap();
	assert_eq!(result.kind, Some(FieldErrorKind::PasswordMismatch));

	// Fixing the first password makes the confirmation match again
	registration.set_value("password1", "Secret124", &rules).unwrap();
	assert_eq!(
		registration.field("password2").unwrap().state(),
		ValidationState::Valid
	);
}

#[rstest]
fn test_strength() {
	assert_eq!(password_strength(""), 0);
	assert_eq!(StrengthTier::of(""), StrengthTier::Weak);
	assert_eq!(password_strength("Abcdef1!"), 5);
	assert_eq!(StrengthTier::of("Abcdef1!"), StrengthTier::Strong);
}

// ============================================================================
// Category 2: Whole-form validation and submission
// ============================================================================

#[rstest]
fn test_one_invalid_field_blocks_submission(rules: RuleSet, mut registration: Form) {
	fill_registration(&mut registration, &rules);
	registration.set_value("last_name", "", &rules).unwrap();

	assert!(!registration.begin_submit(&rules));
	assert_eq!(registration.submission_state(), SubmissionState::Blocked);

	let errors = registration.errors();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].field, "last_name");
}

#[rstest]
fn test_department_is_required(rules: RuleSet, mut registration: Form) {
	fill_registration(&mut registration, &rules);
	registration.set_value("department", "", &rules).unwrap();

	assert!(!registration.begin_submit(&rules));
	assert_eq!(registration.submission_state(), SubmissionState::Blocked);

	let errors = registration.errors();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].field, "department");
	assert_eq!(errors[0].kind, FieldErrorKind::RequiredFieldEmpty);
}

#[rstest]
fn test_complete_registration_submits(rules: RuleSet, mut registration: Form) {
	fill_registration(&mut registration, &rules);

	assert!(registration.begin_submit(&rules));
	assert_eq!(registration.submission_state(), SubmissionState::Submitting);
	assert!(registration.errors().is_empty());
}

#[rstest]
fn test_reset_after_blocked_submit(rules: RuleSet, mut registration: Form) {
	registration.begin_submit(&rules);
	assert!(!registration.errors().is_empty());

	registration.reset();

	assert_eq!(registration.submission_state(), SubmissionState::Idle);
	assert!(registration.errors().is_empty());
	// Blank after reset, including the preselected role
	assert_eq!(registration.value("role"), Some(""));
}

// ============================================================================
// Category 3: Rule configuration
// ============================================================================

#[rstest]
fn test_toml_overlay_tightens_password_length(mut registration: Form) {
	let overlay = RuleSet::from_toml_str(
		r#"
		[fields]
		password1 = [{ type = "password_length", min = 12 }]

		[messages]
		password_too_short = "Use a longer password."
		"#,
	)
	.unwrap();
	let rules = RuleSet::standard().merge(overlay);

	let result = registration.set_value("password1", "Secret123", &rules).unwrap();

	assert_eq!(result.kind, Some(FieldErrorKind::PasswordTooShort { min: 12 }));
	assert_eq!(result.message.as_deref(), Some("Use a longer password."));
}
