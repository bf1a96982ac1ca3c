//! Page Lifecycle Integration Tests
//!
//! Drives a rendered page through user interaction: typing, submitting,
//! resetting and watching banners come and go.
//!
//! Test Categories:
//! - Category 1: Registration page
//! - Category 2: Password change page with a configured rule overlay
//! - Category 3: Notification banners

use attendo_core::{Level, Message};
use attendo_forms::{FieldErrorKind, SubmissionState, presets};
use attendo_pages::{
	Document, ManualScheduler, NodeId, PageController, PageSettings, TokioScheduler,
};
use rstest::{fixture, rstest};
use std::rc::Rc;
use std::time::Duration;

struct Page {
	doc: Document,
	scheduler: ManualScheduler,
	controller: PageController,
}

impl Page {
	fn new(doc: Document, settings: PageSettings) -> Self {
		let scheduler = ManualScheduler::new();
		let controller = PageController::new(settings, Rc::new(scheduler.clone()));
		controller.attach(&doc);
		Self {
			doc,
			scheduler,
			controller,
		}
	}

	fn by_id(&self, id: &str) -> NodeId {
		self.doc.element_by_id(id).unwrap()
	}

	fn submit_button(&self, form_id: &str) -> NodeId {
		self.doc.elements_by_tag(self.by_id(form_id), "button")[0]
	}

	fn type_into(&self, id: &str, value: &str) {
		self.doc.input(self.by_id(id), value);
	}
}

#[fixture]
fn registration() -> Page {
	Page::new(
		Document::from_forms(&[presets::registration()]),
		PageSettings::default(),
	)
}

// ============================================================================
// Category 1: Registration page
// ============================================================================

#[rstest]
fn test_registration_happy_path(registration: Page) {
	for (id, value) in [
		("id_first_name", "Jane"),
		("id_last_name", "Doe"),
		("id_email", "jane@company.com"),
		("id_username", "jdoe"),
		("id_employee_id", "EMP002"),
		("id_phone_number", "+1 555 123 4567"),
		("id_password1", "Secret123!"),
		("id_password2", "Secret123!"),
	] {
		registration.type_into(id, value);
	}
	registration
		.doc
		.select(registration.by_id("id_department"), "2");
	registration
		.doc
		.select(registration.by_id("id_role"), "manager");

	let button = registration.submit_button("register-form");
	registration.doc.click(button);

	let forms = registration.controller.forms();
	assert_eq!(
		forms.submission_state("register-form").unwrap(),
		SubmissionState::Submitting
	);
	assert!(registration.doc.is_disabled(button));
	assert_eq!(registration.doc.text(button), "Processing...");
	assert!(
		registration
			.doc
			.has_class(registration.by_id("id_password1"), "strength-strong")
	);
}

#[rstest]
fn test_one_invalid_required_field_then_reset(registration: Page) {
	for (id, value) in [
		("id_first_name", "Jane"),
		("id_last_name", "Doe"),
		("id_email", "jane@company.com"),
		("id_employee_id", "EMP002"),
		("id_password1", "Secret123"),
		("id_password2", "Secret123"),
	] {
		registration.type_into(id, value);
	}
	registration
		.doc
		.select(registration.by_id("id_department"), "2");
	let forms = registration.controller.forms();

	let form = registration.by_id("register-form");
	assert!(registration.doc.submit(form).is_default_prevented());
	let errors = forms.errors("register-form").unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].field, "username");
	assert!(
		registration
			.doc
			.has_class(registration.by_id("id_username"), "is-invalid")
	);

	forms.reset_form("register-form").unwrap();

	assert!(forms.errors("register-form").unwrap().is_empty());
	assert_eq!(
		forms.submission_state("register-form").unwrap(),
		SubmissionState::Idle
	);
	let button = registration.submit_button("register-form");
	assert!(!registration.doc.is_disabled(button));
	assert_eq!(registration.doc.text(button), "Register");
}

#[rstest]
fn test_missing_department_blocks_submission(registration: Page) {
	for (id, value) in [
		("id_first_name", "Jane"),
		("id_last_name", "Doe"),
		("id_email", "jane@company.com"),
		("id_username", "jdoe"),
		("id_employee_id", "EMP002"),
		("id_password1", "Secret123!"),
		("id_password2", "Secret123!"),
	] {
		registration.type_into(id, value);
	}

	let button = registration.submit_button("register-form");
	registration.doc.click(button);

	let forms = registration.controller.forms();
	assert_eq!(
		forms.submission_state("register-form").unwrap(),
		SubmissionState::Blocked
	);
	let errors = forms.errors("register-form").unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].field, "department");
	assert_eq!(errors[0].kind, FieldErrorKind::RequiredFieldEmpty);
	assert!(!registration.doc.is_disabled(button));
}

#[rstest]
#[case("id_employee_id", "emp002", FieldErrorKind::InvalidIdentifierFormat)]
#[case("id_employee_id", "EMP-002", FieldErrorKind::InvalidIdentifierFormat)]
#[case("id_phone_number", "123", FieldErrorKind::InvalidPhoneFormat)]
#[case("id_password1", "short1", FieldErrorKind::PasswordTooShort { min: 8 })]
#[case("id_email", "ab.com", FieldErrorKind::InvalidEmailFormat)]
fn test_inline_errors(
	registration: Page,
	#[case] id: &str,
	#[case] value: &str,
	#[case] expected: FieldErrorKind,
) {
	registration.type_into(id, value);

	let errors = registration
		.controller
		.forms()
		.errors("register-form")
		.unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].kind, expected);

	let input = registration.by_id(id);
	let wrapper = registration.doc.parent(input).unwrap();
	let feedback = registration
		.doc
		.elements_by_class(wrapper, "invalid-feedback")[0];
	assert_eq!(registration.doc.text(feedback), expected.to_string());
}

#[rstest]
fn test_editing_replaces_the_single_error(registration: Page) {
	registration.type_into("id_password1", "short");
	registration.type_into("id_password1", "");

	let errors = registration
		.controller
		.forms()
		.errors("register-form")
		.unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].kind, FieldErrorKind::RequiredFieldEmpty);
}

// ============================================================================
// Category 2: Password change page with a configured rule overlay
// ============================================================================

#[rstest]
fn test_password_change_overlay_from_toml() {
	let settings = PageSettings::from_toml_str(
		r#"
		strength_fields = ["new_password1"]

		[rules.fields]
		new_password1 = [{ type = "password_length", min = 8 }]
		new_password2 = [{ type = "password_match", field = "new_password1" }]

		[rules.messages]
		password_mismatch = "New passwords don't match."
		"#,
	)
	.unwrap();
	let page = Page::new(
		Document::from_forms(&[presets::password_change()]),
		settings,
	);

	page.type_into("id_current_password", "old-password");
	page.type_into("id_new_password1", "Secret123");
	page.type_into("id_new_password2", "Secret12");

	let errors = page
		.controller
		.forms()
		.errors("password-change-form")
		.unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].message, "New passwords don't match.");
	assert!(
		page.doc
			.has_class(page.by_id("id_new_password1"), "strength-medium")
	);
}

// ============================================================================
// Category 3: Notification banners
// ============================================================================

#[rstest]
fn test_banner_gone_five_seconds_after_creation(registration: Page) {
	registration.scheduler.advance(Duration::from_secs(7));
	let notifications = registration.controller.notifications();
	let banner = notifications
		.show(&Message::error("Registration failed. Please correct the errors below."))
		.unwrap();

	registration.scheduler.advance(Duration::from_millis(4_900));
	assert!(registration.doc.is_attached(banner));

	registration.scheduler.advance(Duration::from_millis(100));
	assert!(!registration.doc.is_attached(banner));
}

#[rstest]
fn test_dismiss_at_one_second(registration: Page) {
	let notifications = registration.controller.notifications();
	let banner = notifications.notify(Level::Success, "Saved").unwrap();

	registration.scheduler.advance(Duration::from_secs(1));
	let close = registration.doc.elements_by_class(banner, "btn-close")[0];
	registration.doc.click(close);
	assert!(!registration.doc.is_attached(banner));

	// The original deadline passes without touching anything
	registration.scheduler.advance(Duration::from_secs(4));
	assert!(!registration.doc.is_attached(banner));
	assert!(notifications.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_banner_with_tokio_timers() {
	let local = tokio::task::LocalSet::new();
	local
		.run_until(async {
			let doc = Document::from_forms(&[presets::login()]);
			let page = PageController::new(
				PageSettings::default(),
				Rc::new(TokioScheduler::new()),
			);
			page.attach(&doc);

			let banner = page
				.notifications()
				.notify(Level::Info, "You have been logged out successfully.")
				.unwrap();

			tokio::time::sleep(Duration::from_millis(4_999)).await;
			assert!(doc.is_attached(banner));

			tokio::time::sleep(Duration::from_millis(2)).await;
			tokio::task::yield_now().await;
			assert!(!doc.is_attached(banner));
		})
		.await;
}
