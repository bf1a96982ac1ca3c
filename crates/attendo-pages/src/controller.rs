//! Form interaction controller
//!
//! A [`FormController`] is constructed once per page view. [`attach`]
//! binds it to the forms already in the document: each control with a
//! `name` becomes a [`FormField`] of a [`Form`], and listeners are
//! registered for value changes, focus, blur and submit. From then on the
//! document's events drive the form model and the model drives the markup:
//!
//! - `is-valid` / `is-invalid` on inputs, with the message in the field's
//!   feedback element
//! - `focused` on the field wrapper while its input has focus
//! - `has-value` on the label of a select holding a value
//! - one `strength-*` class on live password fields
//! - a disabled submit button labelled "Processing..." while submitting
//!
//! Elements are captured at attach time and never looked up again.
//!
//! [`attach`]: FormController::attach

use crate::dom::{Document, NodeId};
use crate::error::{ControllerError, ControllerResult};
use crate::events::{Event, EventKind, ListenerId};
use crate::settings::PageSettings;
use attendo_forms::{
	FieldError, FieldType, Form, FormField, RuleSet, StrengthTier, SubmissionState,
	ValidationResult, ValidationState,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Input types that are not validated fields
const IGNORED_INPUT_TYPES: [&str; 7] = [
	"submit", "button", "reset", "hidden", "checkbox", "radio", "file",
];

/// Elements captured for one field
#[derive(Debug)]
struct BoundField {
	name: String,
	input: NodeId,
	wrapper: Option<NodeId>,
	label: Option<NodeId>,
	feedback: NodeId,
}

#[derive(Debug)]
struct BoundForm {
	key: String,
	node: NodeId,
	form: Form,
	fields: Vec<BoundField>,
	submit: Option<NodeId>,
	submit_label: String,
}

impl BoundForm {
	fn bound_field(&self, name: &str) -> Option<&BoundField> {
		self.fields.iter().find(|f| f.name == name)
	}
}

#[derive(Default)]
struct ControllerState {
	document: Option<Document>,
	forms: Vec<BoundForm>,
	listeners: Vec<ListenerId>,
}

struct Shared {
	settings: PageSettings,
	rules: RuleSet,
	state: RefCell<ControllerState>,
}

/// Page-scoped controller for every form in a document
#[derive(Clone)]
pub struct FormController {
	shared: Rc<Shared>,
}

impl fmt::Debug for FormController {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.shared.state.borrow();
		f.debug_struct("FormController")
			.field("attached", &state.document.is_some())
			.field("forms", &state.forms.len())
			.finish()
	}
}

impl Default for FormController {
	fn default() -> Self {
		Self::new(PageSettings::default())
	}
}

impl FormController {
	pub fn new(settings: PageSettings) -> Self {
		let rules = settings.rule_set();
		Self {
			shared: Rc::new(Shared {
				settings,
				rules,
				state: RefCell::new(ControllerState::default()),
			}),
		}
	}

	pub fn settings(&self) -> &PageSettings {
		&self.shared.settings
	}

	/// The effective rule table
	pub fn rules(&self) -> &RuleSet {
		&self.shared.rules
	}

	pub fn is_attached(&self) -> bool {
		self.shared.state.borrow().document.is_some()
	}

	/// Binds the controller to every form in `document`.
	///
	/// Calling it again while attached does nothing.
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::presets;
	/// use attendo_pages::{Document, FormController};
	///
	/// let doc = Document::from_forms(&[presets::login()]);
	/// let controller = FormController::default();
	///
	/// controller.attach(&doc);
	/// let listeners = doc.listener_count();
	/// controller.attach(&doc);
	///
	/// assert_eq!(doc.listener_count(), listeners);
	/// assert_eq!(controller.form_ids(), vec!["login-form"]);
	/// ```
	pub fn attach(&self, document: &Document) {
		if self.is_attached() {
			tracing::debug!("form controller already attached");
			return;
		}

		let forms: Vec<BoundForm> = document
			.elements_by_tag(document.body(), "form")
			.into_iter()
			.enumerate()
			.map(|(index, node)| bind_form(document, node, index, &self.shared.settings))
			.collect();
		for bound in &forms {
			self.shared.decorate(document, bound);
		}
		let field_count: usize = forms.iter().map(|f| f.fields.len()).sum();

		{
			let mut state = self.shared.state.borrow_mut();
			state.document = Some(document.clone());
			state.forms = forms;
		}
		let listeners = self.register_listeners(document);
		let listener_count = listeners.len();
		self.shared.state.borrow_mut().listeners = listeners;

		tracing::debug!(
			forms = self.shared.state.borrow().forms.len(),
			fields = field_count,
			listeners = listener_count,
			"form controller attached"
		);
	}

	fn register_listeners(&self, document: &Document) -> Vec<ListenerId> {
		let state = self.shared.state.borrow();
		let mut ids = Vec::new();

		for (form_index, bound) in state.forms.iter().enumerate() {
			for field in &bound.fields {
				for kind in [EventKind::Input, EventKind::Change] {
					let shared = Rc::downgrade(&self.shared);
					let name = field.name.clone();
					ids.push(document.add_event_listener(field.input, kind, move |doc, _| {
						with_shared(&shared, |s| s.value_changed(doc, form_index, &name));
					}));
				}
				for (kind, focused) in [(EventKind::Focus, true), (EventKind::Blur, false)] {
					let shared = Rc::downgrade(&self.shared);
					let name = field.name.clone();
					ids.push(document.add_event_listener(field.input, kind, move |doc, _| {
						with_shared(&shared, |s| s.focus_changed(doc, form_index, &name, focused));
					}));
				}
			}

			let shared = Rc::downgrade(&self.shared);
			ids.push(
				document.add_event_listener(bound.node, EventKind::Submit, move |doc, event| {
					with_shared(&shared, |s| s.submit_requested(doc, form_index, event));
				}),
			);
		}
		ids
	}

	/// Removes every listener and forgets the bound forms
	pub fn detach(&self) {
		let state = std::mem::take(&mut *self.shared.state.borrow_mut());
		if let Some(document) = state.document {
			for id in state.listeners {
				document.remove_event_listener(id);
			}
			tracing::debug!("form controller detached");
		}
	}

	/// Ids of the bound forms, in document order
	pub fn form_ids(&self) -> Vec<String> {
		self.shared
			.state
			.borrow()
			.forms
			.iter()
			.map(|f| f.key.clone())
			.collect()
	}

	fn with_form<R>(
		&self,
		form_id: &str,
		f: impl FnOnce(&Document, &mut BoundForm) -> R,
	) -> ControllerResult<R> {
		let mut state = self.shared.state.borrow_mut();
		let document = state.document.clone().ok_or(ControllerError::NotAttached)?;
		let bound = state
			.forms
			.iter_mut()
			.find(|b| b.key == form_id)
			.ok_or_else(|| ControllerError::UnknownForm(form_id.to_string()))?;
		Ok(f(&document, bound))
	}

	/// Snapshot of a form's model
	pub fn form(&self, form_id: &str) -> ControllerResult<Form> {
		self.with_form(form_id, |_, bound| bound.form.clone())
	}

	pub fn submission_state(&self, form_id: &str) -> ControllerResult<SubmissionState> {
		self.with_form(form_id, |_, bound| bound.form.submission_state())
	}

	/// Errors currently shown in a form
	pub fn errors(&self, form_id: &str) -> ControllerResult<Vec<FieldError>> {
		self.with_form(form_id, |_, bound| {
			bound.form.errors().into_iter().cloned().collect()
		})
	}

	/// Validates one field against its value in the document and updates
	/// its markup
	pub fn validate_field(&self, form_id: &str, name: &str) -> ControllerResult<ValidationResult> {
		self.with_form(form_id, |doc, bound| -> ControllerResult<ValidationResult> {
			let value = bound.bound_field(name).map(|f| doc.value(f.input));
			let result = match value {
				Some(value) => bound.form.set_value(name, value, &self.shared.rules)?,
				None => bound.form.validate_field(name, &self.shared.rules)?,
			};
			self.shared.render(doc, bound, false);
			Ok(result)
		})?
	}

	/// Validates every field a rule applies to; `true` if all pass
	pub fn validate_form(&self, form_id: &str) -> ControllerResult<bool> {
		self.with_form(form_id, |doc, bound| {
			self.shared.sync_values(doc, bound);
			let valid = bound.form.validate(&self.shared.rules);
			self.shared.render(doc, bound, false);
			valid
		})
	}

	/// Handles a submit request for `form_id`.
	///
	/// An invalid form has `event`'s default action prevented. A valid one
	/// moves to `submitting` and its submit button is disabled.
	pub fn on_submit(&self, form_id: &str, event: &mut Event) -> ControllerResult<()> {
		self.with_form(form_id, |doc, bound| self.shared.submit(doc, bound, event))
	}

	/// Clears a form back to a blank, submittable state
	///
	/// # Errors
	///
	/// Returns [`ControllerError::UnknownForm`] if no bound form has this id.
	pub fn reset_form(&self, form_id: &str) -> ControllerResult<()> {
		self.with_form(form_id, |doc, bound| self.shared.reset(doc, bound))
	}
}

fn with_shared(shared: &Weak<Shared>, f: impl FnOnce(&Shared)) {
	if let Some(shared) = shared.upgrade() {
		f(&shared);
	}
}

impl Shared {
	fn value_changed(&self, doc: &Document, form_index: usize, name: &str) {
		let mut state = self.state.borrow_mut();
		let Some(bound) = state.forms.get_mut(form_index) else {
			return;
		};
		let Some(input) = bound.bound_field(name).map(|f| f.input) else {
			return;
		};

		match bound.form.set_value(name, doc.value(input), &self.rules) {
			Ok(result) => {
				tracing::trace!(form = %bound.key, field = name, valid = result.valid, "value changed");
			}
			Err(error) => {
				tracing::warn!(form = %bound.key, field = name, %error, "value change ignored");
				return;
			}
		}
		self.render(doc, bound, false);
	}

	fn focus_changed(&self, doc: &Document, form_index: usize, name: &str, focused: bool) {
		let state = self.state.borrow();
		let wrapper = state
			.forms
			.get(form_index)
			.and_then(|bound| bound.bound_field(name))
			.and_then(|field| field.wrapper);
		if let Some(wrapper) = wrapper {
			doc.toggle_class(wrapper, &self.settings.classes.focused, focused);
		}
	}

	fn submit_requested(&self, doc: &Document, form_index: usize, event: &mut Event) {
		let mut state = self.state.borrow_mut();
		if let Some(bound) = state.forms.get_mut(form_index) {
			self.submit(doc, bound, event);
		}
	}

	fn submit(&self, doc: &Document, bound: &mut BoundForm, event: &mut Event) {
		if bound.form.submission_state() == SubmissionState::Submitting {
			// Already on its way; a second request would send it twice
			event.prevent_default();
			tracing::debug!(form = %bound.key, "duplicate submission ignored");
			return;
		}

		self.sync_values(doc, bound);
		let valid = bound.form.begin_submit(&self.rules);
		self.render(doc, bound, false);

		if valid {
			if let Some(button) = bound.submit {
				doc.set_disabled(button, true);
				doc.set_text(button, &self.settings.processing_label);
			}
			tracing::debug!(form = %bound.key, "submission allowed");
		} else {
			event.prevent_default();
			tracing::debug!(
				form = %bound.key,
				errors = bound.form.errors().len(),
				"submission blocked"
			);
		}
	}

	/// Picks up values set on the document without an event
	fn sync_values(&self, doc: &Document, bound: &mut BoundForm) {
		for field in &bound.fields {
			let value = doc.value(field.input);
			if bound.form.value(&field.name) == Some(value.as_str()) {
				continue;
			}
			if let Err(error) = bound.form.set_value(&field.name, value, &self.rules) {
				tracing::warn!(form = %bound.key, field = %field.name, %error, "value sync failed");
			}
		}
	}

	fn reset(&self, doc: &Document, bound: &mut BoundForm) {
		bound.form.reset();
		for field in &bound.fields {
			doc.set_value(field.input, "");
		}
		self.render(doc, bound, true);

		if let Some(button) = bound.submit {
			doc.set_disabled(button, false);
			doc.set_text(button, &bound.submit_label);
		}
		tracing::debug!(form = %bound.key, "form reset");
	}

	/// Affordances that depend only on the markup as served
	fn decorate(&self, doc: &Document, bound: &BoundForm) {
		for field in &bound.fields {
			if let Some(model) = bound.form.field(&field.name) {
				self.render_affordances(doc, field, model);
			}
		}
	}

	/// Mirrors field states into the markup.
	///
	/// Untouched fields keep whatever the server rendered unless `all` is
	/// set.
	fn render(&self, doc: &Document, bound: &BoundForm, all: bool) {
		let classes = &self.settings.classes;
		for field in &bound.fields {
			let Some(model) = bound.form.field(&field.name) else {
				continue;
			};
			let state = model.state();
			if state == ValidationState::Untouched && !all {
				continue;
			}

			doc.toggle_class(field.input, &classes.valid, state == ValidationState::Valid);
			doc.toggle_class(
				field.input,
				&classes.invalid,
				state == ValidationState::Invalid,
			);
			let message = model.error().map(|e| e.message.as_str()).unwrap_or("");
			doc.set_text(field.feedback, message);

			self.render_affordances(doc, field, model);
		}
	}

	fn render_affordances(&self, doc: &Document, field: &BoundField, model: &FormField) {
		if model.field_type() == FieldType::Select {
			if let Some(label) = field.label {
				doc.toggle_class(label, &self.settings.classes.has_value, !model.is_empty());
			}
		}

		if self.settings.strength_fields.iter().any(|f| *f == field.name) {
			for class in StrengthTier::CSS_CLASSES {
				doc.remove_class(field.input, class);
			}
			if !model.is_empty() {
				doc.add_class(field.input, StrengthTier::of(model.value()).css_class());
			}
		}
	}
}

fn bind_form(doc: &Document, node: NodeId, index: usize, settings: &PageSettings) -> BoundForm {
	let key = doc
		.attribute(node, "id")
		.unwrap_or_else(|| format!("form-{}", index));
	let mut form = Form::new(&key).with_action(doc.attribute(node, "action").unwrap_or_default());
	let mut fields = Vec::new();
	let mut submit = None;

	for control in doc.descendants(node) {
		if doc.is_submit_control(control) {
			if submit.is_none() {
				submit = Some(control);
			}
			continue;
		}

		let tag = doc.tag(control);
		if !matches!(tag.as_str(), "input" | "select" | "textarea") {
			continue;
		}
		let input_type = doc.attribute(control, "type");
		if input_type
			.as_deref()
			.is_some_and(|t| IGNORED_INPUT_TYPES.contains(&t.to_ascii_lowercase().as_str()))
		{
			continue;
		}
		let Some(name) = doc.attribute(control, "name") else {
			continue;
		};

		let label = label_for(doc, node, control);
		let mut field = FormField::new(&name, FieldType::from_element(&tag, input_type.as_deref()))
			.with_required(doc.has_attribute(control, "required"))
			.with_initial(doc.value(control));
		if let Some(text) = label.map(|l| doc.text(l)).filter(|t| !t.is_empty()) {
			field = field.with_label(text);
		}
		if let Err(error) = form.add_field(field) {
			tracing::warn!(form = %key, %error, "skipping control");
			continue;
		}

		let wrapper = doc.parent(control);
		let feedback = feedback_for(doc, control, wrapper.unwrap_or(node), settings);
		fields.push(BoundField {
			name,
			input: control,
			wrapper,
			label,
			feedback,
		});
	}

	let submit_label = submit.map(|b| doc.text(b)).unwrap_or_default();
	BoundForm {
		key,
		node,
		form,
		fields,
		submit,
		submit_label,
	}
}

/// The `label[for=<id>]` of a control within `scope`, else a label next to it
fn label_for(doc: &Document, scope: NodeId, control: NodeId) -> Option<NodeId> {
	if let Some(id) = doc.attribute(control, "id") {
		let by_for = doc
			.elements_by_tag(scope, "label")
			.into_iter()
			.find(|l| doc.attribute(*l, "for").as_deref() == Some(id.as_str()));
		if by_for.is_some() {
			return by_for;
		}
	}
	doc.parent(control).and_then(|parent| {
		doc.children(parent)
			.into_iter()
			.find(|c| doc.tag(*c) == "label")
	})
}

/// The feedback element next to a control, created if the server omitted it
fn feedback_for(doc: &Document, control: NodeId, wrapper: NodeId, settings: &PageSettings) -> NodeId {
	let class = &settings.classes.feedback;
	let existing = doc
		.children(wrapper)
		.into_iter()
		.find(|c| *c != control && doc.has_class(*c, class));
	existing.unwrap_or_else(|| {
		let feedback = doc.create_element("div");
		doc.add_class(feedback, class);
		doc.append_child(wrapper, feedback);
		feedback
	})
}
