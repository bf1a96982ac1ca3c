//! Server-style markup
//!
//! Renders [`FormMetadata`] and [`Message`]s into a [`Document`] the way the
//! server templates do, so the controller can bind to it.
//!
//! A form renders as:
//!
//! ```text
//! form#<id> [action, method=post, novalidate]
//! ├── div.mb-3                       one per field
//! │   ├── label.form-label [for=id_<name>]
//! │   ├── input.form-control | select.form-select
//! │   ├── div.form-text              help text, if any
//! │   └── div.invalid-feedback
//! └── button.btn.btn-primary [type=submit]
//! ```

use crate::dom::{Document, NodeId};
use attendo_core::Message;
use attendo_forms::{FieldMetadata, FieldType, FormMetadata};

/// Class of the element holding a field's inline error
pub const FEEDBACK_CLASS: &str = "invalid-feedback";

impl Document {
	/// Creates a page containing the given forms
	///
	/// # Examples
	///
	/// ```
	/// use attendo_pages::Document;
	/// use attendo_forms::presets;
	///
	/// let doc = Document::from_forms(&[presets::login()]);
	/// let form = doc.element_by_id("login-form").unwrap();
	/// assert_eq!(doc.elements_by_tag(form, "input").len(), 2);
	/// ```
	pub fn from_forms(forms: &[FormMetadata]) -> Self {
		let doc = Document::new();
		for metadata in forms {
			render_form(&doc, doc.body(), metadata);
		}
		doc
	}
}

/// Renders one form under `parent` and returns the form element
pub fn render_form(doc: &Document, parent: NodeId, metadata: &FormMetadata) -> NodeId {
	let form = doc.create_element("form");
	doc.set_attribute(form, "id", &metadata.id);
	doc.set_attribute(form, "action", &metadata.action);
	doc.set_attribute(form, "method", "post");
	doc.set_attribute(form, "novalidate", "");

	for field in &metadata.fields {
		let wrapper = render_field(doc, field, metadata.initial_for(field));
		doc.append_child(form, wrapper);
	}

	let submit = doc.create_element("button");
	doc.set_attribute(submit, "type", "submit");
	doc.add_class(submit, "btn");
	doc.add_class(submit, "btn-primary");
	doc.set_text(submit, &metadata.submit_label);
	doc.append_child(form, submit);

	doc.append_child(parent, form);
	form
}

fn render_field(doc: &Document, field: &FieldMetadata, initial: Option<&str>) -> NodeId {
	let wrapper = doc.create_element("div");
	doc.add_class(wrapper, "mb-3");

	let input_id = format!("id_{}", field.name);

	let label = doc.create_element("label");
	doc.add_class(label, "form-label");
	doc.set_attribute(label, "for", &input_id);
	doc.set_text(label, &field.display_label());
	doc.append_child(wrapper, label);

	let input = render_widget(doc, field);
	doc.set_attribute(input, "id", &input_id);
	doc.set_attribute(input, "name", &field.name);
	if field.required {
		doc.set_attribute(input, "required", "");
	}
	if let Some(initial) = initial {
		doc.set_value(input, initial);
	}
	doc.append_child(wrapper, input);

	if let Some(help_text) = &field.help_text {
		let help = doc.create_element("div");
		doc.add_class(help, "form-text");
		doc.set_text(help, help_text);
		doc.append_child(wrapper, help);
	}

	let feedback = doc.create_element("div");
	doc.add_class(feedback, FEEDBACK_CLASS);
	doc.append_child(wrapper, feedback);

	wrapper
}

fn render_widget(doc: &Document, field: &FieldMetadata) -> NodeId {
	if field.widget == FieldType::Select {
		let select = doc.create_element("select");
		doc.add_class(select, "form-select");
		let blank = (String::new(), "---------".to_string());
		for (value, label) in std::iter::once(&blank).chain(&field.choices) {
			let option = doc.create_element("option");
			doc.set_attribute(option, "value", value);
			doc.set_text(option, label);
			doc.append_child(select, option);
		}
		return select;
	}

	let input = doc.create_element("input");
	doc.add_class(input, "form-control");
	doc.set_attribute(input, "type", field.widget.as_str());
	input
}

/// Renders a dismissible banner under `parent` and returns it
///
/// # Examples
///
/// ```
/// use attendo_core::Message;
/// use attendo_pages::{render, Document};
///
/// let doc = Document::new();
/// let banner = render::render_alert(&doc, doc.body(), &Message::success("Saved"));
/// assert!(doc.has_class(banner, "alert-success"));
/// assert_eq!(doc.text(banner), "Saved");
/// ```
pub fn render_alert(doc: &Document, parent: NodeId, message: &Message) -> NodeId {
	let alert = doc.create_element("div");
	doc.add_class(alert, "alert");
	doc.add_class(alert, message.level.css_class());
	doc.add_class(alert, "alert-dismissible");
	for tag in &message.extra_tags {
		doc.add_class(alert, tag);
	}
	doc.set_attribute(alert, "role", "alert");
	doc.set_text(alert, &message.text);

	let close = doc.create_element("button");
	doc.set_attribute(close, "type", "button");
	doc.add_class(close, "btn-close");
	doc.set_attribute(close, "aria-label", "Close");
	doc.append_child(alert, close);

	doc.append_child(parent, alert);
	alert
}
