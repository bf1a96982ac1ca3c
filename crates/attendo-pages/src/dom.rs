//! In-memory document
//!
//! [`Document`] holds the page state the controller reads and mutates: an
//! arena of elements with their attributes, classes, text, value and
//! disabled flag, plus the registered event listeners.
//!
//! It is a cheap handle (`Rc`), single-threaded, and never holds a borrow
//! while a listener runs, so listeners may freely mutate the document they
//! are called with.
//!
//! ## Example
//!
//! ```
//! use attendo_pages::{Document, EventKind};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let doc = Document::new();
//! let input = doc.create_element("input");
//! doc.append_child(doc.body(), input);
//!
//! let seen = Rc::new(Cell::new(0));
//! let counter = seen.clone();
//! doc.add_event_listener(input, EventKind::Input, move |_, _| counter.set(counter.get() + 1));
//!
//! doc.input(input, "hello");
//! assert_eq!(doc.value(input), "hello");
//! assert_eq!(seen.get(), 1);
//! ```

use crate::events::{Event, EventKind, Listener, ListenerId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Handle to an element of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
	tag: String,
	attributes: BTreeMap<String, String>,
	classes: Vec<String>,
	text: String,
	value: String,
	disabled: bool,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	attached: bool,
}

struct Registration {
	id: ListenerId,
	node: NodeId,
	kind: EventKind,
	listener: Listener,
}

struct DocumentInner {
	nodes: Vec<Node>,
	listeners: Vec<Registration>,
	next_listener: u64,
}

/// Shared handle to the page
#[derive(Clone)]
pub struct Document {
	inner: Rc<RefCell<DocumentInner>>,
}

impl fmt::Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("Document")
			.field("nodes", &inner.nodes.len())
			.field("listeners", &inner.listeners.len())
			.finish()
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty page with an attached `body`
	pub fn new() -> Self {
		let body = Node {
			tag: "body".to_string(),
			attached: true,
			..Default::default()
		};
		Self {
			inner: Rc::new(RefCell::new(DocumentInner {
				nodes: vec![body],
				listeners: vec![],
				next_listener: 0,
			})),
		}
	}

	pub fn body(&self) -> NodeId {
		NodeId(0)
	}

	fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> Option<R> {
		self.inner.borrow().nodes.get(id.0).map(f)
	}

	fn with_node_mut<R>(&self, id: NodeId, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
		self.inner.borrow_mut().nodes.get_mut(id.0).map(f)
	}

	/// Creates a detached element
	pub fn create_element(&self, tag: &str) -> NodeId {
		let mut inner = self.inner.borrow_mut();
		inner.nodes.push(Node {
			tag: tag.to_ascii_lowercase(),
			..Default::default()
		});
		NodeId(inner.nodes.len() - 1)
	}

	/// Moves `child` (and its subtree) under `parent`
	pub fn append_child(&self, parent: NodeId, child: NodeId) {
		if parent == child || self.descendants(child).contains(&parent) {
			tracing::warn!(?parent, ?child, "refusing to create a cycle");
			return;
		}
		self.unlink(child);

		let attached = {
			let mut inner = self.inner.borrow_mut();
			let Some(parent_node) = inner.nodes.get_mut(parent.0) else {
				return;
			};
			parent_node.children.push(child);
			let attached = parent_node.attached;
			if let Some(child_node) = inner.nodes.get_mut(child.0) {
				child_node.parent = Some(parent);
			}
			attached
		};
		self.set_attached(child, attached);
	}

	/// Detaches an element and its subtree from the page.
	///
	/// Listeners registered on the subtree are dropped. Returns `false` if
	/// the element was not attached.
	pub fn remove(&self, node: NodeId) -> bool {
		if node == self.body() || !self.is_attached(node) {
			return false;
		}
		self.unlink(node);
		self.set_attached(node, false);

		let mut subtree = self.descendants(node);
		subtree.push(node);
		self.inner
			.borrow_mut()
			.listeners
			.retain(|registration| !subtree.contains(&registration.node));
		true
	}

	fn unlink(&self, node: NodeId) {
		let mut inner = self.inner.borrow_mut();
		let Some(parent) = inner.nodes.get_mut(node.0).and_then(|n| n.parent.take()) else {
			return;
		};
		if let Some(parent_node) = inner.nodes.get_mut(parent.0) {
			parent_node.children.retain(|c| *c != node);
		}
	}

	fn set_attached(&self, node: NodeId, attached: bool) {
		let mut subtree = self.descendants(node);
		subtree.push(node);
		let mut inner = self.inner.borrow_mut();
		for id in subtree {
			if let Some(n) = inner.nodes.get_mut(id.0) {
				n.attached = attached;
			}
		}
	}

	/// Whether the element is part of the page
	pub fn is_attached(&self, node: NodeId) -> bool {
		self.with_node(node, |n| n.attached).unwrap_or(false)
	}

	pub fn tag(&self, node: NodeId) -> String {
		self.with_node(node, |n| n.tag.clone()).unwrap_or_default()
	}

	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.with_node(node, |n| n.parent).flatten()
	}

	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.with_node(node, |n| n.children.clone())
			.unwrap_or_default()
	}

	/// All elements below `node`, in document order
	pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
		while let Some(next) = stack.pop() {
			out.push(next);
			stack.extend(self.children(next).into_iter().rev());
		}
		out
	}

	pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|n| self.tag(*n).eq_ignore_ascii_case(tag))
			.collect()
	}

	pub fn elements_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|n| self.has_class(*n, class))
			.collect()
	}

	/// Looks up an attached element by its `id` attribute
	pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
		self.descendants(self.body())
			.into_iter()
			.find(|n| self.attribute(*n, "id").as_deref() == Some(id))
	}

	/// Nearest element with `tag`, starting at `node` itself
	pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
		let mut current = Some(node);
		while let Some(id) = current {
			if self.tag(id).eq_ignore_ascii_case(tag) {
				return Some(id);
			}
			current = self.parent(id);
		}
		None
	}

	pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
		self.with_node(node, |n| n.attributes.get(name).cloned())
			.flatten()
	}

	pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
		self.with_node(node, |n| n.attributes.contains_key(name))
			.unwrap_or(false)
	}

	pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
		self.with_node_mut(node, |n| {
			n.attributes.insert(name.to_string(), value.to_string());
		});
	}

	pub fn remove_attribute(&self, node: NodeId, name: &str) {
		self.with_node_mut(node, |n| {
			n.attributes.remove(name);
		});
	}

	pub fn classes(&self, node: NodeId) -> Vec<String> {
		self.with_node(node, |n| n.classes.clone())
			.unwrap_or_default()
	}

	pub fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.with_node(node, |n| n.classes.iter().any(|c| c == class))
			.unwrap_or(false)
	}

	pub fn add_class(&self, node: NodeId, class: &str) {
		self.with_node_mut(node, |n| {
			if !n.classes.iter().any(|c| c == class) {
				n.classes.push(class.to_string());
			}
		});
	}

	pub fn remove_class(&self, node: NodeId, class: &str) {
		self.with_node_mut(node, |n| n.classes.retain(|c| c != class));
	}

	/// Adds or removes `class` depending on `on`
	pub fn toggle_class(&self, node: NodeId, class: &str, on: bool) {
		if on {
			self.add_class(node, class);
		} else {
			self.remove_class(node, class);
		}
	}

	/// The element's own text, excluding children
	pub fn text(&self, node: NodeId) -> String {
		self.with_node(node, |n| n.text.clone()).unwrap_or_default()
	}

	pub fn set_text(&self, node: NodeId, text: &str) {
		self.with_node_mut(node, |n| n.text = text.to_string());
	}

	/// Current value of a form control
	pub fn value(&self, node: NodeId) -> String {
		self.with_node(node, |n| n.value.clone())
			.unwrap_or_default()
	}

	/// Sets a value without dispatching events
	pub fn set_value(&self, node: NodeId, value: &str) {
		self.with_node_mut(node, |n| n.value = value.to_string());
	}

	pub fn is_disabled(&self, node: NodeId) -> bool {
		self.with_node(node, |n| n.disabled).unwrap_or(false)
	}

	pub fn set_disabled(&self, node: NodeId, disabled: bool) {
		self.with_node_mut(node, |n| n.disabled = disabled);
	}

	/// Registers a listener for `kind` events targeting `node`
	pub fn add_event_listener<F>(&self, node: NodeId, kind: EventKind, listener: F) -> ListenerId
	where
		F: Fn(&Document, &mut Event) + 'static,
	{
		let mut inner = self.inner.borrow_mut();
		let id = ListenerId(inner.next_listener);
		inner.next_listener += 1;
		inner.listeners.push(Registration {
			id,
			node,
			kind,
			listener: Rc::new(listener),
		});
		id
	}

	pub fn remove_event_listener(&self, id: ListenerId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let before = inner.listeners.len();
		inner.listeners.retain(|registration| registration.id != id);
		inner.listeners.len() != before
	}

	/// Number of registered listeners across the page
	pub fn listener_count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}

	/// Runs the listeners for `kind` on `node`, in registration order.
	///
	/// Events targeting a detached element are not delivered.
	pub fn dispatch(&self, node: NodeId, kind: EventKind) -> Event {
		let mut event = Event::new(kind, node);
		if !self.is_attached(node) {
			tracing::trace!(?node, %kind, "dropping event for detached element");
			return event;
		}

		let listeners: Vec<Listener> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.filter(|r| r.node == node && r.kind == kind)
			.map(|r| Rc::clone(&r.listener))
			.collect();
		for listener in listeners {
			listener(self, &mut event);
		}
		event
	}

	/// Types `value` into a control
	pub fn input(&self, node: NodeId, value: &str) -> Event {
		self.set_value(node, value);
		self.dispatch(node, EventKind::Input)
	}

	/// Picks `value` in a select
	pub fn select(&self, node: NodeId, value: &str) -> Event {
		self.set_value(node, value);
		self.dispatch(node, EventKind::Change)
	}

	pub fn focus(&self, node: NodeId) -> Event {
		self.dispatch(node, EventKind::Focus)
	}

	pub fn blur(&self, node: NodeId) -> Event {
		self.dispatch(node, EventKind::Blur)
	}

	/// Clicks an element.
	///
	/// Disabled or detached elements ignore the click and `None` is
	/// returned. Clicking a submit button submits its form unless a click
	/// listener cancelled it.
	pub fn click(&self, node: NodeId) -> Option<Event> {
		if self.is_disabled(node) || !self.is_attached(node) {
			return None;
		}
		let event = self.dispatch(node, EventKind::Click);
		if !event.is_default_prevented() && self.is_submit_control(node) {
			if let Some(form) = self.closest(node, "form") {
				self.submit(form);
			}
		}
		Some(event)
	}

	pub(crate) fn is_submit_control(&self, node: NodeId) -> bool {
		let input_type = self.attribute(node, "type");
		match self.tag(node).as_str() {
			"button" => input_type.is_none_or(|t| t.eq_ignore_ascii_case("submit")),
			"input" => input_type.is_some_and(|t| t.eq_ignore_ascii_case("submit")),
			_ => false,
		}
	}

	/// Requests submission of `form`; a prevented event means nothing is sent
	pub fn submit(&self, form: NodeId) -> Event {
		let event = self.dispatch(form, EventKind::Submit);
		tracing::trace!(
			?form,
			sent = !event.is_default_prevented(),
			"form submission"
		);
		event
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::cell::Cell;

	#[fixture]
	fn doc() -> Document {
		Document::new()
	}

	#[rstest]
	fn test_append_marks_subtree_attached(doc: Document) {
		let form = doc.create_element("form");
		let input = doc.create_element("input");
		doc.append_child(form, input);
		assert!(!doc.is_attached(input));

		doc.append_child(doc.body(), form);

		assert!(doc.is_attached(form));
		assert!(doc.is_attached(input));
		assert_eq!(doc.parent(input), Some(form));
	}

	#[rstest]
	fn test_remove_detaches_and_drops_listeners(doc: Document) {
		let banner = doc.create_element("div");
		let close = doc.create_element("button");
		doc.append_child(banner, close);
		doc.append_child(doc.body(), banner);
		doc.add_event_listener(close, EventKind::Click, |_, _| {});

		assert!(doc.remove(banner));

		assert!(!doc.is_attached(close));
		assert_eq!(doc.listener_count(), 0);
		assert!(doc.children(doc.body()).is_empty());
		// Second removal is a no-op
		assert!(!doc.remove(banner));
	}

	#[rstest]
	fn test_descendants_in_document_order(doc: Document) {
		let a = doc.create_element("div");
		let b = doc.create_element("span");
		let c = doc.create_element("p");
		doc.append_child(doc.body(), a);
		doc.append_child(a, b);
		doc.append_child(doc.body(), c);

		assert_eq!(doc.descendants(doc.body()), vec![a, b, c]);
	}

	#[rstest]
	fn test_classes(doc: Document) {
		let input = doc.create_element("input");
		doc.add_class(input, "form-control");
		doc.add_class(input, "is-valid");
		doc.add_class(input, "is-valid");
		assert_eq!(doc.classes(input), vec!["form-control", "is-valid"]);

		doc.toggle_class(input, "is-valid", false);
		assert!(!doc.has_class(input, "is-valid"));
	}

	#[rstest]
	fn test_listener_may_mutate_document(doc: Document) {
		let input = doc.create_element("input");
		doc.append_child(doc.body(), input);
		doc.add_event_listener(input, EventKind::Input, |doc, event| {
			doc.add_class(event.target(), "touched");
		});

		doc.input(input, "x");

		assert!(doc.has_class(input, "touched"));
	}

	#[rstest]
	fn test_detached_element_receives_no_events(doc: Document) {
		let input = doc.create_element("input");
		let calls = Rc::new(Cell::new(0));
		let counter = calls.clone();
		doc.add_event_listener(input, EventKind::Focus, move |_, _| {
			counter.set(counter.get() + 1)
		});

		doc.focus(input);

		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_click_submit_button_submits_form(doc: Document) {
		let form = doc.create_element("form");
		let button = doc.create_element("button");
		doc.set_attribute(button, "type", "submit");
		doc.append_child(form, button);
		doc.append_child(doc.body(), form);

		let submitted = Rc::new(Cell::new(false));
		let flag = submitted.clone();
		doc.add_event_listener(form, EventKind::Submit, move |_, _| flag.set(true));

		assert!(doc.click(button).is_some());
		assert!(submitted.get());
	}

	#[rstest]
	fn test_disabled_button_ignores_click(doc: Document) {
		let form = doc.create_element("form");
		let button = doc.create_element("button");
		doc.append_child(form, button);
		doc.append_child(doc.body(), form);
		doc.set_disabled(button, true);

		let submitted = Rc::new(Cell::new(false));
		let flag = submitted.clone();
		doc.add_event_listener(form, EventKind::Submit, move |_, _| flag.set(true));

		assert!(doc.click(button).is_none());
		assert!(!submitted.get());
	}

	#[rstest]
	fn test_remove_event_listener(doc: Document) {
		let id = doc.add_event_listener(doc.body(), EventKind::Click, |_, _| {});
		assert!(doc.remove_event_listener(id));
		assert!(!doc.remove_event_listener(id));
	}

	#[rstest]
	fn test_element_by_id_and_closest(doc: Document) {
		let form = doc.create_element("form");
		doc.set_attribute(form, "id", "login-form");
		let wrapper = doc.create_element("div");
		let input = doc.create_element("input");
		doc.append_child(doc.body(), form);
		doc.append_child(form, wrapper);
		doc.append_child(wrapper, input);

		assert_eq!(doc.element_by_id("login-form"), Some(form));
		assert_eq!(doc.closest(input, "form"), Some(form));
		assert_eq!(doc.closest(input, "table"), None);
	}
}
