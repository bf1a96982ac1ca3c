//! Page events
//!
//! Events are dispatched to the listeners registered on their target
//! element only; there is no capture or bubbling phase.

use crate::dom::{Document, NodeId};
use std::fmt;
use std::rc::Rc;

/// Kinds of events the page runtime dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// Value changed while typing
	Input,
	/// Value committed (selects)
	Change,
	Focus,
	Blur,
	Submit,
	Click,
}

impl EventKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			EventKind::Input => "input",
			EventKind::Change => "change",
			EventKind::Focus => "focus",
			EventKind::Blur => "blur",
			EventKind::Submit => "submit",
			EventKind::Click => "click",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	kind: EventKind,
	target: NodeId,
	default_prevented: bool,
}

impl Event {
	pub fn new(kind: EventKind, target: NodeId) -> Self {
		Self {
			kind,
			target,
			default_prevented: false,
		}
	}

	pub fn kind(&self) -> EventKind {
		self.kind
	}

	pub fn target(&self) -> NodeId {
		self.target
	}

	/// Cancels the default action (for `submit`, sending the form)
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented
	}
}

/// Callback invoked on dispatch
pub type Listener = Rc<dyn Fn(&Document, &mut Event)>;

/// Identifies a registered listener so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
