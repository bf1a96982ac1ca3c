//! Auto-dismissing notification banners
//!
//! Every banner is removed a fixed delay (5 s by default) after it appears,
//! unless its close button removes it first. The removal is a scheduled
//! task keyed by the banner element; closing the banner cancels it, and a
//! task that still fires for a banner no longer on the page does nothing.
//!
//! ```
//! use attendo_core::Message;
//! use attendo_pages::scheduler::ManualScheduler;
//! use attendo_pages::{Document, NotificationCenter, PageSettings};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let doc = Document::new();
//! let scheduler = ManualScheduler::new();
//! let center = NotificationCenter::new(Rc::new(scheduler.clone()), &PageSettings::default());
//! center.attach(&doc);
//!
//! let banner = center.show(&Message::success("Profile updated successfully!")).unwrap();
//! scheduler.advance(Duration::from_secs(5));
//! assert!(!doc.is_attached(banner));
//! ```

use crate::dom::{Document, NodeId};
use crate::error::{ControllerError, ControllerResult};
use crate::events::{EventKind, ListenerId};
use crate::render;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::settings::PageSettings;
use attendo_core::{Level, Message};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Class marking a banner element
const BANNER_CLASS: &str = "alert";
/// Class marking a banner's close button
const CLOSE_CLASS: &str = "btn-close";

#[derive(Default)]
struct CenterState {
	document: Option<Document>,
	container: Option<NodeId>,
	timers: HashMap<NodeId, TaskHandle>,
	/// Close-button listeners of each tracked banner
	listeners: HashMap<NodeId, Vec<ListenerId>>,
}

struct Inner {
	scheduler: Rc<dyn Scheduler>,
	dismiss_after: Duration,
	container_id: String,
	state: RefCell<CenterState>,
}

/// Shows banners and removes them again
#[derive(Clone)]
pub struct NotificationCenter {
	inner: Rc<Inner>,
}

impl fmt::Debug for NotificationCenter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.state.borrow();
		f.debug_struct("NotificationCenter")
			.field("dismiss_after", &self.inner.dismiss_after)
			.field("active", &state.timers.len())
			.finish()
	}
}

impl NotificationCenter {
	pub fn new(scheduler: Rc<dyn Scheduler>, settings: &PageSettings) -> Self {
		Self {
			inner: Rc::new(Inner {
				scheduler,
				dismiss_after: settings.dismiss_after(),
				container_id: settings.messages_container.clone(),
				state: RefCell::new(CenterState::default()),
			}),
		}
	}

	pub fn dismiss_after(&self) -> Duration {
		self.inner.dismiss_after
	}

	pub fn is_attached(&self) -> bool {
		self.inner.state.borrow().document.is_some()
	}

	/// Binds to `document` and starts the timers of the banners the server
	/// already rendered. Calling it again while attached does nothing.
	pub fn attach(&self, document: &Document) {
		if self.is_attached() {
			return;
		}
		let container = document.element_by_id(&self.inner.container_id);
		{
			let mut state = self.inner.state.borrow_mut();
			state.document = Some(document.clone());
			state.container = container;
		}

		let existing = document.elements_by_class(document.body(), BANNER_CLASS);
		for banner in &existing {
			self.inner.track(document, *banner);
		}
		tracing::debug!(banners = existing.len(), "notification center attached");
	}

	/// Cancels pending removals and stops handling close buttons.
	///
	/// Banners still on the page stay there.
	pub fn detach(&self) {
		let state = std::mem::take(&mut *self.inner.state.borrow_mut());
		for (_, handle) in state.timers {
			self.inner.scheduler.cancel(handle);
		}
		if let Some(document) = state.document {
			for id in state.listeners.into_values().flatten() {
				document.remove_event_listener(id);
			}
		}
	}

	/// Adds a banner for `message` and schedules its removal
	///
	/// # Errors
	///
	/// Returns [`ControllerError::NotAttached`] before [`attach`](Self::attach).
	pub fn show(&self, message: &Message) -> ControllerResult<NodeId> {
		let (document, container) = {
			let state = self.inner.state.borrow();
			let document = state.document.clone().ok_or(ControllerError::NotAttached)?;
			(document, state.container)
		};
		let parent = container
			.filter(|c| document.is_attached(*c))
			.unwrap_or_else(|| document.body());

		let banner = render::render_alert(&document, parent, message);
		self.inner.track(&document, banner);
		tracing::debug!(?banner, level = message.level.as_str(), "banner shown");
		Ok(banner)
	}

	/// Shorthand for [`show`](Self::show) with a plain message
	pub fn notify(&self, level: Level, text: &str) -> ControllerResult<NodeId> {
		self.show(&Message::new(level, text))
	}

	/// Removes a banner now and cancels its pending removal.
	///
	/// Returns `false` if the banner was no longer on the page.
	pub fn dismiss(&self, banner: NodeId) -> bool {
		self.inner.dismiss(banner)
	}

	/// Banners waiting for removal, in creation order
	pub fn active(&self) -> Vec<NodeId> {
		let state = self.inner.state.borrow();
		let mut banners: Vec<NodeId> = state.timers.keys().copied().collect();
		banners.sort();
		banners
	}
}

impl Inner {
	fn track(self: &Rc<Self>, document: &Document, banner: NodeId) {
		let weak = Rc::downgrade(self);
		let handle = self.scheduler.schedule(
			self.dismiss_after,
			Box::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner.expire(banner);
				}
			}),
		);

		let mut listeners = Vec::new();
		for close in document.elements_by_class(banner, CLOSE_CLASS) {
			let weak: Weak<Inner> = Rc::downgrade(self);
			listeners.push(document.add_event_listener(close, EventKind::Click, move |_, _| {
				if let Some(inner) = weak.upgrade() {
					inner.dismiss(banner);
				}
			}));
		}

		let (previous_timer, previous_listeners) = {
			let mut state = self.state.borrow_mut();
			(
				state.timers.insert(banner, handle),
				state.listeners.insert(banner, listeners),
			)
		};
		if let Some(previous) = previous_timer {
			self.scheduler.cancel(previous);
		}
		for id in previous_listeners.into_iter().flatten() {
			document.remove_event_listener(id);
		}
	}

	/// Forgets a banner's timer and close-button listeners
	fn untrack(&self, banner: NodeId) -> (Option<TaskHandle>, Option<Document>) {
		let (handle, listeners, document) = {
			let mut state = self.state.borrow_mut();
			(
				state.timers.remove(&banner),
				state.listeners.remove(&banner),
				state.document.clone(),
			)
		};
		if let Some(document) = &document {
			for id in listeners.into_iter().flatten() {
				document.remove_event_listener(id);
			}
		}
		(handle, document)
	}

	fn expire(&self, banner: NodeId) {
		let (_, document) = self.untrack(banner);
		let Some(document) = document else {
			return;
		};
		if document.remove(banner) {
			tracing::debug!(?banner, "banner expired");
		} else {
			tracing::debug!(?banner, "banner already gone, nothing to remove");
		}
	}

	fn dismiss(&self, banner: NodeId) -> bool {
		let (handle, document) = self.untrack(banner);
		if let Some(handle) = handle {
			self.scheduler.cancel(handle);
		}
		let removed = document.is_some_and(|doc| doc.remove(banner));
		tracing::debug!(?banner, removed, "banner dismissed");
		removed
	}
}
