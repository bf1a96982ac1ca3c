//! Page-scoped entry point

use crate::controller::FormController;
use crate::dom::Document;
use crate::notifications::NotificationCenter;
use crate::scheduler::Scheduler;
use crate::settings::PageSettings;
use std::rc::Rc;

/// Everything one page view needs, bound through a single [`attach`]
///
/// [`attach`]: PageController::attach
#[derive(Debug, Clone)]
pub struct PageController {
	forms: FormController,
	notifications: NotificationCenter,
}

impl PageController {
	pub fn new(settings: PageSettings, scheduler: Rc<dyn Scheduler>) -> Self {
		let notifications = NotificationCenter::new(scheduler, &settings);
		Self {
			forms: FormController::new(settings),
			notifications,
		}
	}

	/// Binds forms and banners; repeated calls do nothing
	pub fn attach(&self, document: &Document) {
		self.forms.attach(document);
		self.notifications.attach(document);
	}

	pub fn detach(&self) {
		self.forms.detach();
		self.notifications.detach();
	}

	pub fn is_attached(&self) -> bool {
		self.forms.is_attached()
	}

	pub fn forms(&self) -> &FormController {
		&self.forms
	}

	pub fn notifications(&self) -> &NotificationCenter {
		&self.notifications
	}
}
