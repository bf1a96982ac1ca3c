//! # Attendo
//!
//! Client-side form handling for the attendo attendance and HR application.
//!
//! Attendo keeps every form on a page honest before it reaches the server:
//! fields are checked as the user types, submissions with errors are
//! blocked, password fields show a strength hint, and flash messages fade
//! out on their own.
//!
//! ## Feature Flags
//!
//! - `forms` - Form model, rule table, password strength and form presets
//! - `pages` (default) - Document model, form controller and notification banners
//!
//! Validators and message levels from [`core`] are always available.
//!
//! ## Quick Example
//!
//! ```
//! # #[cfg(feature = "pages")]
//! # {
//! use attendo::prelude::*;
//! use std::rc::Rc;
//!
//! let doc = Document::from_forms(&[presets::registration()]);
//! let page = PageController::new(PageSettings::default(), Rc::new(ManualScheduler::new()));
//! page.attach(&doc);
//!
//! let email = doc.element_by_id("id_email").unwrap();
//! doc.input(email, "not-an-email");
//! assert!(doc.has_class(email, "is-invalid"));
//! # }
//! ```

pub mod core;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "pages")]
pub mod pages;

pub use attendo_core::{Level, Message};

#[cfg(feature = "forms")]
pub use attendo_forms::{
	FieldError, FieldErrorKind, Form, FormError, FormMetadata, RuleSet, StrengthTier,
	SubmissionState, password_strength,
};

#[cfg(feature = "pages")]
pub use attendo_pages::{
	ControllerError, Document, FormController, NotificationCenter, PageController,
	PageSettings,
};

/// Commonly used items
pub mod prelude {
	pub use crate::core::{Level, Message};

	#[cfg(feature = "forms")]
	pub use crate::forms::{
		FieldErrorKind, FieldMetadata, FieldType, Form, FormMetadata, RuleSet, StrengthTier,
		SubmissionState, presets,
	};

	#[cfg(feature = "pages")]
	pub use crate::pages::{
		Document, Event, EventKind, ManualScheduler, NodeId, PageController, PageSettings,
		Scheduler, TokioScheduler,
	};
}
