//! Page runtime for attendo
//!
//! This crate binds the form model of `attendo-forms` to a page:
//!
//! - **Document**: in-memory page state with elements, classes, values and
//!   event listeners ([`Document`])
//! - **Form controller**: live validation, submit blocking and reset
//!   ([`FormController`])
//! - **Notifications**: banners removed after a delay or on close
//!   ([`NotificationCenter`])
//! - **Scheduler**: deferred tasks on a virtual clock or tokio
//!   ([`scheduler`])
//!
//! ## Example
//!
//! ```
//! use attendo_core::Message;
//! use attendo_forms::{presets, SubmissionState};
//! use attendo_pages::scheduler::ManualScheduler;
//! use attendo_pages::{Document, PageController, PageSettings};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let doc = Document::from_forms(&[presets::login()]);
//! let scheduler = ManualScheduler::new();
//! let page = PageController::new(PageSettings::default(), Rc::new(scheduler.clone()));
//! page.attach(&doc);
//!
//! // Submitting an empty login form is blocked
//! let form = doc.element_by_id("login-form").unwrap();
//! assert!(doc.submit(form).is_default_prevented());
//! assert_eq!(
//!     page.forms().submission_state("login-form").unwrap(),
//!     SubmissionState::Blocked
//! );
//!
//! let banner = page.notifications().show(&Message::error("Invalid credentials")).unwrap();
//! scheduler.advance(Duration::from_secs(5));
//! assert!(!doc.is_attached(banner));
//! ```

pub mod controller;
pub mod dom;
pub mod error;
pub mod events;
pub mod notifications;
pub mod page;
pub mod render;
pub mod scheduler;
pub mod settings;

pub use controller::FormController;
pub use dom::{Document, NodeId};
pub use error::{ControllerError, ControllerResult, SettingsError, SettingsResult};
pub use events::{Event, EventKind, ListenerId};
pub use notifications::NotificationCenter;
pub use page::PageController;
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TokioScheduler};
pub use settings::{ClassNames, PageSettings};
