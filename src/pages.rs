//! Page runtime
//!
//! This module provides access to attendo-pages, which binds forms and
//! flash messages to a document.
//!
//! ## Architecture
//!
//! - **Document**: element tree with classes, values and event listeners
//! - **Form controller**: live validation, submit blocking, processing
//!   indicator and reset
//! - **Notifications**: banners removed after a configurable delay
//! - **Scheduler**: deferred tasks on a manual clock or on tokio timers
//!
//! ## Example
//!
//! ```
//! use attendo::core::Level;
//! use attendo::pages::{Document, ManualScheduler, PageController, PageSettings};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let doc = Document::new();
//! let scheduler = ManualScheduler::new();
//! let page = PageController::new(PageSettings::default(), Rc::new(scheduler.clone()));
//! page.attach(&doc);
//!
//! let banner = page.notifications().notify(Level::Success, "Clocked in").unwrap();
//! scheduler.advance(Duration::from_secs(5));
//! assert!(!doc.is_attached(banner));
//! ```

pub use attendo_pages::*;
