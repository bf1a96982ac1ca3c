//! Client-side form model for attendo
//!
//! This crate provides the data side of form interaction:
//! - [`FormField`] and [`Form`] with their validation and submission states
//! - A configurable rule table ([`RuleSet`]) evaluated field by field
//! - Password strength scoring ([`strength`])
//! - Serializable form metadata and the application's form [`presets`]
//!
//! It holds no page state; `attendo-pages` binds it to a document.
//!
//! ## Example
//!
//! ```
//! use attendo_forms::{presets, RuleSet, SubmissionState};
//!
//! let rules = RuleSet::standard();
//! let mut form = presets::login().to_form().unwrap();
//!
//! assert!(!form.begin_submit(&rules));
//! assert_eq!(form.submission_state(), SubmissionState::Blocked);
//! assert_eq!(form.errors().len(), 2);
//!
//! form.set_value("username", "EMP002", &rules).unwrap();
//! form.set_value("password", "hunter22", &rules).unwrap();
//! assert!(form.begin_submit(&rules));
//! ```

pub mod error;
pub mod field;
pub mod form;
pub mod metadata;
pub mod presets;
pub mod rules;
pub mod strength;

pub use error::{FieldError, FieldErrorKind, FormError, FormResult};
pub use field::{FieldType, FormField, ValidationState};
pub use form::{Form, SubmissionState};
pub use metadata::{FieldMetadata, FormMetadata};
pub use rules::{MIN_PASSWORD_LENGTH, Rule, RuleSet, ValidationResult};
pub use strength::{StrengthTier, password_strength};
