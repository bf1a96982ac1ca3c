//! Form model and validation rules
//!
//! This module provides access to attendo-forms:
//!
//! - **Form model**: fields, their validation state and the submission
//!   state machine
//! - **Rule table**: which checks run for which field, overridable from TOML
//! - **Password strength**: a 0..=5 score and its weak/medium/strong tier
//! - **Presets**: the application's registration, login, password change,
//!   profile and department forms
//!
//! ## Example
//!
//! ```
//! use attendo::forms::{RuleSet, presets};
//!
//! let rules = RuleSet::standard();
//! let mut form = presets::login().to_form().unwrap();
//!
//! form.set_value("username", "EMP001", &rules).unwrap();
//! assert!(!form.validate(&rules));
//! ```

pub use attendo_forms::*;
