//! Validators and message levels.
//!
//! # Examples
//!
//! ```
//! use attendo::core::Level;
//!
//! assert_eq!(Level::Error.css_class(), "alert-danger");
//! ```

pub use attendo_core::*;
