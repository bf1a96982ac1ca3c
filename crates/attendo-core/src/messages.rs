//! Message levels for notification banners
//!
//! Banners shown at the top of a page (e.g. "Profile updated successfully!")
//! carry a [`Level`] that decides their styling. Field-level validation
//! errors are not messages; they live next to their field.

pub mod levels;
pub mod message;

pub use levels::Level;
pub use message::Message;
