//! Message type

use crate::messages::levels::Level;
use serde::{Deserialize, Serialize};

/// A one-time notification shown to the user as a banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	pub level: Level,
	pub text: String,
	#[serde(default)]
	pub extra_tags: Vec<String>,
}

impl Message {
	/// Creates a new message with the given level and text
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::messages::{Level, Message};
	///
	/// let message = Message::new(Level::Info, "You have been logged out successfully.");
	/// assert_eq!(message.level, Level::Info);
	/// assert!(message.extra_tags.is_empty());
	/// ```
	pub fn new(level: Level, text: impl Into<String>) -> Self {
		Self {
			level,
			text: text.into(),
			extra_tags: Vec::new(),
		}
	}

	pub fn info(text: impl Into<String>) -> Self {
		Self::new(Level::Info, text)
	}

	pub fn success(text: impl Into<String>) -> Self {
		Self::new(Level::Success, text)
	}

	pub fn warning(text: impl Into<String>) -> Self {
		Self::new(Level::Warning, text)
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self::new(Level::Error, text)
	}

	pub fn with_tags(mut self, tags: Vec<String>) -> Self {
		self.extra_tags = tags;
		self
	}

	/// Space-separated tag string: extra tags followed by the level tag
	///
	/// # Examples
	///
	/// ```
	/// use attendo_core::messages::Message;
	///
	/// let message = Message::success("Saved").with_tags(vec!["sticky".to_string()]);
	/// assert_eq!(message.tags(), "sticky success");
	/// ```
	pub fn tags(&self) -> String {
		let mut tags = self.extra_tags.clone();
		tags.push(self.level.as_str().to_string());
		tags.join(" ")
	}
}
