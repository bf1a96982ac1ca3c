//! Password strength scoring

use serde::{Deserialize, Serialize};

/// Highest score [`password_strength`] can return
pub const MAX_STRENGTH: u8 = 5;

/// Scores a password from 0 to 5.
///
/// One point each for: at least 8 characters, a lowercase letter, an
/// uppercase letter, a digit, a character that is not an ASCII letter or
/// digit.
///
/// # Examples
///
/// ```
/// use attendo_forms::strength::password_strength;
///
/// assert_eq!(password_strength(""), 0);
/// assert_eq!(password_strength("abc"), 1);
/// assert_eq!(password_strength("Abcdef1!"), 5);
/// ```
pub fn password_strength(value: &str) -> u8 {
	let checks = [
		value.chars().count() >= 8,
		value.chars().any(|c| c.is_ascii_lowercase()),
		value.chars().any(|c| c.is_ascii_uppercase()),
		value.chars().any(|c| c.is_ascii_digit()),
		value.chars().any(|c| !c.is_ascii_alphanumeric()),
	];
	checks.iter().filter(|passed| **passed).count() as u8
}

/// Coarse strength bucket used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthTier {
	Weak,
	Medium,
	Strong,
}

impl StrengthTier {
	/// Every class a tier can set, for clearing the previous one
	pub const CSS_CLASSES: [&'static str; 3] =
		["strength-weak", "strength-medium", "strength-strong"];

	/// Maps a score to its tier: below 3 is weak, 5 is strong
	///
	/// # Examples
	///
	/// ```
	/// use attendo_forms::strength::StrengthTier;
	///
	/// assert_eq!(StrengthTier::from_score(2), StrengthTier::Weak);
	/// assert_eq!(StrengthTier::from_score(3), StrengthTier::Medium);
	/// assert_eq!(StrengthTier::from_score(4), StrengthTier::Medium);
	/// assert_eq!(StrengthTier::from_score(5), StrengthTier::Strong);
	/// ```
	pub fn from_score(score: u8) -> Self {
		match score {
			0..=2 => StrengthTier::Weak,
			3..=4 => StrengthTier::Medium,
			_ => StrengthTier::Strong,
		}
	}

	pub fn of(password: &str) -> Self {
		Self::from_score(password_strength(password))
	}

	pub fn css_class(&self) -> &'static str {
		match self {
			StrengthTier::Weak => "strength-weak",
			StrengthTier::Medium => "strength-medium",
			StrengthTier::Strong => "strength-strong",
		}
	}
}
