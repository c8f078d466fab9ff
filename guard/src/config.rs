use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_FORBIDDEN: &[char] = &['<', '>', ';'];

/// Tunables for `StructuralValidator`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
	/// Deepest nesting accepted before a value is judged invalid
	pub max_depth: usize,

	/// Characters no string may contain
	pub forbidden: Vec<char>,
}

impl Default for ValidatorConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			forbidden: DEFAULT_FORBIDDEN.to_vec(),
		}
	}
}

impl ValidatorConfig {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Every char of `chars` becomes forbidden; an empty string keeps the defaults
	pub fn with_forbidden(mut self, chars: &str) -> Self {
		if !chars.is_empty() {
			let mut forbidden = chars.chars().collect::<Vec<_>>();
			forbidden.sort_unstable();
			forbidden.dedup();
			self.forbidden = forbidden;
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = ValidatorConfig::default();
		assert_eq!(config.max_depth, 64);
		assert_eq!(config.forbidden, vec!['<', '>', ';']);
	}

	#[test]
	fn forbidden_from_string() {
		let config = ValidatorConfig::default().with_forbidden("''<<");
		assert_eq!(config.forbidden, vec!['\'', '<']);
		assert_eq!(ValidatorConfig::default().with_forbidden("").forbidden.len(), 3);
	}

	#[test]
	fn deserialize_partial() {
		let config: ValidatorConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
		assert_eq!(config, ValidatorConfig::default().with_max_depth(8));
	}
}
