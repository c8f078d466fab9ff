use std::fmt;

use derive_more::{Display, Error};

/// Outcome of validating one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
	Valid,
	Invalid,
}

impl Verdict {
	pub fn is_valid(&self) -> bool {
		matches!(self, Verdict::Valid)
	}
}

impl<E> From<Result<(), E>> for Verdict {
	fn from(value: Result<(), E>) -> Self {
		match value {
			Ok(_) => Verdict::Valid,
			Err(_) => Verdict::Invalid,
		}
	}
}

/// Why a value was judged invalid
#[derive(Display, Debug, Error, Clone, PartialEq, Eq)]
pub enum Reason {
	#[display(fmt = "value does not parse as a number")]
	MalformedNumber,

	#[display(fmt = "forbidden character {:?}", _0)]
	ForbiddenCharacter(#[error(not(source))] char),

	#[display(fmt = "nesting deeper than {}", _0)]
	DepthExceeded(#[error(not(source))] usize),

	#[display(fmt = "fields could not be read")]
	Unreadable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	Field(String),
	Index(usize),
}

/// Location of a value inside an argument, e.g. `nested.tags[1]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
	pub fn segments(&self) -> &[Segment] {
		&self.0
	}

	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	/// Failures are built leaf first, so segments are added at the front
	pub(crate) fn prepend(&mut self, segment: Segment) {
		self.0.insert(0, segment);
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("$");
		}
		for (position, segment) in self.0.iter().enumerate() {
			match segment {
				Segment::Field(name) if position == 0 => write!(f, "{name}")?,
				Segment::Field(name) => write!(f, ".{name}")?,
				Segment::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

/// First failure found while inspecting a value
#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display(fmt = "{path}: {reason}")]
pub struct Rejection {
	pub path: FieldPath,
	pub reason: Reason,
}

impl Rejection {
	pub fn new(reason: Reason) -> Self {
		Self { path: FieldPath::default(), reason }
	}

	pub(crate) fn within(mut self, segment: Segment) -> Self {
		self.path.prepend(segment);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn path_renders_fields_and_indexes() {
		let rejection = Rejection::new(Reason::ForbiddenCharacter(';'))
			.within(Segment::Index(1))
			.within(Segment::Field("tags".into()))
			.within(Segment::Field("nested".into()));
		assert_eq!(rejection.path.to_string(), "nested.tags[1]");
		assert_eq!(rejection.to_string(), "nested.tags[1]: forbidden character ';'");
	}

	#[test]
	fn root_path() {
		let rejection = Rejection::new(Reason::DepthExceeded(64));
		assert!(rejection.path.is_root());
		assert_eq!(rejection.to_string(), "$: nesting deeper than 64");
	}

	#[test]
	fn verdict_from_result() {
		assert!(Verdict::from(Ok::<(), Reason>(())).is_valid());
		assert_eq!(Verdict::from(Err::<(), _>(Reason::Unreadable)), Verdict::Invalid);
	}
}
