//! Error types for model evaluation.

/// Errors that can occur when evaluating the model.
///
/// Only malformed inputs are errors. Out-of-range parameters are not: they
/// produce degenerate but well-defined output (see [`crate::params::Degeneracy`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
	/// An input array does not have the shape the model requires.
	#[error("Shape mismatch in {what}: expected {expected}, found {found}")]
	ShapeMismatch {
		/// Which input was malformed
		what: &'static str,
		/// Expected extent
		expected: usize,
		/// Actual extent
		found: usize,
	},

	/// The reward matrix has no trials.
	#[error("Reward matrix has no trials; at least one is required")]
	NoTrials,

	/// A 1-based choice index outside `[1, N_CHOICES]`.
	#[error("Invalid choice {value} at trial {trial}: must be in [1, {max}]")]
	InvalidChoiceIndex {
		/// Zero-based trial position
		trial: usize,
		/// Offending value
		value: usize,
		/// Largest valid choice
		max: usize,
	},
}

impl ModelError {
	/// Check if this error came from an input with the wrong dimensions.
	#[must_use]
	pub const fn is_shape_error(&self) -> bool {
		matches!(self, Self::ShapeMismatch { .. } | Self::NoTrials)
	}

	/// Check if this error came from a bad entry in the choice sequence.
	#[must_use]
	pub const fn is_choice_error(&self) -> bool {
		matches!(self, Self::InvalidChoiceIndex { .. })
	}
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_classification() {
		let shape = ModelError::ShapeMismatch {
			what: "reward rows",
			expected: 2,
			found: 3,
		};
		assert!(shape.is_shape_error());
		assert!(!shape.is_choice_error());
		assert!(ModelError::NoTrials.is_shape_error());

		let choice = ModelError::InvalidChoiceIndex {
			trial: 4,
			value: 0,
			max: 2,
		};
		assert!(choice.is_choice_error());
		assert!(!choice.is_shape_error());
	}

	#[test]
	fn test_error_messages() {
		let err = ModelError::InvalidChoiceIndex {
			trial: 4,
			value: 3,
			max: 2,
		};
		assert_eq!(err.to_string(), "Invalid choice 3 at trial 4: must be in [1, 2]");
	}
}
