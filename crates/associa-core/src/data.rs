//! Task Data
//!
//! The reward schedule and observed choices a model is evaluated against.
//!
//! The model is a two-armed bandit learner: initial values are `[V0, 1 - V0]`,
//! so the number of options is fixed at [`N_CHOICES`] and enforced here rather
//! than left as a latent assumption of the trial loop.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Number of options the model chooses between.
pub const N_CHOICES: usize = 2;

/// Reward each option would have paid on each trial.
///
/// Shape is `N_CHOICES × T` with `T ≥ 1`. Only the chosen option's entry is
/// consumed on each trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct RewardMatrix {
	rows: [Vec<f64>; N_CHOICES],
}

impl RewardMatrix {
	/// Build from one reward row per option.
	///
	/// # Errors
	///
	/// Returns [`ModelError::ShapeMismatch`] if the rows differ in length and
	/// [`ModelError::NoTrials`] if they are empty.
	pub fn new(option_1: Vec<f64>, option_2: Vec<f64>) -> Result<Self> {
		if option_1.len() != option_2.len() {
			return Err(ModelError::ShapeMismatch {
				what: "reward row length",
				expected: option_1.len(),
				found: option_2.len(),
			});
		}
		if option_1.is_empty() {
			return Err(ModelError::NoTrials);
		}

		Ok(Self {
			rows: [option_1, option_2],
		})
	}

	/// Build from a row-major `N_CHOICES × T` nested vector.
	///
	/// # Errors
	///
	/// Returns [`ModelError::ShapeMismatch`] unless there are exactly
	/// [`N_CHOICES`] rows of equal length, and [`ModelError::NoTrials`] if the
	/// rows are empty.
	pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
		let found = rows.len();
		let Ok([option_1, option_2]) = <[Vec<f64>; N_CHOICES]>::try_from(rows) else {
			return Err(ModelError::ShapeMismatch {
				what: "reward rows",
				expected: N_CHOICES,
				found,
			});
		};
		Self::new(option_1, option_2)
	}

	/// Build from per-trial columns `[reward_option_1, reward_option_2]`.
	///
	/// # Errors
	///
	/// Returns [`ModelError::NoTrials`] if `trials` is empty.
	pub fn from_trials(trials: &[[f64; N_CHOICES]]) -> Result<Self> {
		let (option_1, option_2): (Vec<f64>, Vec<f64>) =
			trials.iter().copied().map(<(f64, f64)>::from).unzip();
		Self::new(option_1, option_2)
	}

	/// Number of trials `T`.
	#[inline]
	#[must_use]
	pub const fn n_trials(&self) -> usize {
		self.rows[0].len()
	}

	/// Reward for a zero-based `choice` on zero-based `trial`.
	///
	/// # Panics
	///
	/// Panics if either index is out of bounds.
	#[inline]
	#[must_use]
	pub fn reward(&self, choice: usize, trial: usize) -> f64 {
		self.rows[choice][trial]
	}

	/// Rewards of one option across all trials.
	#[must_use]
	pub fn row(&self, choice: usize) -> Option<&[f64]> {
		self.rows.get(choice).map(Vec::as_slice)
	}

	/// Rewards of every option on one trial.
	#[must_use]
	pub fn column(&self, trial: usize) -> Option<[f64; N_CHOICES]> {
		Some([*self.rows[0].get(trial)?, *self.rows[1].get(trial)?])
	}
}

impl TryFrom<Vec<Vec<f64>>> for RewardMatrix {
	type Error = ModelError;

	fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
		Self::from_rows(rows)
	}
}

impl From<RewardMatrix> for Vec<Vec<f64>> {
	fn from(matrix: RewardMatrix) -> Self {
		matrix.rows.into()
	}
}

// ============================================================================
// Choice Sequences
// ============================================================================

/// Validate a 1-based choice sequence and convert it to zero-based indices.
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`] if `choices.len() != n_trials` and
/// [`ModelError::InvalidChoiceIndex`] for the first entry outside
/// `[1, N_CHOICES]`.
pub fn validate_choices(choices: &[usize], n_trials: usize) -> Result<Vec<usize>> {
	if choices.len() != n_trials {
		return Err(ModelError::ShapeMismatch {
			what: "choice sequence length",
			expected: n_trials,
			found: choices.len(),
		});
	}

	choices
		.iter()
		.enumerate()
		.map(|(trial, &value)| {
			if (1..=N_CHOICES).contains(&value) {
				Ok(value - 1)
			} else {
				Err(ModelError::InvalidChoiceIndex {
					trial,
					value,
					max: N_CHOICES,
				})
			}
		})
		.collect()
}
