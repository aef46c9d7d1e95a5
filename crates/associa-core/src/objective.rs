//! Fitting Objectives
//!
//! Thin scoring functions for an external optimizer. They compute the same
//! log-likelihood as [`crate::model::evaluate`] without materializing the
//! per-trial traces, so they are cheap to call many times.
//!
//! With the `parallel` feature, batch scoring fans parameter sets out over
//! rayon's thread pool. Each evaluation is independent and shares no state.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{validate_choices, RewardMatrix};
use crate::error::Result;
use crate::model::TrialState;
use crate::params::{ModelConfig, ModelParams};
use crate::policy::log_choice_probability;

/// A scored parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
	/// Parameters that were scored
	pub params: ModelParams,
	/// Their log-likelihood on the data
	pub log_likelihood: f64,
}

/// Log-likelihood over pre-validated zero-based choices.
fn score(
	params: &ModelParams,
	rewards: &RewardMatrix,
	choices: &[usize],
	config: &ModelConfig,
) -> f64 {
	let mut state = TrialState::initial(params, config);

	choices
		.iter()
		.enumerate()
		.fold(0.0, |total, (trial, &choice)| {
			let log_p = log_choice_probability(&state.values, params.beta, choice);
			let _ = state.update(choice, rewards.reward(choice, trial), params, config);
			total + log_p
		})
}

/// Log-likelihood of observed 1-based choices.
///
/// # Errors
///
/// Returns [`crate::ModelError::ShapeMismatch`] or
/// [`crate::ModelError::InvalidChoiceIndex`] for a malformed choice sequence.
pub fn log_likelihood(
	params: &ModelParams,
	rewards: &RewardMatrix,
	choices: &[usize],
) -> Result<f64> {
	let choices = validate_choices(choices, rewards.n_trials())?;
	Ok(score(params, rewards, &choices, &ModelConfig::default()))
}

/// Negated log-likelihood, for minimizers.
///
/// # Errors
///
/// See [`log_likelihood`].
pub fn negative_log_likelihood(
	params: &ModelParams,
	rewards: &RewardMatrix,
	choices: &[usize],
) -> Result<f64> {
	log_likelihood(params, rewards, choices).map(|ll| -ll)
}

/// Negated log-likelihood at an unconstrained point.
///
/// The point is mapped through [`ModelParams::from_unconstrained`], so an
/// optimizer can search all of ℝ⁴.
///
/// # Errors
///
/// See [`log_likelihood`].
pub fn negative_log_likelihood_unconstrained(
	raw: [f64; 4],
	rewards: &RewardMatrix,
	choices: &[usize],
) -> Result<f64> {
	negative_log_likelihood(&ModelParams::from_unconstrained(raw), rewards, choices)
}

/// Score many parameter sets against one dataset.
///
/// Choices are validated once. Output order matches `param_sets`.
///
/// # Errors
///
/// See [`log_likelihood`].
pub fn log_likelihood_batch(
	param_sets: &[ModelParams],
	rewards: &RewardMatrix,
	choices: &[usize],
) -> Result<Vec<f64>> {
	let choices = validate_choices(choices, rewards.n_trials())?;
	let config = ModelConfig::default();

	#[cfg(feature = "parallel")]
	let scores = param_sets
		.par_iter()
		.map(|params| score(params, rewards, &choices, &config))
		.collect();

	#[cfg(not(feature = "parallel"))]
	let scores = param_sets
		.iter()
		.map(|params| score(params, rewards, &choices, &config))
		.collect();

	Ok(scores)
}

/// Highest-likelihood parameter set among `param_sets`.
///
/// NaN scores are skipped. Returns `None` if nothing scored.
///
/// # Errors
///
/// See [`log_likelihood`].
pub fn best_fit(
	param_sets: &[ModelParams],
	rewards: &RewardMatrix,
	choices: &[usize],
) -> Result<Option<FitResult>> {
	let scores = log_likelihood_batch(param_sets, rewards, choices)?;

	Ok(param_sets
		.iter()
		.zip(scores)
		.filter(|(_, ll)| !ll.is_nan())
		.max_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(&params, log_likelihood)| FitResult {
			params,
			log_likelihood,
		}))
}
