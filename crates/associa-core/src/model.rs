//! Associability Model
//!
//! A Pearce-Hall style learner: each option carries an expected value `V` and
//! an associability `κ` that scales how far a prediction error moves `V`.
//! Associability rises after surprising outcomes and relaxes toward the floor
//! when outcomes are predicted well.
//!
//! Per trial `t`, with `c` the realized choice and `r` its reward:
//!
//! ```text
//! P_t(k)    = softmax(β · V_t)(k)
//! δ_t       = r_t(c) - V_t(c)
//! κ_{t+1}(c) = max((1 - η)·κ_t(c) + η·|δ_t|, κ_min)
//! V_{t+1}(c) = V_t(c) + α · κ_t(c) · δ_t
//! ```
//!
//! Unchosen options carry `V` and `κ` forward unchanged (then floored).
//! Note the value update uses the *pre-update* associability `κ_t(c)`.
//!
//! Initial state is `V_1 = [V0, 1 - V0]`, `κ_1 = [1, 1]`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::data::{validate_choices, RewardMatrix, N_CHOICES};
use crate::error::Result;
use crate::params::{ModelConfig, ModelParams};
use crate::policy::{log_choice_probability, sample_choice, softmax};

/// How the realized choice on each trial is obtained.
pub enum Mode<'a> {
	/// Replay observed 1-based choices and score them (likelihood fitting).
	Fit(&'a [usize]),
	/// Sample each choice from the model's own policy.
	Simulate(&'a mut dyn RngCore),
}

impl Mode<'_> {
	/// Short name for logs.
	#[must_use]
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Fit(_) => "fit",
			Self::Simulate(_) => "simulate",
		}
	}
}

/// Everything one evaluation produces.
///
/// Per-trial columns are indexed `[trial][option]`, both zero-based; choice
/// sequences are 1-based like the input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelOutput {
	/// Observed choices (fit mode only)
	pub observed_choices: Option<Vec<usize>>,
	/// Sampled choices (simulate mode only)
	pub sim_choices: Option<Vec<usize>>,
	/// Reward schedule the model was run against
	pub rewards: RewardMatrix,
	/// `V_t` entering each trial
	pub expected_reward: Vec<[f64; N_CHOICES]>,
	/// `δ_t` for the realized choice on each trial
	pub prediction_errors: Vec<f64>,
	/// Softmax policy on each trial
	pub probabilities: Vec<[f64; N_CHOICES]>,
	/// Probability the policy gave the realized choice
	pub act_probs: Vec<f64>,
	/// `κ_t` entering each trial
	pub associability: Vec<[f64; N_CHOICES]>,
	/// `Σ_t ln P_t(c_t)` over the realized choices
	pub log_likelihood: f64,
}

impl ModelOutput {
	/// Number of trials evaluated.
	#[must_use]
	pub const fn n_trials(&self) -> usize {
		self.act_probs.len()
	}

	/// The realized 1-based choice sequence, observed or sampled.
	#[must_use]
	pub fn choices(&self) -> &[usize] {
		self.observed_choices
			.as_deref()
			.or(self.sim_choices.as_deref())
			.unwrap_or_default()
	}
}

// ============================================================================
// Trial State
// ============================================================================

/// Learner state entering a trial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialState {
	/// Expected value of each option
	pub values: [f64; N_CHOICES],
	/// Associability of each option
	pub associability: [f64; N_CHOICES],
}

impl TrialState {
	/// State entering the first trial.
	///
	/// The initial associability is held to the floor like every later value.
	#[must_use]
	pub const fn initial(params: &ModelParams, config: &ModelConfig) -> Self {
		let associability = config
			.initial_associability
			.max(config.associability_floor);
		Self {
			values: params.initial_values(),
			associability: [associability; N_CHOICES],
		}
	}

	/// Softmax policy for this state.
	#[must_use]
	pub fn policy(&self, beta: f64) -> [f64; N_CHOICES] {
		softmax(&self.values, beta)
	}

	/// Apply one trial's outcome and return the prediction error.
	///
	/// `choice` is zero-based. The value update is scaled by the associability
	/// held *before* this call.
	pub fn update(
		&mut self,
		choice: usize,
		reward: f64,
		params: &ModelParams,
		config: &ModelConfig,
	) -> f64 {
		let prediction_error = reward - self.values[choice];
		let prior_associability = self.associability[choice];

		self.associability[choice] =
			(1.0 - params.eta).mul_add(prior_associability, params.eta * prediction_error.abs());
		self.associability = self
			.associability
			.map(|a| a.max(config.associability_floor));

		self.values[choice] =
			(params.alpha * prior_associability).mul_add(prediction_error, self.values[choice]);

		prediction_error
	}
}

/// Where each trial's choice comes from during the loop.
enum ChoiceSource<'a> {
	Observed(Vec<usize>),
	Sampled {
		rng: &'a mut dyn RngCore,
		drawn: Vec<usize>,
	},
}

impl ChoiceSource<'_> {
	fn choose(&mut self, trial: usize, probabilities: &[f64; N_CHOICES]) -> usize {
		match self {
			Self::Observed(choices) => choices[trial],
			Self::Sampled { rng, drawn } => {
				let choice = sample_choice(&mut **rng, probabilities);
				drawn.push(choice);
				choice
			}
		}
	}

	fn into_choices(self) -> (Option<Vec<usize>>, Option<Vec<usize>>) {
		let one_based = |v: Vec<usize>| -> Vec<usize> { v.into_iter().map(|c| c + 1).collect() };
		match self {
			Self::Observed(choices) => (Some(one_based(choices)), None),
			Self::Sampled { drawn, .. } => (None, Some(one_based(drawn))),
		}
	}
}

// ============================================================================
// Evaluation
// ============================================================================

/// Run the model over every trial with the default [`ModelConfig`].
///
/// # Errors
///
/// See [`evaluate_with_config`].
pub fn evaluate(
	params: &ModelParams,
	rewards: &RewardMatrix,
	mode: Mode<'_>,
) -> Result<ModelOutput> {
	evaluate_with_config(params, rewards, mode, &ModelConfig::default())
}

/// Run the model over every trial.
///
/// In [`Mode::Fit`] the observed choices are validated up front; no trial is
/// evaluated if any is malformed. In [`Mode::Simulate`] each choice is drawn
/// from the current policy, and the log-likelihood of the sampled sequence is
/// still accumulated.
///
/// Degenerate parameters are evaluated as given; see
/// [`ModelParams::degeneracies`].
///
/// # Errors
///
/// Returns [`crate::ModelError::ShapeMismatch`] if the choice sequence length
/// differs from the number of trials, and
/// [`crate::ModelError::InvalidChoiceIndex`] for a choice outside
/// `[1, N_CHOICES]`.
#[instrument(level = "debug", skip_all, fields(trials = rewards.n_trials(), mode = mode.name()))]
pub fn evaluate_with_config(
	params: &ModelParams,
	rewards: &RewardMatrix,
	mode: Mode<'_>,
	config: &ModelConfig,
) -> Result<ModelOutput> {
	let n_trials = rewards.n_trials();

	let mut source = match mode {
		Mode::Fit(choices) => ChoiceSource::Observed(validate_choices(choices, n_trials)?),
		Mode::Simulate(rng) => ChoiceSource::Sampled {
			rng,
			drawn: Vec::with_capacity(n_trials),
		},
	};

	if config.warn_on_degenerate {
		for degeneracy in params.degeneracies() {
			warn!(?degeneracy, ?params, "{}", degeneracy.describe());
		}
	}

	let mut state = TrialState::initial(params, config);
	let mut expected_reward = Vec::with_capacity(n_trials);
	let mut associability = Vec::with_capacity(n_trials);
	let mut probabilities = Vec::with_capacity(n_trials);
	let mut prediction_errors = Vec::with_capacity(n_trials);
	let mut act_probs = Vec::with_capacity(n_trials);
	let mut log_likelihood = 0.0;

	for trial in 0..n_trials {
		let policy = state.policy(params.beta);
		let choice = source.choose(trial, &policy);

		act_probs.push(policy[choice]);
		log_likelihood += log_choice_probability(&state.values, params.beta, choice);

		expected_reward.push(state.values);
		associability.push(state.associability);
		probabilities.push(policy);

		// State after the final trial is never reported
		let prediction_error =
			state.update(choice, rewards.reward(choice, trial), params, config);
		prediction_errors.push(prediction_error);
	}

	debug!(log_likelihood, "evaluation complete");

	let (observed_choices, sim_choices) = source.into_choices();
	Ok(ModelOutput {
		observed_choices,
		sim_choices,
		rewards: rewards.clone(),
		expected_reward,
		prediction_errors,
		probabilities,
		act_probs,
		associability,
		log_likelihood,
	})
}

/// Score an observed choice sequence.
///
/// # Errors
///
/// See [`evaluate_with_config`].
pub fn fit(params: &ModelParams, rewards: &RewardMatrix, choices: &[usize]) -> Result<ModelOutput> {
	evaluate(params, rewards, Mode::Fit(choices))
}

/// Generate a choice sequence from the model's own policy.
///
/// # Errors
///
/// Never fails for a valid [`RewardMatrix`]; the `Result` mirrors [`evaluate`].
pub fn simulate<R: RngCore>(
	params: &ModelParams,
	rewards: &RewardMatrix,
	rng: &mut R,
) -> Result<ModelOutput> {
	evaluate(params, rewards, Mode::Simulate(rng))
}
