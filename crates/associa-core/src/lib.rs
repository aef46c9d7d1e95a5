//! # Associa Core
//!
//! Trial-by-trial computation of a Pearce-Hall associability reinforcement
//! learning model on a two-armed bandit.
//!
//! ## Why Associability?
//!
//! A plain delta-rule learner moves its estimates by a fixed fraction of each
//! prediction error. People don't: after a surprise they learn faster, and
//! once outcomes become predictable they settle down. Associability is the
//! per-option learning gain that captures this:
//!
//! - **Surprise raises it** - large `|δ|` pulls `κ` up
//! - **Predictability lowers it** - small `|δ|` lets `κ` decay
//! - **It never vanishes** - a floor keeps every option learnable
//!
//! ## The Model
//!
//! For the option `c` chosen on trial `t`:
//!
//! ```text
//! P_t(k)     = e^(β·V_t(k)) / Σ_j e^(β·V_t(j))
//! δ_t        = r_t(c) - V_t(c)
//! κ_{t+1}(c) = max((1 - η)·κ_t(c) + η·|δ_t|, 0.5)
//! V_{t+1}(c) = V_t(c) + α·κ_t(c)·δ_t
//! ```
//!
//! Starting from `V_1 = [V0, 1 - V0]` and `κ_1 = [1, 1]`.
//!
//! ## Two Modes
//!
//! 1. **Fit** - replay observed choices and accumulate `Σ ln P_t(c_t)`, the
//!    objective a maximum-likelihood driver optimizes
//! 2. **Simulate** - draw each choice from the model's own policy using a
//!    caller-supplied RNG, so simulations are reproducible from a seed
//!
//! ## Example
//!
//! ```rust
//! use associa_core::{fit, ModelParams, RewardMatrix};
//!
//! let params = ModelParams::new(0.3, 2.0, 0.5, 0.5);
//! let rewards = RewardMatrix::from_rows(vec![
//!     vec![1.0, 0.0, 1.0],
//!     vec![0.0, 1.0, 0.0],
//! ])?;
//!
//! let out = fit(&params, &rewards, &[1, 2, 1])?;
//!
//! assert_eq!(out.probabilities[0], [0.5, 0.5]);
//! assert!((out.expected_reward[1][0] - 0.65).abs() < 1e-12);
//! println!("log-likelihood: {:.4}", out.log_likelihood);
//! # Ok::<(), associa_core::ModelError>(())
//! ```
//!
//! Simulation takes any [`rand::RngCore`]:
//!
//! ```rust
//! use associa_core::{simulate, ModelParams, RewardMatrix};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let rewards = RewardMatrix::new(vec![1.0; 20], vec![0.0; 20])?;
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let out = simulate(&ModelParams::default(), &rewards, &mut rng)?;
//! assert_eq!(out.sim_choices.map(|c| c.len()), Some(20));
//! # Ok::<(), associa_core::ModelError>(())
//! ```
//!
//! ## References
//!
//! - Pearce, J. M., & Hall, G. (1980). *A model for Pavlovian learning:
//!   Variations in the effectiveness of conditioned but not of unconditioned
//!   stimuli*
//! - Li, J., Schiller, D., Schoenbaum, G., Phelps, E. A., & Daw, N. D. (2011).
//!   *Differential roles of human striatum and amygdala in associative
//!   learning*

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod error;
pub mod model;
pub mod objective;
pub mod params;
pub mod policy;
pub mod transform;

pub use data::{validate_choices, RewardMatrix, N_CHOICES};
pub use error::{ModelError, Result};
pub use model::{evaluate, evaluate_with_config, fit, simulate, Mode, ModelOutput, TrialState};
pub use objective::{
	best_fit, log_likelihood, log_likelihood_batch, negative_log_likelihood,
	negative_log_likelihood_unconstrained, FitResult,
};
pub use params::{Degeneracy, ModelConfig, ModelParams};
pub use policy::{log_choice_probability, log_sum_exp, sample_choice, softmax};
pub use transform::{logistic, logit, ConstrainedParams};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	#[test]
	fn test_output_serializes() {
		let rewards = RewardMatrix::new(vec![1.0, 0.0], vec![0.0, 1.0]).unwrap();
		let out = fit(&ModelParams::default(), &rewards, &[1, 2]).unwrap();

		let json = serde_json::to_string(&out).unwrap();
		let back: ModelOutput = serde_json::from_str(&json).unwrap();
		assert_eq!(back.choices(), out.choices());
		assert_eq!(back.rewards, out.rewards);
		assert!(back.sim_choices.is_none());
	}
}
