//! Model Parameters
//!
//! The four free parameters of the associability model and the handful of
//! structural constants that are fixed across fits.
//!
//! | Parameter | Role                                   | Well-defined range |
//! |-----------|----------------------------------------|--------------------|
//! | `alpha`   | learning rate                          | `[0, 1]`           |
//! | `beta`    | inverse temperature of the softmax     | `> 0`              |
//! | `v0`      | initial value of option 1 (`1 - v0` for option 2) | `[0, 1]` |
//! | `eta`     | associability update weight            | `[0, 1]`           |
//!
//! Nothing here rejects out-of-range values. The model is evaluated inside
//! optimizer loops, and the optimizer owns the search region.

use serde::{Deserialize, Serialize};

use crate::transform::{logistic, logit};

/// Free parameters of the associability model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
	/// Learning rate
	pub alpha: f64,
	/// Inverse temperature (exploitation)
	pub beta: f64,
	/// Initial expected value of option 1
	pub v0: f64,
	/// Associability update weight
	pub eta: f64,
}

impl ModelParams {
	/// Create a parameter set.
	#[must_use]
	pub const fn new(alpha: f64, beta: f64, v0: f64, eta: f64) -> Self {
		Self {
			alpha,
			beta,
			v0,
			eta,
		}
	}

	/// Initial expected values `[v0, 1 - v0]`.
	#[inline]
	#[must_use]
	pub const fn initial_values(&self) -> [f64; 2] {
		[self.v0, 1.0 - self.v0]
	}

	/// Map an unconstrained vector `[a, b, v, e]` onto the well-defined region.
	///
	/// - `alpha = σ(a)`
	/// - `beta = e^b`
	/// - `v0 = σ(v)`
	/// - `eta = σ(e)`
	///
	/// Lets a fitting driver search all of ℝ⁴ without producing degenerate
	/// parameter sets.
	#[must_use]
	pub fn from_unconstrained(raw: [f64; 4]) -> Self {
		Self {
			alpha: logistic(raw[0]),
			beta: raw[1].exp(),
			v0: logistic(raw[2]),
			eta: logistic(raw[3]),
		}
	}

	/// Inverse of [`Self::from_unconstrained`].
	///
	/// Values on the boundary of the range map to infinities.
	#[must_use]
	pub fn to_unconstrained(&self) -> [f64; 4] {
		[
			logit(self.alpha),
			self.beta.ln(),
			logit(self.v0),
			logit(self.eta),
		]
	}

	/// List the documented degenerate regimes this parameter set falls into.
	///
	/// An empty list means the softmax and associability recurrences are
	/// well-defined.
	#[must_use]
	pub fn degeneracies(&self) -> Vec<Degeneracy> {
		let mut found = Vec::new();

		if ![self.alpha, self.beta, self.v0, self.eta]
			.iter()
			.all(|p| p.is_finite())
		{
			found.push(Degeneracy::NonFinite);
		}
		if self.beta <= 0.0 {
			found.push(Degeneracy::NonPositiveBeta);
		}
		if !(0.0..=1.0).contains(&self.alpha) {
			found.push(Degeneracy::AlphaOutOfRange);
		}
		if !(0.0..=1.0).contains(&self.eta) {
			found.push(Degeneracy::EtaOutOfRange);
		}
		if !(0.0..=1.0).contains(&self.v0) {
			found.push(Degeneracy::InitialValueOutOfRange);
		}

		found
	}

	/// True when no degenerate regime applies.
	#[must_use]
	pub fn is_well_defined(&self) -> bool {
		self.degeneracies().is_empty()
	}
}

impl Default for ModelParams {
	fn default() -> Self {
		Self {
			alpha: 0.3,
			beta: 2.0,
			v0: 0.5,
			eta: 0.5,
		}
	}
}

/// Degenerate-but-legal parameter regimes.
///
/// These never change the model's output; they are reported so callers can
/// tell a flat likelihood surface from a bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degeneracy {
	/// At least one parameter is NaN or infinite
	NonFinite,
	/// `beta <= 0` flattens (or inverts) the softmax
	NonPositiveBeta,
	/// `alpha` outside `[0, 1]` over- or under-shoots value updates
	AlphaOutOfRange,
	/// `eta` outside `[0, 1]` lets associability diverge before the floor clamps it
	EtaOutOfRange,
	/// `v0` outside `[0, 1]` starts the options outside the reward scale
	InitialValueOutOfRange,
}

impl Degeneracy {
	/// Short human-readable description.
	#[must_use]
	pub const fn describe(self) -> &'static str {
		match self {
			Self::NonFinite => "non-finite parameter",
			Self::NonPositiveBeta => "beta <= 0 flattens the softmax",
			Self::AlphaOutOfRange => "alpha outside [0, 1]",
			Self::EtaOutOfRange => "eta outside [0, 1]; associability may diverge",
			Self::InitialValueOutOfRange => "V0 outside [0, 1]",
		}
	}
}

// ============================================================================
// Structural Configuration
// ============================================================================

/// Constants of the model that are not fitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
	/// Lower bound applied to every associability entry after each update
	pub associability_floor: f64,
	/// Associability of every option entering the first trial, raised to
	/// `associability_floor` if it lies below it
	pub initial_associability: f64,
	/// Emit a `tracing` warning when parameters are degenerate
	pub warn_on_degenerate: bool,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			associability_floor: 0.5,
			initial_associability: 1.0,
			warn_on_degenerate: true,
		}
	}
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
	use super::*;

	#[test]
	fn test_initial_values_complement() {
		let params = ModelParams::new(0.3, 2.0, 0.8, 0.5);
		let [v1, v2] = params.initial_values();
		assert_eq!(v1, 0.8);
		assert!((v2 - 0.2).abs() < 1e-12);
	}

	#[test]
	fn test_default_is_well_defined() {
		assert!(ModelParams::default().is_well_defined());
	}

	#[test]
	fn test_degeneracies_detected() {
		let params = ModelParams::new(1.5, -1.0, 0.5, 2.0);
		let found = params.degeneracies();
		assert!(found.contains(&Degeneracy::NonPositiveBeta));
		assert!(found.contains(&Degeneracy::AlphaOutOfRange));
		assert!(found.contains(&Degeneracy::EtaOutOfRange));
		assert!(!found.contains(&Degeneracy::InitialValueOutOfRange));
	}

	#[test]
	fn test_nan_is_degenerate() {
		let params = ModelParams::new(f64::NAN, 1.0, 0.5, 0.5);
		let found = params.degeneracies();
		assert!(found.contains(&Degeneracy::NonFinite));
		assert!(found.contains(&Degeneracy::AlphaOutOfRange));
	}

	#[test]
	fn test_unconstrained_origin() {
		let params = ModelParams::from_unconstrained([0.0; 4]);
		assert_eq!(params.alpha, 0.5);
		assert_eq!(params.beta, 1.0);
		assert_eq!(params.v0, 0.5);
		assert_eq!(params.eta, 0.5);
	}

	#[test]
	fn test_unconstrained_always_well_defined() {
		for raw in [
			[-30.0, -30.0, -30.0, -30.0],
			[30.0, 5.0, 30.0, 30.0],
			[1.2, -0.4, -2.2, 0.7],
		] {
			let params = ModelParams::from_unconstrained(raw);
			assert!(params.is_well_defined(), "{raw:?} -> {params:?}");
		}
	}

	#[test]
	fn test_unconstrained_inverse() {
		let params = ModelParams::new(0.3, 2.0, 0.6, 0.25);
		let back = ModelParams::from_unconstrained(params.to_unconstrained());
		assert!((back.alpha - params.alpha).abs() < 1e-12);
		assert!((back.beta - params.beta).abs() < 1e-12);
		assert!((back.v0 - params.v0).abs() < 1e-12);
		assert!((back.eta - params.eta).abs() < 1e-12);
	}

	#[test]
	fn test_config_defaults() {
		let config = ModelConfig::default();
		assert_eq!(config.associability_floor, 0.5);
		assert_eq!(config.initial_associability, 1.0);
		assert!(config.warn_on_degenerate);
	}
}
