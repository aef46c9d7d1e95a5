//! Parameter Transforms
//!
//! Unconstrained-to-constrained reparameterization for a four-parameter
//! Bayesian observer family. Optimizers and samplers work in ℝ⁴; the model
//! sees parameters inside their support:
//!
//! ```text
//! inverse_temperature = e^x₁                 ∈ (0, ∞)
//! rate                = e^x₂                 ∈ (0, ∞)
//! upper_weight        = 0.75 + 0.25·σ(x₃)    ∈ (0.75, 1]
//! lower_weight        = 0.25·σ(x₄)           ∈ [0, 0.25)
//! ```
//!
//! Where `σ(x) = 1 / (1 + e^(-x))`. The bounds are exact in real arithmetic;
//! in `f64` the logistic saturates for `|x| ≳ 37`, so the open ends can be
//! reached at extreme inputs.

use serde::{Deserialize, Serialize};

/// Lower edge of the upper-weight range.
pub const UPPER_WEIGHT_MIN: f64 = 0.75;

/// Upper edge of the lower-weight range.
pub const LOWER_WEIGHT_MAX: f64 = 0.25;

/// Logistic sigmoid `σ(x) = 1 / (1 + e^(-x))`.
#[inline]
#[must_use]
pub fn logistic(x: f64) -> f64 {
	1.0 / (1.0 + (-x).exp())
}

/// Inverse of [`logistic`]: `ln(p / (1 - p))`.
#[inline]
#[must_use]
pub fn logit(p: f64) -> f64 {
	(p / (1.0 - p)).ln()
}

/// Parameters after mapping into their support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstrainedParams {
	/// Softmax inverse temperature, positive
	pub inverse_temperature: f64,
	/// Positive rate
	pub rate: f64,
	/// Weight in `(0.75, 1]`
	pub upper_weight: f64,
	/// Weight in `[0, 0.25)`
	pub lower_weight: f64,
}

impl ConstrainedParams {
	/// Forward map from unconstrained reals.
	#[must_use]
	pub fn from_unconstrained(raw: [f64; 4]) -> Self {
		let [x1, x2, x3, x4] = raw;
		Self {
			inverse_temperature: x1.exp(),
			rate: x2.exp(),
			upper_weight: (1.0 - UPPER_WEIGHT_MIN).mul_add(logistic(x3), UPPER_WEIGHT_MIN),
			lower_weight: LOWER_WEIGHT_MAX * logistic(x4),
		}
	}

	/// Inverse map back to unconstrained reals.
	///
	/// Values on a closed end of their range map to `±∞`; values outside the
	/// range map to NaN.
	#[must_use]
	pub fn to_unconstrained(&self) -> [f64; 4] {
		[
			self.inverse_temperature.ln(),
			self.rate.ln(),
			logit((self.upper_weight - UPPER_WEIGHT_MIN) / (1.0 - UPPER_WEIGHT_MIN)),
			logit(self.lower_weight / LOWER_WEIGHT_MAX),
		]
	}

	/// Check every field lies inside its documented range.
	#[must_use]
	pub const fn is_within_bounds(&self) -> bool {
		self.inverse_temperature > 0.0
			&& self.rate > 0.0
			&& self.upper_weight > UPPER_WEIGHT_MIN
			&& self.upper_weight <= 1.0
			&& self.lower_weight >= 0.0
			&& self.lower_weight < LOWER_WEIGHT_MAX
	}
}
