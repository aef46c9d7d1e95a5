//! Choice Policy
//!
//! Softmax action selection over the current value estimates:
//!
//! `P(k) = e^(β·V_k) / Σ_j e^(β·V_j)`
//!
//! Both the probabilities and the log-probability of the realized choice are
//! computed with the max-shift (log-sum-exp) identity. Softmax is invariant to
//! a common shift of its scores, so this changes no value except to keep
//! `e^(β·V)` from overflowing when `|β·V|` is large.

use rand::Rng;

use crate::data::N_CHOICES;

/// Scale values by the inverse temperature.
#[inline]
#[must_use]
pub fn scaled_scores(values: &[f64; N_CHOICES], beta: f64) -> [f64; N_CHOICES] {
	values.map(|v| beta * v)
}

/// `ln Σ_j e^(x_j)`, computed as `m + ln Σ_j e^(x_j - m)` with `m = max x`.
#[inline]
#[must_use]
pub fn log_sum_exp(scores: &[f64; N_CHOICES]) -> f64 {
	let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
	if !max.is_finite() {
		// All -inf, or some +inf/NaN: let IEEE arithmetic decide
		return scores.iter().map(|x| x.exp()).sum::<f64>().ln();
	}

	let sum: f64 = scores.iter().map(|x| (x - max).exp()).sum();
	max + sum.ln()
}

/// Softmax of `β·V`.
///
/// Each returned column sums to 1 and, for finite inputs, every entry lies in
/// `(0, 1]`.
#[must_use]
pub fn softmax(values: &[f64; N_CHOICES], beta: f64) -> [f64; N_CHOICES] {
	let scores = scaled_scores(values, beta);
	let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
	let shift = if max.is_finite() { max } else { 0.0 };

	let weights = scores.map(|s| (s - shift).exp());
	let total: f64 = weights.iter().sum();
	weights.map(|w| w / total)
}

/// `ln P(choice)` under the softmax of `β·V`.
///
/// `β·V_choice - ln Σ_j e^(β·V_j)`, which stays finite where `ln(P)` of an
/// underflowed probability would not.
#[inline]
#[must_use]
pub fn log_choice_probability(values: &[f64; N_CHOICES], beta: f64, choice: usize) -> f64 {
	let scores = scaled_scores(values, beta);
	scores[choice] - log_sum_exp(&scores)
}

/// Draw a zero-based option index from a categorical distribution.
///
/// One uniform draw per call, compared against the running cumulative
/// probability. Falls back to the last option if rounding leaves the
/// cumulative sum just short of the draw.
pub fn sample_choice<R: Rng + ?Sized>(rng: &mut R, probabilities: &[f64; N_CHOICES]) -> usize {
	let threshold: f64 = rng.gen();

	let mut cumulative = 0.0;
	for (choice, &p) in probabilities.iter().enumerate() {
		cumulative += p;
		if threshold < cumulative {
			return choice;
		}
	}

	N_CHOICES - 1
}
