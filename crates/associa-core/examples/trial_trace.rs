//! Trial-by-Trial Trace Example
//!
//! Replays a short choice sequence and prints every quantity the model
//! tracks, so the update rules can be checked by hand.
//!
//! Run with: `cargo run --example trial_trace`

use associa_core::{fit, ModelError, ModelParams, RewardMatrix};

fn main() -> Result<(), ModelError> {
	println!("=== Associability Trace ===\n");

	let params = ModelParams::new(0.3, 2.0, 0.5, 0.5);
	println!(
		"alpha = {}, beta = {}, V0 = {}, eta = {}\n",
		params.alpha, params.beta, params.v0, params.eta
	);

	// Option 1 pays on odd trials, option 2 on even trials
	let rewards = RewardMatrix::from_rows(vec![
		vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
		vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
	])?;
	let choices = [1, 2, 1, 1, 2, 2];

	let out = fit(&params, &rewards, &choices)?;

	println!(
		"{:>5} {:>6} {:>14} {:>14} {:>14} {:>8} {:>8}",
		"trial", "choice", "V", "kappa", "P", "delta", "P(c)"
	);
	for (t, ((v, k), p)) in out
		.expected_reward
		.iter()
		.zip(&out.associability)
		.zip(&out.probabilities)
		.enumerate()
	{
		println!(
			"{:>5} {:>6} {:>6.3}/{:<6.3} {:>6.3}/{:<6.3} {:>6.3}/{:<6.3} {:>8.3} {:>8.3}",
			t + 1,
			out.choices()[t],
			v[0],
			v[1],
			k[0],
			k[1],
			p[0],
			p[1],
			out.prediction_errors[t],
			out.act_probs[t]
		);
	}

	println!("\nlog-likelihood: {:.4}", out.log_likelihood);
	println!("\nNotes:");
	println!("  - V and kappa are the state *entering* each trial");
	println!("  - Only the chosen option's V and kappa change after a trial");
	println!("  - The V update uses kappa from before that trial's update");

	Ok(())
}
