//! Rate decay curves for Dutch auction pricing.
//!
//! Pure functions of the auction parameters and elapsed progress. Every
//! observer computing a rate for the same instant gets the same answer.

use resolver_types::{DecayFunction, Rate};
use rust_decimal::Decimal;

/// Computes the auction rate at `progress` through the window.
///
/// `progress` is clamped to `[0, 1]`; callers clamp `elapsed / duration`
/// before calling. Linear decay falls at constant speed. Exponential decay
/// uses a squared-progress factor so the rate falls slowly at first and
/// rapidly toward the end of the window (the inverse shape of a naive
/// `e^{-kt}` decay).
pub fn rate_at(start_rate: Rate, end_rate: Rate, progress: Decimal, decay: DecayFunction) -> Rate {
	let progress = progress.clamp(Decimal::ZERO, Decimal::ONE);
	let decay_factor = match decay {
		DecayFunction::Linear => progress,
		DecayFunction::Exponential => progress * progress,
	};
	start_rate - (start_rate - end_rate) * decay_factor
}
