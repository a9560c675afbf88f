//! Auction timing: activity window, elapsed progress, rate snapshots.

use resolver_types::{AuctionDetails, Rate, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::curve;

/// Read-time projection of an auction's observable state.
///
/// Derived from [`AuctionDetails`] and an instant; never a source of truth
/// and never written back into the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSnapshot {
	/// The pricing parameters the snapshot was computed from.
	pub details: AuctionDetails,
	/// Instant the snapshot was taken.
	pub taken_at: Timestamp,
	/// Rate in effect at `taken_at`.
	pub current_rate: Rate,
	/// Seconds until the window closes, floored at 0.
	pub remaining_secs: u64,
	/// Whether the window was open at `taken_at`.
	pub is_active: bool,
}

/// Stateless view over one auction's timing.
///
/// All queries take an explicit `now` so that concurrent observers at the
/// same instant agree, and so tests never depend on the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct AuctionClock<'a> {
	details: &'a AuctionDetails,
}

impl<'a> AuctionClock<'a> {
	pub fn new(details: &'a AuctionDetails) -> Self {
		Self { details }
	}

	/// `true` iff the window is open: `0 <= now - start_time < duration`.
	/// An auction that has not started yet is not active; resolvers must
	/// not fill pre-start.
	pub fn is_active(&self, now: Timestamp) -> bool {
		now >= self.details.start_time && now < self.details.end_time()
	}

	/// Seconds elapsed since the window opened, floored at 0.
	pub fn elapsed_secs(&self, now: Timestamp) -> u64 {
		now.saturating_sub(self.details.start_time)
	}

	/// Seconds until the window closes, floored at 0.
	pub fn remaining_secs(&self, now: Timestamp) -> u64 {
		self.details.end_time().saturating_sub(now)
	}

	/// Rate in effect at `now`: the start rate before the window opens, the
	/// end rate once it closes, and the decay curve in between.
	pub fn current_rate(&self, now: Timestamp) -> Rate {
		if now <= self.details.start_time {
			return self.details.start_rate;
		}
		let elapsed = self.elapsed_secs(now);
		if elapsed >= self.details.duration_secs {
			return self.details.end_rate;
		}
		let progress = Decimal::from(elapsed) / Decimal::from(self.details.duration_secs);
		curve::rate_at(
			self.details.start_rate,
			self.details.end_rate,
			progress,
			self.details.decay,
		)
	}

	/// Pure projection of the auction's observable state at `now`.
	pub fn snapshot(&self, now: Timestamp) -> AuctionSnapshot {
		AuctionSnapshot {
			details: self.details.clone(),
			taken_at: now,
			current_rate: self.current_rate(now),
			remaining_secs: self.remaining_secs(now),
			is_active: self.is_active(now),
		}
	}
}
