//! Operator-facing events emitted by the fill engine.

use serde::{Deserialize, Serialize};

use crate::common::OrderId;
use crate::errors::ExecutionError;
use crate::order::OrderFill;

/// Counts for one completed scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSummary {
	/// Monotonic cycle index since the engine started.
	pub cycle: u64,
	/// Candidates returned by discovery.
	pub scanned: usize,
	/// Candidates that were pending with an open auction.
	pub eligible: usize,
	/// Candidates that passed the profitability check.
	pub profitable: usize,
	/// Fill attempts actually issued (bounded by the concurrency ceiling).
	pub attempted: usize,
	pub succeeded: usize,
	pub failed: usize,
	pub unconfirmed: usize,
	/// Attempts rejected by the pre-submission re-validation (stale auction,
	/// order already taken). Expected outcomes; nothing was submitted.
	pub stale: usize,
}

/// Per-fill outcomes and cycle summaries, published on the engine's event
/// bus for the operator's status/log stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolverEvent {
	/// A fill was confirmed and recorded.
	FillSucceeded { fill: OrderFill },
	/// A fill attempt failed definitively.
	FillFailed {
		order_id: OrderId,
		error: ExecutionError,
	},
	/// A fill attempt timed out without a definitive result.
	FillUnconfirmed { order_id: OrderId },
	/// A scan cycle finished.
	CycleCompleted(CycleSummary),
}
