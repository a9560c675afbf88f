//! Error taxonomy for the resolver system.
//!
//! Planning errors (`PlanError`) are expected, frequent outcomes of polling
//! and are recovered locally by the engine; they never abort a scan cycle.
//! Validation errors reject malformed inputs at construction time.
//! Execution errors are per-fill outcomes that feed the reputation ledger.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{Amount, Timestamp, TokenId};
use crate::order::{OrderStatus, MAX_AUCTION_DURATION_SECS, MIN_AUCTION_DURATION_SECS};

/// Rejection of malformed orders, auctions, or amounts at construction time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
	#[error("field `{field}` must not be empty")]
	EmptyField { field: &'static str },

	#[error("field `{field}` must be positive, got {value}")]
	AmountNotPositive { field: &'static str, value: Amount },

	#[error("start rate {start_rate} must exceed end rate {end_rate}")]
	RateOrdering { start_rate: Amount, end_rate: Amount },

	#[error(
		"auction duration {duration_secs}s outside allowed range \
		 [{MIN_AUCTION_DURATION_SECS}, {MAX_AUCTION_DURATION_SECS}]"
	)]
	DurationOutOfRange { duration_secs: u64 },

	#[error("min fill {min} exceeds max fill {max}")]
	FillBoundsInverted { min: Amount, max: Amount },

	#[error("max fill {max} exceeds offered amount {from_amount}")]
	MaxFillExceedsOffer { max: Amount, from_amount: Amount },

	#[error("expiry {expires_at} not after creation {created_at}")]
	ExpiryBeforeCreation {
		created_at: Timestamp,
		expires_at: Timestamp,
	},

	#[error("fills total {filled} exceed offered amount {from_amount}")]
	OverFilled { filled: Amount, from_amount: Amount },
}

/// Expected rejections while planning a fill. Non-fatal: the engine treats
/// these as "skip this order this cycle".
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanError {
	#[error("order has no auction or the auction window is not open")]
	AuctionInactive,

	#[error("order expired at {expired_at}")]
	OrderExpired { expired_at: Timestamp },

	#[error("order status is {status:?}, not pending")]
	NotPending { status: OrderStatus },

	#[error("nothing remains to fill")]
	NothingRemaining,

	#[error("insufficient liquidity: need {needed}, have {available}")]
	InsufficientLiquidity { needed: Amount, available: Amount },

	#[error("partial fills not allowed: candidate {candidate} below remaining {remaining}")]
	PartialFillNotAllowed { candidate: Amount, remaining: Amount },
}

/// Per-fill execution outcomes reported by the transaction executor or the
/// submission timeout.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionError {
	#[error("insufficient balance to execute fill")]
	InsufficientBalance,

	#[error("insufficient gas to execute fill")]
	InsufficientGas,

	#[error("ledger rejected transaction: {0}")]
	TransactionFailed(String),

	/// Timed out without a definitive result. Tracked separately from
	/// failure: the ledger effect may still have happened, so reputation
	/// must not move until a later status check resolves it.
	#[error("no confirmation within {timeout_secs}s")]
	Unconfirmed { timeout_secs: u64 },

	#[error("executor error: {0}")]
	Executor(String),
}

/// Market-rate oracle failures. Advisory lookups; a failed lookup skips the
/// order for the cycle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OracleError {
	#[error("no market rate available for {from}/{to}")]
	RateUnavailable { from: TokenId, to: TokenId },

	#[error("oracle error: {0}")]
	Other(String),
}

/// Liquidity source failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiquidityError {
	#[error("liquidity lookup failed: {0}")]
	Lookup(String),
}

/// Order discovery failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiscoveryError {
	#[error("order source unavailable: {0}")]
	Source(String),
}
