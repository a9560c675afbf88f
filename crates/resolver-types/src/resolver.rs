//! Resolver identity and statistics types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{Address, Amount, Timestamp, TokenId};

/// How aggressively a resolver bids execution cost when submitting fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GasUrgency {
	Low,
	#[default]
	Medium,
	High,
}

impl GasUrgency {
	/// Multiplier applied to a base execution-cost estimate. A pure lookup,
	/// no learning.
	pub fn cost_multiplier(&self) -> Decimal {
		match self {
			GasUrgency::Low => Decimal::ONE,
			GasUrgency::Medium => Decimal::new(12, 1),
			GasUrgency::High => Decimal::new(15, 1),
		}
	}
}

/// Reliability statistics for one resolver identity.
///
/// Owned by the resolver operator and persists across many orders; mutated
/// only by outcomes of that resolver's own fill attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverInfo {
	/// On-ledger address of the resolver.
	pub address: Address,
	/// Reputation score, clamped to [0, 100].
	pub reputation: Decimal,
	/// Fraction of attempts that succeeded, clamped to [0, 1].
	pub success_rate: Decimal,
	/// Simple moving average of observed execution costs.
	pub average_execution_cost: Amount,
	/// Whether the resolver is currently operating.
	pub is_active: bool,
	/// Instant of the most recent fill attempt.
	pub last_active_time: Timestamp,
	/// Tokens the resolver is willing to commit liquidity for.
	pub supported_tokens: Vec<TokenId>,
	/// Attempts that timed out without a definitive result and still await
	/// resolution by a later status check.
	pub unconfirmed_attempts: u64,
}

impl ResolverInfo {
	/// A fresh resolver entry with a clean record.
	pub fn new(address: Address, supported_tokens: Vec<TokenId>) -> Self {
		Self {
			address,
			reputation: Decimal::from(100),
			success_rate: Decimal::ONE,
			average_execution_cost: Decimal::ZERO,
			is_active: true,
			last_active_time: 0,
			supported_tokens,
			unconfirmed_attempts: 0,
		}
	}
}
