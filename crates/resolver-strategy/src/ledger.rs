//! Resolver reputation ledger.
//!
//! Tracks per-resolver reliability statistics and updates them from fill
//! outcomes. Entries live in a concurrent map; each update runs as one
//! atomic read-modify-write under the entry lock, so concurrent fill
//! completions within a cycle cannot race on the moving average or the
//! reputation score.

use dashmap::DashMap;
use resolver_types::{Address, Amount, GasUrgency, ResolverInfo, Timestamp, TokenId};
use rust_decimal::Decimal;

/// Reputation gained per successful fill.
const REPUTATION_GAIN: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1
/// Reputation lost per failed fill.
const REPUTATION_LOSS: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5
/// Success-rate gain per successful fill.
const SUCCESS_RATE_GAIN: Decimal = Decimal::from_parts(1, 0, 0, false, 3); // 0.001
/// Success-rate loss per failed fill.
const SUCCESS_RATE_LOSS: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

const REPUTATION_CEILING: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Per-resolver statistics, keyed by resolver address.
#[derive(Debug, Default)]
pub struct ResolverLedger {
	resolvers: DashMap<Address, ResolverInfo>,
}

impl ResolverLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a resolver, keeping any existing record.
	pub fn register(&self, address: Address, supported_tokens: Vec<TokenId>) {
		self.resolvers
			.entry(address.clone())
			.or_insert_with(|| ResolverInfo::new(address, supported_tokens));
	}

	/// Snapshot of one resolver's statistics.
	pub fn get(&self, address: &Address) -> Option<ResolverInfo> {
		self.resolvers.get(address).map(|entry| entry.clone())
	}

	/// Snapshot of all tracked resolvers.
	pub fn all(&self) -> Vec<ResolverInfo> {
		self.resolvers
			.iter()
			.map(|entry| entry.value().clone())
			.collect()
	}

	/// Records a confirmed fill: reputation and success rate tick up, and
	/// the observed cost folds into the moving average.
	pub fn record_success(&self, address: &Address, execution_cost: Amount, now: Timestamp) {
		let mut entry = self.entry(address);
		entry.reputation = (entry.reputation + REPUTATION_GAIN).min(REPUTATION_CEILING);
		entry.success_rate = (entry.success_rate + SUCCESS_RATE_GAIN).min(Decimal::ONE);
		entry.average_execution_cost =
			(entry.average_execution_cost + execution_cost) / Decimal::TWO;
		entry.last_active_time = now;
		entry.is_active = true;
	}

	/// Records a definitive failure: reputation and success rate tick down;
	/// the cost average is left untouched.
	pub fn record_failure(&self, address: &Address, now: Timestamp) {
		let mut entry = self.entry(address);
		entry.reputation = (entry.reputation - REPUTATION_LOSS).max(Decimal::ZERO);
		entry.success_rate = (entry.success_rate - SUCCESS_RATE_LOSS).max(Decimal::ZERO);
		entry.last_active_time = now;
	}

	/// Records an attempt that timed out without a definitive result.
	///
	/// Neither reputation nor success rate moves: crediting failure (or
	/// success) for an unresolved submission would corrupt the signal.
	/// The attempt is tallied so a later status check can resolve it.
	pub fn record_unconfirmed(&self, address: &Address, now: Timestamp) {
		let mut entry = self.entry(address);
		entry.unconfirmed_attempts += 1;
		entry.last_active_time = now;
	}

	/// Resolves one previously unconfirmed attempt once a status check has
	/// produced a definitive outcome.
	pub fn resolve_unconfirmed(
		&self,
		address: &Address,
		succeeded: bool,
		execution_cost: Amount,
		now: Timestamp,
	) {
		{
			let mut entry = self.entry(address);
			entry.unconfirmed_attempts = entry.unconfirmed_attempts.saturating_sub(1);
		}
		if succeeded {
			self.record_success(address, execution_cost, now);
		} else {
			self.record_failure(address, now);
		}
	}

	/// Estimated execution cost for this resolver at the given urgency:
	/// the resolver's observed moving average (or `base_cost` before any
	/// observation) scaled by the urgency multiplier.
	pub fn estimate_execution_cost(
		&self,
		address: &Address,
		base_cost: Amount,
		urgency: GasUrgency,
	) -> Amount {
		let observed = self
			.get(address)
			.map(|info| info.average_execution_cost)
			.unwrap_or(Decimal::ZERO);
		let base = if observed > Decimal::ZERO {
			observed
		} else {
			base_cost
		};
		base * urgency.cost_multiplier()
	}

	fn entry(&self, address: &Address) -> dashmap::mapref::one::RefMut<'_, Address, ResolverInfo> {
		self.resolvers
			.entry(address.clone())
			.or_insert_with(|| ResolverInfo::new(address.clone(), vec![]))
	}
}
