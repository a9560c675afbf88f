//! Configuration types for the resolver engine.
//!
//! Every tunable the engine recognizes lives here as an explicit field with
//! a documented default; there are no ambient singletons or undocumented
//! option bags. Each field is validated independently at construction time.

use resolver_types::{Address, Amount, GasUrgency, TokenId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Complete resolver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
	/// Resolver identity.
	pub resolver: ResolverSettings,
	/// Engine tuning.
	#[serde(default)]
	pub engine: EngineSettings,
}

/// Resolver identity and the tokens it commits liquidity for.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSettings {
	/// On-ledger address of this resolver.
	pub address: Address,
	/// Tokens the resolver is willing to fill from.
	#[serde(default)]
	pub supported_tokens: Vec<TokenId>,
}

/// Engine tuning knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSettings {
	/// Minimum profit margin, in percent of output value, a fill must clear
	/// to be attempted. Default 0.05.
	#[serde(default = "default_min_profit_margin")]
	pub min_profit_margin_percent: Decimal,
	/// Concurrency ceiling for fill attempts within one scan cycle.
	/// Default 3.
	#[serde(default = "default_max_concurrent_orders")]
	pub max_concurrent_orders: usize,
	/// Scan cadence in milliseconds. Default 2000.
	#[serde(default = "default_scan_interval_ms")]
	pub scan_interval_ms: u64,
	/// Cost bidding aggressiveness. Default medium.
	#[serde(default)]
	pub gas_urgency: GasUrgency,
	/// Optional cap on the liquidity committed to any single order.
	#[serde(default)]
	pub max_order_size: Option<Amount>,
	/// Confirmation cap for one submission, in seconds. A submission with
	/// no definitive result inside this window is reported as unconfirmed.
	/// Default 30.
	#[serde(default = "default_submit_timeout_secs")]
	pub submit_timeout_secs: u64,
	/// Execution-cost estimate used before any cost has been observed for
	/// the resolver. Default 0.
	#[serde(default)]
	pub base_execution_cost: Amount,
}

fn default_min_profit_margin() -> Decimal {
	Decimal::new(5, 2)
}

fn default_max_concurrent_orders() -> usize {
	3
}

fn default_scan_interval_ms() -> u64 {
	2000
}

fn default_submit_timeout_secs() -> u64 {
	30
}

impl Default for EngineSettings {
	fn default() -> Self {
		Self {
			min_profit_margin_percent: default_min_profit_margin(),
			max_concurrent_orders: default_max_concurrent_orders(),
			scan_interval_ms: default_scan_interval_ms(),
			gas_urgency: GasUrgency::default(),
			max_order_size: None,
			submit_timeout_secs: default_submit_timeout_secs(),
			base_execution_cost: Decimal::ZERO,
		}
	}
}

/// Bounds enforced by [`ResolverConfig::validate`].
pub const MAX_CONCURRENT_ORDERS_CEILING: usize = 16;
pub const MIN_SCAN_INTERVAL_MS: u64 = 100;

impl ResolverConfig {
	/// Validates every field independently. Bad configuration is the one
	/// fatal start-up path; nothing here is coerced silently.
	pub fn validate(&self) -> anyhow::Result<()> {
		if self.resolver.address.is_empty() {
			anyhow::bail!("resolver.address must not be empty");
		}
		let engine = &self.engine;
		if engine.min_profit_margin_percent < Decimal::ZERO {
			anyhow::bail!(
				"engine.min_profit_margin_percent must be non-negative, got {}",
				engine.min_profit_margin_percent
			);
		}
		if engine.max_concurrent_orders == 0
			|| engine.max_concurrent_orders > MAX_CONCURRENT_ORDERS_CEILING
		{
			anyhow::bail!(
				"engine.max_concurrent_orders must be in 1..={}, got {}",
				MAX_CONCURRENT_ORDERS_CEILING,
				engine.max_concurrent_orders
			);
		}
		if engine.scan_interval_ms < MIN_SCAN_INTERVAL_MS {
			anyhow::bail!(
				"engine.scan_interval_ms must be at least {}, got {}",
				MIN_SCAN_INTERVAL_MS,
				engine.scan_interval_ms
			);
		}
		if engine.submit_timeout_secs == 0 {
			anyhow::bail!("engine.submit_timeout_secs must be at least 1");
		}
		if let Some(cap) = engine.max_order_size {
			if cap <= Decimal::ZERO {
				anyhow::bail!("engine.max_order_size must be positive, got {}", cap);
			}
		}
		if engine.base_execution_cost < Decimal::ZERO {
			anyhow::bail!(
				"engine.base_execution_cost must be non-negative, got {}",
				engine.base_execution_cost
			);
		}
		Ok(())
	}
}
