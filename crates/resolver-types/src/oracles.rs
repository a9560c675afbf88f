//! Market-rate oracle boundary.

use async_trait::async_trait;

use crate::common::{Rate, TokenId};
use crate::errors::OracleError;

/// Indicative external market rates for token pairs.
///
/// Best-effort and possibly stale: rates from here judge profitability only
/// and are never authoritative over the auction's own current rate.
#[async_trait]
pub trait MarketRateOracle: Send + Sync {
	/// Returns the indicative market rate for swapping `from` into `to`.
	async fn market_rate(&self, from: &TokenId, to: &TokenId) -> Result<Rate, OracleError>;
}
