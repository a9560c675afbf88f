//! Resolver liquidity boundary.

use async_trait::async_trait;

use crate::common::{Address, Amount, TokenId};
use crate::errors::LiquidityError;

/// Reports how much of a token a resolver can currently commit to fills.
#[async_trait]
pub trait LiquiditySource: Send + Sync {
	/// Available balance of `token` for `resolver`.
	async fn available_liquidity(
		&self,
		resolver: &Address,
		token: &TokenId,
	) -> Result<Amount, LiquidityError>;
}
