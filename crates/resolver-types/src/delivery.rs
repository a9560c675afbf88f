//! Ledger transaction submission boundary.
//!
//! The engine builds one [`FillTransaction`] per fill attempt and submits it
//! exactly once through this interface. Retries on ambiguous failure are a
//! resolver-operator policy, not an engine obligation. Signing credentials
//! live inside the executor implementation; key management is outside the
//! engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::{Address, Amount, OrderId, Rate, TokenId};
use crate::errors::ExecutionError;
use crate::resolver::GasUrgency;

/// A fill ready for submission to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillTransaction {
	/// Order being filled.
	pub order_id: OrderId,
	/// Resolver committing the liquidity.
	pub resolver_address: Address,
	/// Token the resolver pays out.
	pub from_token: TokenId,
	/// Token the resolver receives.
	pub to_token: TokenId,
	/// Amount of `from_token` committed.
	pub fill_amount: Amount,
	/// Auction rate the fill was planned at.
	pub fill_rate: Rate,
	/// Cost bidding aggressiveness for this submission.
	pub urgency: GasUrgency,
}

/// Result of a confirmed submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
	/// Ledger reference of the executed transaction.
	pub reference: String,
	/// Execution cost actually consumed.
	pub execution_cost: Amount,
}

/// Submits constructed transactions to the distributed ledger.
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
	/// Submits the transaction and awaits its definitive result.
	///
	/// The on-ledger lock-and-release of funds is assumed correct and
	/// atomic; this call reports only whether the submission took effect
	/// and what it cost.
	async fn submit(&self, tx: &FillTransaction) -> Result<ExecutionReceipt, ExecutionError>;
}
