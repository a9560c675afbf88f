//! Order discovery boundary.
//!
//! Transport for order discovery is outside the engine; orders arrive as an
//! enumerable collection from whatever source the operator wires in.

use async_trait::async_trait;

use crate::errors::DiscoveryError;
use crate::order::Order;

/// Enumerates candidate orders for the engine to scan.
#[async_trait]
pub trait OrderDiscovery: Send + Sync {
	/// Returns the current batch of candidate orders.
	async fn pending_orders(&self) -> Result<Vec<Order>, DiscoveryError>;
}
