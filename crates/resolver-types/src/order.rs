//! Order data model for Dutch auction swaps.
//!
//! An order offers `from_amount` of one token in exchange for another at a
//! rate that decays over the auction window. Orders are immutable inputs to
//! the engine except for their status and append-only fill history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{Address, Amount, OrderId, Rate, Timestamp, TokenId};
use crate::errors::ValidationError;

/// Minimum allowed auction duration in seconds.
pub const MIN_AUCTION_DURATION_SECS: u64 = 30;
/// Maximum allowed auction duration in seconds.
pub const MAX_AUCTION_DURATION_SECS: u64 = 3600;

/// How the auction rate decays from `start_rate` to `end_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayFunction {
	/// Rate falls at a constant speed over the window.
	Linear,
	/// Rate falls slowly at first and rapidly toward the end
	/// (squared-progress decay).
	Exponential,
}

/// Status of an order in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order is open and may accumulate fills.
	Pending,
	/// Order has been completely filled.
	Filled,
	/// Maker cancelled the order.
	Cancelled,
	/// Hard expiry passed without the order being fully filled.
	Expired,
}

/// Time-based pricing parameters of a Dutch auction order.
///
/// These are fixed at order creation. The observable current rate and
/// remaining time are pure functions of these fields and the wall clock;
/// they are projected on demand (see `resolver-auction`) and never stored
/// here as advancing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionDetails {
	/// Absolute instant the auction opens.
	pub start_time: Timestamp,
	/// Auction window length in seconds, within
	/// [`MIN_AUCTION_DURATION_SECS`, `MAX_AUCTION_DURATION_SECS`].
	pub duration_secs: u64,
	/// Rate offered at the start of the window. Favors the resolver.
	pub start_rate: Rate,
	/// Rate offered at the end of the window. Favors the maker.
	pub end_rate: Rate,
	/// Decay curve between the two rates.
	pub decay: DecayFunction,
}

impl AuctionDetails {
	/// Validates the auction parameters.
	///
	/// Rejects at construction time rather than coercing: a malformed
	/// auction must never reach the pricing engine.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.duration_secs < MIN_AUCTION_DURATION_SECS
			|| self.duration_secs > MAX_AUCTION_DURATION_SECS
		{
			return Err(ValidationError::DurationOutOfRange {
				duration_secs: self.duration_secs,
			});
		}
		if self.end_rate <= Decimal::ZERO {
			return Err(ValidationError::AmountNotPositive {
				field: "end_rate",
				value: self.end_rate,
			});
		}
		if self.start_rate <= self.end_rate {
			return Err(ValidationError::RateOrdering {
				start_rate: self.start_rate,
				end_rate: self.end_rate,
			});
		}
		Ok(())
	}

	/// Instant the auction window closes.
	pub fn end_time(&self) -> Timestamp {
		self.start_time + self.duration_secs
	}
}

/// One (possibly partial) execution of an order by a resolver.
///
/// Created exactly once per confirmed execution, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFill {
	/// Unique fill identifier.
	pub id: String,
	/// Order this fill executed against.
	pub order_id: OrderId,
	/// Resolver that executed the fill.
	pub resolver_address: Address,
	/// Amount of the from-token taken by this fill.
	pub fill_amount: Amount,
	/// Auction rate the fill executed at.
	pub fill_rate: Rate,
	/// Instant the fill was confirmed.
	pub timestamp: Timestamp,
	/// Ledger reference of the executed transaction.
	pub transaction_reference: String,
	/// Execution cost consumed by the transaction.
	pub execution_cost: Amount,
}

/// A maker-created swap order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique order identifier.
	pub id: OrderId,
	/// Address of the maker that created the order.
	pub maker: Address,
	/// Token the maker offers.
	pub from_token: TokenId,
	/// Token the maker wants in return.
	pub to_token: TokenId,
	/// Total offered amount of `from_token`.
	pub from_amount: Amount,
	/// Smallest fill a resolver may execute.
	pub min_fill_amount: Amount,
	/// Largest total amount fillable on this order.
	pub max_fill_amount: Amount,
	/// Whether the order may be filled in several pieces.
	pub partial_fill_allowed: bool,
	/// Instant the order was created.
	pub created_at: Timestamp,
	/// Hard expiry, independent of the auction window.
	pub expires_at: Timestamp,
	/// Auction pricing; absent means a plain fixed-rate order, which the
	/// auction engine does not handle.
	pub auction: Option<AuctionDetails>,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Append-only history of executed fills.
	#[serde(default)]
	pub fill_history: Vec<OrderFill>,
}

impl Order {
	/// Validates order consistency.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.id.is_empty() {
			return Err(ValidationError::EmptyField { field: "id" });
		}
		if self.maker.is_empty() {
			return Err(ValidationError::EmptyField { field: "maker" });
		}
		if self.from_token.is_empty() {
			return Err(ValidationError::EmptyField { field: "from_token" });
		}
		if self.to_token.is_empty() {
			return Err(ValidationError::EmptyField { field: "to_token" });
		}
		for (field, value) in [
			("from_amount", self.from_amount),
			("min_fill_amount", self.min_fill_amount),
			("max_fill_amount", self.max_fill_amount),
		] {
			if value <= Decimal::ZERO {
				return Err(ValidationError::AmountNotPositive { field, value });
			}
		}
		if self.min_fill_amount > self.max_fill_amount {
			return Err(ValidationError::FillBoundsInverted {
				min: self.min_fill_amount,
				max: self.max_fill_amount,
			});
		}
		if self.max_fill_amount > self.from_amount {
			return Err(ValidationError::MaxFillExceedsOffer {
				max: self.max_fill_amount,
				from_amount: self.from_amount,
			});
		}
		if self.expires_at <= self.created_at {
			return Err(ValidationError::ExpiryBeforeCreation {
				created_at: self.created_at,
				expires_at: self.expires_at,
			});
		}
		let filled = self.filled_amount();
		if filled > self.from_amount {
			return Err(ValidationError::OverFilled {
				filled,
				from_amount: self.from_amount,
			});
		}
		if let Some(auction) = &self.auction {
			auction.validate()?;
		}
		Ok(())
	}

	/// Total amount already taken by executed fills.
	pub fn filled_amount(&self) -> Amount {
		self.fill_history.iter().map(|fill| fill.fill_amount).sum()
	}

	/// Amount still fillable under the order's maximum.
	pub fn remaining_amount(&self) -> Amount {
		(self.max_fill_amount - self.filled_amount()).max(Decimal::ZERO)
	}

	/// Whether the hard expiry has passed.
	pub fn is_expired(&self, now: Timestamp) -> bool {
		now > self.expires_at
	}
}
