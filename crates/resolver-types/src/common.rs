//! Common types used throughout the resolver system.

use rust_decimal::Decimal;

/// Unique order identifier, assigned by the maker at creation.
pub type OrderId = String;

/// Token identifier in the ledger's canonical form.
pub type TokenId = String;

/// On-ledger address of a maker or resolver.
pub type Address = String;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Token amount in the smallest token unit.
///
/// Amounts are exact decimals, never floats: token amounts routinely exceed
/// the integer precision of an `f64`, and profit comparisons on lossy values
/// would accept or reject the wrong marginal fills.
pub type Amount = Decimal;

/// Exchange rate between a token pair (to-token units per from-token unit).
pub type Rate = Decimal;

/// Current wall-clock time as a unix timestamp in seconds.
pub fn unix_now() -> Timestamp {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap()
		.as_secs()
}
