//! Fill planning: how much of an order a resolver can legally take right now.

use resolver_auction::AuctionClock;
use resolver_types::{Amount, Order, OrderStatus, PlanError, Rate, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A legally fillable amount at the auction's current rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillPlan {
	pub fill_amount: Amount,
	pub fill_rate: Rate,
}

/// Plans a fill of `order` given the resolver's available liquidity.
///
/// Rejections here are expected polling outcomes, not faults. The plan
/// never exceeds the order's remaining amount and never goes below the
/// order's minimum fill; when the candidate amount is too small this fails
/// with [`PlanError::InsufficientLiquidity`] rather than rounding up.
pub fn plan(
	order: &Order,
	available_liquidity: Amount,
	now: Timestamp,
) -> Result<FillPlan, PlanError> {
	if order.status != OrderStatus::Pending {
		return Err(PlanError::NotPending {
			status: order.status,
		});
	}
	if order.is_expired(now) {
		return Err(PlanError::OrderExpired {
			expired_at: order.expires_at,
		});
	}
	let auction = order.auction.as_ref().ok_or(PlanError::AuctionInactive)?;
	let clock = AuctionClock::new(auction);
	if !clock.is_active(now) {
		return Err(PlanError::AuctionInactive);
	}

	let remaining = order.remaining_amount();
	if remaining <= Decimal::ZERO {
		return Err(PlanError::NothingRemaining);
	}

	let candidate = available_liquidity.min(remaining);
	if candidate < order.min_fill_amount {
		return Err(PlanError::InsufficientLiquidity {
			needed: order.min_fill_amount,
			available: available_liquidity,
		});
	}
	if !order.partial_fill_allowed && candidate < remaining {
		return Err(PlanError::PartialFillNotAllowed {
			candidate,
			remaining,
		});
	}

	Ok(FillPlan {
		fill_amount: candidate,
		fill_rate: clock.current_rate(now),
	})
}
