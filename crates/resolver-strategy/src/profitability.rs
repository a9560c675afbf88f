//! Profitability analysis for candidate fills.
//!
//! Decides whether filling an order right now is worth doing, net of
//! execution cost. A plan rejection is a normal polling result and comes
//! back as a non-profitable report, not an error.

use resolver_types::{Amount, Order, PlanError, Rate, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::planner::{self, FillPlan};

/// Default minimum profit margin, in percent of output value.
pub const DEFAULT_MIN_PROFIT_MARGIN_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Outcome of analyzing one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profitability {
	pub is_profitable: bool,
	/// Net profit after execution cost; zero when not fillable.
	pub expected_profit: Amount,
	pub fill_amount: Amount,
	pub fill_rate: Rate,
	/// Net profit as a percentage of output value at the auction rate;
	/// zero when the fill is not profitable.
	pub profit_margin_percent: Decimal,
	/// Why planning rejected the order, when it did.
	pub rejection: Option<PlanError>,
}

impl Profitability {
	fn not_fillable(rejection: PlanError) -> Self {
		Self {
			is_profitable: false,
			expected_profit: Decimal::ZERO,
			fill_amount: Decimal::ZERO,
			fill_rate: Decimal::ZERO,
			profit_margin_percent: Decimal::ZERO,
			rejection: Some(rejection),
		}
	}
}

/// Analyzes whether filling `order` now is profitable.
///
/// The order of operations is deliberate and load-bearing: gross profit
/// comes from the rate spread, execution cost is subtracted from gross,
/// and the margin is net profit as a percentage of the output value at the
/// auction rate. Reordering the subtraction changes which marginal fills
/// are accepted.
pub fn analyze(
	order: &Order,
	available_liquidity: Amount,
	market_rate: Rate,
	estimated_execution_cost: Amount,
	min_profit_margin_percent: Decimal,
	now: Timestamp,
) -> Profitability {
	let FillPlan {
		fill_amount,
		fill_rate,
	} = match planner::plan(order, available_liquidity, now) {
		Ok(plan) => plan,
		Err(rejection) => return Profitability::not_fillable(rejection),
	};

	let output_at_auction_rate = fill_amount * fill_rate;
	let output_at_market_rate = fill_amount * market_rate;
	let gross_profit = output_at_auction_rate - output_at_market_rate;
	let net_profit = gross_profit - estimated_execution_cost;

	let profit_margin_percent = if net_profit > Decimal::ZERO {
		net_profit / output_at_auction_rate * Decimal::from(100)
	} else {
		Decimal::ZERO
	};
	let is_profitable =
		net_profit > Decimal::ZERO && profit_margin_percent > min_profit_margin_percent;

	Profitability {
		is_profitable,
		expected_profit: net_profit,
		fill_amount,
		fill_rate,
		profit_margin_percent,
		rejection: None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use resolver_types::{AuctionDetails, DecayFunction, OrderStatus};
	use rust_decimal_macros::dec;

	const START: Timestamp = 1_700_000_000;

	fn order() -> Order {
		Order {
			id: "order-1".into(),
			maker: "maker".into(),
			from_token: "SUI".into(),
			to_token: "USDC".into(),
			from_amount: dec!(1000),
			min_fill_amount: dec!(100),
			max_fill_amount: dec!(1000),
			partial_fill_allowed: true,
			created_at: START,
			expires_at: START + 600,
			auction: Some(AuctionDetails {
				start_time: START,
				duration_secs: 60,
				start_rate: dec!(2.70),
				end_rate: dec!(2.30),
				decay: DecayFunction::Linear,
			}),
			status: OrderStatus::Pending,
			fill_history: vec![],
		}
	}

	#[test]
	fn profitable_when_auction_rate_beats_market() {
		// At t+30 the auction pays 2.50; market pays 2.40. Gross profit on
		// 1000 units is 100, minus cost 10 leaves 90; margin 90/2500 = 3.6%.
		let report = analyze(
			&order(),
			dec!(1000),
			dec!(2.40),
			dec!(10),
			DEFAULT_MIN_PROFIT_MARGIN_PERCENT,
			START + 30,
		);
		assert!(report.is_profitable);
		assert_eq!(report.expected_profit, dec!(90));
		assert_eq!(report.fill_amount, dec!(1000));
		assert_eq!(report.fill_rate, dec!(2.50));
		assert_eq!(report.profit_margin_percent, dec!(3.6));
	}

	#[test]
	fn never_profitable_when_market_meets_or_beats_auction_rate() {
		for market in [dec!(2.50), dec!(2.60), dec!(3.00)] {
			let report = analyze(
				&order(),
				dec!(1000),
				market,
				Decimal::ZERO,
				DEFAULT_MIN_PROFIT_MARGIN_PERCENT,
				START + 30,
			);
			assert!(!report.is_profitable, "market rate {market}");
			assert_eq!(report.profit_margin_percent, Decimal::ZERO);
		}
	}

	#[test]
	fn execution_cost_can_erase_the_spread() {
		let report = analyze(
			&order(),
			dec!(1000),
			dec!(2.40),
			dec!(100),
			DEFAULT_MIN_PROFIT_MARGIN_PERCENT,
			START + 30,
		);
		assert!(!report.is_profitable);
		assert_eq!(report.expected_profit, Decimal::ZERO);
	}

	#[test]
	fn margin_must_clear_the_configured_floor() {
		// Net profit of 1 on output 2500 is 0.04%, below a 0.05% floor.
		let report = analyze(
			&order(),
			dec!(1000),
			dec!(2.40),
			dec!(99),
			DEFAULT_MIN_PROFIT_MARGIN_PERCENT,
			START + 30,
		);
		assert!(report.expected_profit > Decimal::ZERO);
		assert!(!report.is_profitable);
	}

	#[test]
	fn plan_rejection_is_a_quiet_non_profitable_report() {
		let report = analyze(
			&order(),
			dec!(1000),
			dec!(2.40),
			dec!(10),
			DEFAULT_MIN_PROFIT_MARGIN_PERCENT,
			START + 600,
		);
		assert!(!report.is_profitable);
		assert_eq!(report.expected_profit, Decimal::ZERO);
		assert!(report.rejection.is_some());
	}
}
