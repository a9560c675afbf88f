//! Fill strategy for the resolver system.
//!
//! [`planner`] computes the legally fillable amount for an order,
//! [`profitability`] decides whether that fill is worth executing, and
//! [`ledger`] tracks per-resolver reliability statistics across fills.

pub mod ledger;
pub mod planner;
pub mod profitability;

pub use ledger::ResolverLedger;
pub use planner::{plan, FillPlan};
pub use profitability::{analyze, Profitability, DEFAULT_MIN_PROFIT_MARGIN_PERCENT};
