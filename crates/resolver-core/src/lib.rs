//! Core orchestration for the auction resolver.
//!
//! [`FillOrchestrator`] owns the scan loop: it discovers pending orders,
//! ranks the profitable ones, and executes fills with bounded concurrency,
//! publishing per-fill outcomes and cycle summaries on a broadcast stream.

use thiserror::Error;

pub mod engine;
pub mod reporting;

pub use engine::{CumulativeTotals, EngineStatus, FillOrchestrator};
pub use reporting::OutcomeReporter;

/// Engine lifecycle errors.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("configuration error: {0}")]
	Config(String),

	#[error("engine is already running")]
	AlreadyRunning,

	#[error("engine is not running")]
	NotRunning,
}
