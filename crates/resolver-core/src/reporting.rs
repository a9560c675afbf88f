//! Outcome reporting for the engine's operator stream.
//!
//! Per-fill outcomes and cycle summaries fan out to any number of
//! subscribers (status dashboards, log sinks, tests) without coupling them
//! to the scan loop. The most recent cycle summary is also retained so
//! `status()` can report it to operators who were not subscribed while the
//! cycle ran.

use resolver_types::{CycleSummary, ResolverEvent};
use std::sync::RwLock;
use tokio::sync::broadcast;

/// Fans out [`ResolverEvent`]s and keeps the latest cycle summary.
pub struct OutcomeReporter {
	sender: broadcast::Sender<ResolverEvent>,
	last_cycle: RwLock<Option<CycleSummary>>,
}

impl OutcomeReporter {
	/// Creates a reporter whose broadcast channel holds up to `capacity`
	/// events in a ring buffer shared by all subscribers; a subscriber
	/// that lags behind loses the oldest events first.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self {
			sender,
			last_cycle: RwLock::new(None),
		}
	}

	/// Subscribes to all events emitted after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<ResolverEvent> {
		self.sender.subscribe()
	}

	/// Emits an event. Cycle summaries are retained as the latest cycle
	/// before fan-out. Having no subscriber is not an error.
	pub fn emit(&self, event: ResolverEvent) {
		if let ResolverEvent::CycleCompleted(summary) = &event {
			*self.last_cycle.write().unwrap() = Some(summary.clone());
		}
		self.sender.send(event).ok();
	}

	/// The most recently completed cycle, if any cycle has run.
	pub fn last_cycle(&self) -> Option<CycleSummary> {
		self.last_cycle.read().unwrap().clone()
	}
}
