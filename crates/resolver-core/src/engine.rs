//! The fill orchestrator.
//!
//! On a fixed cadence the engine scans candidate orders, ranks the
//! profitable ones, and executes a bounded number of fills concurrently.
//! Fill attempts are isolated from each other: one order's failure never
//! aborts or delays the rest of the cycle, and the scan loop never
//! overlaps its own next iteration.

use futures::future::join_all;
use resolver_auction::AuctionClock;
use resolver_config::ResolverConfig;
use resolver_strategy::{planner, profitability, Profitability, ResolverLedger};
use resolver_types::{
	unix_now, Amount, CycleSummary, FillTransaction, LiquiditySource, MarketRateOracle, Order,
	OrderDiscovery, OrderFill, OrderStatus, ResolverEvent, ResolverInfo, Timestamp,
	TransactionExecutor,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::reporting::OutcomeReporter;
use crate::EngineError;

/// Ring-buffer capacity of the event channel, shared by all subscribers;
/// a lagging subscriber loses the oldest events first.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Cumulative outcome counts since the engine was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeTotals {
	pub succeeded: u64,
	pub failed: u64,
	pub unconfirmed: u64,
	pub stale: u64,
}

/// Operator-facing engine status.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
	pub is_running: bool,
	pub config: ResolverConfig,
	pub resolver_stats: Vec<ResolverInfo>,
	pub cycles_completed: u64,
	pub totals: CumulativeTotals,
	pub last_cycle: Option<CycleSummary>,
}

/// Outcome of one isolated fill attempt.
enum AttemptOutcome {
	Succeeded,
	Failed,
	Unconfirmed,
	/// Rejected by the pre-submission re-validation; nothing was submitted.
	Stale,
}

struct EngineInner {
	config: ResolverConfig,
	executor: Arc<dyn TransactionExecutor>,
	oracle: Arc<dyn MarketRateOracle>,
	liquidity: Arc<dyn LiquiditySource>,
	discovery: Arc<dyn OrderDiscovery>,
	ledger: ResolverLedger,
	reporter: OutcomeReporter,
	fills: RwLock<Vec<OrderFill>>,
	totals: Mutex<CumulativeTotals>,
	cycles: AtomicU64,
	running: AtomicBool,
}

struct LoopTask {
	shutdown: watch::Sender<bool>,
	handle: JoinHandle<()>,
}

/// Scans, ranks, and executes auction order fills for one resolver.
///
/// All collaborators are injected; the engine holds no ambient state, so
/// several orchestrators (different resolvers, different networks) can
/// coexist in one process.
pub struct FillOrchestrator {
	inner: Arc<EngineInner>,
	loop_task: Mutex<Option<LoopTask>>,
}

impl FillOrchestrator {
	/// Builds an orchestrator from validated configuration and its external
	/// collaborators. Bad configuration is rejected here, before anything
	/// is spawned.
	pub fn new(
		config: ResolverConfig,
		executor: Arc<dyn TransactionExecutor>,
		oracle: Arc<dyn MarketRateOracle>,
		liquidity: Arc<dyn LiquiditySource>,
		discovery: Arc<dyn OrderDiscovery>,
	) -> Result<Self, EngineError> {
		config
			.validate()
			.map_err(|e| EngineError::Config(e.to_string()))?;

		let ledger = ResolverLedger::new();
		ledger.register(
			config.resolver.address.clone(),
			config.resolver.supported_tokens.clone(),
		);

		Ok(Self {
			inner: Arc::new(EngineInner {
				config,
				executor,
				oracle,
				liquidity,
				discovery,
				ledger,
				reporter: OutcomeReporter::new(EVENT_CHANNEL_CAPACITY),
				fills: RwLock::new(Vec::new()),
				totals: Mutex::new(CumulativeTotals::default()),
				cycles: AtomicU64::new(0),
				running: AtomicBool::new(false),
			}),
			loop_task: Mutex::new(None),
		})
	}

	/// Starts the scan loop.
	pub fn start(&self) -> Result<(), EngineError> {
		let mut slot = self.loop_task.lock().unwrap();
		if slot.is_some() {
			return Err(EngineError::AlreadyRunning);
		}

		let (shutdown, mut shutdown_rx) = watch::channel(false);
		let inner = self.inner.clone();
		inner.running.store(true, Ordering::SeqCst);

		let handle = tokio::spawn(async move {
			let mut ticker =
				interval(Duration::from_millis(inner.config.engine.scan_interval_ms));
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
			info!(
				"Fill engine started for resolver {} ({}ms cadence)",
				inner.config.resolver.address, inner.config.engine.scan_interval_ms
			);

			loop {
				tokio::select! {
					_ = ticker.tick() => {
						// The cycle is awaited inside this arm, so the stop
						// signal is only observed between cycles: in-flight
						// submissions always settle first.
						inner.run_cycle().await;
					}
					changed = shutdown_rx.changed() => {
						if changed.is_err() || *shutdown_rx.borrow() {
							break;
						}
					}
				}
			}

			inner.running.store(false, Ordering::SeqCst);
			info!("Fill engine stopped");
		});

		*slot = Some(LoopTask { shutdown, handle });
		Ok(())
	}

	/// Cooperative stop: signals the loop and waits for the current cycle's
	/// in-flight submissions to settle. A submitted transaction is never
	/// abandoned mid-flight.
	pub async fn stop(&self) -> Result<(), EngineError> {
		let task = self
			.loop_task
			.lock()
			.unwrap()
			.take()
			.ok_or(EngineError::NotRunning)?;

		task.shutdown.send(true).ok();
		task.handle.await.ok();
		Ok(())
	}

	/// Current engine status: run state, per-resolver statistics, the
	/// active configuration, cumulative outcome counts, and the latest
	/// cycle summary.
	pub fn status(&self) -> EngineStatus {
		EngineStatus {
			is_running: self.inner.running.load(Ordering::SeqCst),
			config: self.inner.config.clone(),
			resolver_stats: self.inner.ledger.all(),
			cycles_completed: self.inner.cycles.load(Ordering::Relaxed),
			totals: self.inner.totals.lock().unwrap().clone(),
			last_cycle: self.inner.reporter.last_cycle(),
		}
	}

	/// Subscribes to per-fill outcomes and cycle summaries.
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ResolverEvent> {
		self.inner.reporter.subscribe()
	}

	/// Settles a previously unconfirmed submission once its fate is known
	/// out of band (a later chain lookup, an indexer, manual inspection).
	/// Applies the deferred success or failure to the resolver's reputation
	/// statistics; `execution_cost` is what the transaction actually cost
	/// and only matters when it succeeded.
	pub fn resolve_unconfirmed(&self, succeeded: bool, execution_cost: Amount) {
		self.inner.ledger.resolve_unconfirmed(
			&self.inner.config.resolver.address,
			succeeded,
			execution_cost,
			unix_now(),
		);
	}

	/// Fills recorded by this engine instance, oldest first.
	pub fn recent_fills(&self) -> Vec<OrderFill> {
		self.inner.fills.read().unwrap().clone()
	}

	/// Reputation statistics for this engine's resolver.
	pub fn resolver_info(&self) -> Option<ResolverInfo> {
		self.inner.ledger.get(&self.inner.config.resolver.address)
	}
}

impl EngineInner {
	/// One scan cycle: discover, filter, rank, and attempt fills.
	async fn run_cycle(&self) -> CycleSummary {
		let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
		let now = unix_now();
		let mut summary = CycleSummary {
			cycle,
			..CycleSummary::default()
		};

		let orders = match self.discovery.pending_orders().await {
			Ok(orders) => orders,
			Err(e) => {
				warn!("Order discovery failed, skipping cycle {}: {}", cycle, e);
				self.finish_cycle(summary.clone());
				return summary;
			}
		};
		summary.scanned = orders.len();

		let eligible: Vec<Order> = orders
			.into_iter()
			.filter(|order| order.status == OrderStatus::Pending)
			.filter(|order| {
				matches!(&order.auction, Some(auction) if AuctionClock::new(auction).is_active(now))
			})
			.collect();
		summary.eligible = eligible.len();

		let mut profitable: Vec<(Order, Profitability)> = Vec::new();
		for order in eligible {
			if let Some(report) = self.evaluate(&order, now).await {
				profitable.push((order, report));
			}
		}
		summary.profitable = profitable.len();

		// Highest margin first; ties go to the oldest order so long-lived
		// orders are not starved.
		profitable.sort_by(|a, b| {
			b.1.profit_margin_percent
				.cmp(&a.1.profit_margin_percent)
				.then_with(|| a.0.created_at.cmp(&b.0.created_at))
		});
		profitable.truncate(self.config.engine.max_concurrent_orders);
		summary.attempted = profitable.len();

		let outcomes = join_all(
			profitable
				.into_iter()
				.map(|(order, _)| self.attempt_fill(order)),
		)
		.await;

		for outcome in &outcomes {
			match outcome {
				AttemptOutcome::Succeeded => summary.succeeded += 1,
				AttemptOutcome::Failed => summary.failed += 1,
				AttemptOutcome::Unconfirmed => summary.unconfirmed += 1,
				AttemptOutcome::Stale => summary.stale += 1,
			}
		}

		info!(
			"Cycle {}: scanned {}, eligible {}, profitable {}, attempted {} \
			 ({} ok, {} failed, {} unconfirmed, {} stale)",
			cycle,
			summary.scanned,
			summary.eligible,
			summary.profitable,
			summary.attempted,
			summary.succeeded,
			summary.failed,
			summary.unconfirmed,
			summary.stale
		);
		self.finish_cycle(summary.clone());
		summary
	}

	fn finish_cycle(&self, summary: CycleSummary) {
		{
			let mut totals = self.totals.lock().unwrap();
			totals.succeeded += summary.succeeded as u64;
			totals.failed += summary.failed as u64;
			totals.unconfirmed += summary.unconfirmed as u64;
			totals.stale += summary.stale as u64;
		}
		self.reporter.emit(ResolverEvent::CycleCompleted(summary));
	}

	/// Profitability check for one candidate. Lookup failures and plan
	/// rejections skip the order for this cycle; both are routine.
	async fn evaluate(&self, order: &Order, now: Timestamp) -> Option<Profitability> {
		let address = &self.config.resolver.address;

		let mut available = match self
			.liquidity
			.available_liquidity(address, &order.from_token)
			.await
		{
			Ok(amount) => amount,
			Err(e) => {
				debug!("Liquidity lookup failed for order {}: {}", order.id, e);
				return None;
			}
		};
		if let Some(cap) = self.config.engine.max_order_size {
			available = available.min(cap);
		}

		let market_rate = match self
			.oracle
			.market_rate(&order.from_token, &order.to_token)
			.await
		{
			Ok(rate) => rate,
			Err(e) => {
				debug!("Market rate lookup failed for order {}: {}", order.id, e);
				return None;
			}
		};

		let estimated_cost = self.ledger.estimate_execution_cost(
			address,
			self.config.engine.base_execution_cost,
			self.config.engine.gas_urgency,
		);

		let report = profitability::analyze(
			order,
			available,
			market_rate,
			estimated_cost,
			self.config.engine.min_profit_margin_percent,
			now,
		);
		if report.is_profitable {
			Some(report)
		} else {
			if let Some(rejection) = &report.rejection {
				debug!("Order {} skipped: {}", order.id, rejection);
			} else {
				debug!(
					"Order {} not profitable (margin {}%)",
					order.id, report.profit_margin_percent
				);
			}
			None
		}
	}

	/// One isolated fill attempt: re-validate, build, submit, record.
	async fn attempt_fill(&self, order: Order) -> AttemptOutcome {
		let address = self.config.resolver.address.clone();
		let now = unix_now();

		// Time has passed since selection and another resolver may have
		// taken the order; re-check activity and bounds against fresh
		// liquidity before committing anything.
		let mut available = match self
			.liquidity
			.available_liquidity(&address, &order.from_token)
			.await
		{
			Ok(amount) => amount,
			Err(e) => {
				debug!("Liquidity re-check failed for order {}: {}", order.id, e);
				return AttemptOutcome::Stale;
			}
		};
		if let Some(cap) = self.config.engine.max_order_size {
			available = available.min(cap);
		}
		let plan = match planner::plan(&order, available, now) {
			Ok(plan) => plan,
			Err(rejection) => {
				debug!("Order {} no longer fillable: {}", order.id, rejection);
				return AttemptOutcome::Stale;
			}
		};

		let tx = FillTransaction {
			order_id: order.id.clone(),
			resolver_address: address.clone(),
			from_token: order.from_token.clone(),
			to_token: order.to_token.clone(),
			fill_amount: plan.fill_amount,
			fill_rate: plan.fill_rate,
			urgency: self.config.engine.gas_urgency,
		};

		let cap = Duration::from_secs(self.config.engine.submit_timeout_secs);
		match timeout(cap, self.executor.submit(&tx)).await {
			Ok(Ok(receipt)) => {
				let fill = OrderFill {
					id: Uuid::new_v4().to_string(),
					order_id: order.id.clone(),
					resolver_address: address.clone(),
					fill_amount: plan.fill_amount,
					fill_rate: plan.fill_rate,
					timestamp: unix_now(),
					transaction_reference: receipt.reference,
					execution_cost: receipt.execution_cost,
				};
				info!(
					"Filled order {}: {} at rate {} (cost {})",
					order.id, fill.fill_amount, fill.fill_rate, fill.execution_cost
				);
				self.ledger
					.record_success(&address, fill.execution_cost, fill.timestamp);
				self.fills.write().unwrap().push(fill.clone());
				self.reporter.emit(ResolverEvent::FillSucceeded { fill });
				AttemptOutcome::Succeeded
			}
			Ok(Err(error)) => {
				warn!("Fill failed for order {}: {}", order.id, error);
				self.ledger.record_failure(&address, unix_now());
				self.reporter.emit(ResolverEvent::FillFailed {
					order_id: order.id,
					error,
				});
				AttemptOutcome::Failed
			}
			Err(_) => {
				// The transaction already left as committed liquidity; its
				// effect may still land. Treated as unconfirmed, never as a
				// definitive failure.
				warn!(
					"No confirmation for order {} within {}s",
					order.id, self.config.engine.submit_timeout_secs
				);
				self.ledger.record_unconfirmed(&address, unix_now());
				self.reporter.emit(ResolverEvent::FillUnconfirmed {
					order_id: order.id,
				});
				AttemptOutcome::Unconfirmed
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use resolver_config::{EngineSettings, ResolverSettings};
	use resolver_types::{
		AuctionDetails, DecayFunction, DiscoveryError, ExecutionError, ExecutionReceipt,
		LiquidityError, OracleError, Rate, TokenId,
	};
	use rust_decimal::Decimal;
	use rust_decimal_macros::dec;
	use std::collections::{HashSet, VecDeque};

	struct MockDiscovery {
		orders: Vec<Order>,
	}

	#[async_trait]
	impl OrderDiscovery for MockDiscovery {
		async fn pending_orders(&self) -> Result<Vec<Order>, DiscoveryError> {
			Ok(self.orders.clone())
		}
	}

	struct MockOracle {
		rate: Rate,
	}

	#[async_trait]
	impl MarketRateOracle for MockOracle {
		async fn market_rate(&self, _: &TokenId, _: &TokenId) -> Result<Rate, OracleError> {
			Ok(self.rate)
		}
	}

	struct MockLiquidity {
		/// Scripted responses, then `default` forever.
		responses: Mutex<VecDeque<Decimal>>,
		default: Decimal,
	}

	impl MockLiquidity {
		fn constant(amount: Decimal) -> Self {
			Self {
				responses: Mutex::new(VecDeque::new()),
				default: amount,
			}
		}

		fn scripted(responses: Vec<Decimal>, default: Decimal) -> Self {
			Self {
				responses: Mutex::new(responses.into()),
				default,
			}
		}
	}

	#[async_trait]
	impl LiquiditySource for MockLiquidity {
		async fn available_liquidity(
			&self,
			_: &resolver_types::Address,
			_: &TokenId,
		) -> Result<Decimal, LiquidityError> {
			Ok(self
				.responses
				.lock()
				.unwrap()
				.pop_front()
				.unwrap_or(self.default))
		}
	}

	struct MockExecutor {
		submitted: Mutex<Vec<FillTransaction>>,
		fail_orders: HashSet<String>,
		hang: bool,
		cost: Decimal,
	}

	impl MockExecutor {
		fn succeeding(cost: Decimal) -> Self {
			Self {
				submitted: Mutex::new(Vec::new()),
				fail_orders: HashSet::new(),
				hang: false,
				cost,
			}
		}

		fn submitted_ids(&self) -> Vec<String> {
			self.submitted
				.lock()
				.unwrap()
				.iter()
				.map(|tx| tx.order_id.clone())
				.collect()
		}
	}

	#[async_trait]
	impl TransactionExecutor for MockExecutor {
		async fn submit(&self, tx: &FillTransaction) -> Result<ExecutionReceipt, ExecutionError> {
			self.submitted.lock().unwrap().push(tx.clone());
			if self.hang {
				tokio::time::sleep(Duration::from_secs(3600)).await;
			}
			if self.fail_orders.contains(&tx.order_id) {
				return Err(ExecutionError::TransactionFailed("rejected".into()));
			}
			Ok(ExecutionReceipt {
				reference: format!("0xref-{}", tx.order_id),
				execution_cost: self.cost,
			})
		}
	}

	fn config() -> ResolverConfig {
		ResolverConfig {
			resolver: ResolverSettings {
				address: "0xresolver".into(),
				supported_tokens: vec!["SUI".into()],
			},
			engine: EngineSettings {
				scan_interval_ms: 100,
				submit_timeout_secs: 1,
				..EngineSettings::default()
			},
		}
	}

	/// An order whose auction opened 30s ago with 270s to go.
	fn live_order(id: &str, start_rate: Decimal, created_at: Timestamp) -> Order {
		let now = unix_now();
		Order {
			id: id.into(),
			maker: "maker".into(),
			from_token: "SUI".into(),
			to_token: "USDC".into(),
			from_amount: dec!(1000),
			min_fill_amount: dec!(10),
			max_fill_amount: dec!(1000),
			partial_fill_allowed: true,
			created_at,
			expires_at: now + 600,
			auction: Some(AuctionDetails {
				start_time: now - 30,
				duration_secs: 300,
				start_rate,
				end_rate: dec!(1.5),
				decay: DecayFunction::Linear,
			}),
			status: OrderStatus::Pending,
			fill_history: vec![],
		}
	}

	fn orchestrator(
		config: ResolverConfig,
		executor: Arc<MockExecutor>,
		liquidity: Arc<MockLiquidity>,
		orders: Vec<Order>,
	) -> FillOrchestrator {
		FillOrchestrator::new(
			config,
			executor,
			Arc::new(MockOracle { rate: dec!(1.0) }),
			liquidity,
			Arc::new(MockDiscovery { orders }),
		)
		.unwrap()
	}

	#[test]
	fn bad_config_is_fatal_at_construction() {
		let mut bad = config();
		bad.engine.max_concurrent_orders = 0;
		let result = FillOrchestrator::new(
			bad,
			Arc::new(MockExecutor::succeeding(dec!(1))),
			Arc::new(MockOracle { rate: dec!(1.0) }),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			Arc::new(MockDiscovery { orders: vec![] }),
		);
		assert!(matches!(result, Err(EngineError::Config(_))));
	}

	#[tokio::test]
	async fn caps_attempts_at_the_concurrency_ceiling() {
		let now = unix_now();
		// Ten profitable orders with distinct margins: higher start rate,
		// higher current rate, fatter margin.
		let orders: Vec<Order> = (0..10)
			.map(|i| {
				let start_rate = dec!(2.0) + Decimal::from(i) / dec!(10);
				live_order(&format!("order-{i}"), start_rate, now - 100)
			})
			.collect();

		let executor = Arc::new(MockExecutor::succeeding(dec!(1)));
		let engine = orchestrator(
			config(),
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.scanned, 10);
		assert_eq!(summary.profitable, 10);
		assert_eq!(summary.attempted, 3);
		assert_eq!(summary.succeeded, 3);

		// Top three margins belong to the highest start rates. Completion
		// order between concurrent attempts is unspecified.
		let ids: HashSet<String> = executor.submitted_ids().into_iter().collect();
		let expected: HashSet<String> =
			["order-9", "order-8", "order-7"].map(String::from).into();
		assert_eq!(ids, expected);
	}

	#[tokio::test]
	async fn equal_margins_go_to_the_oldest_order() {
		let now = unix_now();
		let orders = vec![
			live_order("order-young", dec!(2.5), now - 10),
			live_order("order-old", dec!(2.5), now - 500),
			live_order("order-middle", dec!(2.5), now - 100),
		];

		let mut config = config();
		config.engine.max_concurrent_orders = 1;
		let executor = Arc::new(MockExecutor::succeeding(dec!(1)));
		let engine = orchestrator(
			config,
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);

		engine.inner.run_cycle().await;
		assert_eq!(executor.submitted_ids(), vec!["order-old".to_string()]);
	}

	#[tokio::test]
	async fn one_failed_fill_does_not_abort_the_others() {
		let now = unix_now();
		let orders = vec![
			live_order("order-0", dec!(2.0), now - 100),
			live_order("order-1", dec!(2.2), now - 100),
			live_order("order-2", dec!(2.4), now - 100),
		];

		let mut executor = MockExecutor::succeeding(dec!(1));
		executor.fail_orders.insert("order-1".into());
		let executor = Arc::new(executor);

		let engine = orchestrator(
			config(),
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);
		let mut events = engine.subscribe();

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.attempted, 3);
		assert_eq!(summary.succeeded, 2);
		assert_eq!(summary.failed, 1);
		assert_eq!(engine.recent_fills().len(), 2);

		// Failure dents the reputation that the successes cannot fully
		// restore within one cycle.
		let info = engine.resolver_info().unwrap();
		assert!(info.reputation < dec!(100));
		assert!(info.success_rate < dec!(1));

		let mut saw_failure = false;
		while let Ok(event) = events.try_recv() {
			if let ResolverEvent::FillFailed { order_id, .. } = event {
				assert_eq!(order_id, "order-1");
				saw_failure = true;
			}
		}
		assert!(saw_failure);
	}

	#[tokio::test(start_paused = true)]
	async fn submission_timeout_is_unconfirmed_not_failed() {
		let now = unix_now();
		let orders = vec![live_order("order-0", dec!(2.5), now - 100)];

		let mut executor = MockExecutor::succeeding(dec!(1));
		executor.hang = true;
		let executor = Arc::new(executor);

		let engine = orchestrator(
			config(),
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.attempted, 1);
		assert_eq!(summary.unconfirmed, 1);
		assert_eq!(summary.failed, 0);

		// No definitive result: reputation must not move either way.
		let info = engine.resolver_info().unwrap();
		assert_eq!(info.reputation, dec!(100));
		assert_eq!(info.success_rate, dec!(1));
		assert_eq!(info.unconfirmed_attempts, 1);
	}

	#[tokio::test(start_paused = true)]
	async fn out_of_band_resolution_settles_an_unconfirmed_attempt() {
		let now = unix_now();
		let orders = vec![live_order("order-0", dec!(2.5), now - 100)];

		let mut executor = MockExecutor::succeeding(dec!(1));
		executor.hang = true;
		let executor = Arc::new(executor);

		let engine = orchestrator(
			config(),
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.unconfirmed, 1);
		assert_eq!(engine.resolver_info().unwrap().unconfirmed_attempts, 1);

		// A later chain lookup finds the transaction landed after all; the
		// deferred success now reaches the ledger with its observed cost.
		engine.resolve_unconfirmed(true, dec!(2));
		let info = engine.resolver_info().unwrap();
		assert_eq!(info.unconfirmed_attempts, 0);
		assert_eq!(info.reputation, dec!(100));
		assert_eq!(info.success_rate, dec!(1));
		assert_eq!(info.average_execution_cost, dec!(1));
	}

	#[tokio::test]
	async fn revalidation_rejects_stale_selection_without_submitting() {
		let now = unix_now();
		let orders = vec![live_order("order-0", dec!(2.5), now - 100)];

		// Plenty of liquidity at selection time, none left at submission
		// time: the order was taken while we were ranking.
		let liquidity = Arc::new(MockLiquidity::scripted(
			vec![dec!(1000), dec!(0)],
			dec!(0),
		));
		let executor = Arc::new(MockExecutor::succeeding(dec!(1)));
		let engine = orchestrator(config(), executor.clone(), liquidity, orders);

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.attempted, 1);
		assert_eq!(summary.stale, 1);
		assert_eq!(summary.succeeded + summary.failed + summary.unconfirmed, 0);
		assert!(executor.submitted_ids().is_empty());

		// Nothing was submitted, so the reputation signal is untouched.
		let info = engine.resolver_info().unwrap();
		assert_eq!(info.reputation, dec!(100));
	}

	#[tokio::test]
	async fn skips_pre_start_auctions_and_expired_orders() {
		let now = unix_now();
		let mut pre_start = live_order("order-pre", dec!(2.5), now - 10);
		if let Some(auction) = pre_start.auction.as_mut() {
			auction.start_time = now + 120;
		}
		let mut done = live_order("order-done", dec!(2.5), now - 10);
		done.status = OrderStatus::Filled;
		let orders = vec![pre_start, done, live_order("order-live", dec!(2.5), now - 10)];

		let executor = Arc::new(MockExecutor::succeeding(dec!(1)));
		let engine = orchestrator(
			config(),
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.scanned, 3);
		assert_eq!(summary.eligible, 1);
		assert_eq!(executor.submitted_ids(), vec!["order-live".to_string()]);
	}

	#[tokio::test(start_paused = true)]
	async fn start_and_stop_are_cooperative() {
		let now = unix_now();
		let orders = vec![live_order("order-0", dec!(2.5), now - 100)];
		let executor = Arc::new(MockExecutor::succeeding(dec!(1)));
		let engine = orchestrator(
			config(),
			executor.clone(),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			orders,
		);

		let mut events = engine.subscribe();
		engine.start().unwrap();
		assert!(matches!(engine.start(), Err(EngineError::AlreadyRunning)));

		// At least one full cycle completes and is reported.
		loop {
			if let ResolverEvent::CycleCompleted(summary) = events.recv().await.unwrap() {
				assert_eq!(summary.scanned, 1);
				break;
			}
		}

		engine.stop().await.unwrap();
		let status = engine.status();
		assert!(!status.is_running);
		assert!(status.cycles_completed >= 1);
		assert_eq!(status.last_cycle.unwrap().scanned, 1);
		assert!(matches!(
			engine.stop().await,
			Err(EngineError::NotRunning)
		));
	}

	#[tokio::test]
	async fn discovery_failure_skips_the_cycle_without_crashing() {
		struct FailingDiscovery;

		#[async_trait]
		impl OrderDiscovery for FailingDiscovery {
			async fn pending_orders(&self) -> Result<Vec<Order>, DiscoveryError> {
				Err(DiscoveryError::Source("feed offline".into()))
			}
		}

		let engine = FillOrchestrator::new(
			config(),
			Arc::new(MockExecutor::succeeding(dec!(1))),
			Arc::new(MockOracle { rate: dec!(1.0) }),
			Arc::new(MockLiquidity::constant(dec!(1000))),
			Arc::new(FailingDiscovery),
		)
		.unwrap();

		let summary = engine.inner.run_cycle().await;
		assert_eq!(summary.scanned, 0);
		assert_eq!(summary.attempted, 0);
	}
}
