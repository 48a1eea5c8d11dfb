//! The `Simulator` struct and its tick loop.

use cc_agent::AgentPool;
use cc_core::{AgentId, CallId, ClassId, ExpRate, PoolId, SimClock, SimParams, SimRng, Tick};
use cc_flow::{ArrivalFlow, ClassQueues, FlowEvent, PatienceFlow, QueuedCall, ServiceFlow};
use cc_router::{RouteCtx, RoutePolicy};
use cc_scenario::Scenario;

use crate::{Evaluator, KpiReport, Metrics, SimError, SimObserver, SimResult};

// ── RunSummary ────────────────────────────────────────────────────────────────

/// What a finished run hands back: the KPI report and the evaluator score.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub report: KpiReport,
    pub score:  f64,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Holds all mutable state of one run and drives the tick loop:
///
/// 1. **Drain** the due events of the current tick, in the fixed precedence
///    arrivals → completions → abandonments.  Completed agents are released
///    as their events are collected, so a completion at tick t can rescue a
///    call whose patience also expires at t.
/// 2. **Dispatch** the buffered events in collection order through the
///    routing policy.
/// 3. **Sample** every KPI series, then invoke observer hooks.
///
/// After the final tick the KPI report is assembled and scored by the
/// injected evaluator.  Create via [`SimBuilder`][crate::SimBuilder]; a
/// `Simulator` runs once and is then exhausted.
pub struct Simulator {
    pub params: SimParams,
    pub clock:  SimClock,

    scenario:  Scenario,
    policy:    Box<dyn RoutePolicy>,
    evaluator: Box<dyn Evaluator>,
    rng:       SimRng,

    pools:  Vec<AgentPool>,
    queues: ClassQueues,

    arrivals: ArrivalFlow,
    services: ServiceFlow,
    patience: PatienceFlow,

    metrics: Metrics,

    /// Pre-built samplers: `service_dists[pool][class]` exists iff the edge
    /// does; `patience_dists[class]` always exists (ν is validated > 0).
    service_dists:  Vec<Vec<Option<ExpRate>>>,
    patience_dists: Vec<ExpRate>,

    /// Serial for the next queued call.
    next_call: u64,
    /// Reused per-tick event buffer.
    events: Vec<FlowEvent>,
    /// Calls served this tick whose abandonment event was already in the
    /// buffer (deadline == this tick).  Their abandon dispatch is a no-op.
    rescued: Vec<CallId>,
}

impl Simulator {
    // ── Package-private constructor used by SimBuilder ────────────────────

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        params:         SimParams,
        scenario:       Scenario,
        policy:         Box<dyn RoutePolicy>,
        evaluator:      Box<dyn Evaluator>,
        rng:            SimRng,
        pools:          Vec<AgentPool>,
        arrivals:       ArrivalFlow,
        service_dists:  Vec<Vec<Option<ExpRate>>>,
        patience_dists: Vec<ExpRate>,
    ) -> Self {
        let class_count = scenario.class_count();
        let pool_count = scenario.pool_count();
        Self {
            params,
            clock: SimClock::new(),
            scenario,
            policy,
            evaluator,
            rng,
            pools,
            queues: ClassQueues::new(class_count),
            arrivals,
            services: ServiceFlow::new(),
            patience: PatienceFlow::new(),
            metrics: Metrics::new(class_count, pool_count),
            service_dists,
            patience_dists,
            next_call: 0,
            events: Vec::new(),
            rescued: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to the horizon, then score the run.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        log::info!(
            "run start: topology {}, {} classes, {} pools, horizon {} s, policy {}",
            self.scenario.topology(),
            self.scenario.class_count(),
            self.scenario.pool_count(),
            self.params.horizon_secs,
            self.policy.key(),
        );

        loop {
            let now = self.clock.current_tick;
            if now >= self.params.end_tick() {
                break;
            }
            observer.on_tick_start(now);
            let dispatched = self.step(now)?;
            self.metrics.sample(&self.pools);
            observer.on_tick_end(now, dispatched);
            if self.params.sample_interval_ticks > 0
                && now.0 % self.params.sample_interval_ticks == 0
            {
                observer.on_sample(now, &self.metrics);
            }
            self.clock.advance();
        }

        let report = self.metrics.final_report(self.params.horizon_secs, &self.pools);
        let score = self
            .evaluator
            .score(&report.service_level, self.params.sl_threshold);
        observer.on_sim_end(self.clock.current_tick, &report);
        log::info!("run complete at {}: score {score:.4}", self.clock);
        Ok(RunSummary { report, score })
    }

    /// Run exactly `n` ticks from the current position (ignores the
    /// horizon).  Useful for tests and incremental stepping; no report is
    /// assembled.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let dispatched = self.step(now)?;
            self.metrics.sample(&self.pools);
            observer.on_tick_end(now, dispatched);
            self.clock.advance();
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step(&mut self, now: Tick) -> SimResult<usize> {
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        self.rescued.clear();

        // ── Phase 1: collect due events in fixed precedence ───────────────
        self.arrivals.drain_due(now, &mut events);

        let completions_from = events.len();
        self.services.drain_due(now, &mut events);
        // Release each completing agent now, before anything dispatches, so
        // its idle rank reflects this completion when the router runs.
        for event in &events[completions_from..] {
            if let FlowEvent::Completion { pool, agent } = *event {
                self.pools[pool.index()].agent_mut(agent).complete();
            }
        }

        self.patience.drain_due(now, &mut events);

        // ── Phase 2: dispatch in collection order ─────────────────────────
        let dispatched = events.len();
        for event in &events {
            match *event {
                FlowEvent::Arrival { class, at } => self.on_arrival(class, at, now)?,
                FlowEvent::Completion { pool, agent } => self.on_completion(pool, agent, now)?,
                FlowEvent::Abandon { class, call } => self.on_abandon(class, call, now)?,
            }
        }

        self.events = events;
        Ok(dispatched)
    }

    /// Route one arrival: to a free compatible agent, or into the class
    /// queue with a freshly drawn patience budget.
    fn on_arrival(&mut self, class: ClassId, at: Tick, now: Tick) -> SimResult<()> {
        self.metrics.record_arrival(class);

        let choice = self.policy.pool_for_arrival(
            class,
            &RouteCtx {
                scenario: &self.scenario,
                pools:    &self.pools,
                queues:   &self.queues,
            },
        );

        match choice {
            Some(pool) => {
                let agent = self.pools[pool.index()].idlest_index();
                self.start_service(pool, agent, class, now)?;
                // Zero wait is trivially within the AWT.
                self.metrics.record_served(class, true);
            }
            None => {
                let patience = self.patience_dists[class.index()].sample_secs(&mut self.rng);
                let call = QueuedCall {
                    id:       self.next_call_id(),
                    class,
                    arrival:  at,
                    deadline: now + patience,
                };
                self.queues.push_back(call);
                self.patience.push(call.deadline, class, call.id);
            }
        }
        Ok(())
    }

    /// Handle a freed agent: serve the oldest compatible queue head, or stay
    /// idle when nothing waits.
    ///
    /// The freed agent itself is the one re-assigned — with a non-empty
    /// compatible queue every other agent of the pool is necessarily busy —
    /// so the `sub_busy`/`add_busy` pair here is net-zero.
    fn on_completion(&mut self, pool: PoolId, agent: AgentId, now: Tick) -> SimResult<()> {
        self.pools[pool.index()].sub_busy()?;

        let choice = self.policy.class_for_completion(
            pool,
            &RouteCtx {
                scenario: &self.scenario,
                pools:    &self.pools,
                queues:   &self.queues,
            },
        );
        let Some(class) = choice else {
            // Already released during the drain; nothing waits.
            return Ok(());
        };

        let call = self.queues.pop_head(class).ok_or_else(|| {
            SimError::Invariant(format!("policy chose {class} but its queue is empty"))
        })?;
        if !self.patience.cancel(call.id) {
            // Completions dispatch before abandonments, so a call whose
            // patience expires this very tick is rescued here; its abandon
            // event is already in the buffer and must be skipped.
            if call.deadline <= now {
                self.rescued.push(call.id);
            } else {
                return Err(SimError::Invariant(format!(
                    "{} left the patience stream while still queued",
                    call.id
                )));
            }
        }

        let waiting = now - call.arrival;
        self.metrics.record_served(class, waiting <= self.params.awt_secs);
        self.start_service(pool, agent, class, now)
    }

    /// Drop a call whose patience expired while it sat in the queue.
    fn on_abandon(&mut self, class: ClassId, call: CallId, now: Tick) -> SimResult<()> {
        let Some(removed) = self.queues.remove(class, call) else {
            if let Some(position) = self.rescued.iter().position(|&c| c == call) {
                // Served by a completion earlier this tick.
                self.rescued.swap_remove(position);
                return Ok(());
            }
            return Err(SimError::Invariant(format!(
                "abandoning {call} is not queued in {class}"
            )));
        };
        let waiting = now - removed.arrival;
        self.metrics.record_abandoned(class, waiting > self.params.awt_secs);
        Ok(())
    }

    /// Draw a service duration for the (pool, class) edge and put `agent` to
    /// work.
    fn start_service(
        &mut self,
        pool:  PoolId,
        agent: AgentId,
        class: ClassId,
        now:   Tick,
    ) -> SimResult<()> {
        let dist = self.service_dists[pool.index()][class.index()].ok_or_else(|| {
            SimError::Invariant(format!("routing sent {class} to {pool} without an edge"))
        })?;
        let service = dist.sample_secs(&mut self.rng);
        let finish = self.pools[pool.index()]
            .agent_mut(agent)
            .receive(now, class, service)?;
        self.services.push(finish, pool, agent);
        self.pools[pool.index()].add_busy()?;
        Ok(())
    }

    fn next_call_id(&mut self) -> CallId {
        let id = CallId(self.next_call);
        self.next_call += 1;
        id
    }

    // ── Read-only state access ────────────────────────────────────────────

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn pools(&self) -> &[AgentPool] {
        &self.pools
    }

    pub fn queues(&self) -> &ClassQueues {
        &self.queues
    }

    pub fn arrivals(&self) -> &ArrivalFlow {
        &self.arrivals
    }

    pub fn services(&self) -> &ServiceFlow {
        &self.services
    }

    pub fn patience(&self) -> &PatienceFlow {
        &self.patience
    }

    /// Agents currently serving a call of `class`, across all pools.
    pub fn in_service_of(&self, class: ClassId) -> usize {
        self.pools.iter().map(|p| p.serving_class(class)).sum()
    }
}
