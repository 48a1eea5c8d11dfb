//! Unit tests for cc-router.

use cc_agent::AgentPool;
use cc_core::{AgentId, CallId, ClassId, PoolId, Tick};
use cc_flow::{ClassQueues, QueuedCall};
use cc_scenario::{MatrixSpec, RateSpec, Scenario, ScenarioData, Topology};

use crate::{policy_by_key, LongestIdle, RouteCtx, RoutePolicy};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn x_scenario() -> Scenario {
    let data = ScenarioData {
        s:  vec![2, 2],
        c:  RateSpec { args: vec![6.0, 6.0] },
        mu: MatrixSpec { args: vec![vec![0.2, 0.2], vec![0.2, 0.2]] },
        v:  RateSpec { args: vec![0.1, 0.1] },
        distribution: Default::default(),
    };
    Scenario::build(Topology::X, &data).unwrap()
}

fn n_scenario() -> Scenario {
    let data = ScenarioData {
        s:  vec![2, 2],
        c:  RateSpec { args: vec![6.0, 6.0] },
        mu: MatrixSpec { args: vec![vec![0.2, -1.0], vec![0.2, 0.2]] },
        v:  RateSpec { args: vec![0.1, 0.1] },
        distribution: Default::default(),
    };
    Scenario::build(Topology::N, &data).unwrap()
}

fn pools_for(scenario: &Scenario) -> Vec<AgentPool> {
    scenario
        .pool_ids()
        .map(|id| AgentPool::new(id, scenario.pool(id).capacity))
        .collect()
}

/// Make every agent of `pool` busy.
fn fill_pool(pool: &mut AgentPool) {
    for i in 0..pool.capacity() {
        pool.agent_mut(AgentId(i)).receive(Tick(0), ClassId(0), 1_000).unwrap();
        pool.add_busy().unwrap();
    }
}

fn queued(id: u64, class: u16, arrival: u64) -> QueuedCall {
    QueuedCall {
        id:       CallId(id),
        class:    ClassId(class),
        arrival:  Tick(arrival),
        deadline: Tick(arrival + 1_000),
    }
}

// ── Arrival side ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival_side {
    use super::*;

    #[test]
    fn only_compatible_pools_considered() {
        let scenario = n_scenario();
        let pools = pools_for(&scenario);
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        // Class c2 is only servable by s2, even though s1 is idle.
        assert_eq!(LongestIdle.pool_for_arrival(ClassId(1), &ctx), Some(PoolId(1)));
    }

    #[test]
    fn no_available_pool_queues_the_call() {
        let scenario = x_scenario();
        let mut pools = pools_for(&scenario);
        fill_pool(&mut pools[0]);
        fill_pool(&mut pools[1]);
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.pool_for_arrival(ClassId(0), &ctx), None);
    }

    #[test]
    fn longest_idle_pool_wins() {
        let scenario = x_scenario();
        let mut pools = pools_for(&scenario);
        // Both pools have served before: s1 last went idle at tick 50,
        // s2 at tick 20.  s2 has been idle longer.
        for (pool, finish) in [(0usize, 50u64), (1, 20)] {
            let agent = pools[pool].agent_mut(AgentId(0));
            agent.receive(Tick(0), ClassId(0), finish).unwrap();
            agent.complete();
        }
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.pool_for_arrival(ClassId(0), &ctx), Some(PoolId(1)));
    }

    #[test]
    fn never_served_pool_beats_recently_idle() {
        let scenario = x_scenario();
        let mut pools = pools_for(&scenario);
        let agent = pools[0].agent_mut(AgentId(0));
        agent.receive(Tick(0), ClassId(0), 5).unwrap();
        agent.complete();
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        // s2 has never served anything and ranks ahead of s1.
        assert_eq!(LongestIdle.pool_for_arrival(ClassId(0), &ctx), Some(PoolId(1)));
    }

    #[test]
    fn ties_break_to_lower_pool_index() {
        let scenario = x_scenario();
        let pools = pools_for(&scenario);
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.pool_for_arrival(ClassId(0), &ctx), Some(PoolId(0)));
    }

    #[test]
    fn skips_full_pool_even_if_idlest() {
        let scenario = x_scenario();
        let mut pools = pools_for(&scenario);
        // s1 has no free agent; s2's agents all served recently but qualify.
        fill_pool(&mut pools[0]);
        for i in 0..2 {
            let agent = pools[1].agent_mut(AgentId(i));
            agent.receive(Tick(0), ClassId(0), 10 + i as u64).unwrap();
            agent.complete();
        }
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.pool_for_arrival(ClassId(0), &ctx), Some(PoolId(1)));
    }
}

// ── Completion side ───────────────────────────────────────────────────────────

#[cfg(test)]
mod completion_side {
    use super::*;

    #[test]
    fn oldest_head_wins() {
        let scenario = x_scenario();
        let pools = pools_for(&scenario);
        let mut queues = ClassQueues::new(scenario.class_count());
        queues.push_back(queued(1, 0, 40));
        queues.push_back(queued(2, 1, 25));
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.class_for_completion(PoolId(0), &ctx), Some(ClassId(1)));
    }

    #[test]
    fn empty_queues_leave_agent_idle() {
        let scenario = x_scenario();
        let pools = pools_for(&scenario);
        let queues = ClassQueues::new(scenario.class_count());
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.class_for_completion(PoolId(0), &ctx), None);
    }

    #[test]
    fn incompatible_queue_ignored() {
        let scenario = n_scenario();
        let pools = pools_for(&scenario);
        let mut queues = ClassQueues::new(scenario.class_count());
        // Only c2 is waiting, and s1 cannot serve it.
        queues.push_back(queued(1, 1, 5));
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.class_for_completion(PoolId(0), &ctx), None);
        assert_eq!(LongestIdle.class_for_completion(PoolId(1), &ctx), Some(ClassId(1)));
    }

    #[test]
    fn head_arrival_ties_break_to_lower_class_index() {
        let scenario = x_scenario();
        let pools = pools_for(&scenario);
        let mut queues = ClassQueues::new(scenario.class_count());
        queues.push_back(queued(1, 0, 30));
        queues.push_back(queued(2, 1, 30));
        let ctx = RouteCtx { scenario: &scenario, pools: &pools, queues: &queues };

        assert_eq!(LongestIdle.class_for_completion(PoolId(0), &ctx), Some(ClassId(0)));
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn g_resolves() {
        let policy = policy_by_key("G").unwrap();
        assert_eq!(policy.key(), "G");
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(policy_by_key("round-robin").is_none());
    }
}
