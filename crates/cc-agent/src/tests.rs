//! Unit tests for cc-agent.

use cc_core::{AgentId, ClassId, PoolId, Tick};

use crate::{Agent, AgentError, AgentPool, IdleRank};

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use super::*;

    #[test]
    fn starts_idle_and_never_ranked() {
        let agent = Agent::new(PoolId(0), AgentId(3));
        assert!(agent.is_available());
        assert_eq!(agent.idle_rank(), IdleRank::Never);
        assert_eq!(agent.finish_time(), None);
        assert_eq!(agent.ongoing_class(), None);
    }

    #[test]
    fn receive_marks_busy_until_complete() {
        let mut agent = Agent::new(PoolId(0), AgentId(0));
        let finish = agent.receive(Tick(10), ClassId(1), 30).unwrap();
        assert_eq!(finish, Tick(40));
        assert!(!agent.is_available());
        assert_eq!(agent.ongoing_class(), Some(ClassId(1)));
        assert_eq!(agent.idle_rank(), IdleRank::Busy);

        agent.complete();
        assert!(agent.is_available());
        assert_eq!(agent.ongoing_class(), None);
        assert_eq!(agent.finish_time(), None);
        assert_eq!(agent.idle_rank(), IdleRank::Since(Tick(40)));
    }

    #[test]
    fn receive_while_busy_errors() {
        let mut agent = Agent::new(PoolId(2), AgentId(5));
        agent.receive(Tick(0), ClassId(0), 10).unwrap();
        assert!(matches!(
            agent.receive(Tick(1), ClassId(0), 10),
            Err(AgentError::Busy { pool: PoolId(2), agent: AgentId(5) })
        ));
    }

    #[test]
    fn complete_is_idempotent() {
        // A second complete() must not overwrite the recorded finish tick
        // with the idle sentinel.
        let mut agent = Agent::new(PoolId(0), AgentId(0));
        agent.receive(Tick(0), ClassId(0), 25).unwrap();
        agent.complete();
        agent.complete();
        assert_eq!(agent.idle_rank(), IdleRank::Since(Tick(25)));
    }

    #[test]
    fn idle_rank_ordering() {
        assert!(IdleRank::Never < IdleRank::Since(Tick(0)));
        assert!(IdleRank::Since(Tick(5)) < IdleRank::Since(Tick(6)));
        assert!(IdleRank::Since(Tick(u64::MAX)) < IdleRank::Busy);
    }
}

// ── AgentPool ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pool {
    use super::*;

    /// Pool of three agents where agent 1 finished at tick 5 and agent 2 at
    /// tick 9; agent 0 has never served.
    fn staggered_pool() -> AgentPool {
        let mut pool = AgentPool::new(PoolId(0), 3);
        for (index, finish) in [(1u32, 5u64), (2, 9)] {
            let agent = pool.agent_mut(AgentId(index));
            agent.receive(Tick(0), ClassId(0), finish).unwrap();
            agent.complete();
        }
        pool
    }

    #[test]
    fn availability_tracks_busy_count() {
        let mut pool = AgentPool::new(PoolId(0), 2);
        assert!(pool.is_available());
        pool.add_busy().unwrap();
        assert!(pool.is_available());
        pool.add_busy().unwrap();
        assert!(!pool.is_available());
        pool.sub_busy().unwrap();
        assert!(pool.is_available());
    }

    #[test]
    fn busy_count_is_range_checked() {
        let mut pool = AgentPool::new(PoolId(1), 1);
        assert!(matches!(pool.sub_busy(), Err(AgentError::BusyUnderflow(PoolId(1)))));
        pool.add_busy().unwrap();
        assert!(matches!(pool.add_busy(), Err(AgentError::BusyOverflow(PoolId(1)))));
    }

    #[test]
    fn idlest_prefers_never_served() {
        let pool = staggered_pool();
        assert_eq!(pool.idlest_index(), AgentId(0));
        assert_eq!(pool.idle_rank(), IdleRank::Never);
    }

    #[test]
    fn idlest_prefers_earliest_finish() {
        let mut pool = staggered_pool();
        // Occupy agent 0; the earliest finisher (agent 1, tick 5) is next.
        pool.agent_mut(AgentId(0)).receive(Tick(10), ClassId(0), 60).unwrap();
        assert_eq!(pool.idlest_index(), AgentId(1));
        assert_eq!(pool.idle_rank(), IdleRank::Since(Tick(5)));
    }

    #[test]
    fn idlest_ties_break_to_lowest_index() {
        let pool = AgentPool::new(PoolId(0), 4);
        assert_eq!(pool.idlest_index(), AgentId(0));
    }

    #[test]
    fn fully_busy_pool_ranks_busy() {
        let mut pool = AgentPool::new(PoolId(0), 2);
        for i in 0..2 {
            pool.agent_mut(AgentId(i)).receive(Tick(0), ClassId(0), 10).unwrap();
            pool.add_busy().unwrap();
        }
        assert_eq!(pool.idle_rank(), IdleRank::Busy);
        assert!(!pool.is_available());
    }

    #[test]
    fn occupancy_unit() {
        let mut pool = AgentPool::new(PoolId(0), 4);
        assert_eq!(pool.occupancy_unit(), 0.0);
        pool.add_busy().unwrap();
        assert_eq!(pool.occupancy_unit(), 0.25);
    }

    #[test]
    fn serving_class_counts_only_matching() {
        let mut pool = AgentPool::new(PoolId(0), 3);
        pool.agent_mut(AgentId(0)).receive(Tick(0), ClassId(0), 10).unwrap();
        pool.agent_mut(AgentId(1)).receive(Tick(0), ClassId(1), 10).unwrap();
        assert_eq!(pool.serving_class(ClassId(0)), 1);
        assert_eq!(pool.serving_class(ClassId(1)), 1);
        assert_eq!(pool.serving_class(ClassId(2)), 0);
    }
}
