//! The validated compatibility graph.
//!
//! # Data layout
//!
//! Pools and classes live in separate role-tagged vectors, indexed by
//! `PoolId` / `ClassId`; there is no shared node list to slice and no
//! insertion-order dependence.  Edges are stored twice:
//!
//! - a dense I×K rate matrix (`0.0` = no edge) for O(1) `edge_mu` lookups,
//! - adjacency lists in both directions for the router's candidate scans.
//!
//! Adjacency lists are built in ascending index order, which is what makes
//! the router's first-minimum tie-breaks stable.

use std::fmt::Write as _;

use cc_core::{ClassId, PoolId};

use crate::{ScenarioData, ScenarioError, ScenarioResult, Topology};

// ── Node attribute records ────────────────────────────────────────────────────

/// Attributes of one customer class (contract type).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    /// External label, `c1`-based.
    pub label: String,
    /// Mean arrivals per minute.  Zero means the class never arrives.
    pub lambda: f64,
    /// Mean abandonment-patience rate per minute.
    pub nu: f64,
}

/// Attributes of one agent pool (agent group).
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSpec {
    /// External label, `s1`-based.
    pub label: String,
    /// Number of agents, ≥ 1.
    pub capacity: u32,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A validated bipartite compatibility graph.
///
/// Construct with [`Scenario::build`]; building the same topology from the
/// same data twice yields an equal graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    topology: Topology,
    classes:  Vec<ClassSpec>,
    pools:    Vec<PoolSpec>,
    /// Dense I×K service rates; `0.0` marks "no edge".
    mu: Vec<Vec<f64>>,
    /// Classes servable by each pool, ascending class index.
    pool_classes: Vec<Vec<ClassId>>,
    /// Pools able to serve each class, ascending pool index.
    class_pools: Vec<Vec<PoolId>>,
}

impl Scenario {
    /// Validate `data` against `topology` and build the graph.
    ///
    /// Fixed shapes (X, N, W) read the leading entries of the document and
    /// error when fewer are present; the general shape takes its dimensions
    /// from the rate matrix.
    pub fn build(topology: Topology, data: &ScenarioData) -> ScenarioResult<Self> {
        let pool_count = match topology.fixed_pool_count() {
            Some(n) => n,
            None => data.mu.args.len(),
        };
        let class_count = match topology.fixed_class_count() {
            Some(n) => n,
            None => data.mu.args.first().map_or(0, Vec::len),
        };

        if pool_count == 0 {
            return Err(ScenarioError::NoPools);
        }

        // ── Shape checks ──────────────────────────────────────────────────
        if data.s.len() < pool_count {
            return Err(ScenarioError::RateCount {
                what:     "pool capacities",
                expected: pool_count,
                got:      data.s.len(),
            });
        }
        if data.c.args.len() < class_count {
            return Err(ScenarioError::RateCount {
                what:     "arrival rates",
                expected: class_count,
                got:      data.c.args.len(),
            });
        }
        if data.v.args.len() < class_count {
            return Err(ScenarioError::RateCount {
                what:     "patience rates",
                expected: class_count,
                got:      data.v.args.len(),
            });
        }
        if data.mu.args.len() < pool_count
            || data.mu.args[..pool_count].iter().any(|row| row.len() < class_count)
        {
            let got_rows = data.mu.args.len();
            let got_cols = data.mu.args.iter().map(Vec::len).min().unwrap_or(0);
            return Err(ScenarioError::MatrixShape {
                rows: pool_count,
                cols: class_count,
                got_rows,
                got_cols,
            });
        }

        // ── Node attributes ───────────────────────────────────────────────
        let mut pools = Vec::with_capacity(pool_count);
        for (i, &capacity) in data.s[..pool_count].iter().enumerate() {
            if capacity == 0 {
                return Err(ScenarioError::EmptyPool(i + 1));
            }
            pools.push(PoolSpec { label: format!("s{}", i + 1), capacity });
        }

        let mut classes = Vec::with_capacity(class_count);
        for j in 0..class_count {
            let lambda = data.c.args[j];
            let nu = data.v.args[j];
            if !lambda.is_finite() || lambda < 0.0 {
                return Err(ScenarioError::BadArrivalRate(j + 1));
            }
            if !nu.is_finite() || nu <= 0.0 {
                return Err(ScenarioError::BadPatienceRate(j + 1));
            }
            classes.push(ClassSpec { label: format!("c{}", j + 1), lambda, nu });
        }

        // ── Edges ─────────────────────────────────────────────────────────
        let mut mu = vec![vec![0.0; class_count]; pool_count];
        let mut pool_classes = vec![Vec::new(); pool_count];
        let mut class_pools = vec![Vec::new(); class_count];
        for (i, row) in mu.iter_mut().enumerate() {
            for (j, slot) in row.iter_mut().enumerate() {
                if !topology.has_edge(i, j) {
                    continue;
                }
                let rate = data.mu.args[i][j];
                if !rate.is_finite() {
                    return Err(ScenarioError::BadServiceRate { pool: i + 1, class: j + 1 });
                }
                if rate <= 0.0 {
                    // General topologies drop the edge; the fixed shapes
                    // require every one of their named edges.
                    if topology == Topology::General {
                        continue;
                    }
                    return Err(ScenarioError::BadServiceRate { pool: i + 1, class: j + 1 });
                }
                *slot = rate;
                pool_classes[i].push(ClassId(j as u16));
                class_pools[j].push(PoolId(i as u16));
            }
        }

        Ok(Self { topology, classes, pools, mu, pool_classes, class_pools })
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    // ── Node attributes ───────────────────────────────────────────────────

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassSpec {
        &self.classes[id.index()]
    }

    #[inline]
    pub fn pool(&self, id: PoolId) -> &PoolSpec {
        &self.pools[id.index()]
    }

    pub fn classes(&self) -> &[ClassSpec] {
        &self.classes
    }

    pub fn pools(&self) -> &[PoolSpec] {
        &self.pools
    }

    /// Iterator over all `ClassId`s in ascending index order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len() as u16).map(ClassId)
    }

    /// Iterator over all `PoolId`s in ascending index order.
    pub fn pool_ids(&self) -> impl Iterator<Item = PoolId> + '_ {
        (0..self.pools.len() as u16).map(PoolId)
    }

    // ── Edge queries ──────────────────────────────────────────────────────

    /// Service rate of the (pool, class) edge, or `None` when the pool
    /// cannot serve the class.
    #[inline]
    pub fn edge_mu(&self, pool: PoolId, class: ClassId) -> Option<f64> {
        let rate = self.mu[pool.index()][class.index()];
        (rate > 0.0).then_some(rate)
    }

    /// Pools able to serve `class`, in ascending pool order.
    #[inline]
    pub fn pools_for_class(&self, class: ClassId) -> &[PoolId] {
        &self.class_pools[class.index()]
    }

    /// Classes servable by `pool`, in ascending class order.
    #[inline]
    pub fn classes_for_pool(&self, pool: PoolId) -> &[ClassId] {
        &self.pool_classes[pool.index()]
    }

    pub fn edge_count(&self) -> usize {
        self.pool_classes.iter().map(Vec::len).sum()
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    /// Human-readable node and edge listing, used by the CLI banner.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "topology {}: {} pools, {} classes", self.topology, self.pool_count(), self.class_count());
        for pool in &self.pools {
            let _ = writeln!(out, "  {}: capacity {}", pool.label, pool.capacity);
        }
        for class in &self.classes {
            let _ = writeln!(out, "  {}: lambda {}/min, nu {}/min", class.label, class.lambda, class.nu);
        }
        for (i, row) in self.mu.iter().enumerate() {
            for (j, &rate) in row.iter().enumerate() {
                if rate > 0.0 {
                    let _ = writeln!(out, "  s{} -- c{}: mu {}/min", i + 1, j + 1, rate);
                }
            }
        }
        out
    }
}
