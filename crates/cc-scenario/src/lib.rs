//! `cc-scenario` — scenario documents and the compatibility graph.
//!
//! A scenario describes a call center as a bipartite graph: agent pools on
//! one side, customer classes on the other, edges carrying the service rate
//! μ of a (pool, class) pair.  Four named topologies differ only in which
//! edges exist:
//!
//! | Topology | Pools | Classes | Edges                                  |
//! |----------|-------|---------|----------------------------------------|
//! | X        | 2     | 2       | every pool serves every class          |
//! | N        | 2     | 2       | s1→c1; s2→c1, c2                       |
//! | W        | 2     | 3       | s1→c1, c2; s2→c2, c3                   |
//! | General  | I     | K       | wherever the I×K rate matrix is > 0    |
//!
//! [`ScenarioData`] is the serde image of the YAML document; [`Scenario`] is
//! the validated, role-tagged graph with O(1) attribute and edge lookups.

pub mod data;
pub mod error;
pub mod graph;
pub mod topology;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use data::{ArrivalDist, DistributionSpec, MatrixSpec, PatienceDist, RateSpec, ScenarioData, ServiceDist};
pub use error::{ScenarioError, ScenarioResult};
pub use graph::{ClassSpec, PoolSpec, Scenario};
pub use topology::Topology;
