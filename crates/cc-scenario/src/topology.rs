//! Named call-center topologies.

use std::fmt;
use std::str::FromStr;

use crate::ScenarioError;

/// The edge pattern of a scenario's compatibility graph.
///
/// X, N, and W have fixed shapes and read only the leading entries of the
/// scenario document; `General` infers the class and pool counts from the
/// service-rate matrix dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    X,
    N,
    W,
    General,
}

impl Topology {
    /// Pool count for the fixed shapes; `None` for the general case.
    pub fn fixed_pool_count(self) -> Option<usize> {
        match self {
            Topology::X | Topology::N | Topology::W => Some(2),
            Topology::General => None,
        }
    }

    /// Class count for the fixed shapes; `None` for the general case.
    pub fn fixed_class_count(self) -> Option<usize> {
        match self {
            Topology::X | Topology::N => Some(2),
            Topology::W => Some(3),
            Topology::General => None,
        }
    }

    /// Whether pool `i` may serve class `j` under this topology.
    ///
    /// For `General` every position is a candidate; the rate matrix decides.
    pub fn has_edge(self, pool: usize, class: usize) -> bool {
        match self {
            Topology::X => true,
            // s1 serves only c1; s2 serves both.
            Topology::N => !(pool == 0 && class == 1),
            // s1 → c1, c2; s2 → c2, c3.
            Topology::W => matches!((pool, class), (0, 0) | (0, 1) | (1, 1) | (1, 2)),
            Topology::General => true,
        }
    }
}

impl FromStr for Topology {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Topology::X),
            "N" | "n" => Ok(Topology::N),
            "W" | "w" => Ok(Topology::W),
            "G" | "g" | "general" => Ok(Topology::General),
            other => Err(ScenarioError::UnknownTopology(other.to_string())),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::X => "X",
            Topology::N => "N",
            Topology::W => "W",
            Topology::General => "G",
        };
        f.write_str(name)
    }
}
