//! The conversion capability shared by every routing strategy.

use crate::core::bfs::BfsRateGraph;
use crate::core::currency::{CurrencyId, Universe};
use crate::core::dense::DenseRateGraph;
use crate::core::error::RouteError;
use crate::core::rate::{Quote, RateEdge, RateRegistry, UNAVAILABLE};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// Precomputed minimum-hop routes between currencies.
///
/// `init` replaces any previous state, so a graph can be rebuilt from a new
/// edge set at any time. Queries before the first successful `init` fail with
/// [`RouteError::NotInitialized`]. Once built, queries only read the routing
/// table and may run concurrently.
pub trait RateGraph: Send + Sync {
    fn strategy(&self) -> Strategy;

    fn init(&mut self, edges: Vec<RateEdge>) -> Result<(), RouteError>;

    /// Converts `amount` of `from` into `to`.
    ///
    /// Returns [`UNAVAILABLE`] when no path exists or a rate on the path is
    /// currently unavailable.
    fn convert(&self, amount: f64, from: CurrencyId, to: CurrencyId) -> Result<f64, RouteError>;

    /// The currencies a conversion walks through, both endpoints included.
    fn route(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<Option<Vec<CurrencyId>>, RouteError>;

    fn hops(&self, from: CurrencyId, to: CurrencyId) -> Result<Option<usize>, RouteError> {
        Ok(self.route(from, to)?.map(|path| path.len() - 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Incremental all-pairs relaxation over a full table.
    #[serde(alias = "incremental")]
    Dense,
    /// Breadth-first search from every currency over per-currency maps.
    #[default]
    #[serde(alias = "sparse")]
    Bfs,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Dense, Strategy::Bfs];

    pub fn build(self, universe: Universe) -> Box<dyn RateGraph> {
        match self {
            Strategy::Dense => Box::new(DenseRateGraph::new(universe)),
            Strategy::Bfs => Box::new(BfsRateGraph::new(universe)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strategy::Dense => "dense",
                Strategy::Bfs => "bfs",
            }
        )
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dense" | "incremental" => Ok(Strategy::Dense),
            "bfs" | "sparse" => Ok(Strategy::Bfs),
            _ => Err(anyhow::anyhow!("Invalid routing strategy: {}", s)),
        }
    }
}

/// Facade over whichever strategy was selected.
pub struct Converter {
    graph: Box<dyn RateGraph>,
}

impl Converter {
    pub fn new(strategy: Strategy, universe: Universe) -> Self {
        Self {
            graph: strategy.build(universe),
        }
    }

    /// Creates a converter and initialises it in one step.
    pub fn with_edges(
        strategy: Strategy,
        universe: Universe,
        edges: Vec<RateEdge>,
    ) -> Result<Self, RouteError> {
        let mut converter = Self::new(strategy, universe);
        converter.init(edges)?;
        Ok(converter)
    }

    pub fn strategy(&self) -> Strategy {
        self.graph.strategy()
    }

    pub fn init(&mut self, edges: Vec<RateEdge>) -> Result<(), RouteError> {
        self.graph.init(edges)
    }

    pub fn convert(&self, amount: f64, from: CurrencyId, to: CurrencyId) -> Result<f64, RouteError> {
        self.graph.convert(amount, from, to)
    }

    pub fn route(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<Option<Vec<CurrencyId>>, RouteError> {
        self.graph.route(from, to)
    }

    pub fn hops(&self, from: CurrencyId, to: CurrencyId) -> Result<Option<usize>, RouteError> {
        self.graph.hops(from, to)
    }
}

/// One directly quoted step of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hop {
    pub to: CurrencyId,
    pub quote: Quote,
}

/// Read access to a built routing table, shared by both strategies.
pub(crate) trait RoutingTable {
    fn universe(&self) -> Universe;

    fn registry(&self) -> &RateRegistry;

    /// Next currency on a shortest path from `at` towards `to`.
    fn next_hop(&self, at: CurrencyId, to: CurrencyId) -> Option<CurrencyId>;

    /// Quote of the direct edge `at -> next`, if one was registered.
    fn direct_quote(&self, at: CurrencyId, next: CurrencyId) -> Option<Quote>;

    /// Follows next hops from `from` to `to`. `None` means unreachable.
    fn trace(&self, from: CurrencyId, to: CurrencyId) -> Option<Vec<Hop>> {
        let mut hops = Vec::new();
        let mut at = from;
        while at != to {
            // A route never revisits a currency.
            if hops.len() >= self.universe().len() {
                return None;
            }
            let next = self.next_hop(at, to)?;
            let quote = self.direct_quote(at, next)?;
            hops.push(Hop { to: next, quote });
            at = next;
        }
        Some(hops)
    }

    fn convert_checked(
        &self,
        amount: f64,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<f64, RouteError> {
        self.universe().index(from)?;
        self.universe().index(to)?;
        if from == to {
            return Ok(amount);
        }
        let Some(hops) = self.trace(from, to) else {
            debug!(from, to, "No conversion path");
            return Ok(UNAVAILABLE);
        };
        debug!(from, to, hops = hops.len(), "Applying rates");
        Ok(self
            .registry()
            .apply(amount, hops.iter().map(|hop| hop.quote))
            .unwrap_or(UNAVAILABLE))
    }

    fn route_checked(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<Option<Vec<CurrencyId>>, RouteError> {
        self.universe().index(from)?;
        self.universe().index(to)?;
        Ok(self.trace(from, to).map(|hops| {
            std::iter::once(from)
                .chain(hops.iter().map(|hop| hop.to))
                .collect()
        }))
    }
}
