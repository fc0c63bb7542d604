//! Routing over a full `N x N` table, relaxed incrementally as each edge is added.
//!
//! Every edge costs one relaxation pass over the pairs it can shorten, so the
//! build is `O(R * N^2)` in the worst case with `O(N^2)` memory. When two paths
//! have the same hop count the one discovered first is kept.

use crate::core::currency::{CurrencyId, Universe};
use crate::core::error::RouteError;
use crate::core::graph::{RateGraph, RoutingTable, Strategy};
use crate::core::rate::{Quote, RateEdge, RateRegistry};
use tracing::{debug, warn};

const UNREACHABLE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    quote: Option<Quote>,
    next_hop: Option<CurrencyId>,
}

struct DenseRoutes {
    universe: Universe,
    registry: RateRegistry,
    cells: Vec<Cell>,
}

impl DenseRoutes {
    fn build(universe: Universe, edges: Vec<RateEdge>) -> Result<Self, RouteError> {
        universe.check()?;
        for edge in &edges {
            universe.index(edge.from)?;
            universe.index(edge.to)?;
        }

        let n = universe.len();
        let mut routes = DenseRoutes {
            universe,
            registry: RateRegistry::with_capacity(edges.len()),
            cells: vec![Cell::default(); n * n],
        };
        // Minimal hop count between two currencies, kept symmetric.
        let mut distance = vec![UNREACHABLE; n * n];
        for i in 0..n {
            distance[i * n + i] = 0;
        }

        for edge in edges {
            let quote = routes.registry.register(edge.provider);
            let (from, to) = (edge.from as usize, edge.to as usize);
            if from == to {
                warn!(currency = edge.from, "Ignoring self-quoted rate");
                continue;
            }
            routes.cells[from * n + to].quote = Some(quote);
            routes.cells[to * n + from].quote = Some(quote.reversed());
            routes.relax(&mut distance, from, to);
        }

        debug!(
            currencies = n,
            rates = routes.registry.len(),
            "Built dense routing table"
        );
        Ok(routes)
    }

    /// Shortens every `i -> from -> to -> j` pair through the new edge.
    ///
    /// Only currencies already connected to `from` or `to` can gain a path, so
    /// both sides are collected up front. Distances changed during the pass
    /// only ever go through the new edge, which can never shorten another pair
    /// further, so working from the snapshot gives the same table.
    fn relax(&mut self, distance: &mut [u32], from: usize, to: usize) {
        let n = self.universe.len();
        let reachable = |distance: &[u32], origin: usize| -> Vec<(usize, u32)> {
            (0..n)
                .filter_map(|k| {
                    let d = distance[origin * n + k];
                    (d != UNREACHABLE).then_some((k, d))
                })
                .collect()
        };
        let near_from = reachable(&*distance, from);
        let near_to = reachable(&*distance, to);

        for &(i, from_dist) in &near_from {
            for &(j, to_dist) in &near_to {
                let candidate = from_dist + to_dist + 1;
                if candidate >= distance[i * n + j] {
                    continue;
                }
                distance[i * n + j] = candidate;
                distance[j * n + i] = candidate;
                self.cells[i * n + j].next_hop = if i != from {
                    self.cells[i * n + from].next_hop
                } else {
                    Some(to as CurrencyId)
                };
                self.cells[j * n + i].next_hop = if j != to {
                    self.cells[j * n + to].next_hop
                } else {
                    Some(from as CurrencyId)
                };
            }
        }
    }
}

impl RoutingTable for DenseRoutes {
    fn universe(&self) -> Universe {
        self.universe
    }

    fn registry(&self) -> &RateRegistry {
        &self.registry
    }

    fn next_hop(&self, at: CurrencyId, to: CurrencyId) -> Option<CurrencyId> {
        let n = self.universe.len();
        self.cells[at as usize * n + to as usize].next_hop
    }

    fn direct_quote(&self, at: CurrencyId, next: CurrencyId) -> Option<Quote> {
        let n = self.universe.len();
        self.cells[at as usize * n + next as usize].quote
    }
}

/// Rate graph backed by a dense routing table.
pub struct DenseRateGraph {
    universe: Universe,
    routes: Option<DenseRoutes>,
}

impl DenseRateGraph {
    pub fn new(universe: Universe) -> Self {
        Self {
            universe,
            routes: None,
        }
    }

    fn routes(&self) -> Result<&DenseRoutes, RouteError> {
        self.routes.as_ref().ok_or(RouteError::NotInitialized)
    }
}

impl RateGraph for DenseRateGraph {
    fn strategy(&self) -> Strategy {
        Strategy::Dense
    }

    fn init(&mut self, edges: Vec<RateEdge>) -> Result<(), RouteError> {
        self.routes = None;
        self.routes = Some(DenseRoutes::build(self.universe, edges)?);
        Ok(())
    }

    fn convert(&self, amount: f64, from: CurrencyId, to: CurrencyId) -> Result<f64, RouteError> {
        self.routes()?.convert_checked(amount, from, to)
    }

    fn route(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<Option<Vec<CurrencyId>>, RouteError> {
        self.routes()?.route_checked(from, to)
    }
}
