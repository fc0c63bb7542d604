//! Routing over per-currency maps filled by a breadth-first search from every currency.
//!
//! Building costs `O(N * (N + R))` and stores one entry per reachable pair,
//! which is far less than the dense table when the rate graph is sparse.

use crate::core::currency::{CurrencyId, Universe};
use crate::core::error::RouteError;
use crate::core::graph::{RateGraph, RoutingTable, Strategy};
use crate::core::rate::{Quote, RateEdge, RateRegistry};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
struct Cell {
    next_hop: CurrencyId,
    /// Only set for directly quoted neighbours.
    quote: Option<Quote>,
}

struct BfsRoutes {
    universe: Universe,
    registry: RateRegistry,
    paths: Vec<HashMap<CurrencyId, Cell>>,
}

impl BfsRoutes {
    fn build(universe: Universe, edges: Vec<RateEdge>) -> Result<Self, RouteError> {
        universe.check()?;
        for edge in &edges {
            universe.index(edge.from)?;
            universe.index(edge.to)?;
        }

        let n = universe.len();
        let mut routes = BfsRoutes {
            universe,
            registry: RateRegistry::with_capacity(edges.len()),
            paths: vec![HashMap::new(); n],
        };
        // Direct neighbours in the order their first edge was seen.
        let mut neighbours: Vec<Vec<CurrencyId>> = vec![Vec::new(); n];

        for edge in edges {
            let quote = routes.registry.register(edge.provider);
            let (from, to) = (edge.from, edge.to);
            if from == to {
                warn!(currency = from, "Ignoring self-quoted rate");
                continue;
            }
            let forward = Cell {
                next_hop: to,
                quote: Some(quote),
            };
            if routes.paths[from as usize].insert(to, forward).is_none() {
                neighbours[from as usize].push(to);
            }
            let backward = Cell {
                next_hop: from,
                quote: Some(quote.reversed()),
            };
            if routes.paths[to as usize].insert(from, backward).is_none() {
                neighbours[to as usize].push(from);
            }
        }

        let mut visited: Vec<Option<CurrencyId>> = vec![None; n];
        let mut queue = VecDeque::new();
        for source in 0..universe.size() {
            routes.search_from(source, &neighbours, &mut visited, &mut queue);
        }

        debug!(
            currencies = n,
            rates = routes.registry.len(),
            reachable_pairs = routes.paths.iter().map(HashMap::len).sum::<usize>(),
            "Built BFS routing table"
        );
        Ok(routes)
    }

    /// Records, for every currency reachable from `source`, the direct
    /// neighbour of `source` that starts a shortest path to it.
    fn search_from(
        &mut self,
        source: CurrencyId,
        neighbours: &[Vec<CurrencyId>],
        visited: &mut [Option<CurrencyId>],
        queue: &mut VecDeque<(CurrencyId, CurrencyId)>,
    ) {
        // Each queued entry is (currency, first hop taken from source).
        visited[source as usize] = Some(source);
        for &next in &neighbours[source as usize] {
            visited[next as usize] = Some(source);
            queue.push_back((next, next));
        }

        let paths = &mut self.paths[source as usize];
        while let Some((at, first_hop)) = queue.pop_front() {
            for &next in &neighbours[at as usize] {
                if visited[next as usize] == Some(source) {
                    continue;
                }
                visited[next as usize] = Some(source);
                queue.push_back((next, first_hop));
                paths.insert(
                    next,
                    Cell {
                        next_hop: first_hop,
                        quote: None,
                    },
                );
            }
        }
    }
}

impl RoutingTable for BfsRoutes {
    fn universe(&self) -> Universe {
        self.universe
    }

    fn registry(&self) -> &RateRegistry {
        &self.registry
    }

    fn next_hop(&self, at: CurrencyId, to: CurrencyId) -> Option<CurrencyId> {
        self.paths[at as usize].get(&to).map(|cell| cell.next_hop)
    }

    fn direct_quote(&self, at: CurrencyId, next: CurrencyId) -> Option<Quote> {
        self.paths[at as usize].get(&next)?.quote
    }
}

/// Rate graph backed by breadth-first routing maps.
pub struct BfsRateGraph {
    universe: Universe,
    routes: Option<BfsRoutes>,
}

impl BfsRateGraph {
    pub fn new(universe: Universe) -> Self {
        Self {
            universe,
            routes: None,
        }
    }

    fn routes(&self) -> Result<&BfsRoutes, RouteError> {
        self.routes.as_ref().ok_or(RouteError::NotInitialized)
    }
}

impl RateGraph for BfsRateGraph {
    fn strategy(&self) -> Strategy {
        Strategy::Bfs
    }

    fn init(&mut self, edges: Vec<RateEdge>) -> Result<(), RouteError> {
        self.routes = None;
        self.routes = Some(BfsRoutes::build(self.universe, edges)?);
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
