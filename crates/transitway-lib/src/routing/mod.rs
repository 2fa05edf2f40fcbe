//! Route planning module for the transitway network.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported solver algorithms
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] / [`RouteLeg`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! Each algorithm is encapsulated in its own [`PathSolver`] strategy, so
//! new algorithms can be added without modifying the orchestration here.
//!
//! # Example
//!
//! ```ignore
//! use transitway_lib::{load_network, plan_route, RouteRequest};
//!
//! let network = load_network("path/to/transit.db".as_ref())?;
//! let request = RouteRequest::new("54009", "Clementi Station");
//! let plan = plan_route(&network, &request)?;
//! println!("Route: {} legs, {} km", plan.leg_count(), plan.total_distance_km);
//! ```

mod solver;

pub use solver::{
    select_solver, DijkstraSolver, LinearScanSolver, PathSolver, TransferAwareSolver,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::TransitNetwork;
use crate::error::{Error, Result};
use crate::graph::{Edge, TransitGraph};
use crate::model::{EdgeKind, Node, ServiceId};
use crate::queue::QueueBackend;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Queue-driven Dijkstra with straight-line seeding.
    #[default]
    Dijkstra,
    /// Relaxation with a linear scan in place of a queue.
    LinearScan,
    /// Best-first search that penalizes service transfers.
    TransferAware,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::LinearScan => "linear_scan",
            RouteAlgorithm::TransferAware => "transfer_aware",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
///
/// Endpoints may be given as stop ids or exact stop names; ids win when a
/// value is both.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub algorithm: RouteAlgorithm,
    pub queue: QueueBackend,
}

impl RouteRequest {
    /// Convenience constructor using the default algorithm and queue.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            algorithm: RouteAlgorithm::default(),
            queue: QueueBackend::default(),
        }
    }
}

/// One leg of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from_id: String,
    pub from_name: String,
    pub to_id: String,
    pub to_name: String,
    pub kind: EdgeKind,
    pub service: ServiceId,
    pub distance_km: f64,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub queue: QueueBackend,
    pub start: String,
    pub goal: String,
    pub legs: Vec<RouteLeg>,
    pub total_distance_km: f64,
    pub transfers: usize,
}

impl RoutePlan {
    /// Number of legs in the route.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}

/// Resolve a stop given as an id or an exact display name.
fn resolve_stop<'a>(network: &'a TransitNetwork, query: &str) -> Result<&'a Node> {
    network
        .stop_by_id(query)
        .or_else(|| network.stop_by_name(query))
        .ok_or_else(|| Error::UnknownStop {
            query: query.to_string(),
            suggestions: network.fuzzy_stop_matches(query, 3),
        })
}

/// Service changes between consecutive legs; boarding the first leg never
/// counts.
fn count_transfers(edges: &[Edge]) -> usize {
    edges
        .windows(2)
        .filter(|pair| pair[0].service != pair[1].service)
        .count()
}

/// Compute a route using the requested algorithm and queue backend.
///
/// Resolves both endpoints, builds a fresh graph from the network's edge
/// records, runs the selected solver, and shapes the result. An
/// unreachable goal maps to [`Error::RouteNotFound`]; a stop known to the
/// directory but absent from every edge can never be routed and maps to
/// the same error.
pub fn plan_route(network: &TransitNetwork, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_stop(network, &request.from)?.clone();
    let goal = resolve_stop(network, &request.to)?.clone();

    let graph = TransitGraph::from_records(&network.records)?;
    let (source, target) = match (graph.resolve(&start.id), graph.resolve(&goal.id)) {
        (Some(source), Some(target)) => (source, target),
        _ => {
            return Err(Error::RouteNotFound {
                start: start.id,
                goal: goal.id,
            })
        }
    };

    debug!(
        algorithm = %request.algorithm,
        queue = %request.queue,
        from = %start.id,
        to = %goal.id,
        "planning route"
    );

    let solver = select_solver(request);
    let edges = solver
        .solve(&graph, source, target)
        .ok_or_else(|| Error::RouteNotFound {
            start: start.id.clone(),
            goal: goal.id.clone(),
        })?;

    let legs: Vec<RouteLeg> = edges
        .iter()
        .map(|edge| {
            let from = graph.node(edge.source);
            let to = graph.node(edge.target);
            RouteLeg {
                from_id: from.id.clone(),
                from_name: from.name.clone(),
                to_id: to.id.clone(),
                to_name: to.name.clone(),
                kind: edge.kind,
                service: edge.service,
                distance_km: edge.distance,
            }
        })
        .collect();

    let total_distance_km = legs.iter().map(|leg| leg.distance_km).sum();
    let transfers = count_transfers(&edges);

    Ok(RoutePlan {
        algorithm: request.algorithm,
        queue: request.queue,
        start: start.id,
        goal: goal.id,
        legs,
        total_distance_km,
        transfers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: usize, target: usize, service: u32) -> Edge {
        Edge {
            source,
            target,
            distance: 1.0,
            service: ServiceId(service),
            kind: if service == 0 { EdgeKind::Walk } else { EdgeKind::Bus },
        }
    }

    #[test]
    fn transfers_ignore_the_first_boarding() {
        assert_eq!(count_transfers(&[]), 0);
        assert_eq!(count_transfers(&[edge(0, 1, 7)]), 0);
        assert_eq!(count_transfers(&[edge(0, 1, 7), edge(1, 2, 7)]), 0);
        assert_eq!(count_transfers(&[edge(0, 1, 7), edge(1, 2, 9)]), 1);
        assert_eq!(
            count_transfers(&[edge(0, 1, 0), edge(1, 2, 9), edge(2, 3, 0)]),
            2
        );
    }

    #[test]
    fn algorithm_names_render_snake_case() {
        assert_eq!(RouteAlgorithm::Dijkstra.to_string(), "dijkstra");
        assert_eq!(RouteAlgorithm::LinearScan.to_string(), "linear_scan");
        assert_eq!(RouteAlgorithm::TransferAware.to_string(), "transfer_aware");
    }

    #[test]
    fn route_plan_leg_count() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::Dijkstra,
            queue: QueueBackend::BinaryHeap,
            start: "a".to_string(),
            goal: "c".to_string(),
            legs: Vec::new(),
            total_distance_km: 0.0,
            transfers: 0,
        };
        assert_eq!(plan.leg_count(), 0);
    }
}
