//! Solver strategies behind the route planner.
//!
//! `PathSolver` is the seam that keeps `plan_route` ignorant of which
//! algorithm runs; each implementation wraps one of the [`crate::path`]
//! solvers. New algorithms slot in without touching the orchestration.

use crate::graph::{Edge, NodeIndex, TransitGraph};
use crate::path::{find_route_dijkstra, find_route_linear, find_route_transfers};
use crate::queue::QueueBackend;

use super::{RouteAlgorithm, RouteRequest};

/// Strategy trait for shortest-path solvers.
///
/// A solver value carries no per-query state: everything a solve needs is
/// allocated inside `solve`, so one instance is reusable across queries and
/// shareable across threads.
pub trait PathSolver: Send + Sync {
    /// The algorithm identifier for this solver.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Run the algorithm. `Some(edges)` is an ordered source-to-goal path
    /// (empty when source equals goal); `None` means the goal is
    /// unreachable.
    fn solve(&self, graph: &TransitGraph, source: NodeIndex, goal: NodeIndex)
        -> Option<Vec<Edge>>;
}

/// Seeded Dijkstra over a pluggable queue backend.
#[derive(Debug, Clone, Default)]
pub struct DijkstraSolver {
    backend: QueueBackend,
}

impl DijkstraSolver {
    pub fn new(backend: QueueBackend) -> Self {
        Self { backend }
    }
}

impl PathSolver for DijkstraSolver {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn solve(
        &self,
        graph: &TransitGraph,
        source: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<Edge>> {
        find_route_dijkstra(graph, source, goal, self.backend)
    }
}

/// Linear-scan relaxation; keeps no queue at all.
#[derive(Debug, Clone, Default)]
pub struct LinearScanSolver;

impl PathSolver for LinearScanSolver {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::LinearScan
    }

    fn solve(
        &self,
        graph: &TransitGraph,
        source: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<Edge>> {
        find_route_linear(graph, source, goal)
    }
}

/// Transfer-aware best-first search over a pluggable queue backend.
#[derive(Debug, Clone, Default)]
pub struct TransferAwareSolver {
    backend: QueueBackend,
}

impl TransferAwareSolver {
    pub fn new(backend: QueueBackend) -> Self {
        Self { backend }
    }
}

impl PathSolver for TransferAwareSolver {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::TransferAware
    }

    fn solve(
        &self,
        graph: &TransitGraph,
        source: NodeIndex,
        goal: NodeIndex,
    ) -> Option<Vec<Edge>> {
        find_route_transfers(graph, source, goal, self.backend).map(|(_, edges)| edges)
    }
}

/// Select the solver strategy for a request.
pub fn select_solver(request: &RouteRequest) -> Box<dyn PathSolver> {
    match request.algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraSolver::new(request.queue)),
        RouteAlgorithm::LinearScan => Box::new(LinearScanSolver),
        RouteAlgorithm::TransferAware => Box::new(TransferAwareSolver::new(request.queue)),
    }
}
