//! Shortest-path solvers over a [`TransitGraph`].
//!
//! Three algorithms share the same shape: take a graph plus resolved stop
//! indices, return `Some(edges)` ordered source-to-goal (empty when the two
//! coincide) or `None` when the goal is unreachable. Every call allocates
//! its own working state; nothing survives between solves.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::graph::{Edge, NodeIndex, TransitGraph};
use crate::model::ServiceId;
use crate::queue::{BinaryHeapQueue, BstQueue, MinQueue, QueueBackend, SortedVecQueue};

/// Additive cost applied when a leg switches to a different service.
pub const TRANSFER_PENALTY: f64 = 10.0;

/// Additive cost applied to every leg, discouraging needlessly long paths
/// at equal distance and transfer count.
pub const STEP_COST: f64 = 0.5;

/// Total-order wrapper so f64 costs can live inside `Ord` queue entries.
#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Queue entry for the seeded Dijkstra drain: straight-line seed priority
/// first, node index as the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SeedEntry {
    priority: FloatOrd,
    node: NodeIndex,
}

/// Queue-driven Dijkstra in its historical form.
///
/// The queue is seeded once with every stop in the graph at a priority
/// equal to its straight-line distance from the source, then drained in
/// that fixed order while each popped stop's edges relax distances and
/// predecessors. Popped priorities are never refreshed, so the seed order
/// alone decides visitation; on graphs where geometry tracks the edge
/// weights this still finds the shortest path.
pub fn find_route_dijkstra(
    graph: &TransitGraph,
    source: NodeIndex,
    goal: NodeIndex,
    backend: QueueBackend,
) -> Option<Vec<Edge>> {
    match backend {
        QueueBackend::SortedVec => dijkstra_with(graph, source, goal, SortedVecQueue::new()),
        QueueBackend::BinaryHeap => dijkstra_with(graph, source, goal, BinaryHeapQueue::new()),
        QueueBackend::SearchTree => dijkstra_with(graph, source, goal, BstQueue::new()),
    }
}

fn dijkstra_with<Q: MinQueue<SeedEntry>>(
    graph: &TransitGraph,
    source: NodeIndex,
    goal: NodeIndex,
    mut queue: Q,
) -> Option<Vec<Edge>> {
    if source == goal {
        return Some(Vec::new());
    }

    let nodes = graph.nodes();
    let mut distances: Vec<f64> = vec![f64::INFINITY; nodes.len()];
    let mut edge_to: Vec<Option<Edge>> = vec![None; nodes.len()];

    let origin = graph.node(source);
    for (index, node) in nodes.iter().enumerate() {
        queue.push(SeedEntry {
            priority: FloatOrd(origin.distance_to(node)),
            node: index,
        });
    }
    distances[source] = 0.0;

    while let Some(entry) = queue.pop_min() {
        let current = entry.node;
        for edge in graph.neighbours(current) {
            let candidate = distances[current] + edge.distance;
            if candidate < distances[edge.target] {
                distances[edge.target] = candidate;
                edge_to[edge.target] = Some(edge.clone());
            }
        }
    }

    reconstruct(&edge_to, source, goal)
}

/// Follow predecessor edges backward from `goal`; `None` when the goal
/// never received one.
fn reconstruct(
    edge_to: &[Option<Edge>],
    source: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<Edge>> {
    let mut path = Vec::new();
    let mut cursor = goal;
    while cursor != source {
        let edge = edge_to[cursor].as_ref()?;
        path.push(edge.clone());
        cursor = edge.source;
    }
    path.reverse();
    Some(path)
}

/// Relaxation entry tracked per discovered stop. `edge` is `None` only for
/// the synthetic zero-distance entry at the source.
#[derive(Debug, Clone)]
struct Discovered {
    edge: Option<Edge>,
    distance: f64,
}

/// Relaxation-based Dijkstra without an auxiliary queue.
///
/// Discovered stops carry their best incoming edge and cumulative distance;
/// each round relaxes the current stop's edges, then a full linear scan
/// picks the unvisited discovered stop with the smallest distance (ties go
/// to the earliest-discovered). The walk ends at the goal, or with `None`
/// once no unvisited discovered stop remains.
pub fn find_route_linear(
    graph: &TransitGraph,
    source: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<Edge>> {
    if source == goal {
        return Some(Vec::new());
    }

    let mut discovered: HashMap<NodeIndex, Discovered> = HashMap::new();
    let mut discovery_order: Vec<NodeIndex> = Vec::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();

    discovered.insert(
        source,
        Discovered {
            edge: None,
            distance: 0.0,
        },
    );
    discovery_order.push(source);

    let mut current = source;
    let mut current_distance = 0.0;
    while current != goal {
        visited.insert(current);

        for edge in graph.neighbours(current) {
            let candidate = current_distance + edge.distance;
            match discovered.get(&edge.target) {
                None => {
                    discovered.insert(
                        edge.target,
                        Discovered {
                            edge: Some(edge.clone()),
                            distance: candidate,
                        },
                    );
                    discovery_order.push(edge.target);
                }
                Some(existing) if candidate < existing.distance => {
                    discovered.insert(
                        edge.target,
                        Discovered {
                            edge: Some(edge.clone()),
                            distance: candidate,
                        },
                    );
                }
                Some(_) => {}
            }
        }

        let mut next: Option<(NodeIndex, f64)> = None;
        for &node in &discovery_order {
            if visited.contains(&node) {
                continue;
            }
            let Some(entry) = discovered.get(&node) else {
                continue;
            };
            let better = match next {
                None => true,
                Some((_, best)) => entry.distance < best,
            };
            if better {
                next = Some((node, entry.distance));
            }
        }

        // Frontier exhausted before the goal: unreachable.
        let (node, distance) = next?;
        current = node;
        current_distance = distance;
    }

    let mut path = Vec::new();
    let mut cursor = goal;
    loop {
        let entry = discovered.get(&cursor)?;
        match &entry.edge {
            None => break,
            Some(edge) => {
                path.push(edge.clone());
                cursor = edge.source;
            }
        }
    }
    path.reverse();
    Some(path)
}

/// Partial-path frontier entry for the transfer-aware search.
///
/// The ordering is the search priority: cost, then raw distance, then
/// transfer count, then the trail itself as a deterministic tie-break. The
/// `edges` field mirrors the trail for reconstruction and stays out of the
/// comparison.
#[derive(Debug, Clone)]
struct SearchState {
    cost: FloatOrd,
    distance: FloatOrd,
    transfers: u32,
    trail: Vec<(NodeIndex, ServiceId)>,
    edges: Vec<Edge>,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
            && self.distance == other.distance
            && self.transfers == other.transfers
            && self.trail == other.trail
    }
}

impl Eq for SearchState {}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.distance.cmp(&other.distance))
            .then_with(|| self.transfers.cmp(&other.transfers))
            .then_with(|| self.trail.cmp(&other.trail))
    }
}

/// Best-first search over partial paths, penalizing service transfers.
///
/// Frontier states are whole paths, not stops; the visited key is the
/// (stop, service-used-to-arrive) pair so a stop may be revisited under a
/// different arriving service. The first pop whose trail ends at the goal
/// is minimal by the priority ordering and returns immediately with the
/// raw distance travelled. Switching services costs [`TRANSFER_PENALTY`]
/// (the first leg boards for free), and every leg costs [`STEP_COST`] on
/// top of its distance.
pub fn find_route_transfers(
    graph: &TransitGraph,
    source: NodeIndex,
    goal: NodeIndex,
    backend: QueueBackend,
) -> Option<(f64, Vec<Edge>)> {
    match backend {
        QueueBackend::SortedVec => transfers_with(graph, source, goal, SortedVecQueue::new()),
        QueueBackend::BinaryHeap => transfers_with(graph, source, goal, BinaryHeapQueue::new()),
        QueueBackend::SearchTree => transfers_with(graph, source, goal, BstQueue::new()),
    }
}

fn transfers_with<Q: MinQueue<SearchState>>(
    graph: &TransitGraph,
    source: NodeIndex,
    goal: NodeIndex,
    mut frontier: Q,
) -> Option<(f64, Vec<Edge>)> {
    let mut seen: HashSet<(NodeIndex, ServiceId)> = HashSet::new();

    frontier.push(SearchState {
        cost: FloatOrd(0.0),
        distance: FloatOrd(0.0),
        transfers: 0,
        trail: vec![(source, ServiceId::NONE)],
        edges: Vec::new(),
    });

    while let Some(state) = frontier.pop_min() {
        let &(node, service) = state.trail.last()?;

        if node == goal {
            return Some((state.distance.0, state.edges));
        }
        if !seen.insert((node, service)) {
            continue;
        }

        for edge in graph.neighbours(node) {
            let mut cost = state.cost.0 + edge.distance + STEP_COST;
            let mut transfers = state.transfers;
            if !state.edges.is_empty() && service != edge.service {
                cost += TRANSFER_PENALTY;
                transfers += 1;
            }

            let mut trail = state.trail.clone();
            trail.push((edge.target, edge.service));
            let mut edges = state.edges.clone();
            edges.push(edge.clone());

            frontier.push(SearchState {
                cost: FloatOrd(cost),
                distance: FloatOrd(state.distance.0 + edge.distance),
                transfers,
                trail,
                edges,
            });
        }
    }

    None
}
