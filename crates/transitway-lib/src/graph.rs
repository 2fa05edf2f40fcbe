use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::db::EdgeRecord;
use crate::error::{Error, Result};
use crate::model::{EdgeKind, Node, ServiceId};

/// Index of an interned stop within a [`TransitGraph`] arena.
pub type NodeIndex = usize;

/// A directed link between two interned stops.
///
/// Edges compare equal on every field but order by distance alone, so they
/// can ride in a priority queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub distance: f64,
    pub service: ServiceId,
    pub kind: EdgeKind,
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance.partial_cmp(&other.distance)
    }
}

/// Adjacency-list transit graph over an arena of interned stops.
///
/// Built once per query from flat edge records; immutable afterwards. Stops
/// are interned by id into the arena, and edges address them by index, so
/// the structure carries no ownership cycles.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
}

impl TransitGraph {
    /// Build a graph from flat edge records.
    ///
    /// Every stop exists because it is an endpoint of at least one record.
    /// A record whose distance is negative or non-finite is a fatal
    /// construction error.
    pub fn from_records(records: &[EdgeRecord]) -> Result<Self> {
        let mut graph = TransitGraph::default();
        for record in records {
            if !record.distance.is_finite() || record.distance < 0.0 {
                return Err(Error::InvalidRecord {
                    message: format!(
                        "edge {} -> {} has invalid distance {}",
                        record.source_id, record.destination_id, record.distance
                    ),
                });
            }

            let source = graph.intern(record.source_node());
            let target = graph.intern(record.destination_node());
            graph.add_edge(Edge {
                source,
                target,
                distance: record.distance,
                service: record.service,
                kind: record.edge_kind,
            });
        }
        Ok(graph)
    }

    /// Intern a stop by id; the first record to mention an id wins the slot.
    fn intern(&mut self, node: Node) -> NodeIndex {
        if let Some(&index) = self.index_by_id.get(&node.id) {
            return index;
        }
        let index = self.nodes.len();
        self.index_by_id.insert(node.id.clone(), index);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        index
    }

    /// An edge is a duplicate iff one with the same source, destination,
    /// and kind is already stored; the first record wins. Distinct kinds
    /// between the same pair coexist.
    fn add_edge(&mut self, edge: Edge) {
        let outgoing = &mut self.adjacency[edge.source];
        if outgoing
            .iter()
            .any(|existing| existing.target == edge.target && existing.kind == edge.kind)
        {
            debug!(
                source = edge.source,
                target = edge.target,
                kind = %edge.kind,
                "dropping duplicate edge"
            );
            return;
        }
        outgoing.push(edge);
    }

    /// Return the outgoing edges for a given stop index.
    pub fn neighbours(&self, node: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The interned stop at `index`. Indices must come from this graph.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// All interned stops, in interning order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Resolve a stop id to its arena index.
    pub fn resolve(&self, id: &str) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    /// Number of interned stops.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}
