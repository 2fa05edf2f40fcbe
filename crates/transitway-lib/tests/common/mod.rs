// Shared fixtures for `transitway-lib` integration tests.
#![allow(dead_code)]

use transitway_lib::{
    EdgeKind, EdgeRecord, NodeIndex, NodeKind, ServiceId, TransitGraph, TransitNetwork,
};

/// Phonetic display name for a single-letter stop id.
fn name_for(id: &str) -> String {
    match id {
        "A" => "Alpha".to_string(),
        "B" => "Bravo".to_string(),
        "C" => "Charlie".to_string(),
        "D" => "Delta".to_string(),
        "E" => "Echo".to_string(),
        "F" => "Foxtrot".to_string(),
        other => other.to_string(),
    }
}

/// Longitude offset per stop id, spreading stops along the equator so
/// straight-line distances stay small, distinct, and ordered by id.
fn offset_for(id: &str) -> f64 {
    id.bytes().map(f64::from).sum::<f64>() * 0.001
}

/// Build an edge record between two synthetic stops.
pub fn record(from: &str, to: &str, distance: f64, service: u32, kind: EdgeKind) -> EdgeRecord {
    let node_kind = |k: EdgeKind| match k {
        EdgeKind::Walk => NodeKind::Residential,
        EdgeKind::Bus => NodeKind::BusStop,
        EdgeKind::Rail => NodeKind::RailStation,
    };

    EdgeRecord {
        source_id: from.to_string(),
        source_name: name_for(from),
        source_lat: 0.0,
        source_long: offset_for(from),
        source_kind: node_kind(kind),
        source_description: format!("stop {from}"),
        destination_id: to.to_string(),
        destination_name: name_for(to),
        destination_lat: 0.0,
        destination_long: offset_for(to),
        destination_kind: node_kind(kind),
        destination_description: format!("stop {to}"),
        distance,
        service: ServiceId(service),
        edge_kind: kind,
    }
}

/// Walking link carrying no service.
pub fn walk(from: &str, to: &str, distance: f64) -> EdgeRecord {
    record(from, to, distance, 0, EdgeKind::Walk)
}

/// Bus link on the given service.
pub fn bus(from: &str, to: &str, distance: f64, service: u32) -> EdgeRecord {
    record(from, to, distance, service, EdgeKind::Bus)
}

pub fn graph(records: &[EdgeRecord]) -> TransitGraph {
    TransitGraph::from_records(records).expect("records build a graph")
}

pub fn index(graph: &TransitGraph, id: &str) -> NodeIndex {
    graph.resolve(id).expect("stop interned")
}

pub fn network(records: Vec<EdgeRecord>) -> TransitNetwork {
    TransitNetwork::from_records(records)
}
