use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{EdgeKind, Node, NodeKind, ServiceId};

/// Similarity floor below which a stop name is not worth suggesting.
const FUZZY_THRESHOLD: f64 = 0.6;

const SELECT_STOPS: &str = "SELECT id, name, description, lat, long, kind FROM nodes";

/// Two-way join resolving both endpoints of every edge in a single query.
/// Edges referencing a stop missing from `nodes` drop out of the join.
const SELECT_EDGES: &str = "\
    SELECT
        edge.source AS source_id,
        nodes.name AS source_name,
        nodes.lat AS source_lat,
        nodes.long AS source_long,
        nodes.kind AS source_kind,
        nodes.description AS source_description,
        edge.destination AS destination_id,
        n2.name AS destination_name,
        n2.lat AS destination_lat,
        n2.long AS destination_long,
        n2.kind AS destination_kind,
        n2.description AS destination_description,
        edge.distance AS distance,
        edge.service AS service,
        edge.kind AS edge_kind
    FROM nodes
    JOIN edge ON nodes.id = edge.source
    JOIN nodes n2 ON n2.id = edge.destination";

/// Flat adjacency row consumed by the graph builder.
///
/// This is the only shape the core understands; the sqlite loader produces
/// it, and tests fabricate it directly without touching a database.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub source_id: String,
    pub source_name: String,
    pub source_lat: f64,
    pub source_long: f64,
    pub source_kind: NodeKind,
    pub source_description: String,
    pub destination_id: String,
    pub destination_name: String,
    pub destination_lat: f64,
    pub destination_long: f64,
    pub destination_kind: NodeKind,
    pub destination_description: String,
    pub distance: f64,
    pub service: ServiceId,
    pub edge_kind: EdgeKind,
}

impl EdgeRecord {
    /// The source endpoint as a standalone stop value.
    pub fn source_node(&self) -> Node {
        Node {
            id: self.source_id.clone(),
            name: self.source_name.clone(),
            description: self.source_description.clone(),
            lat: self.source_lat,
            long: self.source_long,
            kind: self.source_kind,
        }
    }

    /// The destination endpoint as a standalone stop value.
    pub fn destination_node(&self) -> Node {
        Node {
            id: self.destination_id.clone(),
            name: self.destination_name.clone(),
            description: self.destination_description.clone(),
            lat: self.destination_lat,
            long: self.destination_long,
            kind: self.destination_kind,
        }
    }
}

/// In-memory snapshot of the transit network: the flat edge records the
/// graph builder consumes, plus a stop directory for lookup by id or name.
///
/// Immutable after loading; safe to share read-only across queries.
#[derive(Debug, Clone, Default)]
pub struct TransitNetwork {
    pub records: Vec<EdgeRecord>,
    pub stops: HashMap<String, Node>,
    pub name_to_id: HashMap<String, String>,
}

impl TransitNetwork {
    /// Build a network from edge records alone, deriving the stop directory
    /// from the record endpoints. Useful when no `nodes` table exists.
    pub fn from_records(records: Vec<EdgeRecord>) -> Self {
        let mut stops = HashMap::new();
        for record in &records {
            stops
                .entry(record.source_id.clone())
                .or_insert_with(|| record.source_node());
            stops
                .entry(record.destination_id.clone())
                .or_insert_with(|| record.destination_node());
        }
        let name_to_id = stops
            .values()
            .map(|stop| (stop.name.clone(), stop.id.clone()))
            .collect();

        Self {
            records,
            stops,
            name_to_id,
        }
    }

    /// Lookup a stop by its identifier.
    pub fn stop_by_id(&self, id: &str) -> Option<&Node> {
        self.stops.get(id)
    }

    /// Lookup a stop by its exact display name.
    pub fn stop_by_name(&self, name: &str) -> Option<&Node> {
        self.name_to_id.get(name).and_then(|id| self.stops.get(id))
    }

    /// All stops ordered by display name.
    pub fn stops_by_name(&self) -> Vec<&Node> {
        let mut stops: Vec<&Node> = self.stops.values().collect();
        stops.sort_by(|a, b| a.name.cmp(&b.name));
        stops
    }

    /// Closest stop names to `query`, best first, by Jaro-Winkler
    /// similarity. Names below the similarity floor are not suggested.
    pub fn fuzzy_stop_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .stops
            .values()
            .map(|stop| {
                (
                    strsim::jaro_winkler(&needle, &stop.name.to_lowercase()),
                    stop.name.as_str(),
                )
            })
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// Load the stop directory and edge records from a sqlite database.
///
/// A missing file is a fatal startup error, as is any row that cannot be
/// mapped to a record (missing column, unknown kind string).
pub fn load_network(db_path: &Path) -> Result<TransitNetwork> {
    if !db_path.is_file() {
        return Err(Error::DatabaseNotFound {
            path: db_path.to_path_buf(),
        });
    }

    let connection = Connection::open(db_path)?;
    let stops = load_stops(&connection)?;
    let records = load_edge_records(&connection)?;
    debug!(
        stops = stops.len(),
        records = records.len(),
        path = %db_path.display(),
        "loaded transit network"
    );

    let name_to_id = stops
        .values()
        .map(|stop| (stop.name.clone(), stop.id.clone()))
        .collect();

    Ok(TransitNetwork {
        records,
        stops,
        name_to_id,
    })
}

fn load_stops(connection: &Connection) -> Result<HashMap<String, Node>> {
    let mut statement = connection.prepare(SELECT_STOPS)?;
    let mut rows = statement.query([])?;

    let mut stops = HashMap::new();
    while let Some(row) = rows.next()? {
        let stop = stop_from_row(row)?;
        stops.insert(stop.id.clone(), stop);
    }
    Ok(stops)
}

fn load_edge_records(connection: &Connection) -> Result<Vec<EdgeRecord>> {
    let mut statement = connection.prepare(SELECT_EDGES)?;
    let mut rows = statement.query([])?;

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(edge_record_from_row(row)?);
    }
    Ok(records)
}

fn stop_from_row(row: &Row<'_>) -> Result<Node> {
    let kind: String = row.get("kind")?;
    let kind = parse_node_kind(&kind)?;
    Ok(Node {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        lat: row.get("lat")?,
        long: row.get("long")?,
        kind,
    })
}

fn edge_record_from_row(row: &Row<'_>) -> Result<EdgeRecord> {
    let source_kind: String = row.get("source_kind")?;
    let destination_kind: String = row.get("destination_kind")?;
    let edge_kind: String = row.get("edge_kind")?;
    let service: u32 = row.get("service")?;

    Ok(EdgeRecord {
        source_id: row.get("source_id")?,
        source_name: row.get("source_name")?,
        source_lat: row.get("source_lat")?,
        source_long: row.get("source_long")?,
        source_kind: parse_node_kind(&source_kind)?,
        source_description: row.get("source_description")?,
        destination_id: row.get("destination_id")?,
        destination_name: row.get("destination_name")?,
        destination_lat: row.get("destination_lat")?,
        destination_long: row.get("destination_long")?,
        destination_kind: parse_node_kind(&destination_kind)?,
        destination_description: row.get("destination_description")?,
        distance: row.get("distance")?,
        service: ServiceId(service),
        edge_kind: parse_edge_kind(&edge_kind)?,
    })
}

fn parse_node_kind(value: &str) -> Result<NodeKind> {
    NodeKind::parse(value).ok_or_else(|| Error::InvalidRecord {
        message: format!("unknown stop kind '{value}'"),
    })
}

fn parse_edge_kind(value: &str) -> Result<EdgeKind> {
    EdgeKind::parse(value).ok_or_else(|| Error::InvalidRecord {
        message: format!("unknown edge kind '{value}'"),
    })
}
