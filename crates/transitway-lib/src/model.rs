use std::fmt;

use serde::{Deserialize, Serialize};

/// Degrees-to-radians factor used by the haversine computation.
const DEG_TO_RAD: f64 = 0.017_453_292_519_943_295;

/// Earth diameter in kilometres, as used by the haversine computation.
const EARTH_DIAMETER_KM: f64 = 12_742.0;

/// Classification for a stop in the transit network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Residential,
    BusStop,
    RailStation,
}

impl NodeKind {
    /// Parse the storage string used in the `nodes` table.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(Self::Residential),
            "bus_stop" => Some(Self::BusStop),
            "rail_station" => Some(Self::RailStation),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::BusStop => "bus_stop",
            Self::RailStation => "rail_station",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification for a link in the transit network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Walk,
    Bus,
    Rail,
}

impl EdgeKind {
    /// Parse the storage string used in the `edge` table.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "walk" => Some(Self::Walk),
            "bus" => Some(Self::Bus),
            "rail" => Some(Self::Rail),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Bus => "bus",
            Self::Rail => "rail",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier for a scheduled bus service. [`ServiceId::NONE`] marks links
/// that do not belong to a bus service (walking and rail links carry it).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ServiceId(pub u32);

impl ServiceId {
    pub const NONE: ServiceId = ServiceId(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stop or place in the transit network.
///
/// Nodes are immutable once constructed and compare structurally on every
/// field. They are addressed by arena index inside a graph, so they never
/// need to act as hash keys themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub long: f64,
    pub kind: NodeKind,
}

impl Node {
    /// Great-circle distance to another stop in kilometres, via the
    /// haversine formula, rounded to two decimal places.
    ///
    /// The constants are fixed so the result is bit-reproducible: it doubles
    /// as the seeding heuristic for the queue-driven solver.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let a = 0.5 - ((other.lat - self.lat) * DEG_TO_RAD).cos() / 2.0
            + (self.lat * DEG_TO_RAD).cos()
                * (other.lat * DEG_TO_RAD).cos()
                * (1.0 - ((other.long - self.long) * DEG_TO_RAD).cos())
                / 2.0;
        let km = EARTH_DIAMETER_KM * a.sqrt().asin();
        (km * 100.0).round() / 100.0
    }
}
