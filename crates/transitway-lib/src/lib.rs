//! Transitway library entry points.
//!
//! This crate loads a transit network snapshot from sqlite, builds graph
//! representations, and runs the shortest-path solvers behind the route
//! planner. Higher-level consumers (the HTTP service) should only depend on
//! the types exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod db;
pub mod error;
pub mod graph;
pub mod model;
pub mod path;
pub mod queue;
pub mod routing;

pub use db::{load_network, EdgeRecord, TransitNetwork};
pub use error::{Error, Result};
pub use graph::{Edge, NodeIndex, TransitGraph};
pub use model::{EdgeKind, Node, NodeKind, ServiceId};
pub use queue::{BinaryHeapQueue, BstQueue, MinQueue, QueueBackend, SortedVecQueue};
pub use routing::{
    plan_route, PathSolver, RouteAlgorithm, RouteLeg, RoutePlan, RouteRequest,
};
