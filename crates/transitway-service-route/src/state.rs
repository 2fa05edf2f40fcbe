//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;

use transitway_lib::{load_network, Result, TransitNetwork};

/// Cheaply cloneable handle on the loaded transit network.
///
/// The network is read-only after startup; every request builds its own
/// graph and solver state from it.
#[derive(Clone)]
pub struct AppState {
    network: Arc<TransitNetwork>,
}

impl AppState {
    /// Load the network from a sqlite database file.
    pub fn load(path: &Path) -> Result<Self> {
        let network = load_network(path)?;
        Ok(Self {
            network: Arc::new(network),
        })
    }

    /// Wrap an already-loaded network (used by tests).
    pub fn from_network(network: TransitNetwork) -> Self {
        Self {
            network: Arc::new(network),
        }
    }

    pub fn network(&self) -> &TransitNetwork {
        &self.network
    }
}
