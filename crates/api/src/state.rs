use std::sync::Arc;

use spasibka_engine::Engine;
use spasibka_events::RosterProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the engine is a pool handle and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub config: Arc<ServerConfig>,
    /// Employee directory used by the manual sync route. `None` when no
    /// Bitrix24 webhook is configured.
    pub roster_provider: Option<Arc<dyn RosterProvider>>,
}
