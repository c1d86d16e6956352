use std::sync::Arc;

use crate::registry::RouteTable;

/// Handle to [`AppState`] shared by every handler.
pub type SharedState = Arc<AppState>;

/// Central application state holding the live route table.
pub struct AppState {
    routes: RouteTable,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(routes: RouteTable) -> SharedState {
        Arc::new(Self { routes })
    }

    /// Operations currently served by the router.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}
