use application::{Endpoints, RegistryService};
use std::sync::Arc;

/// Shared by every request handler.
pub struct AppState {
    pub endpoints: Endpoints,
}

impl AppState {
    pub fn new(service: Arc<dyn RegistryService>) -> Self {
        Self {
            endpoints: Endpoints::server(service),
        }
    }
}
