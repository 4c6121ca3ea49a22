//! Application layer: the registry service, its middleware and the
//! transport-neutral endpoint layer.

pub mod endpoint;
pub mod middleware;
pub mod service;

pub use endpoint::{CallError, Endpoint, Endpoints, Failure, Operation, Transport, TransportError};
pub use middleware::LoggingMiddleware;
pub use service::{Registry, RegistryService};
