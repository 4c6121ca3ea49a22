//! Transport-neutral endpoint layer.
//!
//! Every service operation is exposed as a uniform call taking a typed
//! request and yielding a typed response (or a transport failure). The same
//! [`Endpoints`] bundle is built over the local service on the server side and
//! over a remote transport on the client side.

mod endpoints;
mod operations;
pub mod requests;
pub mod responses;

pub use endpoints::Endpoints;
pub use requests::*;
pub use responses::*;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use domain::DomainError;

use crate::service::RegistryService;

/// Failures of the transport itself, as opposed to domain failures which
/// travel inside the response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("inconsistent mapping between route and handler (programmer error)")]
    BadRouting,

    #[error("encoding request failed: {0}")]
    Encode(String),

    #[error("decoding failed: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Request(String),

    /// Non-success status from a remote registry with its error message.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
}

/// Outcome of a convenience call on [`Endpoints`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A request that knows which service method it drives.
#[async_trait]
pub trait Operation: Send + Sized + 'static {
    /// Stable operation name used in logs.
    const NAME: &'static str;

    type Response: Failure + Send + 'static;

    async fn invoke(self, service: &dyn RegistryService) -> Self::Response;
}

/// One callable operation, local or remote.
#[async_trait]
pub trait Endpoint<R: Operation>: Send + Sync {
    async fn call(&self, request: R) -> Result<R::Response, TransportError>;
}

/// Anything able to carry every registry operation.
pub trait Transport:
    Endpoint<AuthUserRequest>
    + Endpoint<GetUserRequest>
    + Endpoint<AddUserRequest>
    + Endpoint<ListUserRequest>
    + Endpoint<DeleteUserRequest>
    + Endpoint<UpdateUserRequest>
    + Endpoint<AddNodeRequest>
    + Endpoint<GetNodeRequest>
    + Endpoint<ListNodesRequest>
    + Endpoint<DeleteNodeRequest>
    + Endpoint<UpdateNodeRequest>
    + Endpoint<AddRegionRequest>
    + Endpoint<ListRegionsRequest>
    + 'static
{
}

impl<T> Transport for T where
    T: Endpoint<AuthUserRequest>
        + Endpoint<GetUserRequest>
        + Endpoint<AddUserRequest>
        + Endpoint<ListUserRequest>
        + Endpoint<DeleteUserRequest>
        + Endpoint<UpdateUserRequest>
        + Endpoint<AddNodeRequest>
        + Endpoint<GetNodeRequest>
        + Endpoint<ListNodesRequest>
        + Endpoint<DeleteNodeRequest>
        + Endpoint<UpdateNodeRequest>
        + Endpoint<AddRegionRequest>
        + Endpoint<ListRegionsRequest>
        + 'static
{
}

/// Serves requests by calling the service in process. Never fails at the
/// transport level.
pub struct ServiceEndpoint {
    service: Arc<dyn RegistryService>,
}

impl ServiceEndpoint {
    pub fn new(service: Arc<dyn RegistryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: Operation> Endpoint<R> for ServiceEndpoint {
    async fn call(&self, request: R) -> Result<R::Response, TransportError> {
        tracing::trace!(operation = R::NAME, "dispatching to service");
        Ok(request.invoke(self.service.as_ref()).await)
    }
}
