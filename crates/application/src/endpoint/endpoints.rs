use std::sync::Arc;

use domain::{Node, Region, User};

use super::{
    AddNodeRequest, AddRegionRequest, AddUserRequest, AuthUserRequest, CallError,
    DeleteNodeRequest, DeleteUserRequest, Endpoint, Failure, GetNodeRequest, GetUserRequest,
    ListNodesRequest, ListRegionsRequest, ListUserRequest, Operation, ServiceEndpoint, Transport,
    UpdateNodeRequest, UpdateUserRequest,
};
use crate::service::RegistryService;

/// One endpoint per registry operation.
///
/// Built over the in-process service by the server and over a remote
/// transport by clients. The convenience methods collapse both failure
/// channels into a [`CallError`].
#[derive(Clone)]
pub struct Endpoints {
    pub auth_user: Arc<dyn Endpoint<AuthUserRequest>>,
    pub get_user: Arc<dyn Endpoint<GetUserRequest>>,
    pub add_user: Arc<dyn Endpoint<AddUserRequest>>,
    pub list_users: Arc<dyn Endpoint<ListUserRequest>>,
    pub delete_user: Arc<dyn Endpoint<DeleteUserRequest>>,
    pub update_user: Arc<dyn Endpoint<UpdateUserRequest>>,
    pub add_node: Arc<dyn Endpoint<AddNodeRequest>>,
    pub get_node: Arc<dyn Endpoint<GetNodeRequest>>,
    pub list_nodes: Arc<dyn Endpoint<ListNodesRequest>>,
    pub delete_node: Arc<dyn Endpoint<DeleteNodeRequest>>,
    pub update_node: Arc<dyn Endpoint<UpdateNodeRequest>>,
    pub add_region: Arc<dyn Endpoint<AddRegionRequest>>,
    pub list_regions: Arc<dyn Endpoint<ListRegionsRequest>>,
}

impl Endpoints {
    /// Route every operation through `transport`.
    pub fn new<T: Transport>(transport: Arc<T>) -> Self {
        Self {
            auth_user: transport.clone(),
            get_user: transport.clone(),
            add_user: transport.clone(),
            list_users: transport.clone(),
            delete_user: transport.clone(),
            update_user: transport.clone(),
            add_node: transport.clone(),
            get_node: transport.clone(),
            list_nodes: transport.clone(),
            delete_node: transport.clone(),
            update_node: transport.clone(),
            add_region: transport.clone(),
            list_regions: transport,
        }
    }

    /// Endpoints that call `service` directly.
    pub fn server(service: Arc<dyn RegistryService>) -> Self {
        Self::new(Arc::new(ServiceEndpoint::new(service)))
    }

    pub async fn auth_user(&self, id: &str, password: &str) -> Result<(), CallError> {
        let request = AuthUserRequest {
            id: id.to_string(),
            password: password.to_string(),
        };
        dispatch(self.auth_user.as_ref(), request).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, CallError> {
        let request = GetUserRequest { id: id.to_string() };
        dispatch(self.get_user.as_ref(), request).await
    }

    pub async fn add_user(&self, user: User) -> Result<(), CallError> {
        dispatch(self.add_user.as_ref(), AddUserRequest { user }).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CallError> {
        dispatch(self.list_users.as_ref(), ListUserRequest {}).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), CallError> {
        let request = DeleteUserRequest { id: id.to_string() };
        dispatch(self.delete_user.as_ref(), request).await
    }

    pub async fn update_user(&self, id: &str, user: User) -> Result<User, CallError> {
        let request = UpdateUserRequest {
            id: id.to_string(),
            user,
        };
        dispatch(self.update_user.as_ref(), request).await
    }

    pub async fn add_node(&self, node: Node) -> Result<(), CallError> {
        dispatch(self.add_node.as_ref(), AddNodeRequest { node }).await
    }

    pub async fn get_node(&self, id: &str) -> Result<Node, CallError> {
        let request = GetNodeRequest { id: id.to_string() };
        dispatch(self.get_node.as_ref(), request).await
    }

    pub async fn list_nodes(&self) -> Result<Vec<Node>, CallError> {
        dispatch(self.list_nodes.as_ref(), ListNodesRequest {}).await
    }

    pub async fn delete_node(&self, id: &str) -> Result<(), CallError> {
        let request = DeleteNodeRequest { id: id.to_string() };
        dispatch(self.delete_node.as_ref(), request).await
    }

    pub async fn update_node(&self, id: &str, node: Node) -> Result<Node, CallError> {
        let request = UpdateNodeRequest {
            id: id.to_string(),
            node,
        };
        dispatch(self.update_node.as_ref(), request).await
    }

    pub async fn add_region(&self, region: Region) -> Result<(), CallError> {
        dispatch(self.add_region.as_ref(), AddRegionRequest { region }).await
    }

    pub async fn list_regions(&self) -> Result<Vec<Region>, CallError> {
        dispatch(self.list_regions.as_ref(), ListRegionsRequest {}).await
    }
}

async fn dispatch<R: Operation>(
    endpoint: &dyn Endpoint<R>,
    request: R,
) -> Result<<R::Response as Failure>::Value, CallError> {
    let response = endpoint.call(request).await?;
    Ok(response.into_result()?)
}
