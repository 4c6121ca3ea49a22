//! Binds each request to the service method it drives.

use async_trait::async_trait;

use super::Operation;
use super::requests::*;
use super::responses::*;
use crate::service::RegistryService;

#[async_trait]
impl Operation for AuthUserRequest {
    const NAME: &'static str = "auth_user";
    type Response = AuthUserResponse;

    async fn invoke(self, service: &dyn RegistryService) -> AuthUserResponse {
        service.auth_user(&self.id, &self.password).await.into()
    }
}

#[async_trait]
impl Operation for GetUserRequest {
    const NAME: &'static str = "get_user";
    type Response = GetUserResponse;

    async fn invoke(self, service: &dyn RegistryService) -> GetUserResponse {
        service.get_user(&self.id).await.into()
    }
}

#[async_trait]
impl Operation for AddUserRequest {
    const NAME: &'static str = "add_user";
    type Response = AddUserResponse;

    async fn invoke(self, service: &dyn RegistryService) -> AddUserResponse {
        service.add_user(self.user).await.into()
    }
}

#[async_trait]
impl Operation for ListUserRequest {
    const NAME: &'static str = "list_users";
    type Response = ListUserResponse;

    async fn invoke(self, service: &dyn RegistryService) -> ListUserResponse {
        service.list_users().await.into()
    }
}

#[async_trait]
impl Operation for DeleteUserRequest {
    const NAME: &'static str = "delete_user";
    type Response = DeleteUserResponse;

    async fn invoke(self, service: &dyn RegistryService) -> DeleteUserResponse {
        service.delete_user(&self.id).await.into()
    }
}

#[async_trait]
impl Operation for UpdateUserRequest {
    const NAME: &'static str = "update_user";
    type Response = UpdateUserResponse;

    async fn invoke(self, service: &dyn RegistryService) -> UpdateUserResponse {
        service.update_user(&self.id, self.user).await.into()
    }
}

#[async_trait]
impl Operation for AddNodeRequest {
    const NAME: &'static str = "add_node";
    type Response = AddNodeResponse;

    async fn invoke(self, service: &dyn RegistryService) -> AddNodeResponse {
        service.add_node(self.node).await.into()
    }
}

#[async_trait]
impl Operation for GetNodeRequest {
    const NAME: &'static str = "get_node";
    type Response = GetNodeResponse;

    async fn invoke(self, service: &dyn RegistryService) -> GetNodeResponse {
        service.get_node(&self.id).await.into()
    }
}

#[async_trait]
impl Operation for ListNodesRequest {
    const NAME: &'static str = "list_nodes";
    type Response = ListNodesResponse;

    async fn invoke(self, service: &dyn RegistryService) -> ListNodesResponse {
        service.list_nodes().await.into()
    }
}

#[async_trait]
impl Operation for DeleteNodeRequest {
    const NAME: &'static str = "delete_node";
    type Response = DeleteNodeResponse;

    async fn invoke(self, service: &dyn RegistryService) -> DeleteNodeResponse {
        service.delete_node(&self.id).await.into()
    }
}

#[async_trait]
impl Operation for UpdateNodeRequest {
    const NAME: &'static str = "update_node";
    type Response = UpdateNodeResponse;

    async fn invoke(self, service: &dyn RegistryService) -> UpdateNodeResponse {
        service.update_node(&self.id, self.node).await.into()
    }
}

#[async_trait]
impl Operation for AddRegionRequest {
    const NAME: &'static str = "add_region";
    type Response = AddRegionResponse;

    async fn invoke(self, service: &dyn RegistryService) -> AddRegionResponse {
        service.add_region(self.region).await.into()
    }
}

#[async_trait]
impl Operation for ListRegionsRequest {
    const NAME: &'static str = "list_regions";
    type Response = ListRegionsResponse;

    async fn invoke(self, service: &dyn RegistryService) -> ListRegionsResponse {
        service.list_regions().await.into()
    }
}
