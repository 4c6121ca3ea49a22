//! HTTP+JSON binding of the endpoint layer.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{collections::HashMap, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::warn;

use application::endpoint::{
    AddNodeRequest, AddRegionRequest, AddUserRequest, AuthUserRequest, DeleteNodeRequest,
    DeleteUserRequest, GetNodeRequest, GetUserRequest, ListNodesRequest, ListRegionsRequest,
    ListUserRequest, UpdateNodeRequest, UpdateUserRequest,
};
use application::{Endpoint, Failure, Operation, TransportError};
use domain::DomainError;

use crate::state::AppState;

type PathParams = Path<HashMap<String, String>>;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/{id}", get(auth_user))
        .route("/users", post(add_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).delete(delete_user).patch(update_user),
        )
        .route("/regions", post(add_region).get(list_regions))
        .route("/nodes", post(add_node).get(list_nodes))
        .route(
            "/nodes/{id}",
            get(get_node).delete(delete_node).patch(update_node),
        )
        .fallback(no_route)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Everything a handler can fail with, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    Transport(TransportError),
    Domain(DomainError),
    /// The request matched no route, or no handler for its method.
    Unrouted { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Transport(TransportError::Decode(_)) => StatusCode::BAD_REQUEST,
            ApiError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Domain(err) => domain_status(err),
            ApiError::Unrouted { status, .. } => *status,
        }
    }
}

/// HTTP status for a domain error embedded in a response.
pub fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::UserNotFound | DomainError::NodeNotFound | DomainError::RegionNotFound => {
            StatusCode::NOT_FOUND
        }
        DomainError::InvalidEmail
        | DomainError::ShortPassword
        | DomainError::InvalidMacAddress
        | DomainError::InvalidNodeType
        | DomainError::BadBodyRequest => StatusCode::BAD_REQUEST,
        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::UserNotUpdated
        | DomainError::IdGeneration(_)
        | DomainError::Hashing(_)
        | DomainError::Storage(_)
        | DomainError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Transport(err) => err.to_string(),
            ApiError::Domain(err) => err.to_string(),
            ApiError::Unrouted { message, .. } => message.clone(),
        };
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn no_route(method: Method, uri: Uri) -> ApiError {
    ApiError::Unrouted {
        status: StatusCode::NOT_FOUND,
        message: format!("no route for {} {}", method, uri.path()),
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::Unrouted {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: format!("method {} not allowed on {}", method, uri.path()),
    }
}

fn path_id(params: &HashMap<String, String>) -> Result<String, ApiError> {
    params
        .get("id")
        .cloned()
        .ok_or(ApiError::Transport(TransportError::BadRouting))
}

/// Decode a JSON body; an empty body yields the request's default.
fn decode_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Transport(TransportError::Decode(e.to_string())))
}

/// Call the endpoint and encode its response, promoting an embedded domain
/// error to an error status.
async fn serve<R>(endpoint: &dyn Endpoint<R>, request: R) -> Result<Response, ApiError>
where
    R: Operation,
    R::Response: Serialize,
{
    let response = endpoint.call(request).await.map_err(ApiError::Transport)?;
    if let Some(err) = response.failed() {
        return Err(ApiError::Domain(err.clone()));
    }
    Ok(Json(response).into_response())
}

async fn auth_user(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
    body: Bytes,
) -> Result<Response, ApiError> {
    let mut request: AuthUserRequest = decode_body(&body)?;
    request.id = path_id(&params)?;
    serve(state.endpoints.auth_user.as_ref(), request).await
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
) -> Result<Response, ApiError> {
    let request = GetUserRequest {
        id: path_id(&params)?,
    };
    serve(state.endpoints.get_user.as_ref(), request).await
}

async fn add_user(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    let request: AddUserRequest = decode_body(&body)?;
    serve(state.endpoints.add_user.as_ref(), request).await
}

async fn list_users(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    let request: ListUserRequest = decode_body(&body)?;
    serve(state.endpoints.list_users.as_ref(), request).await
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
) -> Result<Response, ApiError> {
    let request = DeleteUserRequest {
        id: path_id(&params)?,
    };
    serve(state.endpoints.delete_user.as_ref(), request).await
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
    body: Bytes,
) -> Result<Response, ApiError> {
    let mut request: UpdateUserRequest = decode_body(&body)?;
    request.id = path_id(&params)?;
    serve(state.endpoints.update_user.as_ref(), request).await
}

async fn add_region(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    let request: AddRegionRequest = decode_body(&body)?;
    serve(state.endpoints.add_region.as_ref(), request).await
}

async fn list_regions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ListRegionsRequest = decode_body(&body)?;
    serve(state.endpoints.list_regions.as_ref(), request).await
}

async fn get_node(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
) -> Result<Response, ApiError> {
    let request = GetNodeRequest {
        id: path_id(&params)?,
    };
    serve(state.endpoints.get_node.as_ref(), request).await
}

async fn add_node(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    let request: AddNodeRequest = decode_body(&body)?;
    serve(state.endpoints.add_node.as_ref(), request).await
}

async fn list_nodes(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ApiError> {
    let request: ListNodesRequest = decode_body(&body)?;
    serve(state.endpoints.list_nodes.as_ref(), request).await
}

async fn delete_node(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
) -> Result<Response, ApiError> {
    let request = DeleteNodeRequest {
        id: path_id(&params)?,
    };
    serve(state.endpoints.delete_node.as_ref(), request).await
}

async fn update_node(
    State(state): State<Arc<AppState>>,
    Path(params): PathParams,
    body: Bytes,
) -> Result<Response, ApiError> {
    let mut request: UpdateNodeRequest = decode_body(&body)?;
    request.id = path_id(&params)?;
    serve(state.endpoints.update_node.as_ref(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(domain_status(&DomainError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(domain_status(&DomainError::NodeNotFound), StatusCode::NOT_FOUND);
        assert_eq!(domain_status(&DomainError::ShortPassword), StatusCode::BAD_REQUEST);
        assert_eq!(
            domain_status(&DomainError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            domain_status(&DomainError::AlreadyExists("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_status(&DomainError::UserNotUpdated),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_path_id_is_bad_routing() {
        let err = path_id(&HashMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::BadRouting)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unrouted_requests_carry_status() {
        let err = no_route(Method::GET, Uri::from_static("/users/")).await;
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = method_not_allowed(Method::PUT, Uri::from_static("/users")).await;
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_empty_body_decodes_to_default() {
        let request: UpdateUserRequest = decode_body(&Bytes::new()).unwrap();
        assert_eq!(request, UpdateUserRequest::default());
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let err = decode_body::<AddUserRequest>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
